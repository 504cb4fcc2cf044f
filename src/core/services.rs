//! Unified service container for kindex
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::indexer::KnowledgeIndexer;
use crate::core::storage::VectorStore;
use crate::core::watcher::{NotifyBackend, WatchBackend};
use std::sync::Arc;

/// Unified services container
///
/// The HTTP and CLI adapters use this same struct for service access.
/// It owns the single indexer instance for the process.
#[derive(Clone)]
pub struct Services {
    /// Vector store shared with the indexer
    pub store: VectorStore,

    /// Watch-driven indexer
    pub indexer: KnowledgeIndexer,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration with native file watching
    pub fn new(config: Config) -> Self {
        Self::with_watch_backend(config, Arc::new(NotifyBackend::new()))
    }

    /// Create services with an explicit watch backend
    pub fn with_watch_backend(config: Config, backend: Arc<dyn WatchBackend>) -> Self {
        let store = VectorStore::from_config(&config);
        let indexer = KnowledgeIndexer::new(&config, store.clone(), backend);

        Self {
            store,
            indexer,
            config: Arc::new(config),
        }
    }
}
