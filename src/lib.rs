//! kindex - File-Watching Knowledge Indexer
//!
//! Watches site source trees, extracts prose content from page
//! components into classified chunks, and keeps a vector store in
//! sync for a chat assistant's retrieval step.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (transport-agnostic)
//!   - config, error, types, xdg
//!   - storage (vector backends, cosine search)
//!   - indexer (chunking, walking, debounced indexing)
//!   - watcher (notify-based watch capability)
//!   - services (unified service container)
//!
//! - **http**: REST control surface (depends on core)
//!   - handlers, middleware
//!
//! - **cli**: Command-line control surface (depends on core)
//!
//! # Key Features
//!
//! - Per-path debouncing of filesystem events
//! - Single busy flag serializing all store writes
//! - Replace-not-append re-indexing keyed by source path
//! - Flag-gated store that degrades to no-ops instead of failing

// Core domain logic (transport-agnostic)
pub mod core;

// HTTP control adapter
pub mod http;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{KindexError, Result};
pub use core::indexer::KnowledgeIndexer;
pub use core::services::Services;
pub use core::storage::VectorStore;
pub use core::types::*;
