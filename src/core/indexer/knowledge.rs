//! Watch-driven knowledge indexer.
//!
//! [`KnowledgeIndexer`] owns the watch registrations, the per-path
//! debounce timers and the busy flag that serializes writes to the
//! vector store. It is a cheap cloneable handle; all clones share the
//! same state.
//!
//! Event flow:
//!
//! ```text
//! watch callback -> should_index? -> handle_file_event (debounce)
//!     -> timer fires -> process_file_event
//!         -> busy? retry after busy_retry_ms
//!         -> deleted: clear source | else: parse, clear, store
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::core::config::{Config, FeatureConfig, IndexingConfig};
use crate::core::error::Result;
use crate::core::indexer::classifier::should_index;
use crate::core::indexer::IndexingPipeline;
use crate::core::storage::VectorStore;
use crate::core::types::{FeatureSnapshot, FileEventKind, IndexStats, IndexerStatus};
use crate::core::watcher::{EventCallback, RawEventKind, WatchBackend, WatchEvent, WatchHandle};

/// Orchestrates watching, debouncing and indexing
#[derive(Clone)]
pub struct KnowledgeIndexer {
    inner: Arc<Inner>,
}

struct Inner {
    indexing: IndexingConfig,
    features: FeatureConfig,
    pipeline: IndexingPipeline,
    backend: Arc<dyn WatchBackend>,
    watchers: Mutex<Vec<Box<dyn WatchHandle>>>,
    timers: Mutex<HashMap<PathBuf, PendingTimer>>,
    next_generation: AtomicU64,
    is_indexing: AtomicBool,
}

struct PendingTimer {
    /// Distinguishes this timer from a later one for the same path
    generation: u64,
    task: JoinHandle<()>,
}

/// Holds the busy flag; releases it on drop
struct IndexingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl KnowledgeIndexer {
    pub fn new(config: &Config, store: VectorStore, backend: Arc<dyn WatchBackend>) -> Self {
        Self {
            inner: Arc::new(Inner {
                indexing: config.indexing.clone(),
                features: config.features.clone(),
                pipeline: IndexingPipeline::from_config(&config.indexing, store),
                backend,
                watchers: Mutex::new(Vec::new()),
                timers: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                is_indexing: AtomicBool::new(false),
            }),
        }
    }

    pub fn store(&self) -> &VectorStore {
        self.inner.pipeline.store()
    }

    pub fn watch_roots(&self) -> &[PathBuf] {
        &self.inner.indexing.watch_roots
    }

    /// Register a recursive watch on every configured root.
    ///
    /// Does nothing (with a log line) outside a Tokio runtime, in
    /// production without the auto-indexing override, when the vector
    /// system is off, or when already running. A root that fails to
    /// register is logged and skipped.
    pub fn start(&self) {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No async runtime available, not starting file watchers");
                return;
            }
        };

        if !self.inner.features.mutations_allowed() {
            tracing::info!(
                "Auto-indexing disabled in {} environment",
                self.inner.features.environment
            );
            return;
        }

        if !self.store().is_enabled() {
            tracing::info!("Vector system disabled, not starting file watchers");
            return;
        }

        let mut watchers = lock(&self.inner.watchers);
        if !watchers.is_empty() {
            tracing::debug!("Indexer already running");
            return;
        }

        for root in &self.inner.indexing.watch_roots {
            let root = absolute_root(root);
            let callback = event_callback(Arc::downgrade(&self.inner), root.clone(), runtime.clone());

            match self.inner.backend.register(&root, callback) {
                Ok(handle) => {
                    tracing::info!("Watching {:?}", root);
                    watchers.push(handle);
                }
                Err(e) => tracing::warn!("Failed to watch {:?}: {}", root, e),
            }
        }

        tracing::info!(
            "Knowledge indexer started ({}/{} roots watched)",
            watchers.len(),
            self.inner.indexing.watch_roots.len()
        );
    }

    /// Close every watcher and cancel every pending debounce timer.
    ///
    /// Work already inside the busy section runs to completion.
    pub fn stop(&self) {
        let handles: Vec<Box<dyn WatchHandle>> = lock(&self.inner.watchers).drain(..).collect();
        for handle in handles {
            let root = handle.root().to_path_buf();
            if let Err(e) = handle.close() {
                tracing::warn!("Failed to close watcher for {:?}: {}", root, e);
            }
        }

        let timers: Vec<PendingTimer> = lock(&self.inner.timers)
            .drain()
            .map(|(_, timer)| timer)
            .collect();
        let cancelled = timers.len();
        for timer in timers {
            timer.task.abort();
        }

        tracing::info!("Knowledge indexer stopped ({} pending events cancelled)", cancelled);
    }

    /// Debounce an event for `path`.
    ///
    /// Replaces any pending timer for the same path, so a burst of
    /// events is processed once, with the last kind seen. Outside a Tokio
    /// runtime the event is logged and dropped.
    pub fn handle_file_event(&self, path: PathBuf, kind: FileEventKind) {
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!(
                    "No async runtime available, dropping {:?} event for {:?}",
                    kind,
                    path
                );
                return;
            }
        };

        let generation = self.inner.next_generation.fetch_add(1, Ordering::SeqCst);
        let delay = Duration::from_millis(self.inner.indexing.debounce_ms);

        let indexer = self.clone();
        let timer_path = path.clone();
        let mut timers = lock(&self.inner.timers);

        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if indexer.take_timer(&timer_path, generation) {
                indexer.process_file_event(timer_path, kind).await;
            }
        });

        if let Some(previous) = timers.insert(path, PendingTimer { generation, task }) {
            previous.task.abort();
        }
    }

    /// Index or remove one file under the busy flag.
    ///
    /// When the flag is held elsewhere the call is rescheduled after
    /// `busy_retry_ms`. Retries are unbounded and unordered across paths.
    pub async fn process_file_event(&self, path: PathBuf, kind: FileEventKind) {
        let Some(_guard) = self.try_begin_indexing() else {
            tracing::debug!(
                "Indexer busy, retrying {:?} in {}ms",
                path,
                self.inner.indexing.busy_retry_ms
            );
            self.schedule_retry(path, kind);
            return;
        };

        match kind {
            FileEventKind::Deleted => {
                self.inner.pipeline.remove_file(&path).await;
                tracing::info!("Removed {:?} from knowledge base", path);
            }
            FileEventKind::Added | FileEventKind::Modified => {
                let chunks = self.inner.pipeline.index_file(&path).await;
                tracing::info!("Re-indexed {:?} ({} chunks)", path, chunks);
            }
        }
    }

    /// Re-index every file under every watch root.
    ///
    /// Returns `Ok(None)` without doing anything when another pass or
    /// file event holds the busy flag. Fails only when no root could be
    /// walked.
    pub async fn index_all_files(&self) -> Result<Option<IndexStats>> {
        let Some(_guard) = self.try_begin_indexing() else {
            tracing::info!("Indexing already in progress, skipping full pass");
            return Ok(None);
        };

        tracing::info!(
            "Starting full index of {} roots",
            self.inner.indexing.watch_roots.len()
        );
        let roots: Vec<PathBuf> = self
            .inner
            .indexing
            .watch_roots
            .iter()
            .map(|r| absolute_root(r))
            .collect();

        self.inner.pipeline.index_roots(&roots).await.map(Some)
    }

    pub fn status(&self) -> IndexerStatus {
        IndexerStatus {
            is_running: !lock(&self.inner.watchers).is_empty(),
            is_indexing: self.inner.is_indexing.load(Ordering::SeqCst),
            active_timer_count: lock(&self.inner.timers).len(),
        }
    }

    /// Current values of the flags that gate indexing
    pub fn features(&self) -> FeatureSnapshot {
        let features = &self.inner.features;
        FeatureSnapshot {
            environment: features.environment.clone(),
            production_auto_indexing: features.production_auto_indexing,
            vector_system_enabled: self.store().is_enabled(),
            mutations_allowed: features.mutations_allowed(),
        }
    }

    fn try_begin_indexing(&self) -> Option<IndexingGuard<'_>> {
        self.inner
            .is_indexing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| IndexingGuard {
                flag: &self.inner.is_indexing,
            })
    }

    /// Remove the timer entry for `path` if it is still ours
    fn take_timer(&self, path: &Path, generation: u64) -> bool {
        let mut timers = lock(&self.inner.timers);
        match timers.get(path) {
            Some(timer) if timer.generation == generation => {
                timers.remove(path);
                true
            }
            _ => false,
        }
    }

    fn schedule_retry(&self, path: PathBuf, kind: FileEventKind) {
        let indexer = self.clone();
        let delay = Duration::from_millis(self.inner.indexing.busy_retry_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            indexer.process_file_event(path, kind).await;
        });
    }
}

/// Build the watch callback for one root.
///
/// Holds only a weak reference so registered watchers do not keep the
/// indexer alive.
fn event_callback(inner: Weak<Inner>, root: PathBuf, runtime: Handle) -> EventCallback {
    Arc::new(move |event: WatchEvent| {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let indexer = KnowledgeIndexer { inner };

        let path = if event.path.is_absolute() {
            event.path
        } else {
            root.join(event.path)
        };
        if !should_index(&path) {
            return;
        }

        let kind = resolve_event_kind(&path, event.kind);
        tracing::debug!("File event {:?} for {:?}", kind, path);

        // Backends may call from their own thread
        let _runtime = runtime.enter();
        indexer.handle_file_event(path, kind);
    })
}

/// Map a raw watch event to added/modified/deleted.
///
/// Rename-style events are told apart by checking whether the path
/// still exists. The file may be recreated between the event and the
/// check, so this can report `Added` for a delete-then-create burst.
pub fn resolve_event_kind(path: &Path, raw: RawEventKind) -> FileEventKind {
    match raw {
        RawEventKind::Rename if path.exists() => FileEventKind::Added,
        RawEventKind::Rename => FileEventKind::Deleted,
        RawEventKind::Change | RawEventKind::Unknown => FileEventKind::Modified,
    }
}

fn absolute_root(root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(root))
        .unwrap_or_else(|_| root.to_path_buf())
}
