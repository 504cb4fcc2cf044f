//! Filesystem watch capability.
//!
//! The indexer only needs two things from a watcher: register a
//! recursive watch on a root with a callback, and close it later.
//! [`WatchBackend`] captures that so debounce and dispatch logic can
//! be driven by a fake in tests. [`NotifyBackend`] is the real
//! implementation on top of the `notify` crate.

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::{KindexError, Result};

/// Platform-neutral shape of a change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEventKind {
    /// Entry appeared, vanished or was renamed
    Rename,
    /// Entry contents or metadata changed
    Change,
    /// Backend could not tell
    Unknown,
}

/// One path affected by a change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Path as reported by the backend (may be relative to the root)
    pub path: PathBuf,
    pub kind: RawEventKind,
}

/// Invoked once per affected path, possibly from a backend thread
pub type EventCallback = Arc<dyn Fn(WatchEvent) + Send + Sync>;

/// An active watch registration
pub trait WatchHandle: Send {
    /// Root this handle watches
    fn root(&self) -> &Path;

    /// Stop delivering events
    fn close(self: Box<Self>) -> Result<()>;
}

/// Something that can watch a directory tree
pub trait WatchBackend: Send + Sync {
    fn register(&self, root: &Path, on_event: EventCallback) -> Result<Box<dyn WatchHandle>>;
}

/// Map a notify event kind onto the indexer's event vocabulary.
///
/// Access events are not changes and yield `None`.
pub fn classify_notify_kind(kind: &EventKind) -> Option<RawEventKind> {
    match kind {
        EventKind::Access(_) => None,
        EventKind::Create(_) | EventKind::Remove(_) => Some(RawEventKind::Rename),
        EventKind::Modify(ModifyKind::Name(_)) => Some(RawEventKind::Rename),
        EventKind::Modify(_) => Some(RawEventKind::Change),
        EventKind::Any | EventKind::Other => Some(RawEventKind::Unknown),
    }
}

/// Native recursive watcher (inotify, FSEvents, ReadDirectoryChanges)
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyBackend;

impl NotifyBackend {
    pub fn new() -> Self {
        Self
    }
}

impl WatchBackend for NotifyBackend {
    fn register(&self, root: &Path, on_event: EventCallback) -> Result<Box<dyn WatchHandle>> {
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let Some(kind) = classify_notify_kind(&event.kind) else {
                        return;
                    };
                    for path in event.paths {
                        on_event(WatchEvent { path, kind });
                    }
                }
                Err(e) => tracing::warn!("Watcher error: {}", e),
            },
            notify::Config::default(),
        )
        .map_err(|e| KindexError::WatchError(format!("watcher init failed: {e}")))?;

        watcher.watch(root, RecursiveMode::Recursive).map_err(|e| {
            KindexError::WatchError(format!("failed to watch {}: {e}", root.display()))
        })?;

        Ok(Box::new(NotifyHandle {
            root: root.to_path_buf(),
            watcher,
        }))
    }
}

struct NotifyHandle {
    root: PathBuf,
    watcher: RecommendedWatcher,
}

impl WatchHandle for NotifyHandle {
    fn root(&self) -> &Path {
        &self.root
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        // Dropping the watcher releases it even if unwatch fails
        self.watcher.unwatch(&self.root)?;
        Ok(())
    }
}
