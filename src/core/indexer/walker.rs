//! Directory traversal for full indexing passes.
//!
//! Walks a watch root recursively, pruning directories that match an
//! ignore pattern and yielding only files that pass
//! [`should_index`]. Unreadable directories are logged and skipped
//! without stopping the walk.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{KindexError, Result};
use crate::core::indexer::classifier::{should_ignore_path, should_index};

/// Recursive walker over a watch root
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalker {
    /// Substrings that prune a directory when its path contains one
    ignore_patterns: Vec<String>,
}

impl DirectoryWalker {
    pub fn new(ignore_patterns: Vec<String>) -> Self {
        Self { ignore_patterns }
    }

    /// Visit every indexable file under `root`.
    ///
    /// Returns the number of files passed to `on_file`. Fails only
    /// when `root` itself is missing or not a directory.
    pub fn walk<F>(&self, root: &Path, mut on_file: F) -> Result<usize>
    where
        F: FnMut(&Path),
    {
        if !root.is_dir() {
            return Err(KindexError::InvalidPath(format!(
                "Watch root is not a directory: {}",
                root.display()
            )));
        }

        let mut visited = 0;
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && should_index(entry.path()) {
                        on_file(entry.path());
                        visited += 1;
                    }
                }
                Err(e) => {
                    // Sibling directories are still visited
                    tracing::warn!("Walk error under {:?}: {}", root, e);
                }
            }
        }

        Ok(visited)
    }

    /// Collect every indexable file under `root`
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(root, |path| files.push(path.to_path_buf()))?;
        Ok(files)
    }

    /// Prune ignored directories. The root itself is never pruned.
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        if should_ignore_path(path, &self.ignore_patterns) {
            tracing::debug!("Skipping ignored directory: {:?}", path);
            return false;
        }
        true
    }
}
