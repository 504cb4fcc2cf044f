//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow:
//! 1. Walk each watch root
//! 2. Read file contents
//! 3. Parse into classified chunks
//! 4. Replace the stored vectors for the file (clear, then store)
//!
//! The pipeline holds no lock of its own. Callers serialize writes
//! through the indexer's busy flag.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::config::IndexingConfig;
use crate::core::error::{KindexError, Result};
use crate::core::indexer::{ContentChunker, DirectoryWalker};
use crate::core::storage::VectorStore;
use crate::core::types::{ContentChunk, IndexStats, KnowledgeVector};

/// Parses files and writes their chunks to the vector store
#[derive(Clone)]
pub struct IndexingPipeline {
    walker: DirectoryWalker,
    chunker: ContentChunker,
    store: VectorStore,
}

impl IndexingPipeline {
    pub fn new(walker: DirectoryWalker, chunker: ContentChunker, store: VectorStore) -> Self {
        Self {
            walker,
            chunker,
            store,
        }
    }

    /// Build a pipeline from the indexing section of the config
    pub fn from_config(config: &IndexingConfig, store: VectorStore) -> Self {
        Self::new(
            DirectoryWalker::new(config.ignore_patterns.clone()),
            ContentChunker::new(config.chunk_size_words, config.min_chunk_chars),
            store,
        )
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Read and parse one file.
    ///
    /// Read failures (missing file, non-UTF-8 content) are logged and
    /// produce no chunks.
    pub async fn parse_file(&self, path: &Path) -> Vec<ContentChunk> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => self.chunker.parse(&contents, &source_key(path)),
            Err(e) => {
                if e.kind() == std::io::ErrorKind::InvalidData {
                    tracing::warn!("Skipping non-UTF-8 file: {:?}", path);
                } else {
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                }
                Vec::new()
            }
        }
    }

    /// Replace the stored vectors for one file. Returns chunks stored.
    pub async fn index_file(&self, path: &Path) -> usize {
        let chunks = self.parse_file(path).await;
        let source = source_key(path);

        // Prior vectors must be gone before new ones land
        self.store.clear_by_source(&source).await;

        let count = chunks.len();
        let vectors: Vec<KnowledgeVector> =
            chunks.into_iter().map(KnowledgeVector::from_chunk).collect();
        self.store.store_many(vectors).await;

        tracing::debug!("Indexed {:?} ({} chunks)", path, count);
        count
    }

    /// Remove every vector for a deleted file
    pub async fn remove_file(&self, path: &Path) {
        self.store.clear_by_source(&source_key(path)).await;
        tracing::debug!("Removed vectors for {:?}", path);
    }

    /// Walk every root and re-index each eligible file.
    ///
    /// A root that cannot be walked is logged and counted in
    /// `roots_failed`. Fails only when every root failed.
    pub async fn index_roots(&self, roots: &[PathBuf]) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::default();

        for root in roots {
            let files = match self.walker.collect_files(root) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!("Failed to walk {:?}: {}", root, e);
                    stats.roots_failed += 1;
                    continue;
                }
            };
            stats.roots_walked += 1;
            tracing::info!("Found {} files under {:?}", files.len(), root);

            for (idx, file) in files.iter().enumerate() {
                if idx % 100 == 0 && idx > 0 {
                    tracing::info!("Progress: {}/{} files processed", idx, files.len());
                }
                stats.chunks_created += self.index_file(file).await;
                stats.files_indexed += 1;
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        if !roots.is_empty() && stats.roots_walked == 0 {
            return Err(KindexError::IndexingFailed(format!(
                "None of the {} watch roots could be walked",
                roots.len()
            )));
        }

        tracing::info!(
            "Indexing complete: {} files, {} chunks from {} roots in {}ms",
            stats.files_indexed,
            stats.chunks_created,
            stats.roots_walked,
            stats.duration_ms
        );

        Ok(stats)
    }
}

/// Key under which a file's vectors are stored
pub fn source_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
