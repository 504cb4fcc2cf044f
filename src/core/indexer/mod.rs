//! Knowledge indexing module.
//!
//! Turns page sources into classified chunks and keeps the vector
//! store in sync with the watched trees. Key pieces:
//!
//! - Regex-based cleaning and word-window chunking
//! - Substring ignore rules and extension/name eligibility
//! - Recursive directory walking for full passes
//! - Debounced, mutually exclusive incremental updates
//!
//! # Ordering
//!
//! Re-indexing a file always clears its previous vectors before the
//! new ones are stored, within a single processing call.

pub mod chunker;
pub mod classifier;
pub mod knowledge;
pub mod pipeline;
pub mod walker;

pub use chunker::ContentChunker;
pub use classifier::{should_ignore_path, should_index};
pub use knowledge::KnowledgeIndexer;
pub use pipeline::IndexingPipeline;
pub use walker::DirectoryWalker;
