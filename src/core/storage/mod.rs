//! Storage layer for knowledge vectors.
//!
//! This module provides persistence and similarity search for
//! [`KnowledgeVector`] records, gated by the vector system feature
//! flag.
//!
//! # Architecture
//!
//! - **VectorBackend**: the document collection (JSON file, memory)
//! - **VectorStore**: flag gating, error absorption, cosine ranking
//!
//! Backends report failures through `Result`; `VectorStore` logs
//! them and degrades to empty or no-op results so the indexing
//! pipeline never stops on a storage error.

mod json;
mod memory;
mod store;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::types::KnowledgeVector;

pub use json::JsonFileBackend;
pub use memory::MemoryBackend;
pub use store::{cosine_similarity, VectorStore, VECTOR_SYSTEM_ENV};

/// A collection of knowledge vectors keyed by id
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Insert or replace the record with the same id
    async fn upsert(&self, vector: &KnowledgeVector) -> Result<()>;

    /// Insert or replace a batch of records in one write.
    ///
    /// The default loops over [`VectorBackend::upsert`]; backends that
    /// rewrite their whole collection override it.
    async fn upsert_many(&self, vectors: &[KnowledgeVector]) -> Result<()> {
        for vector in vectors {
            self.upsert(vector).await?;
        }
        Ok(())
    }

    /// Delete every record for a source path, returning how many went
    async fn delete_by_source(&self, source_path: &str) -> Result<usize>;

    /// All stored records
    async fn list(&self) -> Result<Vec<KnowledgeVector>>;
}
