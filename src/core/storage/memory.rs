//! In-memory [`VectorBackend`] for tests and ephemeral runs.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::core::error::{KindexError, Result};
use crate::core::storage::VectorBackend;
use crate::core::types::KnowledgeVector;

/// Vectors held in a `Vec` behind a `RwLock`
#[derive(Default)]
pub struct MemoryBackend {
    vectors: RwLock<Vec<KnowledgeVector>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> KindexError {
    KindexError::StorageError("memory backend lock poisoned".to_string())
}

#[async_trait]
impl VectorBackend for MemoryBackend {
    async fn upsert(&self, vector: &KnowledgeVector) -> Result<()> {
        let mut vectors = self.vectors.write().map_err(poisoned)?;
        vectors.retain(|v| v.id != vector.id);
        vectors.push(vector.clone());
        Ok(())
    }

    async fn upsert_many(&self, batch: &[KnowledgeVector]) -> Result<()> {
        let mut vectors = self.vectors.write().map_err(poisoned)?;
        vectors.retain(|v| !batch.iter().any(|b| b.id == v.id));
        vectors.extend_from_slice(batch);
        Ok(())
    }

    async fn delete_by_source(&self, source_path: &str) -> Result<usize> {
        let mut vectors = self.vectors.write().map_err(poisoned)?;
        let before = vectors.len();
        vectors.retain(|v| v.source_path != source_path);
        Ok(before - vectors.len())
    }

    async fn list(&self) -> Result<Vec<KnowledgeVector>> {
        Ok(self.vectors.read().map_err(poisoned)?.clone())
    }
}
