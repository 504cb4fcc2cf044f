//! Flag-gated vector store facade.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use crate::core::config::{parse_flag, BackendKind, Config};
use crate::core::storage::{JsonFileBackend, MemoryBackend, VectorBackend};
use crate::core::types::{KnowledgeVector, SearchHit, VectorStats};

/// Environment variable overriding the vector system default
pub const VECTOR_SYSTEM_ENV: &str = "KINDEX_VECTOR_SYSTEM";

/// Persistence and similarity search for knowledge vectors.
///
/// Every public operation checks [`VectorStore::is_enabled`] first and
/// becomes a no-op when the vector system is off. Backend failures are
/// logged and replaced by safe defaults; nothing here returns an error.
#[derive(Clone)]
pub struct VectorStore {
    backend: Arc<dyn VectorBackend>,
    default_enabled: bool,
    similarity_threshold: f32,
    default_max_results: usize,
}

impl VectorStore {
    /// Create a store over an explicit backend
    pub fn new(
        backend: Arc<dyn VectorBackend>,
        default_enabled: bool,
        similarity_threshold: f32,
        default_max_results: usize,
    ) -> Self {
        Self {
            backend,
            default_enabled,
            similarity_threshold,
            default_max_results,
        }
    }

    /// Create a store with the backend selected in config
    pub fn from_config(config: &Config) -> Self {
        let backend: Arc<dyn VectorBackend> = match config.storage.backend {
            BackendKind::Json => Arc::new(JsonFileBackend::new(&config.storage.vectors_file)),
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
        };
        Self::new(
            backend,
            config.features.vector_system,
            config.search.similarity_threshold,
            config.search.default_max_results,
        )
    }

    /// Environment override first, then the configured default
    pub fn is_enabled(&self) -> bool {
        env::var(VECTOR_SYSTEM_ENV)
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(self.default_enabled)
    }

    pub fn default_max_results(&self) -> usize {
        self.default_max_results
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    /// Upsert a vector. Returns its id whether or not the write happened.
    pub async fn store(&self, vector: KnowledgeVector) -> String {
        if !self.is_enabled() {
            tracing::debug!("Vector system disabled, skipping store of {}", vector.id);
            return vector.id;
        }

        if let Err(e) = self.backend.upsert(&vector).await {
            tracing::error!("Failed to store vector {}: {}", vector.id, e);
        }
        vector.id
    }

    /// Upsert a batch in one backend write and return the ids.
    ///
    /// Same contract as [`VectorStore::store`]: ids come back even when
    /// the store is disabled or the write fails.
    pub async fn store_many(&self, vectors: Vec<KnowledgeVector>) -> Vec<String> {
        if vectors.is_empty() {
            return Vec::new();
        }
        if !self.is_enabled() {
            tracing::debug!(
                "Vector system disabled, skipping store of {} vectors",
                vectors.len()
            );
            return vectors.into_iter().map(|v| v.id).collect();
        }

        if let Err(e) = self.backend.upsert_many(&vectors).await {
            tracing::error!("Failed to store {} vectors: {}", vectors.len(), e);
        }
        vectors.into_iter().map(|v| v.id).collect()
    }

    /// Remove every vector produced from `source_path`
    pub async fn clear_by_source(&self, source_path: &str) {
        if !self.is_enabled() {
            return;
        }

        match self.backend.delete_by_source(source_path).await {
            Ok(0) => {}
            Ok(n) => tracing::debug!("Cleared {} vectors for {}", n, source_path),
            Err(e) => tracing::error!("Failed to clear vectors for {}: {}", source_path, e),
        }
    }

    /// Rank stored vectors by cosine similarity to `query`.
    ///
    /// Only hits scoring strictly above the threshold are kept. Equal
    /// scores are ordered by content type priority.
    pub async fn search_similar(&self, query: &[f32], max_results: usize) -> Vec<SearchHit> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let vectors = match self.backend.list().await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("Similarity search failed: {}", e);
                return Vec::new();
            }
        };

        let mut hits: Vec<SearchHit> = vectors
            .into_iter()
            .filter_map(|vector| {
                let similarity = cosine_similarity(query, &vector.embedding);
                (similarity > self.similarity_threshold).then(|| SearchHit {
                    source: vector.source_path.clone(),
                    content_type: vector.content_type,
                    similarity,
                    vector,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.content_type.priority().cmp(&a.content_type.priority()))
        });
        hits.truncate(max_results);
        hits
    }

    /// Every stored vector (empty when disabled or on failure)
    pub async fn get_all_vectors(&self) -> Vec<KnowledgeVector> {
        if !self.is_enabled() {
            return Vec::new();
        }

        self.backend.list().await.unwrap_or_else(|e| {
            tracing::error!("Failed to list vectors: {}", e);
            Vec::new()
        })
    }

    /// Totals by content type and the most recent update time
    pub async fn get_stats(&self) -> VectorStats {
        let vectors = self.get_all_vectors().await;

        let mut counts_by_type = BTreeMap::new();
        for vector in &vectors {
            *counts_by_type
                .entry(vector.content_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        VectorStats {
            total_vectors: vectors.len(),
            counts_by_type,
            most_recent_update: vectors.iter().map(|v| v.updated_at).max(),
        }
    }
}

/// Cosine similarity in [-1, 1].
///
/// Mismatched lengths, empty input and zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }
    dot / denom
}
