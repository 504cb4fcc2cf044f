//! JSON file [`VectorBackend`].
//!
//! The collection lives in a single JSON document:
//!
//! ```text
//! {data_dir}/vectors.json
//! {
//!   "schema_version": 1,
//!   "vectors": [ { "id": "...", "source_path": "...", ... } ]
//! }
//! ```
//!
//! The document is loaded lazily on first access and rewritten
//! (temp file + rename) after every mutation. Batches go through
//! `upsert_many` so a whole file's chunks cost a single rewrite.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::core::error::Result;
use crate::core::storage::VectorBackend;
use crate::core::types::KnowledgeVector;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct VectorCollection {
    schema_version: u32,
    #[serde(default)]
    vectors: Vec<KnowledgeVector>,
}

/// Vector collection persisted as one JSON file
pub struct JsonFileBackend {
    path: PathBuf,
    cache: Mutex<Option<Vec<KnowledgeVector>>>,
}

impl JsonFileBackend {
    /// Create a backend for the given collection file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Collection file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<KnowledgeVector>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let collection: VectorCollection = serde_json::from_str(&contents)?;
        if collection.schema_version > SCHEMA_VERSION {
            tracing::warn!(
                "Vector collection {:?} has newer schema v{} (supported: v{})",
                self.path,
                collection.schema_version,
                SCHEMA_VERSION
            );
        }
        Ok(collection.vectors)
    }

    async fn save(&self, vectors: &[KnowledgeVector]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        #[derive(Serialize)]
        struct CollectionRef<'a> {
            schema_version: u32,
            vectors: &'a [KnowledgeVector],
        }

        let json = serde_json::to_string_pretty(&CollectionRef {
            schema_version: SCHEMA_VERSION,
            vectors,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl VectorBackend for JsonFileBackend {
    async fn upsert(&self, vector: &KnowledgeVector) -> Result<()> {
        self.upsert_many(std::slice::from_ref(vector)).await
    }

    async fn upsert_many(&self, batch: &[KnowledgeVector]) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        let vectors = cache.get_or_insert_with(Vec::new);

        vectors.retain(|v| !batch.iter().any(|b| b.id == v.id));
        vectors.extend_from_slice(batch);
        self.save(vectors).await
    }

    async fn delete_by_source(&self, source_path: &str) -> Result<usize> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        let vectors = cache.get_or_insert_with(Vec::new);

        let before = vectors.len();
        vectors.retain(|v| v.source_path != source_path);
        let removed = before - vectors.len();
        if removed > 0 {
            self.save(vectors).await?;
        }
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<KnowledgeVector>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load().await?);
        }
        Ok(cache.clone().unwrap_or_default())
    }
}
