//! Core data types for the kindex indexer.
//!
//! This module defines all data structures used throughout the
//! application, including chunks, vectors, status snapshots,
//! requests, and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::KindexError;

/// Classification of a chunk, used for ranking priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    CompanyInfo,
    FaqContent,
    ProcessContent,
    KnowledgeBase,
    GeneralContent,
}

impl ContentType {
    /// All content types in classification priority order
    pub const ALL: [ContentType; 5] = [
        ContentType::CompanyInfo,
        ContentType::FaqContent,
        ContentType::ProcessContent,
        ContentType::KnowledgeBase,
        ContentType::GeneralContent,
    ];

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::CompanyInfo => "company_info",
            ContentType::FaqContent => "faq_content",
            ContentType::ProcessContent => "process_content",
            ContentType::KnowledgeBase => "knowledge_base",
            ContentType::GeneralContent => "general_content",
        }
    }

    /// Ranking priority (higher ranks first among equal similarity)
    pub fn priority(&self) -> u8 {
        content_type_priority(self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = KindexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| KindexError::InvalidQuery(format!("Unknown content type: {s}")))
    }
}

/// Priority for a content type given by name. Unknown names rank lowest.
///
/// This is the single ranking table; [`ContentType::priority`] and the
/// similarity search tie-break both go through it.
pub fn content_type_priority(name: &str) -> u8 {
    match name {
        "company_info" => 10,
        "faq_content" => 8,
        "process_content" => 7,
        "knowledge_base" => 6,
        "general_content" => 4,
        _ => 1,
    }
}

/// A unit of extracted knowledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentChunk {
    /// Cleaned text content
    pub content: String,

    /// Approximate token count (chars / 4, rounded up)
    pub token_estimate: usize,

    /// File that produced this chunk
    pub source_path: String,

    /// Sequential chunk number within the file
    pub chunk_index: usize,

    /// Classification used for ranking
    pub content_type: ContentType,

    /// Creation time
    pub updated_at: DateTime<Utc>,
}

/// A chunk plus its embedding, as persisted in the vector store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeVector {
    /// Unique id: source path, chunk index and creation nanos
    pub id: String,

    pub content: String,
    pub token_estimate: usize,
    pub source_path: String,
    pub chunk_index: usize,
    pub content_type: ContentType,
    pub updated_at: DateTime<Utc>,

    /// Embedding values, empty until an embedding service fills them
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl KnowledgeVector {
    /// Build a vector record from a freshly parsed chunk
    pub fn from_chunk(chunk: ContentChunk) -> Self {
        let nanos = chunk
            .updated_at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| chunk.updated_at.timestamp_micros() * 1000);
        Self {
            id: format!("{}#{}#{}", chunk.source_path, chunk.chunk_index, nanos),
            content: chunk.content,
            token_estimate: chunk.token_estimate,
            source_path: chunk.source_path,
            chunk_index: chunk.chunk_index,
            content_type: chunk.content_type,
            updated_at: chunk.updated_at,
            embedding: Vec::new(),
        }
    }
}

/// Kind of a filesystem change after classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileEventKind {
    Added,
    Modified,
    Deleted,
}

/// Derived indexer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerStatus {
    /// At least one watcher is active
    pub is_running: bool,

    /// The storage-writing section is held
    pub is_indexing: bool,

    /// Pending debounce timers
    pub active_timer_count: usize,
}

/// Statistics from a full indexing pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Eligible files visited (including files that yielded no chunks)
    pub files_indexed: usize,

    /// Total chunks stored
    pub chunks_created: usize,

    /// Watch roots traversed successfully
    pub roots_walked: usize,

    /// Watch roots that could not be traversed
    pub roots_failed: usize,

    /// Pass duration in milliseconds
    pub duration_ms: u64,
}

/// Aggregate vector store statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorStats {
    pub total_vectors: usize,
    pub counts_by_type: BTreeMap<String, usize>,
    pub most_recent_update: Option<DateTime<Utc>>,
}

/// Similarity search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub vector: KnowledgeVector,
    pub similarity: f32,
    pub source: String,
    pub content_type: ContentType,
}

/// Snapshot of the feature flags that gate indexing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub environment: String,
    pub production_auto_indexing: bool,
    pub vector_system_enabled: bool,
    pub mutations_allowed: bool,
}

/// Control command accepted by the indexer surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexerAction {
    Start,
    Stop,
    Index,
    FullIndex,
    Status,
}

impl IndexerAction {
    /// Whether this action changes indexer or store state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, IndexerAction::Status)
    }
}

impl FromStr for IndexerAction {
    type Err = KindexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(IndexerAction::Start),
            "stop" => Ok(IndexerAction::Stop),
            "index" => Ok(IndexerAction::Index),
            "full-index" | "full_index" => Ok(IndexerAction::FullIndex),
            "status" => Ok(IndexerAction::Status),
            other => Err(KindexError::InvalidAction(format!(
                "Unknown action '{other}'. Expected start, stop, index, full-index or status"
            ))),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Request body for the indexer control endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerRequest {
    pub action: String,
}

/// Response to a completed (or skipped) full pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRunResponse {
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IndexStats>,
}

/// Response to a status query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: IndexerStatus,
    pub features: FeatureSnapshot,
}

/// Request body for similarity search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Similarity search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub count: usize,
}
