//! HTTP request handlers for the kindex control API
//!
//! Implements handlers for health, indexer control, vector stats
//! and similarity search.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::core::error::KindexError;
use crate::core::services::Services;
use crate::core::types::*;

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Indexer control handler
///
/// Dispatches `start`, `stop`, `index` / `full-index` and `status`
/// to the knowledge indexer.
///
/// # Errors
///
/// - `InvalidAction`: Unknown action name
/// - `IndexingDisabled`: Mutating action in production without the
///   auto-indexing override
/// - `IndexingFailed`: No watch root could be walked
pub async fn indexer_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<IndexerRequest>,
) -> Result<Response, KindexError> {
    let action: IndexerAction = req.action.parse()?;
    let indexer = &services.indexer;

    if action.is_mutating() && !services.config.features.mutations_allowed() {
        return Err(KindexError::IndexingDisabled(
            "Indexer control is disabled in production".to_string(),
        ));
    }

    let response = match action {
        IndexerAction::Start => {
            indexer.start();
            Json(indexer.status()).into_response()
        }
        IndexerAction::Stop => {
            indexer.stop();
            Json(indexer.status()).into_response()
        }
        IndexerAction::Index | IndexerAction::FullIndex => {
            let stats = indexer.index_all_files().await?;
            Json(IndexRunResponse {
                completed_at: Utc::now(),
                skipped: stats.is_none(),
                stats,
            })
            .into_response()
        }
        IndexerAction::Status => Json(StatusResponse {
            status: indexer.status(),
            features: indexer.features(),
        })
        .into_response(),
    };

    Ok(response)
}

/// Vector statistics handler
pub async fn vector_stats_handler(State(services): State<Arc<Services>>) -> Json<VectorStats> {
    Json(services.store.get_stats().await)
}

/// Similarity search handler
///
/// Ranks stored vectors against a caller-supplied embedding.
///
/// # Errors
///
/// - `InvalidQuery`: Empty embedding or zero `max_results`
pub async fn vector_search_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, KindexError> {
    if req.embedding.is_empty() {
        return Err(KindexError::InvalidQuery(
            "Embedding cannot be empty".to_string(),
        ));
    }

    let max_results = req
        .max_results
        .unwrap_or_else(|| services.store.default_max_results());
    if max_results == 0 {
        return Err(KindexError::InvalidQuery(
            "max_results must be at least 1".to_string(),
        ));
    }

    let results = services
        .store
        .search_similar(&req.embedding, max_results)
        .await;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}
