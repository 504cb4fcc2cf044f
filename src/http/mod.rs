//! HTTP control adapter
//!
//! Depends only on core/. Never imports from cli/.
//!
//! Exposes the indexer's start/stop/index/status commands and the
//! vector store's stats and search over an Axum router.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub use handlers::*;

/// Build the API router over shared services
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_handler))
        // API v1 endpoints
        .route("/api/v1/indexer", post(indexer_handler))
        .route("/api/v1/vectors/stats", get(vector_stats_handler))
        .route("/api/v1/vectors/search", post(vector_search_handler))
        // Add middleware
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        // Add shared state
        .with_state(services)
}
