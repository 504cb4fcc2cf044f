//! HTTP status mapping for [`KindexError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::core::error::KindexError;

/// Convert error to appropriate HTTP status code
pub fn status_code(err: &KindexError) -> StatusCode {
    if err.is_forbidden() {
        return StatusCode::FORBIDDEN;
    }
    match err {
        KindexError::InvalidPath(_) => StatusCode::NOT_FOUND,
        e if e.is_bad_request() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client errors carry their message; server errors stay generic
fn public_message(err: &KindexError, status: StatusCode) -> String {
    if !status.is_server_error() {
        return err.message();
    }
    match err {
        KindexError::IndexingFailed(_) => "Indexing failed".to_string(),
        _ => "Internal server error".to_string(),
    }
}

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for KindexError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": public_message(&self, status),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
