//! Error types and error handling for the kindex indexer.
//!
//! This module defines the error types used throughout the
//! application. HTTP status mapping lives in the `http` adapter.

use thiserror::Error;

/// Result type alias for kindex operations
pub type Result<T> = std::result::Result<T, KindexError>;

/// Main error type for the kindex service
#[derive(Error, Debug)]
pub enum KindexError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Indexing disabled: {0}")]
    IndexingDisabled(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl KindexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error comes from an environment guard
    pub fn is_forbidden(&self) -> bool {
        matches!(self, KindexError::IndexingDisabled(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            KindexError::InvalidAction(_)
                | KindexError::InvalidQuery(_)
                | KindexError::InvalidPath(_)
                | KindexError::ConfigError(_)
        )
    }
}

impl From<notify::Error> for KindexError {
    fn from(err: notify::Error) -> Self {
        KindexError::WatchError(err.to_string())
    }
}
