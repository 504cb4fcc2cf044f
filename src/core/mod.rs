//! Core domain logic (transport-agnostic)
//!
//! This module contains all indexing and storage logic that is
//! independent of the HTTP and CLI surfaces.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **storage**: Vector backends and the flag-gated store
//! - **indexer**: Chunking, walking and the watch-driven indexer
//! - **watcher**: Filesystem watch capability
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod services;
pub mod storage;
pub mod types;
pub mod watcher;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{KindexError, Result};
pub use services::Services;
