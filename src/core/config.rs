//! Configuration management for the kindex indexer.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{KindexError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Directories watched and walked on full passes
    #[serde(default = "default_watch_roots")]
    pub watch_roots: Vec<PathBuf>,

    /// Plain substrings; a directory whose path contains one is skipped
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Words per chunk window
    #[serde(default = "default_chunk_size_words")]
    pub chunk_size_words: usize,

    /// Minimum characters for a chunk to be kept
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,

    /// Quiet period before a changed file is processed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Delay before retrying an event that found the indexer busy
    #[serde(default = "default_busy_retry_ms")]
    pub busy_retry_ms: u64,
}

/// Feature flags gating the indexer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureConfig {
    /// Deployment environment name ("production" enables the guard)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Allow watching and manual indexing in production
    #[serde(default)]
    pub production_auto_indexing: bool,

    /// Static default for the vector system flag
    #[serde(default = "default_vector_system")]
    pub vector_system: bool,
}

/// Which vector backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Json,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    /// JSON collection file for the vector records
    #[serde(default = "default_vectors_file")]
    pub vectors_file: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,

    /// Results must score strictly above this cosine similarity
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

/// HTTP control server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_watch_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from("src/components"),
        PathBuf::from("src/app"),
        PathBuf::from("src/lib"),
        PathBuf::from("src/data"),
    ]
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        ".next".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "**/*.test.*".to_string(),
        "**/*.spec.*".to_string(),
        "**/*.d.ts".to_string(),
        "**/*.log".to_string(),
        "**/*.tmp".to_string(),
    ]
}

fn default_chunk_size_words() -> usize {
    800
}

fn default_min_chunk_chars() -> usize {
    50
}

fn default_debounce_ms() -> u64 {
    2000
}

fn default_busy_retry_ms() -> u64 {
    1000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_vector_system() -> bool {
    true
}

fn default_backend() -> BackendKind {
    BackendKind::Json
}

fn default_vectors_file() -> PathBuf {
    PathBuf::from("./data/vectors.json")
}

fn default_max_results() -> usize {
    5
}

fn default_similarity_threshold() -> f32 {
    0.7
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3100
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            watch_roots: default_watch_roots(),
            ignore_patterns: default_ignore_patterns(),
            chunk_size_words: default_chunk_size_words(),
            min_chunk_chars: default_min_chunk_chars(),
            debounce_ms: default_debounce_ms(),
            busy_retry_ms: default_busy_retry_ms(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            production_auto_indexing: false,
            vector_system: default_vector_system(),
        }
    }
}

impl FeatureConfig {
    /// True when running in a production-like environment
    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_ascii_lowercase().as_str(),
            "production" | "prod"
        )
    }

    /// Watching and manual indexing are allowed here
    pub fn mutations_allowed(&self) -> bool {
        !self.is_production() || self.production_auto_indexing
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            vectors_file: default_vectors_file(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: default_max_results(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Parse a boolean flag value ("true", "1", "yes", "on" and their negations)
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| KindexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. KINDEX_CONFIG env var
    /// 2. XDG config file (~/.config/kindex/config.toml)
    /// 3. ./kindex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("KINDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("kindex.toml").exists() {
                Self::from_file("kindex.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();

        // Default vectors file moves under the data dir
        if config.storage.vectors_file == default_vectors_file() {
            config.storage.vectors_file = xdg.vectors_file();
        }

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(roots) = env::var("KINDEX_WATCH_ROOTS") {
            let parsed: Vec<PathBuf> = roots
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(PathBuf::from)
                .collect();
            if !parsed.is_empty() {
                self.indexing.watch_roots = parsed;
            }
        }
        if let Ok(words) = env::var("KINDEX_CHUNK_SIZE_WORDS") {
            if let Ok(w) = words.parse() {
                self.indexing.chunk_size_words = w;
            }
        }
        if let Ok(debounce) = env::var("KINDEX_DEBOUNCE_MS") {
            if let Ok(ms) = debounce.parse() {
                self.indexing.debounce_ms = ms;
            }
        }

        // Feature flags
        if let Ok(environment) = env::var("KINDEX_ENV") {
            if !environment.trim().is_empty() {
                self.features.environment = environment.trim().to_string();
            }
        }
        if let Ok(flag) = env::var("KINDEX_PRODUCTION_AUTO_INDEXING") {
            if let Some(enabled) = parse_flag(&flag) {
                self.features.production_auto_indexing = enabled;
            }
        }

        // Storage configuration: the data dir only relocates the default
        // file, an explicit storage.vectors_file wins
        if let Ok(data_dir) = env::var("KINDEX_DATA_DIR") {
            if self.storage.vectors_file == default_vectors_file() {
                self.storage.vectors_file = PathBuf::from(data_dir).join("vectors.json");
            }
        }

        // Server configuration
        if let Ok(host) = env::var("KINDEX_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("KINDEX_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.watch_roots.is_empty() {
            return Err(KindexError::ConfigError(
                "At least one watch root is required".to_string(),
            ));
        }

        if self.indexing.chunk_size_words == 0 {
            return Err(KindexError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.indexing.debounce_ms == 0 {
            return Err(KindexError::ConfigError(
                "Debounce interval must be non-zero".to_string(),
            ));
        }

        if self.indexing.busy_retry_ms == 0 {
            return Err(KindexError::ConfigError(
                "Busy retry delay must be non-zero".to_string(),
            ));
        }

        if self.search.default_max_results == 0 {
            return Err(KindexError::ConfigError(
                "Default max results must be non-zero".to_string(),
            ));
        }

        if !(-1.0..=1.0).contains(&self.search.similarity_threshold) {
            return Err(KindexError::ConfigError(format!(
                "Similarity threshold {} is outside [-1, 1]",
                self.search.similarity_threshold
            )));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Watch roots: {:?}", self.indexing.watch_roots);
        tracing::info!(
            "  Ignore patterns: {} patterns",
            self.indexing.ignore_patterns.len()
        );
        tracing::info!("  Chunk size: {} words", self.indexing.chunk_size_words);
        tracing::info!("  Min chunk: {} chars", self.indexing.min_chunk_chars);
        tracing::info!("  Debounce: {}ms", self.indexing.debounce_ms);
        tracing::info!("  Environment: {}", self.features.environment);
        tracing::info!(
            "  Production auto-indexing: {}",
            self.features.production_auto_indexing
        );
        tracing::info!("  Vector system default: {}", self.features.vector_system);
        tracing::info!("  Vector backend: {:?}", self.storage.backend);
        tracing::info!("  Vectors file: {:?}", self.storage.vectors_file);
        tracing::info!(
            "  Similarity threshold: {}",
            self.search.similarity_threshold
        );
    }
}
