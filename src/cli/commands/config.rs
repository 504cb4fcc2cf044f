//! Config command - show current configuration

use crate::cli::output::print_json;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show ignore patterns
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_dir: String,
    pub vectors_file: String,
    pub indexing: IndexingSummary,
    pub features: FeatureSummary,
    pub search: SearchSummary,
}

#[derive(Debug, Serialize)]
pub struct IndexingSummary {
    pub watch_roots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_patterns: Option<Vec<String>>,
    pub chunk_size_words: usize,
    pub min_chunk_chars: usize,
    pub debounce_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct FeatureSummary {
    pub environment: String,
    pub production_auto_indexing: bool,
    pub vector_system_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchSummary {
    pub default_max_results: usize,
    pub similarity_threshold: f32,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = crate::core::xdg::XdgDirs::new();

    let response = ConfigResponse {
        config_dir: xdg.config_dir.to_string_lossy().into_owned(),
        vectors_file: config.storage.vectors_file.to_string_lossy().into_owned(),
        indexing: IndexingSummary {
            watch_roots: config
                .indexing
                .watch_roots
                .iter()
                .map(|r| r.to_string_lossy().into_owned())
                .collect(),
            ignore_patterns: args.all.then(|| config.indexing.ignore_patterns.clone()),
            chunk_size_words: config.indexing.chunk_size_words,
            min_chunk_chars: config.indexing.min_chunk_chars,
            debounce_ms: config.indexing.debounce_ms,
        },
        features: FeatureSummary {
            environment: config.features.environment.clone(),
            production_auto_indexing: config.features.production_auto_indexing,
            vector_system_enabled: services.store.is_enabled(),
        },
        search: SearchSummary {
            default_max_results: config.search.default_max_results,
            similarity_threshold: config.search.similarity_threshold,
        },
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_dir: {}", response.config_dir);
            println!("  vectors_file: {}", response.vectors_file);
            println!("  indexing:");
            println!("    watch_roots: {:?}", response.indexing.watch_roots);
            if let Some(patterns) = &response.indexing.ignore_patterns {
                println!("    ignore_patterns: {patterns:?}");
            }
            println!(
                "    chunk_size_words: {}",
                response.indexing.chunk_size_words
            );
            println!("    min_chunk_chars: {}", response.indexing.min_chunk_chars);
            println!("    debounce_ms: {}", response.indexing.debounce_ms);
            println!("  features:");
            println!("    environment: {}", response.features.environment);
            println!(
                "    production_auto_indexing: {}",
                response.features.production_auto_indexing
            );
            println!(
                "    vector_system_enabled: {}",
                response.features.vector_system_enabled
            );
            println!("  search:");
            println!(
                "    default_max_results: {}",
                response.search.default_max_results
            );
            println!(
                "    similarity_threshold: {}",
                response.search.similarity_threshold
            );
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}
