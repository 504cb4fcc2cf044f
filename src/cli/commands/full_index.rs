//! Full-index command - re-index every watch root once

use crate::cli::output::{colors, format_duration, print_json, print_progress, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the full-index command
#[derive(Args, Debug)]
pub struct FullIndexArgs {
    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Full-index result response
#[derive(Debug, Serialize)]
pub struct FullIndexResponse {
    pub skipped: bool,
    pub files_indexed: usize,
    pub chunks_created: usize,
    pub roots_walked: usize,
    pub roots_failed: usize,
    pub duration_secs: f64,
}

/// Execute the full-index command
pub async fn execute(
    args: FullIndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.quiet {
        print_progress(
            &format!(
                "Indexing {} watch roots...",
                services.indexer.watch_roots().len()
            ),
            format,
        );
    }

    let stats = services.indexer.index_all_files().await?;

    let response = match &stats {
        Some(stats) => FullIndexResponse {
            skipped: false,
            files_indexed: stats.files_indexed,
            chunks_created: stats.chunks_created,
            roots_walked: stats.roots_walked,
            roots_failed: stats.roots_failed,
            duration_secs: stats.duration_ms as f64 / 1000.0,
        },
        None => FullIndexResponse {
            skipped: true,
            files_indexed: 0,
            chunks_created: 0,
            roots_walked: 0,
            roots_failed: 0,
            duration_secs: 0.0,
        },
    };

    match format {
        OutputFormat::Human => {
            if response.skipped {
                print_warning("Indexing already in progress, nothing done");
                return Ok(());
            }
            println!(
                "{} {} files ({} chunks) in {}",
                colors::success("Indexed"),
                colors::number(&response.files_indexed.to_string()),
                colors::number(&response.chunks_created.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.roots_failed > 0 {
                print_warning(&format!(
                    "{} of {} watch roots could not be read",
                    response.roots_failed,
                    response.roots_failed + response.roots_walked
                ));
            }
        }
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}
