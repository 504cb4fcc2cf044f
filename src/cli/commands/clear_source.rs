//! Clear-source command - drop stored vectors for one file

use crate::cli::output::{colors, print_json};
use crate::cli::OutputFormat;
use crate::core::indexer::pipeline::source_key;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the clear-source command
#[derive(Args, Debug)]
pub struct ClearSourceArgs {
    /// Source file whose vectors should be removed
    pub path: PathBuf,
}

/// Clear-source result response
#[derive(Debug, Serialize)]
pub struct ClearSourceResponse {
    pub source: String,
    pub removed: usize,
}

/// Execute the clear-source command
pub async fn execute(
    args: ClearSourceArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    // Vectors are keyed by absolute path; the file itself may be gone
    let path = if args.path.is_absolute() {
        args.path
    } else {
        std::env::current_dir()?.join(args.path)
    };
    let source = source_key(&path);

    let before = services.store.get_stats().await.total_vectors;
    services.store.clear_by_source(&source).await;
    let after = services.store.get_stats().await.total_vectors;

    let response = ClearSourceResponse {
        source,
        removed: before.saturating_sub(after),
    };

    match format {
        OutputFormat::Human => println!(
            "{} {} vectors for {}",
            colors::success("Removed"),
            colors::number(&response.removed.to_string()),
            colors::file_path(&response.source)
        ),
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}
