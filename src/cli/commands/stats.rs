//! Stats command - summarize the vector store

use crate::cli::output::{colors, format_relative_time, print_header, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Execute the stats command
pub async fn execute(
    _args: StatsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !services.store.is_enabled() {
        print_warning("Vector system is disabled; statistics are empty");
    }

    let stats = services.store.get_stats().await;

    match format {
        OutputFormat::Human => {
            print_header("Vector store:");
            println!(
                "  total: {}",
                colors::number(&stats.total_vectors.to_string())
            );
            for (content_type, count) in &stats.counts_by_type {
                println!(
                    "  {}: {}",
                    colors::content_type(content_type),
                    colors::number(&count.to_string())
                );
            }
            match &stats.most_recent_update {
                Some(updated) => println!(
                    "  last update: {} ({})",
                    updated.to_rfc3339(),
                    colors::dim(&format_relative_time(updated))
                ),
                None => println!("  last update: {}", colors::dim("never")),
            }
        }
        OutputFormat::Json => print_json(&stats)?,
    }

    Ok(())
}
