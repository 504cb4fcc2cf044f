//! Watch command - keep the store in sync until interrupted

use crate::cli::output::{colors, print_json, print_progress, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::IndexerStatus;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Skip the full pass before watching
    #[arg(long)]
    pub skip_initial: bool,
}

/// Final state reported after the watcher stops
#[derive(Debug, Serialize)]
pub struct WatchResponse {
    pub initial_files_indexed: Option<usize>,
    pub status: IndexerStatus,
}

/// Execute the watch command
pub async fn execute(
    args: WatchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let indexer = &services.indexer;

    if let Some(reason) = refusal_reason(services) {
        return Err(reason.into());
    }

    indexer.start();
    if !indexer.status().is_running {
        return Err("No watch root could be registered (see log for details)".into());
    }

    let mut initial_files_indexed = None;
    if !args.skip_initial {
        print_progress("Running initial full index...", format);
        match indexer.index_all_files().await {
            Ok(Some(stats)) => initial_files_indexed = Some(stats.files_indexed),
            Ok(None) => print_warning("Initial index skipped, indexer busy"),
            Err(e) => print_warning(&format!("Initial index failed: {e}")),
        }
    }

    if format == OutputFormat::Human {
        for root in indexer.watch_roots() {
            println!(
                "{} {}",
                colors::label("Watching"),
                colors::file_path(&root.display().to_string())
            );
        }
        println!("{}", colors::dim("Press Ctrl-C to stop"));
    }

    tokio::signal::ctrl_c().await?;
    indexer.stop();

    let response = WatchResponse {
        initial_files_indexed,
        status: indexer.status(),
    };

    match format {
        OutputFormat::Human => println!("{}", colors::success("Stopped")),
        OutputFormat::Json => print_json(&response)?,
    }

    Ok(())
}

/// Why `start()` would refuse to watch, checked before calling it so the
/// user sees the actual cause
pub fn refusal_reason(services: &Services) -> Option<String> {
    if !services.store.is_enabled() {
        return Some(format!(
            "Vector system is disabled; set {}=true or features.vector_system = true to watch",
            crate::core::storage::VECTOR_SYSTEM_ENV
        ));
    }
    if !services.config.features.mutations_allowed() {
        return Some(format!(
            "Indexing is disabled in the {} environment",
            services.config.features.environment
        ));
    }
    None
}
