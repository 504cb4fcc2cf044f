//! kindex CLI - Command-line interface for the knowledge indexer
//!
//! Drives the same indexer and vector store as the HTTP server,
//! for scripting, cron jobs, or local development.
//!
//! # Examples
//!
//! ```bash
//! # Re-index every watch root
//! kindex-cli full-index
//!
//! # Keep the store in sync while editing pages
//! kindex-cli watch
//!
//! # Inspect the store
//! kindex-cli stats --format json
//!
//! # Show configuration
//! kindex-cli show-config --all
//! ```

use clap::Parser;
use kindex::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kindex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
