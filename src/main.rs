//! kindex HTTP server entry point
//!
//! Starts the knowledge indexer and its REST control API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kindex::core::config::Config;
use kindex::core::services::Services;
use kindex::core::xdg::XdgDirs;
use kindex::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kindex=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting kindex knowledge indexer");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create shared services
    let services = Arc::new(Services::new(config.clone()));

    // Watch and run the startup pass when the environment allows it
    if config.features.mutations_allowed() {
        services.indexer.start();

        let indexer = services.indexer.clone();
        tokio::spawn(async move {
            match indexer.index_all_files().await {
                Ok(Some(stats)) => tracing::info!(
                    "Startup index: {} files, {} chunks",
                    stats.files_indexed,
                    stats.chunks_created
                ),
                Ok(None) => tracing::info!("Startup index skipped, indexer busy"),
                Err(e) => tracing::error!("Startup index failed: {}", e),
            }
        });
    } else {
        tracing::info!(
            "Auto-indexing disabled in {} environment",
            config.features.environment
        );
    }

    let app = http::router(Arc::clone(&services));

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.indexer.stop();
    tracing::info!("kindex stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
