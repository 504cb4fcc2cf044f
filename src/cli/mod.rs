//! CLI adapter for kindex
//!
//! Provides a command-line interface to the knowledge indexer.
//! This module is parallel to `http/` - both depend on `core/` but not
//! on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// kindex - File-watching knowledge indexer
///
/// Extracts prose from site page sources into classified chunks and
/// keeps a vector store in sync as files change.
#[derive(Parser, Debug)]
#[command(name = "kindex-cli")]
#[command(version)]
#[command(about = "File-watching knowledge indexer", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
///
/// Command names match the HTTP indexer actions where one exists.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-index every file under the configured watch roots
    #[command(name = "full-index")]
    FullIndex(commands::FullIndexArgs),

    /// Watch the configured roots and index changes until Ctrl-C
    Watch(commands::WatchArgs),

    /// Show vector store statistics
    Stats(commands::StatsArgs),

    /// Remove every stored vector for one source file
    #[command(name = "clear-source")]
    ClearSource(commands::ClearSourceArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  kindex-cli completions bash > ~/.local/share/bash-completion/completions/kindex-cli
    ///   zsh:   kindex-cli completions zsh > ~/.zfunc/_kindex-cli
    ///   fish:  kindex-cli completions fish > ~/.config/fish/completions/kindex-cli.fish
    Completions(commands::CompletionsArgs),
}

impl Commands {
    /// Whether the command writes to the store or watches files
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Commands::FullIndex(_) | Commands::Watch(_) | Commands::ClearSource(_)
        )
    }
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;

    if cli.command.is_mutating() && !config.features.mutations_allowed() {
        return Err(format!(
            "Indexing is disabled in the {} environment. \
             Set KINDEX_PRODUCTION_AUTO_INDEXING=true to allow it.",
            config.features.environment
        )
        .into());
    }

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::FullIndex(args) => {
            commands::full_index::execute(args, &services, cli.format).await
        }
        Commands::Watch(args) => commands::watch::execute(args, &services, cli.format).await,
        Commands::Stats(args) => commands::stats::execute(args, &services, cli.format).await,
        Commands::ClearSource(args) => {
            commands::clear_source::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
