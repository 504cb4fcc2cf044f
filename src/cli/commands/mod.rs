//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command.

pub mod clear_source;
pub mod completions;
pub mod config;
pub mod full_index;
pub mod stats;
pub mod watch;

// Re-export argument types for use in mod.rs
pub use clear_source::ClearSourceArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use full_index::FullIndexArgs;
pub use stats::StatsArgs;
pub use watch::WatchArgs;
