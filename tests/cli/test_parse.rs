//! Tests for CLI argument parsing

use clap::Parser;
use kindex::cli::{Cli, Commands, OutputFormat};

#[test]
fn test_parse_full_index() {
    let cli = Cli::try_parse_from(["kindex-cli", "full-index", "--quiet"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Human);
    match cli.command {
        Commands::FullIndex(args) => assert!(args.quiet),
        other => panic!("Expected full-index, got {other:?}"),
    }
}

#[test]
fn test_format_is_global() {
    let cli = Cli::try_parse_from(["kindex-cli", "stats", "--format", "json"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_clear_source_requires_path() {
    assert!(Cli::try_parse_from(["kindex-cli", "clear-source"]).is_err());

    let cli = Cli::try_parse_from(["kindex-cli", "clear-source", "src/data/faq.ts"]).unwrap();
    match cli.command {
        Commands::ClearSource(args) => assert!(args.path.ends_with("faq.ts")),
        other => panic!("Expected clear-source, got {other:?}"),
    }
}

#[test]
fn test_mutating_commands() {
    let mutating = ["full-index", "watch", "clear-source"];
    let read_only = ["stats", "show-config"];

    for name in mutating {
        let mut argv = vec!["kindex-cli", name];
        if name == "clear-source" {
            argv.push("a.tsx");
        }
        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(cli.command.is_mutating(), "{name} should be mutating");
    }
    for name in read_only {
        let cli = Cli::try_parse_from(["kindex-cli", name]).unwrap();
        assert!(!cli.command.is_mutating(), "{name} should be read-only");
    }
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["kindex-cli", "search-code"]).is_err());
}
