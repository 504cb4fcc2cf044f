//! Tests for CLI command handlers
//!
//! Commands run with JSON output so nothing depends on terminal colors.

use kindex::cli::commands::{clear_source, config, full_index, stats, watch};
use kindex::cli::commands::{ClearSourceArgs, ConfigArgs, FullIndexArgs, StatsArgs, WatchArgs};
use kindex::cli::OutputFormat;
use kindex::core::services::Services;
use std::sync::Arc;

use super::test_helpers::create_cli_test_services;
use crate::common::{test_config, ManualWatchBackend, TestSite};

#[tokio::test]
async fn test_full_index_populates_store() {
    let (services, _site) = create_cli_test_services();

    full_index::execute(FullIndexArgs { quiet: true }, &services, OutputFormat::Json)
        .await
        .unwrap();

    assert_eq!(services.store.get_stats().await.total_vectors, 3);
}

#[tokio::test]
async fn test_full_index_human_output() {
    let (services, _site) = create_cli_test_services();

    let result =
        full_index::execute(FullIndexArgs { quiet: false }, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_full_index_fails_without_roots() {
    let (services, site) = create_cli_test_services();
    for root in site.watch_roots() {
        std::fs::remove_dir_all(root).unwrap();
    }

    let result =
        full_index::execute(FullIndexArgs { quiet: true }, &services, OutputFormat::Json).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let (services, _site) = create_cli_test_services();

    for format in [OutputFormat::Human, OutputFormat::Json] {
        stats::execute(StatsArgs {}, &services, format).await.unwrap();
    }
}

#[tokio::test]
async fn test_clear_source_removes_only_that_file() {
    let (services, site) = create_cli_test_services();
    services.indexer.index_all_files().await.unwrap();

    clear_source::execute(
        ClearSourceArgs {
            path: site.path("src/app/process/ProcessOverview.tsx"),
        },
        &services,
        OutputFormat::Json,
    )
    .await
    .unwrap();

    let stats = services.store.get_stats().await;
    assert_eq!(stats.total_vectors, 2);
    assert_eq!(stats.counts_by_type.get("process_content"), None);
}

#[tokio::test]
async fn test_clear_source_for_deleted_file() {
    let (services, site) = create_cli_test_services();
    services.indexer.index_all_files().await.unwrap();
    site.remove("src/data/faqData.ts");

    clear_source::execute(
        ClearSourceArgs {
            path: site.path("src/data/faqData.ts"),
        },
        &services,
        OutputFormat::Human,
    )
    .await
    .unwrap();

    assert_eq!(services.store.get_stats().await.total_vectors, 2);
}

#[tokio::test]
async fn test_show_config() {
    let (services, _site) = create_cli_test_services();

    for all in [false, true] {
        config::execute(ConfigArgs { all }, &services, OutputFormat::Json)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_watch_reports_disabled_vector_system() {
    let site = TestSite::standard();
    let mut config = test_config(&site);
    config.features.vector_system = false;
    let services = Arc::new(Services::with_watch_backend(
        config,
        Arc::new(ManualWatchBackend::default()),
    ));

    let err = watch::execute(WatchArgs { skip_initial: true }, &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Vector system is disabled"));
    assert!(!services.indexer.status().is_running);
}

#[tokio::test]
async fn test_watch_has_no_refusal_in_development() {
    let (services, _site) = create_cli_test_services();
    assert_eq!(watch::refusal_reason(&services), None);
}
