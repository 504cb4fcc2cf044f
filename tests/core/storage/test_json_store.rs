// JSON collection persistence
//
// A full pass written through one Services instance must be readable
// by a fresh instance pointed at the same file.

use crate::common::{test_config, TestSite};
use kindex::core::config::{BackendKind, Config};
use kindex::core::services::Services;

fn json_config(site: &TestSite) -> Config {
    let mut config = test_config(site);
    config.storage.backend = BackendKind::Json;
    config.storage.vectors_file = site.path("data/vectors.json");
    config
}

#[tokio::test]
async fn test_vectors_survive_restart() {
    let site = TestSite::standard();

    let services = Services::new(json_config(&site));
    services.indexer.index_all_files().await.unwrap();
    assert_eq!(services.store.get_stats().await.total_vectors, 3);
    drop(services);

    assert!(site.path("data/vectors.json").exists());

    let reopened = Services::new(json_config(&site));
    let stats = reopened.store.get_stats().await;
    assert_eq!(stats.total_vectors, 3);
    assert_eq!(stats.counts_by_type.get("company_info"), Some(&1));
}

#[tokio::test]
async fn test_file_is_versioned_json() {
    let site = TestSite::standard();
    let services = Services::new(json_config(&site));
    services.indexer.index_all_files().await.unwrap();

    let raw = std::fs::read_to_string(site.path("data/vectors.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(doc["schema_version"], 1);
    let vectors = doc["vectors"].as_array().unwrap();
    assert_eq!(vectors.len(), 3);
    assert!(vectors
        .iter()
        .all(|v| v["source_path"].as_str().unwrap().ends_with(".tsx")
            || v["source_path"].as_str().unwrap().ends_with(".ts")));
}

#[tokio::test]
async fn test_clear_source_is_persisted() {
    let site = TestSite::standard();
    let faq = site.path("src/data/faqData.ts");

    let services = Services::new(json_config(&site));
    services.indexer.index_all_files().await.unwrap();
    services
        .store
        .clear_by_source(&faq.to_string_lossy())
        .await;
    drop(services);

    let reopened = Services::new(json_config(&site));
    let vectors = reopened.store.get_all_vectors().await;
    assert_eq!(vectors.len(), 2);
    assert!(vectors
        .iter()
        .all(|v| v.source_path != faq.to_string_lossy()));
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let site = TestSite::new();
    let services = Services::new(json_config(&site));

    let stats = services.store.get_stats().await;
    assert_eq!(stats.total_vectors, 0);
    assert!(stats.most_recent_update.is_none());
    assert!(!site.path("data/vectors.json").exists());
}
