// Full re-index scenarios
//
// Drives KnowledgeIndexer::index_all_files over a real directory tree
// and checks counts, classification and replace-not-append behavior.

use crate::common::{create_test_services, vectors_for, words, TestSite};
use kindex::core::types::ContentType;

#[tokio::test]
async fn test_full_index_counts_only_eligible_files() {
    let site = TestSite::with_files(&[
        ("src/components/Big.tsx", &words(2500)),
        ("src/lib/Small.ts", &words(100)),
        ("src/data/Empty.js", ""),
        ("src/components/a.test.ts", &words(100)),
        ("src/components/node_modules/pkg/index.js", &words(100)),
    ]);
    let (services, _watch) = create_test_services(&site);

    let stats = services
        .indexer
        .index_all_files()
        .await
        .unwrap()
        .expect("indexer should not be busy");

    assert_eq!(stats.files_indexed, 3);
    // ceil(2500 / 800) = 4 windows, last one 100 words
    assert_eq!(stats.chunks_created, 5);
    assert_eq!(stats.roots_walked, 4);
    assert_eq!(stats.roots_failed, 0);

    let big = vectors_for(&services, &site.path("src/components/Big.tsx")).await;
    let mut indices: Vec<usize> = big.iter().map(|v| v.chunk_index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_full_index_classifies_standard_site() {
    let site = TestSite::standard();
    let (services, _watch) = create_test_services(&site);

    let stats = services.indexer.index_all_files().await.unwrap().unwrap();
    assert_eq!(stats.files_indexed, 3);
    assert_eq!(stats.chunks_created, 3);

    let stats = services.store.get_stats().await;
    assert_eq!(stats.total_vectors, 3);
    assert_eq!(stats.counts_by_type.get("company_info"), Some(&1));
    assert_eq!(stats.counts_by_type.get("faq_content"), Some(&1));
    assert_eq!(stats.counts_by_type.get("process_content"), Some(&1));
    assert!(stats.most_recent_update.is_some());

    let about = vectors_for(&services, &site.path("src/components/Pages/About/AboutPage.tsx")).await;
    assert_eq!(about.len(), 1);
    assert_eq!(about[0].content_type, ContentType::CompanyInfo);
    assert!(about[0].content.contains("founded in 2012"));
    assert!(about[0].content.contains("[URL]"));
    assert!(!about[0].content.contains("import"));
}

#[tokio::test]
async fn test_full_index_twice_replaces_vectors() {
    let site = TestSite::standard();
    let (services, _watch) = create_test_services(&site);

    services.indexer.index_all_files().await.unwrap();
    let first_ids: Vec<String> = services
        .store
        .get_all_vectors()
        .await
        .into_iter()
        .map(|v| v.id)
        .collect();

    services.indexer.index_all_files().await.unwrap();
    let second = services.store.get_all_vectors().await;

    assert_eq!(second.len(), first_ids.len());
    assert!(second.iter().all(|v| !first_ids.contains(&v.id)));
}

#[tokio::test]
async fn test_full_index_survives_missing_root() {
    let site = TestSite::standard();
    std::fs::remove_dir_all(site.path("src/lib")).unwrap();
    let (services, _watch) = create_test_services(&site);

    let stats = services.indexer.index_all_files().await.unwrap().unwrap();
    assert_eq!(stats.roots_walked, 3);
    assert_eq!(stats.roots_failed, 1);
    assert_eq!(stats.files_indexed, 3);
}
