// Pages with non-ASCII content
//
// Multi-byte characters must survive cleaning and windowing intact,
// and the minimum length is measured in characters, not bytes.

use crate::common::{create_test_services, vectors_for, TestSite};
use kindex::core::indexer::ContentChunker;
use kindex::core::types::ContentType;

const GERMAN_PAGE: &str = r#"import { Section } from '@/components/Section';

export default function UeberUns() {
  return (
    <Section>
      <p>Über uns: Unser Büro in München wurde gegründet, um großartige Websites zu gestalten.</p>
    </Section>
  );
}
"#;

const JAPANESE_FAQ: &str = r#"export const faq = [
  { question: 'サービスの開始までにどのくらい時間がかかりますか？', answer: '通常は八週間から十二週間で公開できます。' },
];
"#;

#[tokio::test]
async fn test_german_page_keeps_umlauts() {
    let site = TestSite::with_files(&[("src/components/UeberUns.tsx", GERMAN_PAGE)]);
    let (services, _watch) = create_test_services(&site);

    services.indexer.index_all_files().await.unwrap();

    let vectors = vectors_for(&services, &site.path("src/components/UeberUns.tsx")).await;
    assert_eq!(vectors.len(), 1);
    assert!(vectors[0].content.contains("Über uns"));
    assert!(vectors[0].content.contains("München"));
    assert!(vectors[0].content.contains("großartige"));
    assert!(!vectors[0].content.contains("@/components"));
}

#[tokio::test]
async fn test_japanese_faq_is_classified() {
    let site = TestSite::with_files(&[("src/data/faq.ts", JAPANESE_FAQ)]);
    let (services, _watch) = create_test_services(&site);

    services.indexer.index_all_files().await.unwrap();

    let vectors = vectors_for(&services, &site.path("src/data/faq.ts")).await;
    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].content_type, ContentType::FaqContent);
    assert!(vectors[0].content.contains("十二週間"));
}

#[test]
fn test_min_length_counts_characters() {
    let chunker = ContentChunker::new(800, 50);

    // 20 characters, 60 bytes: below the minimum
    let short = "日本語".repeat(6) + "です";
    assert!(short.len() >= 50);
    assert!(chunker.parse(&short, "src/data/short.ts").is_empty());

    // 60 characters: above it
    let long = "あ".repeat(60);
    let chunks = chunker.parse(&long, "src/data/long.ts");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].token_estimate, 15);
}

#[test]
fn test_emoji_survive_cleaning() {
    let chunker = ContentChunker::new(800, 10);
    let chunks = chunker.parse(
        "export const hero = 'We ship 🚀 websites with care ❤️ every single week';",
        "src/components/Hero.tsx",
    );

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.contains("🚀"));
    assert!(chunks[0].content.contains("❤️"));
}
