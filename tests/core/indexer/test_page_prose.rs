// Prose survival in realistic page sources
//
// Marketing copy routinely uses words that are also TypeScript
// keywords. Cleaning must strip declarations without touching the
// sentences around them.

use crate::common::{create_test_services, vectors_for, TestSite};
use kindex::core::indexer::ContentChunker;
use kindex::core::types::ContentType;

const HOME_PAGE: &str = r#"'use client';

import { useState } from 'react';
import { Button } from '@/components/ui/Button';

interface HeroProps {
  title: string;
  onQuote?: () => void;
}

type Tab = 'residential' | 'commercial';

export default function HomePage({ title, onQuote }: HeroProps) {
  const [tab, setTab] = useState<Tab>('residential');

  return (
    <main>
      <h1>{title}</h1>
      <p>
        Our clean interface makes every settlement quote simple and our team
        answers calls all week long.
      </p>
      <Button onClick={() => setTab('commercial')}>Commercial</Button>
      <p>Pick the type of cleaning you need and we export a detailed checklist to your inbox.</p>
      <input type="email" placeholder="you@example.com" />
      <Button onClick={onQuote}>Get a quote</Button>
    </main>
  );
}
"#;

const SERVICES_DATA: &str = r#"export interface Service {
  name: string;
  blurb: string;
}

export type ServiceList = Service[];

export const services: ServiceList = [
  {
    name: 'Move-out cleaning',
    blurb: 'A single interface for booking, paying and rating your crew, with no hidden fees.',
  },
  {
    name: 'Office care',
    blurb: 'Whatever type of office you run, we export our schedule straight to your calendar.',
  },
];
"#;

#[test]
fn test_home_page_sentences_survive() {
    let chunker = ContentChunker::new(800, 50);
    let chunks = chunker.parse(HOME_PAGE, "src/app/HomePage.tsx");

    assert_eq!(chunks.len(), 1);
    let content = &chunks[0].content;
    assert!(content.contains(
        "Our clean interface makes every settlement quote simple and our team answers calls all week long."
    ));
    assert!(content.contains(
        "Pick the type of cleaning you need and we export a detailed checklist to your inbox."
    ));
    assert!(content.contains("Get a quote"));
    assert!(content.contains("Commercial"));

    // Declarations are gone
    assert!(!content.contains("HeroProps {"));
    assert!(!content.contains("onQuote?"));
    assert!(!content.contains("'residential' |"));
    assert!(!content.contains("import"));
    assert!(!content.contains("@/components"));
}

#[test]
fn test_data_module_sentences_survive() {
    let chunker = ContentChunker::new(800, 50);
    let chunks = chunker.parse(SERVICES_DATA, "src/data/services.ts");

    assert_eq!(chunks.len(), 1);
    let content = &chunks[0].content;
    assert!(content.contains("A single interface for booking"));
    assert!(content.contains("paying and rating your crew"));
    assert!(content.contains("Whatever type of office you run"));
    assert!(content.contains("we export our schedule straight to your calendar."));
    assert!(!content.contains("blurb: string"));
    assert!(!content.contains("Service[]"));
}

#[tokio::test]
async fn test_full_index_keeps_page_prose() {
    let site = TestSite::with_files(&[
        ("src/app/HomePage.tsx", HOME_PAGE),
        ("src/data/services.ts", SERVICES_DATA),
    ]);
    let (services, _watch) = create_test_services(&site);

    let stats = services.indexer.index_all_files().await.unwrap().unwrap();
    assert_eq!(stats.files_indexed, 2);
    assert_eq!(stats.chunks_created, 2);

    let home = vectors_for(&services, &site.path("src/app/HomePage.tsx")).await;
    assert_eq!(home.len(), 1);
    assert!(home[0].content.contains("settlement quote simple"));
    assert_eq!(home[0].content_type, ContentType::GeneralContent);

    let data = vectors_for(&services, &site.path("src/data/services.ts")).await;
    assert_eq!(data.len(), 1);
    assert!(data[0].content.contains("no hidden fees"));
}
