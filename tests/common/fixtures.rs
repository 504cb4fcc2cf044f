// Test fixtures for integration testing

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Watch roots every test site is created with
#[allow(dead_code)] // Used in integration tests
pub const SITE_ROOTS: [&str; 4] = ["src/components", "src/app", "src/lib", "src/data"];

#[allow(dead_code)] // Used in integration tests
pub const ABOUT_PAGE: &str = r#"import React from 'react';
import { Hero } from '../Hero';

// Landing copy for the about page
export default function AboutPage() {
  return (
    <section>
      <h1>About Us</h1>
      <p>Acme Studio was founded in 2012 and our headquarters sit in Portland
         where forty employees design and build marketing sites.</p>
      <a href="https://acme.example.com/careers">Careers</a>
    </section>
  );
}
"#;

#[allow(dead_code)] // Used in integration tests
pub const FAQ_DATA: &str = r#"export interface FaqItem {
  question: string;
  answer: string;
}

export const faqItems: FaqItem[] = [
  {
    question: 'How long does a typical website project take from kickoff to launch?',
    answer: 'Most projects launch within eight to twelve weeks depending on scope.',
  },
];
"#;

#[allow(dead_code)] // Used in integration tests
pub const PROCESS_PAGE: &str = r#"/* Process overview */
export function ProcessOverview() {
  return (
    <ol>
      <li>Step one: discovery workshop with stakeholders and a content audit</li>
      <li>Step two: wireframes, visual design and an iterative review workflow</li>
    </ol>
  );
}
"#;

/// A throwaway site tree with the default watch roots
#[allow(dead_code)] // Used in integration tests
pub struct TestSite {
    pub dir: TempDir,
}

#[allow(dead_code)] // Used in integration tests
impl TestSite {
    /// Empty site with the four watch roots created
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for root in SITE_ROOTS {
            fs::create_dir_all(dir.path().join(root)).expect("Failed to create watch root");
        }
        Self { dir }
    }

    /// Site with the given (relative path, content) files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let site = Self::new();
        for (path, content) in files {
            site.write(path, content);
        }
        site
    }

    /// Small marketing site: three content pages plus files that must
    /// never be indexed
    pub fn standard() -> Self {
        Self::with_files(&[
            ("src/components/Pages/About/AboutPage.tsx", ABOUT_PAGE),
            ("src/data/faqData.ts", FAQ_DATA),
            ("src/app/process/ProcessOverview.tsx", PROCESS_PAGE),
            ("src/components/Pages/About/AboutPage.test.tsx", ABOUT_PAGE),
            ("src/lib/types.d.ts", "export type Slug = string;"),
            ("src/components/node_modules/react/index.js", ABOUT_PAGE),
            ("src/app/globals.css", "body { margin: 0; }"),
        ])
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn watch_roots(&self) -> Vec<PathBuf> {
        SITE_ROOTS.iter().map(|r| self.path(r)).collect()
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.path(relative)).expect("Failed to remove file");
    }
}

/// `n` plain words separated by single spaces
#[allow(dead_code)] // Used in integration tests
pub fn words(n: usize) -> String {
    vec!["content"; n].join(" ")
}
