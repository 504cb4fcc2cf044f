//! Source text to knowledge chunks.
//!
//! Strips code structure (imports, type declarations, comments,
//! punctuation) from page sources so that only the prose content
//! remains, then splits the prose into fixed-size word windows and
//! classifies each window.
//!
//! # Example
//!
//! ```
//! use kindex::core::indexer::ContentChunker;
//! use kindex::core::types::ContentType;
//!
//! let chunker = ContentChunker::new(800, 50);
//! let text = "export const intro = 'Our team was founded in 2012 and now \
//!             serves clients from our headquarters downtown';";
//! let chunks = chunker.parse(text, "src/data/intro.ts");
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].content_type, ContentType::CompanyInfo);
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::core::types::{ContentChunk, ContentType};

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s'"`)<>]+"#).unwrap());
static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").unwrap());
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:[^;'"]*?\s*from\s*)?['"][^'"]*['"]\s*;?"#).unwrap()
});
static EXPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*export\s+(?:default\s+)?").unwrap());
// Declarations only match at the start of a line, so prose that
// mentions "interface" or "type" is left alone.
static INTERFACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*interface\s+\w+(?:\s*<[^<>{}]*>)?(?:\s+extends\s+[\w.,<> \t]+?)?\s*\{[^}]*\}",
    )
    .unwrap()
});
static TYPE_ALIAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*type\s+\w+(?:\s*<[^<>=;]*>)?\s*=[^;]*;").unwrap()
});
static PATH_STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"`](?:\.{1,2}/|/|@/)[^'"`\s]*['"`]"#).unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}();,]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Placeholder left where a URL was removed
pub const URL_PLACEHOLDER: &str = "[URL]";

/// Placeholder left where a quoted path was removed
pub const PATH_PLACEHOLDER: &str = "[PATH]";

/// Splits cleaned source text into classified word windows.
#[derive(Debug, Clone)]
pub struct ContentChunker {
    /// Maximum words per chunk
    chunk_size_words: usize,

    /// Chunks shorter than this (in characters) are dropped
    min_chunk_chars: usize,
}

impl ContentChunker {
    /// Create a new chunker.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size_words` is 0.
    pub fn new(chunk_size_words: usize, min_chunk_chars: usize) -> Self {
        assert!(chunk_size_words > 0, "chunk_size_words must be > 0");

        Self {
            chunk_size_words,
            min_chunk_chars,
        }
    }

    pub fn chunk_size_words(&self) -> usize {
        self.chunk_size_words
    }

    pub fn min_chunk_chars(&self) -> usize {
        self.min_chunk_chars
    }

    /// Parse raw source text into chunks.
    ///
    /// The same input always yields the same sequence (apart from
    /// `updated_at`). Returns an empty vector when the cleaned text
    /// is shorter than the minimum chunk size.
    pub fn parse(&self, raw_text: &str, source_path: &str) -> Vec<ContentChunk> {
        let cleaned = clean_text(raw_text);
        if cleaned.chars().count() < self.min_chunk_chars {
            return Vec::new();
        }

        let words: Vec<&str> = cleaned.split_whitespace().collect();
        let now = Utc::now();
        let mut chunks = Vec::new();

        for window in words.chunks(self.chunk_size_words) {
            let content = window.join(" ");
            let char_len = content.chars().count();
            if char_len < self.min_chunk_chars {
                continue;
            }

            let content_type = detect_content_type(source_path, &content.to_lowercase());
            chunks.push(ContentChunk {
                token_estimate: char_len.div_ceil(4),
                source_path: source_path.to_string(),
                chunk_index: chunks.len(),
                content_type,
                updated_at: now,
                content,
            });
        }

        chunks
    }
}

/// Remove code structure and collapse whitespace.
///
/// URLs are replaced before comments are stripped so that the `//`
/// of a scheme is never mistaken for a line comment.
pub fn clean_text(raw_text: &str) -> String {
    let text = URL_RE.replace_all(raw_text, URL_PLACEHOLDER);
    let text = BLOCK_COMMENT_RE.replace_all(&text, " ");
    let text = LINE_COMMENT_RE.replace_all(&text, " ");
    let text = IMPORT_RE.replace_all(&text, " ");
    let text = EXPORT_RE.replace_all(&text, "");
    let text = INTERFACE_RE.replace_all(&text, " ");
    let text = TYPE_ALIAS_RE.replace_all(&text, " ");
    let text = PATH_STRING_RE.replace_all(&text, PATH_PLACEHOLDER);
    let text = PUNCT_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Classify a chunk. Categories are checked in priority order and the
/// first match wins.
///
/// `content_lower` must already be lowercased.
pub fn detect_content_type(source_path: &str, content_lower: &str) -> ContentType {
    let file_name = Path::new(source_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source_path)
        .to_lowercase();

    let name_has = |keywords: &[&str]| keywords.iter().any(|k| file_name.contains(k));
    let content_has = |keywords: &[&str]| keywords.iter().any(|k| content_lower.contains(k));

    if name_has(&["aboutus", "about", "company"])
        || content_has(&["founded", "headquarters", "employees", "about us"])
    {
        ContentType::CompanyInfo
    } else if name_has(&["faq", "question"])
        || content_lower.contains("faq")
        || (content_lower.contains("question") && content_lower.contains("answer"))
    {
        ContentType::FaqContent
    } else if name_has(&["process", "step", "workflow"])
        || content_has(&["process", "step", "workflow"])
    {
        ContentType::ProcessContent
    } else if name_has(&["knowledge", "prompt", "mission", "personality"])
        || content_has(&["knowledge", "prompt", "mission", "personality"])
    {
        ContentType::KnowledgeBase
    } else {
        ContentType::GeneralContent
    }
}
