//! Path eligibility rules.
//!
//! Decides which files carry indexable content and which paths are
//! skipped. Ignore patterns are plain substrings, not globs: a
//! pattern such as `**/*.log` only matches a path that literally
//! contains `**/*.log`.

use std::path::Path;

/// Source extensions that carry page content
const INDEXED_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

/// File name fragments that mark tests and tooling files
const EXCLUDED_NAME_FRAGMENTS: [&str; 3] = ["test", "spec", "config"];

/// Path fragments for dependency and build output trees
const EXCLUDED_PATH_FRAGMENTS: [&str; 4] = ["node_modules", ".git", ".next", "dist"];

/// True if the file should be parsed into chunks
pub fn should_index(path: &Path) -> bool {
    let has_indexed_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| INDEXED_EXTENSIONS.contains(&e))
        .unwrap_or(false);
    if !has_indexed_extension {
        return false;
    }

    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_lowercase(),
        None => return false,
    };
    if file_name.ends_with(".d.ts")
        || EXCLUDED_NAME_FRAGMENTS
            .iter()
            .any(|fragment| file_name.contains(fragment))
    {
        return false;
    }

    let path_str = path.to_string_lossy();
    !EXCLUDED_PATH_FRAGMENTS
        .iter()
        .any(|fragment| path_str.contains(fragment))
}

/// True if the path contains any configured ignore pattern
pub fn should_ignore_path(path: &Path, ignore_patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    ignore_patterns
        .iter()
        .any(|pattern| !pattern.is_empty() && path_str.contains(pattern.as_str()))
}
