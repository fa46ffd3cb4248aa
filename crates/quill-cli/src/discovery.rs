//! Source file discovery from command-line patterns.
//!
//! Each pattern is either an existing file, an existing directory (searched
//! recursively) or a glob matched against paths relative to the root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CliError, Result};

/// Extensions of files the tool will process.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"];

/// Directories never searched.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Resolve `patterns` to source files under `root`.
///
/// Results keep pattern order (files within one pattern in walk order) and
/// contain no duplicates.
pub fn discover(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let matched = expand(root, pattern)?;
        tracing::debug!(%pattern, matches = matched.len(), "expanded pattern");
        for path in matched {
            if is_source_file(&path) && seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn expand(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let literal = root.join(pattern);
    if literal.is_file() {
        return Ok(vec![literal]);
    }
    if literal.is_dir() {
        return Ok(walk(&literal).map(|entry| entry.into_path()).collect());
    }

    let matcher = compile(pattern)?;
    Ok(walk(root)
        .filter(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            matcher.is_match(relative) || matcher.is_match(entry.path())
        })
        .map(|entry| entry.into_path())
        .collect())
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| CliError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Files below `dir` in a stable order, skipping dependency and VCS folders.
fn walk(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
