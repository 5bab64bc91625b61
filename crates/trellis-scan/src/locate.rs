//! Start locator expansion
//!
//! A locator is a single file, a directory (expanded non-recursively to its
//! source-extension children), or a glob pattern (expanded over the tree
//! beneath its literal prefix). Type-declaration files are never listed.

use crate::error::ScanError;
use globset::Glob;
use ignore::WalkBuilder;
use std::path::Path;
use trellis_core::normalize;

/// Expand `locator` into an ordered list of concrete source files.
pub fn list_source_files(locator: &str, extensions: &[String]) -> Result<Vec<String>, ScanError> {
    let path = Path::new(locator);
    if path.is_file() {
        return Ok(vec![locator.to_string()]);
    }
    if path.is_dir() {
        return list_dir(locator, extensions);
    }
    expand_glob(locator, extensions)
}

fn is_source_file(name: &str, extensions: &[String]) -> bool {
    if name.ends_with(".d.ts") {
        return false;
    }
    extensions.iter().any(|ext| name.ends_with(&format!(".{ext}")))
}

fn list_dir(dir: &str, extensions: &[String]) -> Result<Vec<String>, ScanError> {
    let mut files = Vec::new();
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    for entry in walker {
        let entry = entry.map_err(|e| ScanError::Io {
            path: dir.to_string(),
            source: std::io::Error::other(e),
        })?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let name = entry.path().to_string_lossy().into_owned();
        if is_source_file(&name, extensions) {
            files.push(name);
        }
    }
    Ok(files)
}

fn expand_glob(pattern: &str, extensions: &[String]) -> Result<Vec<String>, ScanError> {
    let matcher = Glob::new(&normalize(pattern))
        .map_err(|source| ScanError::Glob {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let root = literal_prefix(pattern);
    let mut files = Vec::new();
    let walker = WalkBuilder::new(&root)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let name = normalize(&entry.path().to_string_lossy());
        if matcher.is_match(&name) && is_source_file(&name, extensions) {
            files.push(name);
        }
    }
    if files.is_empty() {
        return Err(ScanError::StartNotFound(pattern.to_string()));
    }
    Ok(files)
}

/// The wildcard-free directory prefix of a glob pattern; the walk starts
/// there instead of the whole working directory.
fn literal_prefix(pattern: &str) -> String {
    let normalized = normalize(pattern);
    let mut prefix = Vec::new();
    for segment in normalized.split('/') {
        if segment.contains(['*', '?', '[', '{']) {
            break;
        }
        prefix.push(segment);
    }
    if prefix.is_empty() {
        ".".to_string()
    } else {
        prefix.join("/")
    }
}
