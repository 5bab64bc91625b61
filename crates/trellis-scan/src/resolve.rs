//! Import specifier resolution
//!
//! Alias-pattern rewriting followed by extension/index fallback probing.
//! Resolution never fails hard: a specifier nothing on disk matches is
//! simply reported as unresolved and the caller records it.

use crate::config::{AliasConfig, COMPILED_EXTENSIONS};
use std::path::Path;
use trellis_core::PathObj;

/// Resolve a raw specifier found in `containing_file` to a concrete file.
///
/// Relative specifiers resolve against the containing file's directory;
/// alias-rewritten candidates resolve from the alias base directory.
/// Overlapping alias patterns resolve first-match-wins — a known
/// limitation, no best-match heuristic is attempted.
pub fn resolve(
    specifier: &str,
    containing_file: &str,
    aliases: &AliasConfig,
    extensions: &[String],
) -> Option<PathObj> {
    // candidates are probed in pattern order; the first existing one wins
    let mut matched_any = false;
    for alias in &aliases.patterns {
        let Some(captured) = match_pattern(&alias.pattern, specifier) else {
            continue;
        };
        matched_any = true;
        for replacement in &alias.replacements {
            let rewritten = substitute(replacement, captured);
            let candidate = join(&aliases.base_dir, &rewritten);
            if let Some(found) = probe(&candidate, extensions) {
                return Some(PathObj::new(found));
            }
        }
    }
    if matched_any {
        return None;
    }

    // only same-tree relative imports participate in the graph
    if !is_relative(specifier) {
        return None;
    }
    let containing_dir = parent_dir(containing_file);
    let candidate = join(&containing_dir, specifier);
    probe(&candidate, extensions).map(PathObj::new)
}

/// The substring captured by the pattern's single wildcard, or `""` for a
/// literal pattern that matches exactly.
fn match_pattern<'a>(pattern: &str, specifier: &'a str) -> Option<&'a str> {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => specifier
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix)),
        None => (pattern == specifier).then_some(""),
    }
}

fn substitute(replacement: &str, captured: &str) -> String {
    if replacement.contains('*') {
        replacement.replace('*', captured)
    } else {
        replacement.to_string()
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./") || specifier.starts_with("../")
}

fn parent_dir(file: &str) -> String {
    match Path::new(file).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}

/// Lexically join `dir` and `rel`, folding `.` and `..` segments.
fn join(dir: &str, rel: &str) -> String {
    let absolute = dir.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in dir.split('/').chain(rel.split('/')) {
        match seg {
            "" | "." => {}
            ".." => {
                if parts.last().is_none_or(|p| *p == "..") {
                    parts.push("..");
                } else {
                    parts.pop();
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Probe candidates for `base` in fixed order: each source extension, the
/// index file, then — for compiled-output specifiers — the source sibling.
fn probe(base: &str, extensions: &[String]) -> Option<String> {
    for ext in extensions {
        let candidate = format!("{base}.{ext}");
        if Path::new(&candidate).exists() {
            return Some(candidate);
        }
    }
    if let Some(primary) = extensions.first() {
        let index = format!("{base}/index.{primary}");
        if Path::new(&index).exists() {
            return Some(index);
        }
    }
    for compiled in COMPILED_EXTENSIONS {
        let Some(stem) = base.strip_suffix(&format!(".{compiled}")) else {
            continue;
        };
        for ext in extensions {
            let sibling = format!("{stem}.{ext}");
            if Path::new(&sibling).exists() {
                return Some(sibling);
            }
        }
    }
    None
}
