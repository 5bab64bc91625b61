//! Path normalization and display helpers
//!
//! Normalized paths are the identity keys for graph nodes; the original
//! spelling is kept alongside for filesystem probes.

use serde::{Deserialize, Serialize};

/// A filesystem path in both its original and normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathObj {
    /// The path as it was found (original separators, casing).
    pub orig: String,
    /// Canonical forward-slash form, used as graph identity.
    pub norm: String,
}

impl PathObj {
    pub fn new(path: impl Into<String>) -> Self {
        let orig = path.into();
        let norm = normalize(&orig);
        PathObj { orig, norm }
    }
}

/// Convert a path to its canonical forward-slash form.
///
/// Strips the Windows long-path prefix, converts backslashes to `/` and
/// collapses runs of separators. Pure and idempotent.
pub fn normalize(path: &str) -> String {
    let stripped = path.strip_prefix(r"\\?\").unwrap_or(path);
    let mut out = String::with_capacity(stripped.len());
    let mut prev_sep = false;
    for c in stripped.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if prev_sep {
                continue;
            }
            prev_sep = true;
        } else {
            prev_sep = false;
        }
        out.push(c);
    }
    out
}

/// Express `path` relative to `base`.
///
/// Both sides are normalized first; an empty or `.` base returns the path
/// unchanged. Walks up with `..` segments when `path` is not under `base`.
pub fn relative_to(base: &str, path: &str) -> String {
    let base = normalize(base);
    let path = normalize(path);
    if base.is_empty() || base == "." {
        return path;
    }
    let base_parts: Vec<&str> = segments(&base);
    let path_parts: Vec<&str> = segments(&path);
    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut out: Vec<&str> = vec![".."; base_parts.len() - common];
    out.extend(&path_parts[common..]);
    if out.is_empty() {
        ".".to_string()
    } else {
        out.join("/")
    }
}

/// Directory portion of a normalized path; `.` for bare file names.
pub fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(i) => path[..i].to_string(),
        None => ".".to_string(),
    }
}

/// Final component of a normalized path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|p| !p.is_empty() && *p != ".").collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_idempotent() {
        let samples = [r"\\?\C:\repo\src\a.ts", "src//lib///a.ts", "src/a.ts"];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_converts_separators() {
        assert_eq!(normalize(r"src\scan\mod.ts"), "src/scan/mod.ts");
        assert_eq!(normalize("src//scan//mod.ts"), "src/scan/mod.ts");
        assert_eq!(normalize(r"\\?\C:\repo\a.ts"), "C:/repo/a.ts");
    }

    #[test]
    fn relative_strips_base_prefix() {
        assert_eq!(relative_to("project", "project/src/a.ts"), "src/a.ts");
        assert_eq!(relative_to("", "project/src/a.ts"), "project/src/a.ts");
        assert_eq!(relative_to("a/b", "a/c/d.ts"), "../c/d.ts");
    }

    #[test]
    fn dirname_of_bare_file_is_dot() {
        assert_eq!(dirname("start.ts"), ".");
        assert_eq!(dirname("src/start.ts"), "src");
        assert_eq!(basename("src/leafs/leaf.ts"), "leaf.ts");
    }
}
