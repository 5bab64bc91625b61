//! Alias discovery from tsconfig.json
//!
//! When no aliases are configured explicitly, `compilerOptions.paths` and
//! `baseUrl` from the nearest tsconfig.json supply them.

use crate::config::{AliasConfig, AliasPattern};
use std::path::{Path, PathBuf};

/// Search tsconfig.json walking up from `start_dir`, parse `paths` +
/// `baseUrl` into an [`AliasConfig`]. Returns `None` when there is no
/// usable config; the scan then runs without alias rewriting.
pub fn load_alias_config(start_dir: &Path) -> Option<AliasConfig> {
    let tsconfig_path = find_tsconfig(start_dir)?;
    let content = std::fs::read_to_string(&tsconfig_path).ok()?;
    let stripped = strip_jsonc_comments(&content);

    let val: serde_json::Value = match serde_json::from_str(&stripped) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                path = %tsconfig_path.display(),
                error = %e,
                "failed to parse tsconfig.json"
            );
            return None;
        }
    };

    let compiler = val.get("compilerOptions")?;
    let tsconfig_dir = tsconfig_path.parent()?;

    let base_dir = match compiler.get("baseUrl").and_then(serde_json::Value::as_str) {
        Some(".") | None => tsconfig_dir.to_path_buf(),
        Some(b) => tsconfig_dir.join(b),
    };

    let paths = compiler.get("paths")?.as_object()?;
    let mut patterns = Vec::new();
    for (pattern, targets) in paths {
        let replacements: Vec<String> = targets
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();
        patterns.push(AliasPattern {
            pattern: pattern.clone(),
            replacements,
        });
    }

    tracing::debug!(
        path = %tsconfig_path.display(),
        patterns = patterns.len(),
        "loaded alias config"
    );
    Some(AliasConfig {
        base_dir: base_dir.to_string_lossy().into_owned(),
        patterns,
    })
}

fn find_tsconfig(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join("tsconfig.json");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Remove `//` and `/* */` comments so serde_json accepts the JSONC
/// dialect tsconfig files are commonly written in. String contents are
/// preserved.
fn strip_jsonc_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
