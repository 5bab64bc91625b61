//! Per-folder metadata (`info.json`) lookup

use serde::Deserialize;
use std::path::{Path, PathBuf};
use trellis_core::DEFAULT_LAYER;

/// Upward probes before giving up.
const MAX_PROBES: usize = 10;

pub const INFO_FILE: &str = "info.json";

/// Folder metadata; on-disk shape is exactly
/// `{"layer": <integer>, "area": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderInfo {
    #[serde(default = "default_layer")]
    pub layer: u32,
    #[serde(default = "default_area")]
    pub area: String,
}

fn default_layer() -> u32 {
    DEFAULT_LAYER
}

fn default_area() -> String {
    "universe".to_string()
}

impl Default for FolderInfo {
    fn default() -> Self {
        FolderInfo {
            layer: DEFAULT_LAYER,
            area: default_area(),
        }
    }
}

/// Metadata for `file`: probe its directory, then up to ten ancestors.
/// Missing or unreadable metadata yields the default.
pub fn folder_info(file: &Path) -> FolderInfo {
    let mut dir: PathBuf = match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    for _ in 0..MAX_PROBES {
        let candidate = dir.join(INFO_FILE);
        if candidate.exists() {
            return read_info(&candidate);
        }
        dir.push("..");
    }
    FolderInfo::default()
}

fn read_info(path: &Path) -> FolderInfo {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable info.json");
            return FolderInfo::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed info.json");
            FolderInfo::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_layer_from_same_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(INFO_FILE), r#"{"layer": 10, "area": "core"}"#).unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();

        let info = folder_info(&dir.path().join("a.ts"));
        assert_eq!(info.layer, 10);
        assert_eq!(info.area, "core");
    }

    #[test]
    fn searches_ancestor_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/deep")).unwrap();
        fs::write(dir.path().join(INFO_FILE), r#"{"layer": 42, "area": "app"}"#).unwrap();
        fs::write(dir.path().join("src/deep/a.ts"), "").unwrap();

        let info = folder_info(&dir.path().join("src/deep/a.ts"));
        assert_eq!(info.layer, 42);
    }

    #[test]
    fn defaults_when_no_metadata_exists() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ts"), "").unwrap();

        let info = folder_info(&dir.path().join("a.ts"));
        assert_eq!(info, FolderInfo::default());
        assert_eq!(info.layer, DEFAULT_LAYER);
        assert_eq!(info.area, "universe");
    }
}
