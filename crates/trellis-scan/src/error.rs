//! Errors that abort a scan

/// Fatal conditions; anything else is a diagnostic, not an error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("expected edge filter in the format from=>to, but got {0}")]
    MalformedEdgeFilter(String),

    #[error("start must be a single file when used with show_path_to")]
    PathToNeedsFile,

    #[error("start locator matched no source files: {0}")]
    StartNotFound(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern}: {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },
}
