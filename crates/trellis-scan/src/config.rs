//! Scan configuration
//!
//! Every option the engine recognizes lives here with its default; the CLI
//! fills this in once at startup.

/// Source extensions probed during resolution, in order.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "d.ts"];

/// Compiled-output extensions that resolve to their source siblings.
pub const COMPILED_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

/// One alias rewrite rule: a literal or single-wildcard pattern mapped to
/// one or more replacement templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPattern {
    pub pattern: String,
    pub replacements: Vec<String>,
}

/// Alias rewriting configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConfig {
    /// Directory the replacement templates are anchored at.
    pub base_dir: String,
    pub patterns: Vec<AliasPattern>,
}

impl AliasConfig {
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        AliasConfig {
            base_dir: ".".to_string(),
            patterns: Vec::new(),
        }
    }
}

/// Options consumed by one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Start locator: file, directory, or glob pattern.
    pub start: String,
    /// Base path node paths are displayed relative to.
    pub base_path: String,
    /// Maximum recursion depth; `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Node exclusion terms.
    pub filter: Vec<String>,
    /// Edge exclusion terms, `from=>to`.
    pub filter_edges: Vec<String>,
    /// Target substring for shortest-path mode. A directory or glob start
    /// combined with this is rejected before scanning.
    pub show_path_to: Option<String>,
    /// Alias rewriting; discovered from tsconfig.json when left empty.
    pub aliases: AliasConfig,
    /// Probe order for extension fallback.
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            start: String::new(),
            base_path: String::new(),
            max_depth: None,
            filter: Vec::new(),
            filter_edges: Vec::new(),
            show_path_to: None,
            aliases: AliasConfig::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    pub fn for_start(start: impl Into<String>) -> Self {
        ScanOptions {
            start: start.into(),
            ..Default::default()
        }
    }
}
