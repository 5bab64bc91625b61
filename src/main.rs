//! Trellis CLI entry point

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Module import graph discovery and visualization", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Start locator: a file, a directory, or a glob pattern
    #[arg(long)]
    start: String,

    /// Base path node paths are displayed relative to
    #[arg(long, default_value = "")]
    base_path: String,

    /// Render the folder-level graph instead of the file-level graph
    #[arg(long)]
    aggregate_by_folder: bool,

    /// Group nodes into nested per-folder clusters
    #[arg(long)]
    graph_folder: bool,

    /// Maximum recursion depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Node exclusion term; prefix with "NOT " to negate (repeatable)
    #[arg(long = "filter")]
    filter: Vec<String>,

    /// Edge exclusion term in the form from=>to (repeatable)
    #[arg(long = "filter-edges")]
    filter_edges: Vec<String>,

    /// Color every edge with its source node's color
    #[arg(long)]
    color_edges: bool,

    /// Score nodes and mark the top hotspots
    #[arg(long)]
    hotspots: bool,

    /// Keep only shortest paths from the start file to nodes matching this
    /// substring
    #[arg(long)]
    show_path_to: Option<String>,

    /// Alias rewrite rule in the form pattern=replacement (repeatable);
    /// discovered from tsconfig.json when omitted
    #[arg(long = "alias")]
    alias: Vec<String>,

    /// Directory alias replacements are anchored at
    #[arg(long, default_value = ".")]
    alias_base: String,

    /// Output format
    #[arg(long, value_enum, default_value = "dot")]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Dot,
    Mermaid,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // diagnostics go to stderr; stdout carries only the rendered graph
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::graph(cli)
}
