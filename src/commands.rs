//! CLI command implementation

use crate::{Cli, Format};
use trellis_core::{ColorGen, PostOptions, dirname, post_process, relative_to};
use trellis_render::{RenderOptions, to_dot, to_mermaid};
use trellis_scan::{AliasConfig, AliasPattern, ScanFilters, ScanOptions, start_scan};

pub fn graph(cli: Cli) -> anyhow::Result<()> {
    let options = ScanOptions {
        start: cli.start.clone(),
        base_path: cli.base_path.clone(),
        max_depth: cli.max_depth,
        filter: cli.filter.clone(),
        filter_edges: cli.filter_edges.clone(),
        show_path_to: cli.show_path_to.clone(),
        aliases: parse_aliases(&cli.alias, &cli.alias_base)?,
        ..Default::default()
    };
    let filters = ScanFilters::parse(&options.filter, &options.filter_edges)?;

    let outcome = start_scan(&options, &filters)?;
    tracing::info!(
        nodes = outcome.files.node_count(),
        edges = outcome.files.edge_count(),
        folders = outcome.folders.node_count(),
        "scan finished"
    );
    for specifier in &outcome.ignored {
        tracing::debug!(specifier = %specifier, "unresolved import");
    }

    let mut graph = if cli.aggregate_by_folder {
        outcome.folders
    } else {
        outcome.files
    };

    let mut colors = ColorGen::new(color_seed());
    let post = PostOptions {
        hotspots: cli.hotspots,
        path_to: cli.show_path_to.clone(),
        max_path_len: cli.max_depth,
        color_edges: cli.color_edges,
    };
    post_process(&mut graph, &post, &mut colors);

    let render = RenderOptions {
        root: Some(root_path(&cli)),
        cluster_folders: cli.graph_folder,
    };
    let output = match cli.format {
        Format::Dot => to_dot(&graph, &render),
        Format::Mermaid => to_mermaid(&graph, &render),
    };
    print!("{output}");
    Ok(())
}

/// The designated root node's path: the start locator relative to the base
/// path, or its folder in aggregate mode.
fn root_path(cli: &Cli) -> String {
    let rel = relative_to(&cli.base_path, &cli.start);
    if cli.aggregate_by_folder {
        dirname(&rel)
    } else {
        rel
    }
}

fn parse_aliases(terms: &[String], base: &str) -> anyhow::Result<AliasConfig> {
    let mut config = AliasConfig {
        base_dir: base.to_string(),
        patterns: Vec::new(),
    };
    for term in terms {
        let Some((pattern, replacement)) = term.split_once('=') else {
            anyhow::bail!("expected alias in the format pattern=replacement, but got {term}");
        };
        config.patterns.push(AliasPattern {
            pattern: pattern.to_string(),
            replacements: vec![replacement.to_string()],
        });
    }
    Ok(config)
}

fn color_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
