//! Post-scan analytics: hotspot ranking, shortest-path restriction, and
//! edge coloring. Runs over a finished graph; only shrinks, never grows.

use crate::color::{ColorGen, TARGET_COLOR};
use crate::graph::{EdgeIndex, Graph, NodeIndex};
use std::collections::HashSet;

/// Number of hotspot ranks handed out, at most.
const MAX_HOTSPOTS: usize = 5;

/// Path-length cutoff used when no explicit depth bound is configured.
const DEFAULT_MAX_PATH_LEN: usize = 1000;

/// What the post-processing pass should do to a finished graph.
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    /// Score and rank hotspots.
    pub hotspots: bool,
    /// Restrict the graph to shortest paths reaching nodes whose path
    /// contains this substring.
    pub path_to: Option<String>,
    /// Path-length cutoff for the shortest-path search.
    pub max_path_len: Option<usize>,
    /// Propagate source-node colors onto edges.
    pub color_edges: bool,
}

/// Run the requested analytics over `g`.
pub fn post_process(g: &mut Graph, options: &PostOptions, colors: &mut ColorGen) {
    if options.hotspots {
        calculate_hotspots(g);
    }
    if let Some(target) = &options.path_to {
        let max_len = options.max_path_len.unwrap_or(DEFAULT_MAX_PATH_LEN);
        restrict_to_paths_to(g, target, max_len, colors);
    }
    if options.color_edges {
        apply_edge_colors(g, colors);
    }
}

/// Score every node as `in_degree * out_degree²` and assign 1-based ranks
/// to the top `min(5, node_count / 2)` scores. Ties keep insertion order.
pub fn calculate_hotspots(g: &mut Graph) {
    let mut scored: Vec<(NodeIndex, u64)> = Vec::with_capacity(g.node_count());
    for idx in g.nodes().collect::<Vec<_>>() {
        let fan_in = g.in_degree(idx) as u64;
        let fan_out = g.out_degree(idx) as u64;
        let score = fan_in * fan_out * fan_out;
        if let Some(node) = g.node_mut(idx) {
            node.hotspot = Some(score);
        }
        scored.push((idx, score));
    }
    // stable sort: equal scores stay in insertion order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let ranked = MAX_HOTSPOTS.min(scored.len() / 2);
    for (pos, &(idx, score)) in scored.iter().take(ranked).enumerate() {
        tracing::debug!(rank = pos + 1, score, "hotspot");
        if let Some(node) = g.node_mut(idx) {
            node.hotspot_rank = Some(pos + 1);
        }
    }
}

/// Restrict `g` to the union of shortest paths from its start node to nodes
/// whose path contains `target`.
///
/// Matching nodes receive the fixed highlight color before the search. Every
/// surviving path gets one distinct color shared by all of its edges; nodes
/// and edges on no surviving path are removed.
pub fn restrict_to_paths_to(g: &mut Graph, target: &str, max_len: usize, colors: &mut ColorGen) {
    let matching: Vec<NodeIndex> = g
        .nodes()
        .filter(|&idx| g.node(idx).is_some_and(|n| n.path.contains(target)))
        .collect();
    for idx in matching {
        if let Some(node) = g.node_mut(idx) {
            node.color = Some(TARGET_COLOR.to_string());
        }
    }

    let Some(&start) = g.start_nodes().first() else {
        return;
    };

    let mut hits: Vec<Vec<EdgeIndex>> = Vec::new();
    {
        let gr: &Graph = &*g;
        gr.walk(start, |edge, path| {
            if path.len() >= max_len {
                return false;
            }
            let reaches_target = gr
                .edge_endpoints(edge)
                .and_then(|(_, to)| gr.node(to))
                .is_some_and(|n| n.path.contains(target));
            if reaches_target {
                hits.push(path.to_vec());
            }
            true
        });
    }

    let Some(min_len) = hits.iter().map(Vec::len).min() else {
        tracing::warn!(path_to = %target, "no path from the start node reaches the target");
        g.shrink_to(&HashSet::new(), &HashSet::new());
        return;
    };

    let mut keep_nodes = HashSet::new();
    let mut keep_edges = HashSet::new();
    for path in hits.iter().filter(|p| p.len() == min_len) {
        let color = colors.next_color();
        for &edge in path {
            keep_edges.insert(edge);
            if let Some((from, to)) = g.edge_endpoints(edge) {
                keep_nodes.insert(from);
                keep_nodes.insert(to);
            }
            if let Some(data) = g.edge_mut(edge) {
                data.color = Some(color.clone());
            }
        }
    }
    g.shrink_to(&keep_nodes, &keep_edges);
}

/// Give every colorless source node a fresh color and propagate the source
/// color to each outgoing edge.
pub fn apply_edge_colors(g: &mut Graph, colors: &mut ColorGen) {
    for edge in g.edges().collect::<Vec<_>>() {
        let Some((from, _)) = g.edge_endpoints(edge) else {
            continue;
        };
        let color = match g.node(from).and_then(|n| n.color.clone()) {
            Some(c) => c,
            None => {
                let fresh = colors.next_color();
                if let Some(node) = g.node_mut(from) {
                    node.color = Some(fresh.clone());
                }
                fresh
            }
        };
        if let Some(data) = g.edge_mut(edge) {
            data.color = Some(color);
        }
    }
}
