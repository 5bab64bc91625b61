//! Mermaid flowchart renderer

use crate::RenderOptions;
use crate::cluster::{Cluster, build_clusters};
use trellis_core::{Graph, HOTSPOT_COLOR, Node, ROOT_COLOR, basename};

/// Identifiers Mermaid treats as syntax.
const RESERVED: &[&str] = &[
    "graph",
    "flowchart",
    "subgraph",
    "end",
    "style",
    "linkStyle",
    "classDef",
    "class",
    "click",
    "direction",
];

/// Render `g` as a Mermaid flowchart.
pub fn to_mermaid(g: &Graph, options: &RenderOptions) -> String {
    let mut out = String::from("flowchart TD\n");

    if options.cluster_folders {
        let clusters = build_clusters(g);
        let mut counter = 0;
        emit_cluster(g, &clusters, 1, &mut counter, &mut out);
    } else {
        for idx in g.nodes() {
            if let Some(node) = g.node(idx) {
                out.push_str(&format!(
                    "    {}[\"{}\"]\n",
                    node_id(&node.path),
                    node.path
                ));
            }
        }
    }

    for edge in g.edges() {
        let Some((from, to)) = g.edge_endpoints(edge) else {
            continue;
        };
        let (Some(from), Some(to)) = (g.node(from), g.node(to)) else {
            continue;
        };
        out.push_str(&format!(
            "    {} --> {}\n",
            node_id(&from.path),
            node_id(&to.path)
        ));
    }

    for idx in g.nodes() {
        if let Some(node) = g.node(idx) {
            if let Some(color) = fill_color(node, options) {
                out.push_str(&format!("    style {} fill:{color}\n", node_id(&node.path)));
            }
        }
    }
    for (position, edge) in g.edges().enumerate() {
        if let Some(color) = g.edge(edge).and_then(|e| e.color.as_deref()) {
            out.push_str(&format!("    linkStyle {position} stroke:{color}\n"));
        }
    }

    out
}

/// Mermaid identifier for a node path: the base name without its
/// extension, brackets escaped, reserved words suffixed.
fn node_id(path: &str) -> String {
    let base = basename(path);
    let stem = base.split('.').next().unwrap_or(base);
    let mut id: String = stem
        .chars()
        .map(|c| if c == '[' || c == ']' { '_' } else { c })
        .collect();
    if id.is_empty() {
        id.push_str("root");
    }
    if RESERVED.contains(&id.as_str()) {
        id.push('_');
    }
    id
}

fn fill_color<'a>(node: &'a Node, options: &RenderOptions) -> Option<&'a str> {
    if options.root.as_deref() == Some(node.path.as_str()) {
        return Some(ROOT_COLOR);
    }
    if node.hotspot_rank.is_some() {
        return Some(HOTSPOT_COLOR);
    }
    node.color.as_deref()
}

fn emit_cluster(g: &Graph, cluster: &Cluster, depth: usize, counter: &mut usize, out: &mut String) {
    let indent = "    ".repeat(depth);
    for &idx in &cluster.nodes {
        if let Some(node) = g.node(idx) {
            out.push_str(&format!(
                "{indent}{}[\"{}\"]\n",
                node_id(&node.path),
                basename(&node.path)
            ));
        }
    }
    for (name, child) in &cluster.subdirs {
        *counter += 1;
        out.push_str(&format!("{indent}subgraph cluster_{counter}[\"{name}\"]\n"));
        emit_cluster(g, child, depth + 1, counter, out);
        out.push_str(&format!("{indent}end\n"));
    }
}
