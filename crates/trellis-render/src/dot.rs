//! Graphviz DOT renderer

use crate::RenderOptions;
use crate::cluster::{Cluster, build_clusters};
use trellis_core::{Graph, HOTSPOT_COLOR, Node, NodeIndex, ROOT_COLOR, basename};

/// Render `g` as a DOT digraph.
pub fn to_dot(g: &Graph, options: &RenderOptions) -> String {
    let mut out = String::from("digraph graphname\n{\n");

    if options.cluster_folders {
        let clusters = build_clusters(g);
        let mut counter = 0;
        emit_cluster(g, &clusters, options, 1, &mut counter, &mut out);
    } else {
        for idx in g.nodes() {
            if let Some(node) = g.node(idx) {
                out.push_str("    ");
                out.push_str(&node_line(node, &node.path, options));
                out.push('\n');
            }
        }
    }

    emit_edges(g, &mut out);
    out.push_str("}\n");
    out
}

fn node_line(node: &Node, label: &str, options: &RenderOptions) -> String {
    let fill = fill_color(node, options);
    let fill_attr = match fill {
        Some(color) => format!(" fillcolor=\"{color}\" style=filled "),
        None => " ".to_string(),
    };
    format!("\"{}\" [shape=record{}label=\"{label}\"]", node.path, fill_attr)
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

fn emit_cluster(
    g: &Graph,
    cluster: &Cluster,
    options: &RenderOptions,
    depth: usize,
    counter: &mut usize,
    out: &mut String,
) {
    let indent = "    ".repeat(depth);
    for &idx in &cluster.nodes {
        if let Some(node) = g.node(idx) {
            out.push_str(&indent);
            out.push_str(&node_line(node, basename(&node.path), options));
            out.push('\n');
        }
    }
    for (name, child) in &cluster.subdirs {
        *counter += 1;
        out.push_str(&format!("{indent}subgraph cluster_{counter}{{\n"));
        out.push_str(&format!("{indent}    label = \"{name}\";\n"));
        emit_cluster(g, child, options, depth + 1, counter, out);
        out.push_str(&format!("{indent}}}\n"));
    }
}

fn emit_edges(g: &Graph, out: &mut String) {
    if g.edge_count() == 0 {
        return;
    }
    out.push_str("    subgraph Rel1 {\n");
    for edge in g.edges() {
        let Some((from, to)) = g.edge_endpoints(edge) else {
            continue;
        };
        let color = g
            .edge(edge)
            .and_then(|e| e.color.as_deref())
            .map(|c| format!("[color = \"{c}\"]"))
            .unwrap_or_default();
        out.push_str(&format!(
            "        \"{}\" -> \"{}\" {color}\n",
            path_of(g, from),
            path_of(g, to)
        ));
    }
    out.push_str("    }\n");
}

fn path_of(g: &Graph, idx: NodeIndex) -> &str {
    g.node(idx).map(|n| n.path.as_str()).unwrap_or_default()
}
