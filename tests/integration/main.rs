//! Integration tests for Trellis
//!
//! End-to-end scenarios: scan a fixture tree, post-process, render, and
//! check the emitted graph text.

use std::fs;
use tempfile::TempDir;
use trellis_core::{ColorGen, Graph, PostOptions, post_process};
use trellis_render::{RenderOptions, to_dot, to_mermaid};
use trellis_scan::{ScanFilters, ScanOptions, start_scan};

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small project with a short and a long route to `leafs/leaf.ts`.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "start.ts",
        "import { mid } from './mid'\nimport { ml } from './mids/midleaf'\n",
    );
    write(&dir, "mid.ts", "import { leaf } from './leafs/leaf'\n");
    write(&dir, "mids/midleaf.ts", "import { second } from './secondmidleaf'\n");
    write(&dir, "mids/secondmidleaf.ts", "import { leaf } from '../leafs/leaf'\n");
    write(&dir, "importasjs.ts", "import { leaf } from './leafs/leaf.js'\n");
    write(&dir, "leafs/leaf.ts", "export const leaf = 1\n");
    dir
}

fn options(dir: &TempDir, start_rel: &str) -> ScanOptions {
    ScanOptions {
        start: dir.path().join(start_rel).to_string_lossy().into_owned(),
        base_path: dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    }
}

fn scan(options: &ScanOptions) -> (Graph, Graph) {
    let filters = ScanFilters::parse(&options.filter, &options.filter_edges).unwrap();
    let outcome = start_scan(options, &filters).unwrap();
    (outcome.files, outcome.folders)
}

#[test]
fn show_path_to_keeps_only_the_shortest_route() {
    let dir = fixture();
    let mut opts = options(&dir, "start.ts");
    opts.show_path_to = Some("leafs/leaf".to_string());

    let (mut graph, _) = scan(&opts);
    let post = PostOptions {
        path_to: opts.show_path_to.clone(),
        ..Default::default()
    };
    post_process(&mut graph, &post, &mut ColorGen::new(11));

    let mermaid = to_mermaid(&graph, &RenderOptions::default());
    assert!(!mermaid.contains("midleaf"));
    assert!(mermaid.contains("leaf"));

    let dot = to_dot(&graph, &RenderOptions::default());
    assert!(!dot.contains("midleaf"));
    assert!(dot.contains("leafs/leaf.ts"));
}

#[test]
fn base_path_keeps_machine_prefix_out_of_the_output() {
    let dir = fixture();
    let (graph, _) = scan(&options(&dir, "start.ts"));

    let dot = to_dot(&graph, &RenderOptions::default());
    assert!(!dot.contains(&dir.path().to_string_lossy().into_owned()));
    assert!(dot.contains("\"start.ts\""));
}

#[test]
fn aggregate_by_folder_collapses_file_edges() {
    let dir = fixture();
    let (_, folders) = scan(&options(&dir, "start.ts"));

    let dot = to_dot(&folders, &RenderOptions::default());
    assert!(dot.contains("\".\" -> \"mids\""));
    assert!(dot.contains("\".\" -> \"leafs\""));
    assert!(dot.contains("\"mids\" -> \"leafs\""));
}

#[test]
fn max_depth_bounds_the_rendered_graph() {
    let dir = fixture();
    let mut opts = options(&dir, "start.ts");

    opts.max_depth = Some(1);
    let (graph, _) = scan(&opts);
    let shallow = to_mermaid(&graph, &RenderOptions::default());
    assert!(!shallow.contains("mid --> leaf"));

    opts.max_depth = Some(2);
    let (graph, _) = scan(&opts);
    let deeper = to_mermaid(&graph, &RenderOptions::default());
    assert!(deeper.contains("mid --> leaf"));
}

#[test]
fn filtered_edges_disappear_from_the_output() {
    let dir = fixture();
    let mut opts = options(&dir, "start.ts");
    opts.filter_edges = vec!["mid.ts=>leaf".to_string()];

    let (graph, _) = scan(&opts);
    let dot = to_dot(&graph, &RenderOptions::default());
    assert!(!dot.contains("\"mid.ts\" -> \"leafs/leaf.ts\""));
    assert!(dot.contains("\"start.ts\" -> \"mid.ts\""));
}

#[test]
fn hotspots_and_edge_colors_reach_the_output() {
    let dir = fixture();
    let (mut graph, _) = scan(&options(&dir, "start.ts"));
    let post = PostOptions {
        hotspots: true,
        color_edges: true,
        ..Default::default()
    };
    post_process(&mut graph, &post, &mut ColorGen::new(5));

    let dot = to_dot(&graph, &RenderOptions::default());
    assert!(dot.contains("color"));
}

#[test]
fn directory_start_covers_every_top_level_file() {
    let dir = fixture();
    let opts = ScanOptions {
        start: dir.path().to_string_lossy().into_owned(),
        base_path: dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    };
    let (graph, _) = scan(&opts);

    let dot = to_dot(&graph, &RenderOptions::default());
    for name in ["start.ts", "mid.ts", "secondmidleaf.ts", "leafs/leaf.ts"] {
        assert!(dot.contains(name), "missing {name}");
    }
    // importasjs.ts, mid.ts and start.ts sit at the top level
    assert_eq!(graph.start_nodes().len(), 3);
}

#[test]
fn filter_covers_directory_start_nodes() {
    let dir = fixture();
    let mut opts = ScanOptions {
        start: dir.path().to_string_lossy().into_owned(),
        base_path: dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    };
    opts.filter = vec!["start".to_string()];
    let (graph, _) = scan(&opts);

    let dot = to_dot(&graph, &RenderOptions::default());
    assert!(!dot.contains("start.ts"));
    // secondmidleaf is only reachable via start.ts
    assert!(!dot.contains("secondmidleaf.ts"));
    assert!(dot.contains("mid.ts"));
    assert!(dot.contains("leafs/leaf.ts"));
}

#[test]
fn js_specifier_resolves_to_its_source_sibling() {
    let dir = fixture();
    let (graph, _) = scan(&options(&dir, "importasjs.ts"));

    let mermaid = to_mermaid(&graph, &RenderOptions::default());
    assert!(mermaid.contains("importasjs --> leaf"));
}

#[test]
fn folder_clusters_appear_in_both_formats() {
    let dir = fixture();
    let parent = dir.path().parent().unwrap();
    let opts = ScanOptions {
        start: dir.path().to_string_lossy().into_owned(),
        base_path: parent.to_string_lossy().into_owned(),
        ..Default::default()
    };
    let (graph, _) = scan(&opts);
    let render = RenderOptions {
        root: None,
        cluster_folders: true,
    };

    let dot = to_dot(&graph, &render);
    assert!(dot.contains("subgraph cluster_1{"));
    assert!(dot.contains("subgraph cluster_2{"));
    assert!(dot.contains("label = \"mids\";"));
    assert!(dot.contains("label = \"leafs\";"));

    let mermaid = to_mermaid(&graph, &render);
    assert!(mermaid.contains("subgraph cluster_1["));
    assert!(mermaid.contains("[\"mids\"]"));
    assert!(mermaid.contains("[\"leafs\"]"));
}

#[test]
fn tsconfig_paths_drive_alias_resolution() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "tsconfig.json",
        r#"{
    "compilerOptions": {
        "baseUrl": ".",
        "paths": {
            "components/*": ["src/components/*"]
        }
    }
}"#,
    );
    write(
        &dir,
        "src/App.tsx",
        "import { Button } from 'components/Button'\nimport { Input } from './components/Input'\n",
    );
    write(&dir, "src/components/Button.tsx", "export const Button = 1\n");
    write(
        &dir,
        "src/components/Input.tsx",
        "import { helper } from '../helpers'\n",
    );
    write(&dir, "src/helpers/index.ts", "export * from './helper'\n");
    write(&dir, "src/helpers/helper.ts", "export const helper = 2\n");

    let (graph, _) = scan(&options(&dir, "src/App.tsx"));

    let pairs: Vec<(String, String)> = graph
        .edges()
        .map(|e| {
            let (from, to) = graph.edge_endpoints(e).unwrap();
            (
                graph.node(from).unwrap().path.clone(),
                graph.node(to).unwrap().path.clone(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("src/App.tsx".to_string(), "src/components/Button.tsx".to_string()),
            ("src/App.tsx".to_string(), "src/components/Input.tsx".to_string()),
            ("src/components/Input.tsx".to_string(), "src/helpers/index.ts".to_string()),
            ("src/helpers/index.ts".to_string(), "src/helpers/helper.ts".to_string()),
        ]
    );
}

#[test]
fn rendering_a_finished_graph_is_deterministic() {
    let dir = fixture();
    let (mut graph, _) = scan(&options(&dir, "start.ts"));
    let post = PostOptions {
        hotspots: true,
        color_edges: true,
        ..Default::default()
    };
    // same seed, same colors, same bytes
    let mut a = graph.clone();
    post_process(&mut graph, &post, &mut ColorGen::new(21));
    post_process(&mut a, &post, &mut ColorGen::new(21));

    let render = RenderOptions::default();
    assert_eq!(to_dot(&graph, &render), to_dot(&a, &render));
    assert_eq!(to_mermaid(&graph, &render), to_mermaid(&a, &render));
}
