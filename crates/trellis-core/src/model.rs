//! Core data structures for the dependency graph

use serde::{Deserialize, Serialize};

/// Layer assigned to a node when no `info.json` is found near its file.
pub const DEFAULT_LAYER: u32 = 1000;

/// A single node in the dependency graph.
///
/// Nodes are identified by their normalized path: two nodes with the same
/// path are the same node. All other fields are render/analysis hints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Normalized path, relative to the configured base path.
    pub path: String,
    /// Layer tag inherited from the nearest ancestor `info.json`.
    pub layer: u32,
    /// Render hint assigned during post-processing.
    pub color: Option<String>,
    /// Fan-in × fan-out² score, present after hotspot analysis.
    pub hotspot: Option<u64>,
    /// 1-based position among the top-ranked hotspots.
    pub hotspot_rank: Option<usize>,
}

impl Node {
    pub fn new(path: impl Into<String>, layer: u32) -> Self {
        Node {
            path: path.into(),
            layer,
            color: None,
            hotspot: None,
            hotspot_rank: None,
        }
    }
}

/// Attributes carried by a directed edge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdgeData {
    /// Render hint; inherits the source node's color when edge coloring is on.
    pub color: Option<String>,
}
