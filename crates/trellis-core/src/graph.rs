//! Graph wrapper using petgraph::StableDiGraph with path-keyed node identity

use crate::model::{EdgeData, Node};
use petgraph::Direction;
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;

/// The dependency graph — directed, with deduplicated edges and
/// insertion-ordered iteration.
///
/// Node identity is the normalized path: adding a node with a known path
/// returns the existing index (first seen wins). Edge identity is the
/// (from, to) pair, enforced at insertion time.
#[derive(Clone)]
pub struct Graph {
    inner: StableDiGraph<Node, EdgeData>,
    by_path: HashMap<String, NodeIndex>,
    edge_ids: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    /// Scan roots (depth 0), in discovery order.
    start_nodes: Vec<NodeIndex>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            by_path: HashMap::new(),
            edge_ids: HashMap::new(),
            start_nodes: Vec::new(),
        }
    }

    /// Add a node, or return the index already holding its path.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        if let Some(&existing) = self.by_path.get(&node.path) {
            return existing;
        }
        let path = node.path.clone();
        let idx = self.inner.add_node(node);
        self.by_path.insert(path, idx);
        idx
    }

    /// Add an edge, normalizing both endpoints through [`Graph::add_node`].
    /// Re-adding an existing (from, to) pair returns the existing edge.
    pub fn add_edge(&mut self, from: Node, to: Node, data: EdgeData) -> EdgeIndex {
        let a = self.add_node(from);
        let b = self.add_node(to);
        if let Some(&existing) = self.edge_ids.get(&(a, b)) {
            return existing;
        }
        let idx = self.inner.add_edge(a, b, data);
        self.edge_ids.insert((a, b), idx);
        idx
    }

    /// Get a node by index.
    pub fn node(&self, id: NodeIndex) -> Option<&Node> {
        self.inner.node_weight(id)
    }

    /// Get a mutable node by index.
    pub fn node_mut(&mut self, id: NodeIndex) -> Option<&mut Node> {
        self.inner.node_weight_mut(id)
    }

    /// Look a node up by its normalized path.
    pub fn node_by_path(&self, path: &str) -> Option<NodeIndex> {
        self.by_path.get(path).copied()
    }

    /// Get an edge's attributes by index.
    pub fn edge(&self, id: EdgeIndex) -> Option<&EdgeData> {
        self.inner.edge_weight(id)
    }

    /// Get mutable edge attributes by index.
    pub fn edge_mut(&mut self, id: EdgeIndex) -> Option<&mut EdgeData> {
        self.inner.edge_weight_mut(id)
    }

    /// The (from, to) endpoints of an edge.
    pub fn edge_endpoints(&self, id: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.inner.edge_endpoints(id)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Node indices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.inner.node_indices()
    }

    /// Edge indices in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.inner.edge_indices()
    }

    /// Outgoing edges of a node, in edge-insertion order.
    pub fn edges_from(&self, source: NodeIndex) -> Vec<EdgeIndex> {
        let mut out: Vec<EdgeIndex> = self
            .inner
            .edges_directed(source, Direction::Outgoing)
            .map(|e| e.id())
            .collect();
        out.sort_unstable_by_key(|e| e.index());
        out
    }

    /// Incoming edges of a node, in edge-insertion order.
    pub fn edges_to(&self, target: NodeIndex) -> Vec<EdgeIndex> {
        let mut out: Vec<EdgeIndex> = self
            .inner
            .edges_directed(target, Direction::Incoming)
            .map(|e| e.id())
            .collect();
        out.sort_unstable_by_key(|e| e.index());
        out
    }

    /// All edges incident to a node (self-loops reported once).
    pub fn edges_of(&self, node: NodeIndex) -> Vec<EdgeIndex> {
        let mut out = self.edges_from(node);
        out.extend(self.edges_to(node));
        out.sort_unstable_by_key(|e| e.index());
        out.dedup();
        out
    }

    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.inner
            .edges_directed(node, Direction::Incoming)
            .count()
    }

    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.inner
            .edges_directed(node, Direction::Outgoing)
            .count()
    }

    /// Record a node as a scan root (depth 0).
    pub fn mark_start(&mut self, node: NodeIndex) {
        if !self.start_nodes.contains(&node) {
            self.start_nodes.push(node);
        }
    }

    /// The scan roots, in discovery order.
    pub fn start_nodes(&self) -> &[NodeIndex] {
        &self.start_nodes
    }

    /// Depth-first enumeration of all simple paths starting at `start`.
    ///
    /// `cb` is invoked for each newly reached edge with the path built so
    /// far (the edge itself included); returning `false` prunes expansion
    /// past that edge. No node and no edge repeats within a single path —
    /// both are tracked for the running path and rolled back on backtrack.
    /// Out-edges are visited in edge-insertion order.
    pub fn walk<F>(&self, start: NodeIndex, mut cb: F)
    where
        F: FnMut(EdgeIndex, &[EdgeIndex]) -> bool,
    {
        let mut path = Vec::new();
        let mut path_nodes = HashSet::new();
        let mut path_edges = HashSet::new();
        path_nodes.insert(start);
        self.walk_rec(start, &mut cb, &mut path, &mut path_nodes, &mut path_edges);
    }

    fn walk_rec<F>(
        &self,
        node: NodeIndex,
        cb: &mut F,
        path: &mut Vec<EdgeIndex>,
        path_nodes: &mut HashSet<NodeIndex>,
        path_edges: &mut HashSet<EdgeIndex>,
    ) where
        F: FnMut(EdgeIndex, &[EdgeIndex]) -> bool,
    {
        for edge in self.edges_from(node) {
            if path_edges.contains(&edge) {
                continue;
            }
            let Some((_, target)) = self.inner.edge_endpoints(edge) else {
                continue;
            };
            path_edges.insert(edge);
            path.push(edge);
            let descend = cb(edge, path);
            if descend && !path_nodes.contains(&target) {
                path_nodes.insert(target);
                self.walk_rec(target, cb, path, path_nodes, path_edges);
                path_nodes.remove(&target);
            }
            path.pop();
            path_edges.remove(&edge);
        }
    }

    /// Shrink the graph to the given node and edge sets.
    ///
    /// Post-processing only ever removes; every kept edge must have kept
    /// endpoints or it disappears with them.
    pub fn shrink_to(&mut self, keep_nodes: &HashSet<NodeIndex>, keep_edges: &HashSet<EdgeIndex>) {
        let all_edges: Vec<EdgeIndex> = self.edges().collect();
        for edge in all_edges {
            if !keep_edges.contains(&edge) {
                self.remove_edge(edge);
            }
        }
        let all_nodes: Vec<NodeIndex> = self.nodes().collect();
        for node in all_nodes {
            if !keep_nodes.contains(&node) {
                self.remove_node(node);
            }
        }
    }

    /// Remove an edge and its dedup entry.
    pub fn remove_edge(&mut self, id: EdgeIndex) -> Option<EdgeData> {
        if let Some((a, b)) = self.inner.edge_endpoints(id) {
            self.edge_ids.remove(&(a, b));
        }
        self.inner.remove_edge(id)
    }

    /// Remove a node together with its incident edges.
    pub fn remove_node(&mut self, id: NodeIndex) -> Option<Node> {
        for edge in self.edges_of(id) {
            if let Some((a, b)) = self.inner.edge_endpoints(edge) {
                self.edge_ids.remove(&(a, b));
            }
        }
        let removed = self.inner.remove_node(id)?;
        self.by_path.remove(&removed.path);
        self.start_nodes.retain(|&n| n != id);
        Some(removed)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
