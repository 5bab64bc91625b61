//! Folder clustering shared by both renderers

use trellis_core::{Graph, NodeIndex, dirname};

/// One directory level of the cluster tree. Nodes and subdirectories keep
/// first-seen order so rendering follows graph iteration order.
#[derive(Debug, Default)]
pub struct Cluster {
    pub subdirs: Vec<(String, Cluster)>,
    pub nodes: Vec<NodeIndex>,
}

impl Cluster {
    fn child(&mut self, name: &str) -> &mut Cluster {
        if let Some(pos) = self.subdirs.iter().position(|(n, _)| n == name) {
            &mut self.subdirs[pos].1
        } else {
            self.subdirs.push((name.to_string(), Cluster::default()));
            &mut self.subdirs.last_mut().expect("just pushed").1
        }
    }
}

/// Group the graph's nodes by their directory path. Root-level nodes land
/// directly on the returned cluster.
pub fn build_clusters(g: &Graph) -> Cluster {
    let mut root = Cluster::default();
    for idx in g.nodes() {
        let Some(node) = g.node(idx) else { continue };
        let dir = dirname(&node.path);
        let mut current = &mut root;
        if dir != "." && dir != "/" {
            for segment in dir.split('/').filter(|s| !s.is_empty()) {
                current = current.child(segment);
            }
        }
        current.nodes.push(idx);
    }
    root
}
