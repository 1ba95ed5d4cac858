use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::{Directed, Direction, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Loaded,
    Missing,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileNode {
    pub path: PathBuf,
    pub status: FileStatus,
}

/// `source` depends on `target` because it references `label`, which `target` declares.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyEdge {
    pub source: PathBuf,
    pub target: PathBuf,
    pub label: String,
}

impl FileNode {
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        Self { path, status }
    }
}

impl DependencyEdge {
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }
}

/// File-level dependency graph. Vertices keep insertion order, which is the
/// configured input order.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: Graph<FileNode, DependencyEdge, Directed>,
    node_map: HashMap<PathBuf, NodeIndex>,
}

impl DependencyGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &FileNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    pub fn vertex(&self, path: &Path) -> Option<&FileNode> {
        self.node_map.get(path).map(|&idx| &self.graph[idx])
    }

    /// Edges leaving `path`, sorted by (target, label).
    pub fn outgoing(&self, path: &Path) -> Vec<&DependencyEdge> {
        let Some(&idx) = self.node_map.get(path) else {
            return Vec::new();
        };
        let mut edges: Vec<&DependencyEdge> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| edge.weight())
            .collect();
        edges.sort_by(|a, b| (&a.target, &a.label).cmp(&(&b.target, &b.label)));
        edges
    }

    /// Every edge, grouped by source in vertex order, each group sorted by (target, label).
    pub fn ordered_edges(&self) -> Vec<&DependencyEdge> {
        self.vertices()
            .flat_map(|node| self.outgoing(&node.path))
            .collect()
    }

    pub fn contains_edge(&self, source: &str, target: &str, label: &str) -> bool {
        self.graph.edge_references().any(|edge| {
            let weight = edge.weight();
            weight.source == Path::new(source)
                && weight.target == Path::new(target)
                && weight.label == label
        })
    }
}

pub struct GraphBuilder {
    graph: DependencyGraph,
    seen: BTreeSet<DependencyEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: DependencyGraph::default(),
            seen: BTreeSet::new(),
        }
    }

    /// Add a vertex. Re-adding a path keeps the first vertex and its position.
    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        if let Some(&index) = self.graph.node_map.get(&node.path) {
            return index;
        }
        let path = node.path.clone();
        let index = self.graph.graph.add_node(node);
        self.graph.node_map.insert(path, index);
        index
    }

    /// Add an edge between existing vertices. Self-loops and repeats of an
    /// existing (source, target, label) triple are refused.
    pub fn add_edge(&mut self, edge: DependencyEdge) -> Option<EdgeIndex> {
        if edge.source == edge.target || self.seen.contains(&edge) {
            return None;
        }
        let source_idx = *self.graph.node_map.get(&edge.source)?;
        let target_idx = *self.graph.node_map.get(&edge.target)?;
        self.seen.insert(edge.clone());
        Some(self.graph.graph.add_edge(source_idx, target_idx, edge))
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }

    pub fn get_node_index(&self, path: &Path) -> Option<NodeIndex> {
        self.graph.node_map.get(path).copied()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
