use depmap::core::{
    graph::{DependencyEdge, FileNode, FileStatus, GraphBuilder},
    DependencyGraph,
};
use std::path::{Path, PathBuf};

fn make_node(path: &str) -> FileNode {
    FileNode::new(PathBuf::from(path), FileStatus::Loaded)
}

#[test]
fn graph_builder_adds_nodes_and_edges() {
    let mut gb = GraphBuilder::new();

    gb.add_node(make_node("a.gs"));
    gb.add_node(make_node("b.gs"));
    gb.add_node(make_node("c.gs"));

    assert!(gb.add_edge(DependencyEdge::new("b.gs", "a.gs", "Alpha")).is_some());
    assert!(gb.add_edge(DependencyEdge::new("c.gs", "b.gs", "Beta")).is_some());

    let graph: DependencyGraph = gb.build();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.contains_edge("b.gs", "a.gs", "Alpha"));
}

#[test]
fn add_edge_returns_none_when_missing_nodes() {
    let mut gb = GraphBuilder::new();
    gb.add_node(make_node("a.gs"));

    // target not present
    let e = DependencyEdge::new("a.gs", "missing.gs", "Ghost");
    assert!(gb.add_edge(e).is_none());
}

#[test]
fn self_loops_and_repeated_triples_are_refused() {
    let mut gb = GraphBuilder::new();
    gb.add_node(make_node("a.gs"));
    gb.add_node(make_node("b.gs"));

    assert!(gb.add_edge(DependencyEdge::new("a.gs", "a.gs", "Alpha")).is_none());
    assert!(gb.add_edge(DependencyEdge::new("b.gs", "a.gs", "Alpha")).is_some());
    assert!(gb.add_edge(DependencyEdge::new("b.gs", "a.gs", "Alpha")).is_none());
    // Same endpoints, different label: a separate edge.
    assert!(gb.add_edge(DependencyEdge::new("b.gs", "a.gs", "Omega")).is_some());

    assert_eq!(gb.build().edge_count(), 2);
}

#[test]
fn re_adding_a_vertex_keeps_its_position() {
    let mut gb = GraphBuilder::new();
    let first = gb.add_node(make_node("a.gs"));
    gb.add_node(make_node("b.gs"));
    let again = gb.add_node(FileNode::new(PathBuf::from("a.gs"), FileStatus::Missing));

    assert_eq!(first, again);
    assert_eq!(gb.get_node_index(Path::new("a.gs")), Some(first));

    let graph = gb.build();
    let order: Vec<_> = graph.vertices().map(|n| n.path.clone()).collect();
    assert_eq!(order, vec![PathBuf::from("a.gs"), PathBuf::from("b.gs")]);
    assert_eq!(graph.vertex(Path::new("a.gs")).unwrap().status, FileStatus::Loaded);
}

#[test]
fn outgoing_edges_are_sorted_by_target_then_label() {
    let mut gb = GraphBuilder::new();
    for path in ["src.gs", "z.gs", "m.gs"] {
        gb.add_node(make_node(path));
    }
    gb.add_edge(DependencyEdge::new("src.gs", "z.gs", "Beta"));
    gb.add_edge(DependencyEdge::new("src.gs", "m.gs", "Zeta"));
    gb.add_edge(DependencyEdge::new("src.gs", "z.gs", "Alpha"));

    let graph = gb.build();
    let labels: Vec<_> = graph
        .outgoing(Path::new("src.gs"))
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Zeta", "Alpha", "Beta"]);
    assert!(graph.outgoing(Path::new("z.gs")).is_empty());
}
