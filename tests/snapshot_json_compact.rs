use depmap::core::graph::{DependencyEdge, FileNode, FileStatus, GraphBuilder};
use depmap::formatters::JsonCompactFormatter;
use serde_json::{json, Value};
use std::path::PathBuf;

#[test]
fn json_compact_snapshot_small_graph() {
    let mut gb = GraphBuilder::new();
    for path in ["proj/src/c.gs", "proj/src/a.gs", "proj/src/b.gs"] {
        gb.add_node(FileNode::new(PathBuf::from(path), FileStatus::Loaded));
    }
    gb.add_edge(DependencyEdge::new("proj/src/b.gs", "proj/src/a.gs", "Alpha"));
    gb.add_edge(DependencyEdge::new("proj/src/c.gs", "proj/src/b.gs", "Beta"));
    gb.add_edge(DependencyEdge::new("proj/src/c.gs", "proj/src/a.gs", "Omega"));
    let graph = gb.build();

    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().with_extension("json");
    JsonCompactFormatter::new()
        .format_to_file(&graph, &path)
        .unwrap();
    let s = std::fs::read_to_string(&path).unwrap();
    let v: Value = serde_json::from_str(&s).unwrap();

    // File ids follow input order; edges are grouped by source in that order
    // and sorted by (target path, label) within a source.
    let expected = json!({
        "meta": {"files": 3, "edges": 3, "format": "compact"},
        "files": ["proj/src/c.gs", "proj/src/a.gs", "proj/src/b.gs"],
        "edges": [[0, 1, "Omega"], [0, 2, "Beta"], [2, 1, "Alpha"]]
    });
    assert_eq!(v, expected);
}

#[test]
fn json_compact_text_keeps_meta_files_edges_order() {
    let mut gb = GraphBuilder::new();
    gb.add_node(FileNode::new(PathBuf::from("a.gs"), FileStatus::Loaded));
    gb.add_node(FileNode::new(PathBuf::from("b.gs"), FileStatus::Missing));
    gb.add_edge(DependencyEdge::new("a.gs", "b.gs", "Beta"));
    let graph = gb.build();

    let compact = JsonCompactFormatter::new().format_graph(&graph).unwrap();
    assert_eq!(
        compact,
        r#"{"meta":{"files":2,"edges":1,"format":"compact"},"files":["a.gs","b.gs"],"edges":[[0,1,"Beta"]]}"#
    );

    let full = JsonCompactFormatter::new()
        .with_status()
        .format_graph(&graph)
        .unwrap();
    assert!(full.starts_with(
        r#"{"meta":{"files":2,"edges":1,"format":"full"},"files":[{"path":"a.gs","status":"loaded"}"#
    ));
}
