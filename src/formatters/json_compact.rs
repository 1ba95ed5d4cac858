use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::{DependencyGraph, FileStatus};

// Structs rather than `json!` objects so keys keep their declared order.
#[derive(Serialize)]
struct CompactGraph {
    meta: Meta,
    files: Vec<Value>,
    edges: Vec<Value>,
}

#[derive(Serialize)]
struct Meta {
    files: usize,
    edges: usize,
    format: &'static str,
}

/// JSON renderer with files stored once and edges as `[source, target, label]`
/// index triples.
pub struct JsonCompactFormatter {
    /// Emit only the essential fields, or also per-file status
    minimal: bool,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self { minimal: true }
    }

    pub fn with_status(mut self) -> Self {
        self.minimal = false;
        self
    }

    pub fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        let json_content = self.format_graph(graph)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_graph(&self, graph: &DependencyGraph) -> Result<String> {
        let mut file_map = HashMap::with_capacity(graph.node_count());
        let mut files = Vec::with_capacity(graph.node_count());

        for (file_id, node) in graph.vertices().enumerate() {
            file_map.insert(node.path.as_path(), file_id);
            let path = node.path.to_string_lossy();
            if self.minimal {
                files.push(json!(path));
            } else {
                files.push(json!({
                    "path": path,
                    "status": self.status_code(node.status),
                }));
            }
        }

        let edges: Vec<Value> = graph
            .ordered_edges()
            .into_iter()
            .filter_map(|edge| {
                let src_id = file_map.get(edge.source.as_path())?;
                let tgt_id = file_map.get(edge.target.as_path())?;
                Some(json!([src_id, tgt_id, edge.label]))
            })
            .collect();

        let output = CompactGraph {
            meta: Meta {
                files: graph.node_count(),
                edges: graph.edge_count(),
                format: if self.minimal { "compact" } else { "full" },
            },
            files,
            edges,
        };

        Ok(serde_json::to_string(&output)?)
    }

    fn status_code(&self, status: FileStatus) -> &'static str {
        match status {
            FileStatus::Loaded => "loaded",
            FileStatus::Missing => "missing",
            FileStatus::Failed => "failed",
        }
    }
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
