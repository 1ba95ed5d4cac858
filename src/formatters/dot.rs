use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::DependencyGraph;

/// Graphviz renderer. Output is a pure function of the graph: sources in vertex
/// order, each source's edges sorted by (target, label).
pub struct DotFormatter {
    graph_name: String,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            graph_name: "dependency_map".to_string(),
        }
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    pub fn format_to_file(&self, graph: &DependencyGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_graph(graph))
            .with_context(|| format!("failed to write {}", output_path.display()))
    }

    pub fn format_graph(&self, graph: &DependencyGraph) -> String {
        let mut out = String::with_capacity(64 + graph.edge_count() * 64);
        let _ = writeln!(out, "digraph {} {{", self.graph_name);

        for edge in graph.ordered_edges() {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                escape(&edge.source.to_string_lossy()),
                escape(&edge.target.to_string_lossy()),
                escape(&edge.label)
            );
        }

        out.push_str("}\n");
        out
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    if !text.contains(['"', '\\']) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
