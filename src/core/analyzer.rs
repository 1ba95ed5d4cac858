use std::path::PathBuf;
use tracing::{debug, info, trace, Level};

use super::graph::{FileNode, FileStatus, GraphBuilder};
use super::loader::{LoadFailure, LoadedCorpus, SourceLoader};
use super::patterns::PatternSet;
use super::references::{ReferenceCollector, ReferenceSet};
use super::resolver::{ResolutionStats, SymbolResolver};
use super::symbols::SymbolTable;
use super::DependencyGraph;
use crate::config::Config;
use crate::error::ConfigError;

/// Result of one pipeline run.
#[derive(Debug)]
pub struct Analysis {
    pub graph: DependencyGraph,
    pub symbols: SymbolTable,
    pub references: Vec<ReferenceSet>,
    pub stats: ResolutionStats,
    pub missing: Vec<PathBuf>,
    pub failures: Vec<LoadFailure>,
}

pub struct DependencyAnalyzer {
    patterns: PatternSet,
}

impl DependencyAnalyzer {
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(PatternSet::new(&config.patterns)?))
    }

    /// Load the configured files and analyze them.
    pub fn analyze_config(&self, config: &Config) -> Result<Analysis, ConfigError> {
        let files = config.ordered_files()?;
        info!(count = files.len(), root = %config.root.display(), "loading source files");
        let corpus = SourceLoader::new(&config.root).load(&files);
        Ok(self.analyze(corpus))
    }

    /// Symbols are extracted from every unit before any reference is resolved,
    /// so a declaration may appear later in the input than its uses.
    pub fn analyze(&self, corpus: LoadedCorpus) -> Analysis {
        let LoadedCorpus {
            order,
            units,
            missing,
            failures,
        } = corpus;

        info!(
            loaded = units.len(),
            missing = missing.len(),
            failed = failures.len(),
            "extracting symbols"
        );
        let symbols = SymbolTable::build(&units, &self.patterns);
        for shadowed in symbols.shadowed() {
            debug!(
                name = %shadowed.name,
                owner = %shadowed.owner.display(),
                ignored = %shadowed.ignored.display(),
                "duplicate declaration resolved to earlier file"
            );
        }

        if tracing::enabled!(Level::TRACE) {
            for (name, owner) in symbols.iter() {
                trace!(name, owner = %owner.display(), "symbol");
            }
        }

        let collector = ReferenceCollector::new(&self.patterns, &symbols);
        let references: Vec<ReferenceSet> =
            units.iter().map(|unit| collector.collect(unit)).collect();

        if tracing::enabled!(Level::TRACE) {
            for reference_set in &references {
                for name in reference_set.names() {
                    let kinds: Vec<&str> = reference_set
                        .kinds(name)
                        .into_iter()
                        .flatten()
                        .map(|kind| kind.as_str())
                        .collect();
                    trace!(
                        path = %reference_set.path.display(),
                        name,
                        kinds = ?kinds,
                        "reference"
                    );
                }
            }
        }

        info!(symbols = symbols.len(), "building dependency graph");
        let mut graph_builder = GraphBuilder::new();
        for path in &order {
            let status = if missing.contains(path) {
                FileStatus::Missing
            } else if failures.iter().any(|failure| &failure.path == path) {
                FileStatus::Failed
            } else {
                FileStatus::Loaded
            };
            graph_builder.add_node(FileNode::new(path.clone(), status));
        }

        let resolver = SymbolResolver::new(&symbols);
        let mut stats = ResolutionStats::default();
        let mut added = 0usize;
        for reference_set in &references {
            let (edges, file_stats) = resolver.resolve(reference_set);
            stats += file_stats;
            for edge in edges {
                if graph_builder.add_edge(edge).is_some() {
                    added += 1;
                }
            }
        }
        debug!(
            resolved = stats.resolved,
            unresolved = stats.unresolved,
            reflexive = stats.reflexive,
            "resolution finished"
        );
        info!(edges = added, "dependency graph built");

        Analysis {
            graph: graph_builder.build(),
            symbols,
            references,
            stats,
            missing,
            failures,
        }
    }
}
