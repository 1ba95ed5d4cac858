pub mod analyzer;
pub mod graph;
pub mod loader;
pub mod patterns;
pub mod references;
pub mod resolver;
pub mod scanner;
pub mod symbols;

pub use analyzer::{Analysis, DependencyAnalyzer};
pub use graph::{DependencyEdge, DependencyGraph, FileNode, FileStatus, GraphBuilder};
pub use loader::{LoadFailure, LoadedCorpus, SourceLoader, SourceUnit};
pub use patterns::PatternSet;
pub use references::{PatternKind, ReferenceCollector, ReferenceSet};
pub use resolver::{ResolutionStats, SymbolResolver};
pub use scanner::FileScanner;
pub use symbols::{ShadowedDeclaration, SymbolTable};
