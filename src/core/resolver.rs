use crate::core::graph::DependencyEdge;
use crate::core::references::ReferenceSet;
use crate::core::symbols::SymbolTable;

/// Counters for one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: usize,
    pub unresolved: usize,
    pub reflexive: usize,
}

impl std::ops::AddAssign for ResolutionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.resolved += rhs.resolved;
        self.unresolved += rhs.unresolved;
        self.reflexive += rhs.reflexive;
    }
}

/// Maps referenced names to the files that own them.
pub struct SymbolResolver<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> SymbolResolver<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// One edge per resolvable name, in name order. Unknown names are dropped
    /// without error, and so are names owned by the referencing file.
    pub fn resolve(&self, references: &ReferenceSet) -> (Vec<DependencyEdge>, ResolutionStats) {
        let mut stats = ResolutionStats::default();
        let mut edges = Vec::with_capacity(references.len());

        for name in references.names() {
            match self.symbols.owner(name) {
                None => stats.unresolved += 1,
                Some(owner) if owner == references.path => stats.reflexive += 1,
                Some(owner) => {
                    stats.resolved += 1;
                    edges.push(DependencyEdge::new(
                        references.path.clone(),
                        owner.to_path_buf(),
                        name,
                    ));
                }
            }
        }

        (edges, stats)
    }
}
