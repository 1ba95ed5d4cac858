use depmap::config::PatternConfig;
use depmap::core::resolver::{ResolutionStats, SymbolResolver};
use depmap::core::{DependencyEdge, PatternKind, PatternSet, ReferenceSet, SourceUnit, SymbolTable};

fn table(units: &[SourceUnit]) -> SymbolTable {
    let patterns = PatternSet::new(&PatternConfig::default()).unwrap();
    SymbolTable::build(units, &patterns)
}

#[test]
fn resolver_maps_names_to_owning_files() {
    let symbols = table(&[
        SourceUnit::new("a.gs", "class Alpha {}"),
        SourceUnit::new("b.gs", "class Beta {}\nclass Gamma {}"),
    ]);

    let mut refs = ReferenceSet::new("c.gs");
    refs.insert("Gamma", PatternKind::MemberAccess);
    refs.insert("Alpha", PatternKind::Instantiation);
    refs.insert("Beta", PatternKind::ServiceLookup);

    let (edges, stats) = SymbolResolver::new(&symbols).resolve(&refs);

    assert_eq!(
        edges,
        vec![
            DependencyEdge::new("c.gs", "a.gs", "Alpha"),
            DependencyEdge::new("c.gs", "b.gs", "Beta"),
            DependencyEdge::new("c.gs", "b.gs", "Gamma"),
        ]
    );
    assert_eq!(stats.resolved, 3);
}

#[test]
fn unknown_names_are_dropped_without_error() {
    let symbols = table(&[SourceUnit::new("a.gs", "class Alpha {}")]);

    let mut refs = ReferenceSet::new("c.gs");
    refs.insert("Ghost", PatternKind::ServiceLookup);
    refs.insert("Logger", PatternKind::MemberAccess);

    let (edges, stats) = SymbolResolver::new(&symbols).resolve(&refs);

    assert!(edges.is_empty());
    assert_eq!(
        stats,
        ResolutionStats {
            resolved: 0,
            unresolved: 2,
            reflexive: 0
        }
    );
}

#[test]
fn names_owned_by_the_referencing_file_are_not_edges() {
    let symbols = table(&[SourceUnit::new("a.gs", "class Alpha {}")]);

    // Built by hand, so the collector's own self-reference filter never ran.
    let mut refs = ReferenceSet::new("a.gs");
    refs.insert("Alpha", PatternKind::MemberAccess);

    let (edges, stats) = SymbolResolver::new(&symbols).resolve(&refs);

    assert!(edges.is_empty());
    assert_eq!(stats.reflexive, 1);
}
