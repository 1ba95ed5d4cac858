use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::loader::SourceUnit;
use super::patterns::{first_groups, PatternSet};
use super::symbols::SymbolTable;

/// Which heuristic spotted a reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Instantiation, // new Foo(...)
    MemberAccess,  // Foo.bar, also matches capitalised locals
    ServiceLookup, // getService("Foo")
    ServiceEnum,   // SERVICES.Foo
    Inheritance,   // class Bar extends Foo
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Instantiation,
        PatternKind::MemberAccess,
        PatternKind::ServiceLookup,
        PatternKind::ServiceEnum,
        PatternKind::Inheritance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Instantiation => "instantiation",
            PatternKind::MemberAccess => "member-access",
            PatternKind::ServiceLookup => "service-lookup",
            PatternKind::ServiceEnum => "service-enum",
            PatternKind::Inheritance => "inheritance",
        }
    }
}

/// Candidate names referenced by one file. Each name appears once, however many
/// times and by however many patterns it was matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    pub path: PathBuf,
    references: BTreeMap<String, BTreeSet<PatternKind>>,
}

impl ReferenceSet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            references: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, kind: PatternKind) {
        self.references
            .entry(name.to_string())
            .or_default()
            .insert(kind);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.references.contains_key(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }

    /// Patterns that matched `name`, if it was referenced at all.
    pub fn kinds(&self, name: &str) -> Option<&BTreeSet<PatternKind>> {
        self.references.get(name)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

pub struct ReferenceCollector<'a> {
    patterns: &'a PatternSet,
    symbols: &'a SymbolTable,
}

impl<'a> ReferenceCollector<'a> {
    pub fn new(patterns: &'a PatternSet, symbols: &'a SymbolTable) -> Self {
        Self { patterns, symbols }
    }

    /// Run every pattern over the whole file, then drop names the file declares itself.
    pub fn collect(&self, unit: &SourceUnit) -> ReferenceSet {
        let mut set = ReferenceSet::new(unit.path.clone());

        for kind in PatternKind::ALL {
            for name in first_groups(self.regex_for(kind), &unit.text) {
                if self.symbols.is_declared_in(name, &unit.path) {
                    continue;
                }
                set.insert(name, kind);
            }
        }

        set
    }

    fn regex_for(&self, kind: PatternKind) -> &'a regex::Regex {
        match kind {
            PatternKind::Instantiation => &self.patterns.instantiation,
            PatternKind::MemberAccess => &self.patterns.member_access,
            PatternKind::ServiceLookup => &self.patterns.service_lookup,
            PatternKind::ServiceEnum => &self.patterns.service_enum,
            PatternKind::Inheritance => &self.patterns.inheritance,
        }
    }
}
