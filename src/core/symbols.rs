use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::loader::SourceUnit;
use super::patterns::PatternSet;

/// A declaration that lost the first-wins tie-break to an earlier file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedDeclaration {
    pub name: String,
    pub owner: PathBuf,
    pub ignored: PathBuf,
}

/// Declared name -> owning file.
///
/// A name declared in several files belongs to the first of them in input order;
/// later declarations are recorded in [`SymbolTable::shadowed`] and otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    owners: BTreeMap<String, PathBuf>,
    declared: HashMap<PathBuf, BTreeSet<String>>,
    shadowed: Vec<ShadowedDeclaration>,
}

impl SymbolTable {
    /// Scan every unit, in slice order, for declarations.
    pub fn build(units: &[SourceUnit], patterns: &PatternSet) -> Self {
        let mut table = Self::default();

        for unit in units {
            let names: BTreeSet<String> = patterns
                .declarations(&unit.text)
                .map(str::to_string)
                .collect();

            for name in &names {
                match table.owners.entry(name.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(unit.path.clone());
                    }
                    Entry::Occupied(slot) if slot.get() != &unit.path => {
                        table.shadowed.push(ShadowedDeclaration {
                            name: name.clone(),
                            owner: slot.get().clone(),
                            ignored: unit.path.clone(),
                        });
                    }
                    Entry::Occupied(_) => {}
                }
            }

            table
                .declared
                .entry(unit.path.clone())
                .or_default()
                .extend(names);
        }

        table
    }

    pub fn owner(&self, name: &str) -> Option<&Path> {
        self.owners.get(name).map(PathBuf::as_path)
    }

    /// Whether `path` itself declares `name`, whether or not it owns it.
    pub fn is_declared_in(&self, name: &str, path: &Path) -> bool {
        self.declared
            .get(path)
            .is_some_and(|names| names.contains(name))
    }

    pub fn declared_in(&self, path: &Path) -> impl Iterator<Item = &str> {
        self.declared
            .get(path)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    pub fn shadowed(&self) -> &[ShadowedDeclaration] {
        &self.shadowed
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Owned names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.owners
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }
}
