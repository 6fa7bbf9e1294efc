//! Dependency graph between formula cells.
//!
//! Edges point from a precedent (a cell read by a formula) to its dependents
//! (the cells whose formula reads it). Registration is additive: re-registering
//! a formula never removes the edges of the formula it replaced, so the graph
//! may over-approximate. [`DependencyGraph::replace_dependencies`] keeps it
//! exact by first retracting what the dependent previously owned.

use std::collections::{HashMap, HashSet};

use super::cell_ref::{CellKey, SheetId};
use super::formula::extract_references;

/// Precedent → dependents map, with a reverse index for retraction.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    /// Reverse dependency map: cell -> cells that depend on it
    dependents: HashMap<CellKey, HashSet<CellKey>>,
    /// Forward map: cell -> cells its registered formulas referenced
    precedents: HashMap<CellKey, HashSet<CellKey>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge from every reference in `body` to `dependent`.
    ///
    /// References resolve on the dependent's sheet. Existing edges are kept.
    pub fn register_dependencies(&mut self, dependent: &CellKey, body: &str) {
        for precedent in references_on(dependent.sheet, body) {
            self.add_edge(precedent, dependent.clone());
        }
    }

    /// Drop every edge owned by `dependent`, then register `body`.
    pub fn replace_dependencies(&mut self, dependent: &CellKey, body: &str) {
        self.retract(dependent);
        self.register_dependencies(dependent, body);
    }

    /// Remove all edges that point at `dependent`.
    pub fn retract(&mut self, dependent: &CellKey) {
        let Some(owned) = self.precedents.remove(dependent) else {
            return;
        };
        for precedent in owned {
            if let Some(set) = self.dependents.get_mut(&precedent) {
                set.remove(dependent);
                if set.is_empty() {
                    self.dependents.remove(&precedent);
                }
            }
        }
    }

    /// Cells whose formula references `key`. Empty when there are none.
    pub fn dependents_of(&self, key: &CellKey) -> HashSet<CellKey> {
        self.dependents.get(key).cloned().unwrap_or_default()
    }

    /// Cells that `key`'s registered formulas referenced.
    pub fn precedents_of(&self, key: &CellKey) -> HashSet<CellKey> {
        self.precedents.get(key).cloned().unwrap_or_default()
    }

    /// Number of precedent → dependent edges.
    pub fn len(&self) -> usize {
        self.dependents.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn clear(&mut self) {
        self.dependents.clear();
        self.precedents.clear();
    }

    fn add_edge(&mut self, precedent: CellKey, dependent: CellKey) {
        self.precedents
            .entry(dependent.clone())
            .or_default()
            .insert(precedent.clone());
        self.dependents.entry(precedent).or_default().insert(dependent);
    }
}

fn references_on(sheet: SheetId, body: &str) -> impl Iterator<Item = CellKey> {
    extract_references(body)
        .into_iter()
        .filter_map(move |reference| CellKey::parse(sheet, &reference).ok())
}
