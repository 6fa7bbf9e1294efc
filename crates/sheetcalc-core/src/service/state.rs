use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sheetcalc_engine::engine::{CellKey, DependencyGraph, SheetId};

use crate::cell::Cell;
use crate::config::ServiceConfig;
use crate::store::{ActivityEntry, ActivitySink, CellStore, Operation};

/// Owns the dependency graph and sequences every cell write.
///
/// Each write, delete and propagation run holds its sheet's lock for its
/// whole duration. The graph has its own lock, taken only for short edge
/// reads and updates, so the service can be shared across threads.
pub struct CellService<S, A> {
    pub(crate) store: S,
    pub(crate) activity: A,
    pub(crate) config: ServiceConfig,
    /// Precedent -> dependents edges, built from registered formulas
    graph: Mutex<DependencyGraph>,
    /// One mutex per sheet, created on first use
    sheet_locks: DashMap<SheetId, Arc<Mutex<()>>>,
}

impl<S: CellStore, A: ActivitySink> CellService<S, A> {
    /// Create a service with an empty dependency graph.
    ///
    /// Formulas already held by `store` are not tracked until
    /// [`rebuild_dependencies`](Self::rebuild_dependencies) runs.
    pub fn new(store: S, activity: A, config: ServiceConfig) -> Self {
        CellService {
            store,
            activity,
            config,
            graph: Mutex::new(DependencyGraph::new()),
            sheet_locks: DashMap::new(),
        }
    }

    /// Create a service and register every formula the store already holds.
    pub fn with_existing_cells(store: S, activity: A, config: ServiceConfig) -> Self {
        let service = Self::new(store, activity, config);
        service.rebuild_dependencies();
        service
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn activity(&self) -> &A {
        &self.activity
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Rebuild the dependency graph from the formulas in the store.
    /// Returns the number of formula cells registered.
    pub fn rebuild_dependencies(&self) -> usize {
        let cells = self.store.all_cells();
        let mut graph = self.graph();
        graph.clear();

        let mut registered = 0;
        for cell in &cells {
            if let Some(body) = cell.formula_body() {
                graph.register_dependencies(&cell.key(), body);
                registered += 1;
            }
        }
        log::info!(
            "rebuilt dependency graph: {} formula cells, {} edges",
            registered,
            graph.len()
        );
        registered
    }

    /// Cells whose formula currently references `key`.
    pub fn dependents_of(&self, key: &CellKey) -> HashSet<CellKey> {
        self.graph().dependents_of(key)
    }

    pub(crate) fn graph(&self) -> MutexGuard<'_, DependencyGraph> {
        self.graph.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn sheet_lock(&self, sheet: SheetId) -> Arc<Mutex<()>> {
        self.sheet_locks.entry(sheet).or_default().clone()
    }

    /// Hand an entry to the activity sink. Sink failures are only logged.
    pub(crate) fn record_activity(&self, cell: &Cell, operation: Operation) {
        let entry = ActivityEntry::for_cell(cell, &self.config.actor, operation);
        if let Err(e) = self.activity.record(entry) {
            log::warn!(
                "activity log rejected {} of {} on sheet {}: {}",
                operation,
                cell.key(),
                cell.sheet,
                e
            );
        }
    }
}
