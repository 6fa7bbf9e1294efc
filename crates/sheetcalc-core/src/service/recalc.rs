//! Breadth-first recalculation of dependent cells.
//!
//! A run starts from the changed cell and walks the dependency graph level by
//! level. The visited set bounds every run to the reachable cells, each
//! recomputed at most once, so cycles terminate (a cell on a cycle may be left
//! one step behind a fully converged value).

use std::collections::{HashSet, VecDeque};
use std::sync::PoisonError;

use sheetcalc_engine::engine::{CellKey, evaluate_formula};

use super::CellService;
use crate::cell::Cell;
use crate::error::{CellError, Result};
use crate::store::{ActivitySink, CellStore};

/// Outcome of one propagation run.
#[derive(Debug, Default)]
pub struct Propagation {
    /// Formula cells recomputed and saved, in visit order.
    pub recomputed: Vec<CellKey>,
    /// Formula cells whose recomputation failed; they keep their old value.
    pub skipped: Vec<(CellKey, CellError)>,
}

impl Propagation {
    pub fn is_empty(&self) -> bool {
        self.recomputed.is_empty() && self.skipped.is_empty()
    }
}

impl<S: CellStore, A: ActivitySink> CellService<S, A> {
    /// Recompute everything that depends on `changed`, under its sheet lock.
    pub fn recalculate(&self, changed: &CellKey) -> Propagation {
        let lock = self.sheet_lock(changed.sheet);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.propagate(changed)
    }

    /// Propagation run; the caller holds the sheet lock.
    pub(crate) fn propagate(&self, changed: &CellKey) -> Propagation {
        let mut report = Propagation::default();
        let mut queue = VecDeque::from([changed.clone()]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            let dependents = self.graph().dependents_of(&current);
            for dep in dependents {
                if !visited.insert(dep.clone()) {
                    continue;
                }
                if let Some(cell) = self.store.find(&dep)
                    && cell.formula_body().is_some()
                {
                    match self.recompute(cell) {
                        Ok(()) => report.recomputed.push(dep.clone()),
                        Err(e) => {
                            log::warn!("skipping recalculation of {}: {}", dep, e);
                            report.skipped.push((dep.clone(), e));
                        }
                    }
                }
                queue.push_back(dep);
            }
        }

        log::debug!(
            "propagation from {} recomputed {} cells, skipped {}",
            changed,
            report.recomputed.len(),
            report.skipped.len()
        );
        report
    }

    fn recompute(&self, mut cell: Cell) -> Result<()> {
        let Some(body) = cell.formula_body() else {
            return Ok(());
        };
        let computed = evaluate_formula(cell.sheet, body, &|key: &CellKey| {
            self.store.find(key).and_then(|c| c.computed_value)
        })?;
        cell.computed_value = Some(computed);
        self.store.save(cell)?;
        Ok(())
    }
}
