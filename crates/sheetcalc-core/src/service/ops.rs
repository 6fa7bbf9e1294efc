use std::sync::PoisonError;

use sheetcalc_engine::engine::{CellKey, SheetId, evaluate_tokens, parse_formula};

use super::{CellService, Propagation};
use crate::cell::{Cell, CellId, CellRequest};
use crate::error::{CellError, Result};
use crate::store::{ActivitySink, CellStore, Operation};

/// Result of a create-or-update.
#[derive(Debug, Default)]
pub struct WriteOutcome {
    /// The saved cell, or `None` when the write cleared the coordinate.
    pub cell: Option<Cell>,
    /// Recalculation triggered by the write.
    pub propagation: Propagation,
}

impl<S: CellStore, A: ActivitySink> CellService<S, A> {
    /// Create or update the cell addressed by `request`.
    ///
    /// A formula (text starting with `=`) is evaluated first; if it fails
    /// nothing is written. A request with neither value nor formula deletes
    /// an existing cell.
    pub fn create_or_update(&self, request: CellRequest) -> Result<WriteOutcome> {
        let key = request.validate()?;
        let lock = self.sheet_lock(key.sheet);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = self.store.find(&key);
        if request.is_blank() {
            let propagation = match existing {
                Some(cell) => self.remove(cell)?,
                None => Propagation::default(),
            };
            return Ok(WriteOutcome {
                cell: None,
                propagation,
            });
        }

        let computed = match request.formula_body() {
            Some(body) => {
                let tokens = parse_formula(body)?;
                let computed = evaluate_tokens(key.sheet, &tokens, &|k: &CellKey| {
                    self.store.find(k).and_then(|c| c.computed_value)
                })?;
                self.register(&key, body);
                Some(computed)
            }
            None => {
                if self.config.retract_stale_edges {
                    self.graph().retract(&key);
                }
                request.value.clone()
            }
        };

        let operation = if existing.is_some() {
            Operation::Update
        } else {
            Operation::Add
        };
        let mut cell = existing.unwrap_or_else(|| Cell::new(&key));
        cell.raw_value = request.value;
        cell.formula = request.formula;
        cell.computed_value = computed;

        let saved = self.store.save(cell)?;
        log::info!(
            "{} {} on sheet {} = {:?}",
            operation,
            key,
            key.sheet,
            saved.computed_value
        );
        self.record_activity(&saved, operation);

        let propagation = self.propagate(&key);
        Ok(WriteOutcome {
            cell: Some(saved),
            propagation,
        })
    }

    /// Delete the cell at a coordinate.
    pub fn delete_cell(&self, sheet: SheetId, row: u32, col: &str) -> Result<Propagation> {
        let key = CellKey::new(sheet, row, col);
        let lock = self.sheet_lock(sheet);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let cell = self.store.find(&key).ok_or_else(|| CellError::CellNotFound {
            sheet,
            row,
            col: col.to_string(),
        })?;
        self.remove(cell)
    }

    /// Delete a cell by its store id.
    pub fn delete_cell_by_id(&self, id: CellId) -> Result<Propagation> {
        let found = self
            .store
            .find_by_id(id)
            .ok_or(CellError::CellIdNotFound(id))?;
        let lock = self.sheet_lock(found.sheet);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        // The cell may have been removed before the lock was taken.
        let cell = self
            .store
            .find(&found.key())
            .filter(|cell| cell.id == Some(id))
            .ok_or(CellError::CellIdNotFound(id))?;
        self.remove(cell)
    }

    pub fn get_cell(&self, sheet: SheetId, row: u32, col: &str) -> Result<Cell> {
        self.store
            .find(&CellKey::new(sheet, row, col))
            .ok_or_else(|| CellError::CellNotFound {
                sheet,
                row,
                col: col.to_string(),
            })
    }

    pub fn cells_in_sheet(&self, sheet: SheetId) -> Vec<Cell> {
        self.store.cells_in_sheet(sheet)
    }

    fn register(&self, key: &CellKey, body: &str) {
        let mut graph = self.graph();
        if self.config.retract_stale_edges {
            graph.replace_dependencies(key, body);
        } else {
            graph.register_dependencies(key, body);
        }
    }

    /// Remove a cell; the caller holds the sheet lock.
    ///
    /// Dependents keep their computed values unless `recalc_on_delete` is set.
    fn remove(&self, cell: Cell) -> Result<Propagation> {
        let key = cell.key();
        self.store.delete(&cell)?;
        if self.config.retract_stale_edges {
            self.graph().retract(&key);
        }
        log::info!("{} {} on sheet {}", Operation::Delete, key, key.sheet);
        self.record_activity(&cell, Operation::Delete);

        if self.config.recalc_on_delete {
            Ok(self.propagate(&key))
        } else {
            Ok(Propagation::default())
        }
    }
}
