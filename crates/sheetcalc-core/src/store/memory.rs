use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use sheetcalc_engine::engine::{CellKey, SheetId};

use super::CellStore;
use crate::cell::{Cell, CellId};
use crate::error::Result;

/// Thread-safe sparse cell storage (backed by `DashMap`).
#[derive(Debug, Default)]
pub struct MemoryCellStore {
    cells: DashMap<CellKey, Cell>,
    next_id: AtomicU64,
}

impl MemoryCellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellStore for MemoryCellStore {
    fn find(&self, key: &CellKey) -> Option<Cell> {
        self.cells.get(key).map(|entry| entry.clone())
    }

    fn find_by_id(&self, id: CellId) -> Option<Cell> {
        self.cells
            .iter()
            .find(|entry| entry.id == Some(id))
            .map(|entry| entry.value().clone())
    }

    fn cells_in_sheet(&self, sheet: SheetId) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self
            .cells
            .iter()
            .filter(|entry| entry.key().sheet == sheet)
            .map(|entry| entry.value().clone())
            .collect();
        cells.sort_by(|a, b| {
            (a.col.len(), &a.col, a.row).cmp(&(b.col.len(), &b.col, b.row))
        });
        cells
    }

    fn all_cells(&self) -> Vec<Cell> {
        self.cells.iter().map(|entry| entry.value().clone()).collect()
    }

    fn save(&self, mut cell: Cell) -> Result<Cell> {
        if cell.id.is_none() {
            cell.id = Some(CellId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1));
        }
        self.cells.insert(cell.key(), cell.clone());
        Ok(cell)
    }

    fn delete(&self, cell: &Cell) -> Result<()> {
        self.cells.remove(&cell.key());
        Ok(())
    }
}
