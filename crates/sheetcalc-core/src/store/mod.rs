//! Collaborators the cell service persists through.
//!
//! - [`CellStore`] - Cell lookup and persistence
//! - [`ActivitySink`] - Fire-and-forget audit trail of cell writes
//!
//! In-memory implementations back the CLI and the tests.

mod activity;
mod memory;

pub use activity::{ActivityEntry, ActivitySink, EntityType, LogActivitySink, MemoryActivityLog, Operation};
pub use memory::MemoryCellStore;

use sheetcalc_engine::engine::{CellKey, SheetId};

use crate::cell::{Cell, CellId};
use crate::error::Result;

/// Lookup and persistence of cells.
pub trait CellStore {
    fn find(&self, key: &CellKey) -> Option<Cell>;

    fn find_by_id(&self, id: CellId) -> Option<Cell>;

    /// Cells of one sheet, ordered by column then row.
    fn cells_in_sheet(&self, sheet: SheetId) -> Vec<Cell>;

    fn all_cells(&self) -> Vec<Cell>;

    /// Insert or replace the cell at its key, assigning an id when it has none.
    fn save(&self, cell: Cell) -> Result<Cell>;

    fn delete(&self, cell: &Cell) -> Result<()>;
}
