//! sheetcalc-core - Cell writes, dependency propagation and the store/activity seams.

pub mod cell;
pub mod config;
pub mod error;
pub mod service;
pub mod store;

pub use cell::{Cell, CellId, CellRequest};
pub use config::ServiceConfig;
pub use error::{CellError, Result};
pub use service::{CellService, Propagation, WriteOutcome};
pub use store::{
    ActivityEntry, ActivitySink, CellStore, EntityType, LogActivitySink, MemoryActivityLog,
    MemoryCellStore, Operation,
};

pub use sheetcalc_engine::engine::{CellKey, FormulaError, SheetId};
