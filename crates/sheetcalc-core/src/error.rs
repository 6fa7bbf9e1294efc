//! Error types for the sheetcalc cell service.

use thiserror::Error;

use sheetcalc_engine::engine::{FormulaError, SheetId};

use crate::cell::CellId;

/// Errors surfaced by cell writes, lookups and deletes.
#[derive(Error, Debug)]
pub enum CellError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error("Cell not found for Sheet ID {sheet}, Row {row}, Column {col}")]
    CellNotFound { sheet: SheetId, row: u32, col: String },

    #[error("Cell with ID {0} not found")]
    CellIdNotFound(CellId),

    #[error("Invalid cell request: {0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Activity log error: {0}")]
    Activity(String),
}

pub type Result<T> = std::result::Result<T, CellError>;
