//! Error types for the sheetcalc command line

use thiserror::Error;

use sheetcalc_core::CellError;

/// Errors that can occur in the sheetcalc application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Cell(#[from] CellError),
}

pub type Result<T> = std::result::Result<T, AppError>;
