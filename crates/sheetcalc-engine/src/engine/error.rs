//! Error types raised while decoding references and evaluating formulas.

use thiserror::Error;

/// Errors produced by the formula engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Invalid cell reference: {0:?}")]
    InvalidReference(String),

    #[error(
        "Unsupported formula {0:?}: only a single binary operation between two cell references is supported"
    )]
    UnsupportedFormula(String),

    #[error("Unsupported operator: {0:?}")]
    UnsupportedOperator(String),

    #[error("Cell {reference} holds non-numeric value {value:?}")]
    NonNumericOperand { reference: String, value: String },
}

pub type Result<T> = std::result::Result<T, FormulaError>;
