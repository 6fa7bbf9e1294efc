//! Formula engine API.
//!
//! This module provides the pure computation pieces of sheetcalc:
//!
//! - [`CellKey`], [`encode`], [`decode`] - Cell reference codec (A1 notation ↔ row/column)
//! - [`parse_formula`], [`extract_references`] - Two-operand formula parsing
//! - [`evaluate_formula`], [`CellValues`] - Single-operator evaluation
//! - [`DependencyGraph`] - Precedent → dependent edges
//! - [`format_number`] - Canonical text for computed numbers

mod cell_ref;
mod deps;
mod error;
mod eval;
mod format;
mod formula;

pub use cell_ref::{CellKey, SheetId, decode, encode};
pub use deps::DependencyGraph;
pub use error::{FormulaError, Result};
pub use eval::{CellValues, MISSING_CELL_VALUE, Operator, evaluate_formula, evaluate_tokens};
pub use format::{format_number, parse_number};
pub use formula::{FormulaTokens, OPERATOR_CHARS, extract_references, parse_formula, tokenize};
