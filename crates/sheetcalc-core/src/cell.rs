//! Cell records and the typed write request.

use serde::{Deserialize, Serialize};
use std::fmt;

use sheetcalc_engine::engine::{CellKey, SheetId};

use crate::error::{CellError, Result};

/// Store-assigned identity of a persisted cell.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell as held by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Assigned on first save.
    pub id: Option<CellId>,
    pub sheet: SheetId,
    pub row: u32,
    pub col: String,
    /// Value as written by the caller.
    pub raw_value: Option<String>,
    /// Formula text including the leading `=`.
    pub formula: Option<String>,
    /// Evaluated formula result, or the raw value for plain cells.
    pub computed_value: Option<String>,
}

impl Cell {
    /// An empty, unsaved cell at `key`.
    pub fn new(key: &CellKey) -> Cell {
        Cell {
            id: None,
            sheet: key.sheet,
            row: key.row,
            col: key.col.clone(),
            raw_value: None,
            formula: None,
            computed_value: None,
        }
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.sheet, self.row, self.col.clone())
    }

    /// The formula body after `=`, if the cell holds a formula.
    pub fn formula_body(&self) -> Option<&str> {
        formula_body(self.formula.as_deref())
    }
}

/// A create-or-update request for one coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRequest {
    pub sheet: SheetId,
    pub row: u32,
    pub col: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub formula: Option<String>,
}

impl CellRequest {
    pub fn new(sheet: SheetId, row: u32, col: impl Into<String>) -> CellRequest {
        CellRequest {
            sheet,
            row,
            col: col.into(),
            value: None,
            formula: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Check the coordinate and return its key.
    pub fn validate(&self) -> Result<CellKey> {
        if self.row == 0 {
            return Err(CellError::InvalidRequest(
                "row number must be positive".to_string(),
            ));
        }
        if self.col.is_empty() || !self.col.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CellError::InvalidRequest(format!(
                "column {:?} must be one or more letters",
                self.col
            )));
        }
        Ok(CellKey::new(self.sheet, self.row, self.col.clone()))
    }

    /// True when neither a value nor a formula carries any text.
    pub fn is_blank(&self) -> bool {
        is_blank(self.value.as_deref()) && is_blank(self.formula.as_deref())
    }

    pub fn formula_body(&self) -> Option<&str> {
        formula_body(self.formula.as_deref())
    }
}

fn formula_body(formula: Option<&str>) -> Option<&str> {
    formula.and_then(|f| f.strip_prefix('='))
}

fn is_blank(text: Option<&str>) -> bool {
    text.is_none_or(|t| t.trim().is_empty())
}
