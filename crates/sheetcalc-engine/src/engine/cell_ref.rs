//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and `(row, column)` pairs. Rows are 1-based and
//! columns stay in their letter form, exactly as cells are addressed by the
//! surrounding store.
//!
//! # Examples
//!
//! ```
//! use sheetcalc_engine::engine::{decode, encode};
//!
//! assert_eq!(encode(3, "B"), "B3");
//! assert_eq!(decode("B3").unwrap(), (3, "B".to_string()));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::{FormulaError, Result};

/// Identifier of the sheet a cell belongs to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SheetId(pub u32);

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully qualified cell coordinate: sheet, 1-based row and column letters.
///
/// Displays as the canonical `A1` form (without the sheet).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellKey {
    pub sheet: SheetId,
    pub row: u32,
    pub col: String,
}

impl CellKey {
    pub fn new(sheet: SheetId, row: u32, col: impl Into<String>) -> CellKey {
        CellKey {
            sheet,
            row,
            col: col.into(),
        }
    }

    /// Parse an `A1` reference into a key on `sheet`.
    pub fn parse(sheet: SheetId, reference: &str) -> Result<CellKey> {
        let (row, col) = decode(reference)?;
        Ok(CellKey { sheet, row, col })
    }

    /// Canonical `A1` text of this key.
    pub fn a1(&self) -> String {
        encode(self.row, &self.col)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

/// Concatenate column letters and the decimal row number.
///
/// The column is taken verbatim; callers pass already well-formed letters.
pub fn encode(row: u32, col: &str) -> String {
    format!("{}{}", col, row)
}

/// Split an `A1` reference into its row number and column letters.
///
/// Column letters keep their case. Fails with [`FormulaError::InvalidReference`]
/// when the text has no letters, no digits, anything other than a letter run
/// followed by a digit run, or a row of zero.
pub fn decode(reference: &str) -> Result<(u32, String)> {
    let invalid = || FormulaError::InvalidReference(reference.to_string());
    let caps = reference_re().captures(reference).ok_or_else(invalid)?;
    let row = caps["numbers"].parse::<u32>().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok((row, caps["letters"].to_string()))
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}
