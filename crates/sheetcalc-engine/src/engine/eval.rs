//! Formula evaluation.
//!
//! Resolves both operands of a parsed formula through a [`CellValues`]
//! lookup and applies a single arithmetic operator. Cells that do not exist
//! read as `"0"`.

use std::fmt;
use std::str::FromStr;

use super::cell_ref::{CellKey, SheetId};
use super::error::{FormulaError, Result};
use super::format::{format_number, parse_number};
use super::formula::{FormulaTokens, parse_formula};

/// Text supplied for an operand whose cell is missing or has no value.
pub const MISSING_CELL_VALUE: &str = "0";

/// Read access to the computed values of cells.
pub trait CellValues {
    /// Current computed value of the cell at `key`, if any.
    fn computed_value(&self, key: &CellKey) -> Option<String>;
}

impl<F> CellValues for F
where
    F: Fn(&CellKey) -> Option<String>,
{
    fn computed_value(&self, key: &CellKey) -> Option<String> {
        self(key)
    }
}

/// The binary operators a formula may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator. Division by exactly zero yields zero.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => {
                if right == 0.0 {
                    0.0
                } else {
                    left / right
                }
            }
        }
    }
}

impl FromStr for Operator {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(FormulaError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        };
        f.write_str(symbol)
    }
}

/// Evaluate already parsed tokens against the cells of `sheet`.
pub fn evaluate_tokens(
    sheet: SheetId,
    tokens: &FormulaTokens,
    values: &impl CellValues,
) -> Result<String> {
    let left_key = CellKey::parse(sheet, &tokens.left)?;
    let right_key = CellKey::parse(sheet, &tokens.right)?;
    let operator: Operator = tokens.operator.parse()?;

    let left = operand_value(&left_key, values)?;
    let right = operand_value(&right_key, values)?;
    let result = format_number(operator.apply(left, right));

    log::debug!(
        "evaluated {}{}{} on sheet {} -> {}",
        left_key,
        operator,
        right_key,
        sheet,
        result
    );
    Ok(result)
}

/// Parse and evaluate a formula body (without the leading `=`).
pub fn evaluate_formula(sheet: SheetId, body: &str, values: &impl CellValues) -> Result<String> {
    let tokens = parse_formula(body)?;
    evaluate_tokens(sheet, &tokens, values)
}

fn operand_value(key: &CellKey, values: &impl CellValues) -> Result<f64> {
    let text = values
        .computed_value(key)
        .unwrap_or_else(|| MISSING_CELL_VALUE.to_string());
    parse_number(&text).ok_or_else(|| FormulaError::NonNumericOperand {
        reference: key.to_string(),
        value: text,
    })
}
