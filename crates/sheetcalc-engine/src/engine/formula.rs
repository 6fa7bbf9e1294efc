//! Formula tokenizing and reference extraction.
//!
//! A formula body (the text after the leading `=`) is split at every operator
//! character. Only `operand operator operand` is accepted for evaluation, while
//! [`extract_references`] is deliberately more permissive so that every cell a
//! formula mentions still gets tracked in the dependency graph.

use regex::Regex;
use std::sync::OnceLock;

use super::error::{FormulaError, Result};

/// Characters that split a formula body into tokens.
pub const OPERATOR_CHARS: [char; 4] = ['+', '-', '*', '/'];

/// The three tokens of a single binary formula, trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaTokens {
    pub left: String,
    pub operator: String,
    pub right: String,
}

/// Split `body` into tokens, keeping each operator as its own token.
///
/// Empty segments (e.g. before a leading operator) are dropped and every
/// token is trimmed.
pub fn tokenize(body: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut segment = String::new();

    for ch in body.chars() {
        if OPERATOR_CHARS.contains(&ch) {
            push_segment(&mut tokens, &mut segment);
            tokens.push(ch.to_string());
        } else {
            segment.push(ch);
        }
    }
    push_segment(&mut tokens, &mut segment);

    tokens
}

fn push_segment(tokens: &mut Vec<String>, segment: &mut String) {
    if !segment.is_empty() {
        tokens.push(segment.trim().to_string());
        segment.clear();
    }
}

/// Parse a formula body into its two operands and operator.
pub fn parse_formula(body: &str) -> Result<FormulaTokens> {
    let tokens = tokenize(body);
    let [left, operator, right]: [String; 3] = tokens
        .try_into()
        .map_err(|_| FormulaError::UnsupportedFormula(body.to_string()))?;
    Ok(FormulaTokens {
        left,
        operator,
        right,
    })
}

/// Every uppercase cell reference that appears anywhere in `body`, in order of
/// appearance (duplicates included).
pub fn extract_references(body: &str) -> Vec<String> {
    reference_re()
        .find_iter(body)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn reference_re() -> &'static Regex {
    static REF_RE: OnceLock<Regex> = OnceLock::new();
    REF_RE.get_or_init(|| {
        Regex::new(r"[A-Z]+[0-9]+").expect("formula reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_operators() {
        assert_eq!(tokenize("A1 * B2"), vec!["A1", "*", "B2"]);
    }

    #[test]
    fn test_tokenize_drops_empty_segments() {
        assert_eq!(tokenize("-A1"), vec!["-", "A1"]);
        assert_eq!(tokenize("A1+"), vec!["A1", "+"]);
    }

    #[test]
    fn test_parse_rejects_missing_operator() {
        assert_eq!(
            parse_formula("A1"),
            Err(FormulaError::UnsupportedFormula("A1".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_doubled_operator() {
        assert!(matches!(
            parse_formula("A1+-A2"),
            Err(FormulaError::UnsupportedFormula(_))
        ));
    }

    #[test]
    fn test_extract_ignores_lowercase() {
        assert_eq!(extract_references("a1+B2"), vec!["B2"]);
    }
}
