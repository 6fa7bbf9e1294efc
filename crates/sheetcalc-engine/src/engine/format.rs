/// Format a computed number as stored cell text.
///
/// Whole numbers keep a trailing `.0` (`5.0`), fractions use the shortest
/// round-tripping representation (`2.5`, `0.30000000000000004`).
pub fn format_number(n: f64) -> String {
    format!("{:?}", n)
}

/// Parse stored cell text as a number, ignoring surrounding whitespace.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
