//! Numeric text filtering for entry fields.

use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only; the capture is the integer part.
static NUMERIC_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]*)\.?[0-9]*$").expect("numeric text pattern"));

/// True when `text` is digits with at most one decimal point.
///
/// Empty text and a lone `.` are accepted so a field can be cleared or a
/// fraction started.
pub fn is_numeric_text(text: &str) -> bool {
    NUMERIC_TEXT.is_match(text)
}

/// Like [`is_numeric_text`], additionally bounding the integer part to
/// `max_integer_digits` characters.
pub fn is_bounded_numeric_text(text: &str, max_integer_digits: usize) -> bool {
    NUMERIC_TEXT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .is_some_and(|integer| integer.as_str().len() <= max_integer_digits)
}

/// Parses an accepted field into a positive finite value.
pub fn parse_positive(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
