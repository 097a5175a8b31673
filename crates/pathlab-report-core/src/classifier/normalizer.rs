//! Input normalizer for range text and measured values.
//!
//! Handles:
//! - Thousands-separator stripping (`1,234` → `1234`)
//! - Dash/comparator canonicalization (`—` → `–`, `=<` → `<=`)
//! - Leading-number parsing of values (`"12.5 g/dL"` → 12.5)

use std::sync::LazyLock;

use regex::Regex;

use crate::models::MeasuredValue;

/// Optional sign, digits with optional fraction, optional exponent.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid leading number regex")
});

/// Strip thousands separators and surrounding whitespace from range text.
pub fn clean_range(text: &str) -> String {
    text.replace(',', "")
        .replace('—', "–")
        .replace("=<", "<=")
        .replace("=>", ">=")
        .trim()
        .to_string()
}

/// Read the leading number of a string, ignoring leading whitespace and
/// anything after the number. Returns `None` when there is no leading
/// number or it is not finite.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let trimmed = cleaned.trim_start();
    let found = LEADING_NUMBER.find(trimmed)?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Numeric reading of a measured value, if it has one.
pub fn numeric_value(value: &MeasuredValue) -> Option<f64> {
    match value {
        MeasuredValue::Number(number) => Some(*number).filter(|n| n.is_finite()),
        MeasuredValue::Text(text) => parse_leading_number(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_range_strips_commas() {
        assert_eq!(clean_range(" 1,000-2,000 "), "1000-2000");
        assert_eq!(clean_range("150,000–450,000"), "150000–450000");
    }

    #[test]
    fn test_clean_range_canonicalizes_dashes_and_comparators() {
        assert_eq!(clean_range("10—20"), "10–20");
        assert_eq!(clean_range("=<5"), "<=5");
        assert_eq!(clean_range("=>5"), ">=5");
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("19"), Some(19.0));
        assert_eq!(parse_leading_number("  12.5 g/dL"), Some(12.5));
        assert_eq!(parse_leading_number("1,234"), Some(1234.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("-3.2"), Some(-3.2));
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
        assert_eq!(parse_leading_number("7."), Some(7.0));
    }

    #[test]
    fn test_parse_leading_number_rejects_non_numeric() {
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("Positive"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("<10"), None);
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(&MeasuredValue::Number(4.5)), Some(4.5));
        assert_eq!(numeric_value(&MeasuredValue::Number(f64::NAN)), None);
        assert_eq!(numeric_value(&MeasuredValue::from("1,234")), Some(1234.0));
        assert_eq!(numeric_value(&MeasuredValue::from("Reactive")), None);
    }
}
