//! Numeric extraction
//!
//! Recognition output carries numbers as JSON numbers, numeric strings, or
//! strings with units attached (`"12g"`, `"3.5 g"`). Everything here follows one
//! default-value policy:
//! - unreadable values become `0.0`, never an error
//! - at ingredient level an absent or null field stays `None`

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static NUMBER_TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

/// Optional sign, then digits with an optional fraction, or a bare fraction
fn number_token() -> Option<&'static Regex> {
    NUMBER_TOKEN
        .get_or_init(|| Regex::new(r"[-+]?(?:\d+\.?\d*|\.\d+)").ok())
        .as_ref()
}

/// Extract the first decimal number from a string, or `0.0`
pub fn extract_str_number(text: &str) -> f64 {
    number_token()
        .and_then(|re| re.find(text))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Extract a number from any JSON value, or `0.0`
pub fn extract_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::String(s) => extract_str_number(s),
        _ => 0.0,
    }
}

/// Ingredient-level extraction: absent or null stays `None`
pub fn extract_optional_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(extract_number(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(extract_number(&json!(12)), 12.0);
        assert_eq!(extract_number(&json!(3.25)), 3.25);
        assert_eq!(extract_number(&json!(-4.5)), -4.5);
    }

    #[test]
    fn test_strings_with_units() {
        assert_eq!(extract_number(&json!("12.5g")), 12.5);
        assert_eq!(extract_number(&json!("3.5 g")), 3.5);
        assert_eq!(extract_number(&json!("12g")), 12.0);
        assert_eq!(extract_number(&json!("about 200 kcal")), 200.0);
        assert_eq!(extract_number(&json!("-2.5")), -2.5);
        assert_eq!(extract_number(&json!(".5 cup")), 0.5);
    }

    #[test]
    fn test_first_token_wins() {
        assert_eq!(extract_number(&json!("10-12 g")), 10.0);
        assert_eq!(extract_number(&json!("1.5 / 3")), 1.5);
    }

    #[test]
    fn test_unreadable_values_are_zero() {
        assert_eq!(extract_number(&json!("")), 0.0);
        assert_eq!(extract_number(&json!("no data")), 0.0);
        assert_eq!(extract_number(&Value::Null), 0.0);
        assert_eq!(extract_number(&json!(true)), 0.0);
        assert_eq!(extract_number(&json!([1, 2])), 0.0);
        assert_eq!(extract_number(&json!({"value": 3})), 0.0);
    }

    #[test]
    fn test_optional_extraction() {
        assert_eq!(extract_optional_number(None), None);
        assert_eq!(extract_optional_number(Some(&Value::Null)), None);
        assert_eq!(extract_optional_number(Some(&json!("n/a"))), Some(0.0));
        assert_eq!(extract_optional_number(Some(&json!("7g"))), Some(7.0));
    }
}
