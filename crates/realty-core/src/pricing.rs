use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Money;

/// A price as the backend stores it: either a plain number or a display
/// string such as `"₹75,00,000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Amount(Decimal),
}

impl From<&str> for PriceInput {
    fn from(s: &str) -> Self {
        PriceInput::Text(s.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(s: String) -> Self {
        PriceInput::Text(s)
    }
}

impl From<Decimal> for PriceInput {
    fn from(d: Decimal) -> Self {
        PriceInput::Amount(d)
    }
}

impl std::fmt::Display for PriceInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceInput::Text(s) => write!(f, "{s}"),
            PriceInput::Amount(d) => write!(f, "{d}"),
        }
    }
}

/// Convert a loosely formatted price into a plain amount.
///
/// Every character that is not an ASCII digit or `.` is discarded and the
/// remainder parsed. Never fails: empty or unparseable input yields zero, and
/// the result is never negative (a leading minus sign is decoration like any
/// other).
pub fn normalize_price(raw: &PriceInput) -> Money {
    match raw {
        PriceInput::Text(s) => normalize_price_str(s),
        PriceInput::Amount(d) => normalize_price_str(&d.to_string()),
    }
}

/// [`normalize_price`] for a bare string.
pub fn normalize_price_str(raw: &str) -> Money {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_cleaned(&cleaned).unwrap_or(Decimal::ZERO)
}

/// [`normalize_price`] for an optional value; absent prices are zero.
pub fn normalize_optional_price(raw: Option<&PriceInput>) -> Money {
    raw.map(normalize_price).unwrap_or(Decimal::ZERO)
}

fn parse_cleaned(cleaned: &str) -> Option<Money> {
    if cleaned.is_empty() {
        return Some(Decimal::ZERO);
    }

    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    if parts.next().is_some() {
        return None;
    }
    if whole.is_empty() && fraction.map_or(true, str::is_empty) {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let candidate = match fraction {
        Some(f) if !f.is_empty() => format!("{whole}.{f}"),
        _ => whole.to_string(),
    };

    Decimal::from_str(&candidate).ok().map(|d| d.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rupee_display_string() {
        assert_eq!(normalize_price_str("₹75,00,000"), dec!(7500000));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(normalize_price_str("1500000"), dec!(1500000));
        assert_eq!(normalize_price_str("1500000.50"), dec!(1500000.5));
    }

    #[test]
    fn test_decorated_with_words() {
        // the abbreviation point survives the strip and becomes a decimal point
        assert_eq!(normalize_price_str("Rs. 45,00,000 onwards"), dec!(0.45));
        assert_eq!(normalize_price_str("INR 45,00,000/-"), dec!(4500000));
    }

    #[test]
    fn test_empty_and_garbage_are_zero() {
        assert_eq!(normalize_price_str(""), Decimal::ZERO);
        assert_eq!(normalize_price_str("on request"), Decimal::ZERO);
        assert_eq!(normalize_price_str("."), Decimal::ZERO);
        assert_eq!(normalize_price_str("1.2.3"), Decimal::ZERO);
    }

    #[test]
    fn test_leading_and_trailing_point() {
        assert_eq!(normalize_price_str(".5"), dec!(0.5));
        assert_eq!(normalize_price_str("5."), dec!(5));
    }

    #[test]
    fn test_numeric_input_is_non_negative() {
        assert_eq!(normalize_price(&PriceInput::Amount(dec!(-250000))), dec!(250000));
        assert_eq!(normalize_price(&PriceInput::Amount(dec!(99.90))), dec!(99.9));
    }

    #[test]
    fn test_absent_price_is_zero() {
        assert_eq!(normalize_optional_price(None), Decimal::ZERO);
    }

    #[test]
    fn test_untagged_deserialisation() {
        let text: PriceInput = serde_json::from_str("\"₹1,20,000\"").unwrap();
        let number: PriceInput = serde_json::from_str("120000").unwrap();
        assert_eq!(normalize_price(&text), normalize_price(&number));
    }
}
