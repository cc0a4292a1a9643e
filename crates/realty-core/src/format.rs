use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::pricing::{normalize_price, PriceInput};
use crate::types::{Currency, Money};

/// Width the admin tables cut long text to.
pub const DEFAULT_TRUNCATE_WIDTH: usize = 80;

const MAX_FRACTION_DIGITS: u32 = 3;
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Render an amount in rupees with Indian digit grouping: `₹75,00,000`.
///
/// At most three fraction digits are shown and trailing zeros are dropped.
pub fn format_inr(amount: Money) -> String {
    format_currency(amount, &Currency::INR)
}

/// Render an amount with the currency's symbol. Rupees use lakh/crore
/// grouping, everything else groups in thousands.
pub fn format_currency(amount: Money, currency: &Currency) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits.as_str(), None),
    };

    let grouped = match currency {
        Currency::INR => group_indian(whole),
        _ => group_thousands(whole),
    };

    match fraction {
        Some(f) => format!("{sign}{}{grouped}.{f}", currency.symbol()),
        None => format!("{sign}{}{grouped}", currency.symbol()),
    }
}

/// Listing price for display: `-` when the listing has none.
pub fn format_price_display(raw: Option<&PriceInput>) -> String {
    match raw {
        Some(price) => format_inr(normalize_price(price)),
        None => "-".to_string(),
    }
}

/// Render a backend timestamp as `dd/mm/yyyy, hh:mm:ss` (UTC).
///
/// Missing values render as `-`; values that are not RFC 3339 are shown as
/// received.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };

    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Shorten text to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Upper-case the first character: `ongoing` → `Ongoing`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_indian(whole: &str) -> String {
    if whole.len() <= 3 {
        return whole.to_string();
    }
    let (head, last_three) = whole.split_at(whole.len() - 3);

    let mut pairs: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        pairs.push(&head[start..end]);
        end = start;
    }
    pairs.reverse();

    format!("{},{}", pairs.join(","), last_three)
}

fn group_thousands(whole: &str) -> String {
    let mut groups: Vec<&str> = Vec::new();
    let mut end = whole.len();
    while end > 0 {
        let start = end.saturating_sub(3);
        groups.push(&whole[start..end]);
        end = start;
    }
    groups.reverse();
    groups.join(",")
}
