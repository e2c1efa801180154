//! Locale-tolerant parsing of printed amounts.
//!
//! Accepted decimal separators are `.` and `,`. When both appear, the one
//! that comes last is the decimal separator and the other groups thousands.
//! A lone comma is always a decimal separator. Spaces (including
//! non-breaking spaces) group thousands.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_VALUE;

/// Parse a printed amount ("1.750,00", "1750.00", "1 750,00", "50").
///
/// Returns `None` when the text holds no digits or does not form a number.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{00a0}' | '\u{202f}'))
        .collect();

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => {
            if cleaned.matches(',').count() > 1 {
                return None;
            }
            cleaned.replace(',', ".")
        }
        (None, _) => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

/// First printed amount in `text` that parses, returned as printed.
pub fn find_amount(text: &str) -> Option<String> {
    AMOUNT_VALUE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| parse_amount(candidate).is_some())
        .map(str::to_string)
}

/// Keep `raw` only if it reads as a number.
pub fn valid_amount(raw: &str) -> Option<String> {
    let raw = raw.trim();
    parse_amount(raw).map(|_| raw.to_string())
}
