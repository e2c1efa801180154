//! Numeric token extraction and pairing for the numeric boost.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters accepted as a decimal separator inside a numeric token.
pub const DECIMAL_SEPARATORS: [char; 2] = ['.', ','];

/// Two numbers pair up when their relative difference is below this.
pub const MAX_RELATIVE_DIFFERENCE: f64 = 0.01;

lazy_static! {
    static ref NUMBER_TOKEN: Regex = Regex::new(r"[0-9]+(?:[.,][0-9]+)?").unwrap();
}

/// Extract every integer or decimal token, either separator read as the
/// decimal point. "1750,00" and "1750.00" both yield 1750.0.
pub fn numeric_tokens(text: &str) -> Vec<f64> {
    NUMBER_TOKEN
        .find_iter(text)
        .filter_map(|m| m.as_str().replace(DECIMAL_SEPARATORS, ".").parse().ok())
        .collect()
}

fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Fraction of numbers that pair up, relative to the larger token count.
///
/// Each number in `a` takes the first unused number in `b` within 1%.
/// Returns `None` when either side has no numbers.
pub fn matched_ratio(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut used = vec![false; b.len()];
    let mut pairs = 0usize;

    for &x in a {
        let candidate = b
            .iter()
            .enumerate()
            .find(|&(j, &y)| !used[j] && relative_difference(x, y) < MAX_RELATIVE_DIFFERENCE);
        if let Some((j, _)) = candidate {
            used[j] = true;
            pairs += 1;
        }
    }

    Some(pairs as f64 / a.len().max(b.len()) as f64)
}
