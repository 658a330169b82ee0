//! Price text normalization.
//!
//! Storefront markup mixes European (`1.234,56`) and plain (`1234.56`)
//! formats, often with currency symbols and labels around them. This is a
//! best-effort heuristic, not a currency parser: the separator rules below
//! are lossy and ambiguous input such as `"1.234"` is read as one thousand
//! two hundred thirty-four.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid numeric token regex"));

/// Parses a raw price string into a decimal amount.
///
/// Returns `None` for empty or non-numeric input. Callers must treat `None`
/// as "price unknown", never as zero.
///
/// Separator rules, applied after dropping every character that is not a
/// digit, `.` or `,`:
/// - comma is the last separator: dots are thousands separators and the
///   comma is the decimal point (`1.234,56`)
/// - dot is the last separator and commas are present: commas are thousands
///   separators (`1,234.56`)
/// - several dots, or one dot followed by exactly three digits: thousands
///   separators (`1.234.567`, `1.234`)
/// - several commas and no dot: thousands separators (`1,234,567`)
///
/// The first `digits(.digits)?` token of the result is parsed.
#[must_use]
pub fn normalize_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == ',');
    if cleaned.is_empty() {
        return None;
    }

    let canonical = canonical_separators(cleaned);
    let token = NUMERIC_TOKEN.find(&canonical)?;
    Decimal::from_str(token.as_str()).ok()
}

fn canonical_separators(cleaned: &str) -> String {
    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) => {
            if cleaned.matches(',').count() > 1 {
                cleaned.replace(',', "")
            } else {
                cleaned.replace(',', ".")
            }
        }
        (Some(dot), None) => {
            let fraction = &cleaned[dot + 1..];
            if cleaned.matches('.').count() > 1 || fraction.len() == 3 {
                cleaned.replace('.', "")
            } else {
                cleaned.to_owned()
            }
        }
        (None, None) => cleaned.to_owned(),
    }
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
