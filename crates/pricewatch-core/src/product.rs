use percent_encoding::percent_decode_str;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalized result of one extraction call.
///
/// A value object: created fresh on every call and compared field by field
/// by whoever stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Never empty.
    pub title: String,
    /// Amount in the site's local currency. `None` means "unknown", never zero.
    pub price: Option<Decimal>,
    pub in_stock: bool,
}

impl ProductInfo {
    /// Record returned for a generic-store page that could not be fetched.
    ///
    /// Title comes from the URL, price is unknown and the product is assumed
    /// to be in stock so tracking is not silently dropped.
    #[must_use]
    pub fn degraded(url: &str) -> Self {
        let title = title_from_url(url)
            .unwrap_or_else(|| format!("Product ({})", last_path_segment(url)));
        Self {
            title,
            price: None,
            in_stock: true,
        }
    }
}

const STRIPPED_EXTENSIONS: &[&str] = &[".html", ".htm", ".php", ".aspx"];

/// Derives a human-readable title from the last meaningful URL path segment.
///
/// Segments are percent-decoded first. A segment is meaningful when it
/// contains a run of at least three letters, which skips trailing product
/// codes such as `p-123.html`.
///
/// `https://shop.example/phone-case-black/p-123.html` → `"Phone Case Black"`.
#[must_use]
pub fn title_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    segments.into_iter().rev().find_map(|raw| {
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        let segment = strip_extension(&decoded);
        has_word(segment).then(|| humanize_segment(segment))
    })
}

/// Raw trailing segment of a URL, falling back to the whole input.
#[must_use]
pub fn last_path_segment(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(url)
}

fn strip_extension(segment: &str) -> &str {
    let lower = segment.to_ascii_lowercase();
    STRIPPED_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(*ext))
        .map_or(segment, |ext| &segment[..segment.len() - ext.len()])
}

fn has_word(segment: &str) -> bool {
    let mut run = 0usize;
    for c in segment.chars() {
        if c.is_alphabetic() {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fn humanize_segment(segment: &str) -> String {
    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Dropped,
    Rose,
}

/// Difference between a stored record and a fresh extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChange {
    pub previous_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub previous_in_stock: bool,
    pub current_in_stock: bool,
}

impl ProductChange {
    /// Returns `None` when neither the price nor the stock status changed.
    /// Title changes alone are not reported.
    #[must_use]
    pub fn between(previous: &ProductInfo, current: &ProductInfo) -> Option<Self> {
        if previous.price == current.price && previous.in_stock == current.in_stock {
            return None;
        }
        Some(Self {
            previous_price: previous.price,
            current_price: current.price,
            previous_in_stock: previous.in_stock,
            current_in_stock: current.in_stock,
        })
    }

    #[must_use]
    pub fn price_changed(&self) -> bool {
        self.previous_price != self.current_price
    }

    #[must_use]
    pub fn stock_changed(&self) -> bool {
        self.previous_in_stock != self.current_in_stock
    }

    /// `current - previous`, only when both prices are known.
    #[must_use]
    pub fn price_delta(&self) -> Option<Decimal> {
        Some(self.current_price? - self.previous_price?)
    }

    #[must_use]
    pub fn price_direction(&self) -> Option<PriceDirection> {
        let delta = self.price_delta()?;
        if delta.is_zero() {
            None
        } else if delta.is_sign_negative() {
            Some(PriceDirection::Dropped)
        } else {
            Some(PriceDirection::Rose)
        }
    }
}
