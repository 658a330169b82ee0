//! DOM heuristics: the strategy interface shared by per-site selector tables
//! and the generic profile.

mod generic;

use rust_decimal::Decimal;
use scraper::Html;

pub use generic::{generic_price, generic_title, has_add_to_cart, GenericStrategy};

/// Extraction output where any field may still be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialProduct {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub in_stock: Option<bool>,
}

impl PartialProduct {
    /// Keeps every field already set on `self`; fills the rest from `fallback`.
    #[must_use]
    pub fn or(self, fallback: PartialProduct) -> PartialProduct {
        PartialProduct {
            title: self.title.or(fallback.title),
            price: self.price.or(fallback.price),
            in_stock: self.in_stock.or(fallback.in_stock),
        }
    }
}

/// A product page parsed once per extraction call.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    pub document: &'a Html,
    /// URL the caller asked for, before redirects.
    pub url: &'a str,
}

/// One way of reading a storefront's markup.
///
/// New storefronts are supported by registering another implementation with
/// the [`crate::SiteRegistry`].
pub trait ExtractionStrategy: Send + Sync {
    /// Heuristic pass over the page.
    ///
    /// `known` holds what structured data already provided; those fields win
    /// during composition, so implementations may skip work for them.
    fn extract(&self, page: &Page<'_>, known: &PartialProduct) -> PartialProduct;

    /// Last-resort title when the composed title is empty or trivially short.
    fn title_fallback(&self, _page: &Page<'_>) -> Option<String> {
        None
    }
}
