//! Generic profile for storefronts without a selector table.

use rust_decimal::Decimal;
use scraper::{ElementRef, Html};

use super::{ExtractionStrategy, Page, PartialProduct};
use crate::dom::{
    attr_contains, document_title, element_text, find_element, first_text, select_first,
    visible_text,
};
use crate::price::normalize_price;

/// Phrases that mark a page as sold out, in the request locale and English.
const OUT_OF_STOCK_PHRASES: &[&str] = &[
    "out of stock",
    "tükendi",
    "sold out",
    "stokta yok",
    "stokta bulunmamaktadır",
    "ürün geçici olarak temin edilemiyor",
];

const ADD_TO_CART_CLASS_MARKERS: &[&str] =
    &["add-to-cart", "addtocart", "add-to-basket", "addtobasket"];
const ADD_TO_CART_ID_MARKERS: &[&str] = &["add-to-cart", "addtocart"];
const ADD_TO_CART_LABELS: &[&str] = &["sepete ekle", "add to cart"];

/// Layout containers whose class names often mention "product" or "title"
/// without holding the product name itself.
const CONTAINER_ELEMENTS: &[&str] = &[
    "html", "head", "body", "main", "script", "style", "meta", "link", "title",
];

/// Prefers structured data; the DOM is only consulted for unset fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl ExtractionStrategy for GenericStrategy {
    fn extract(&self, page: &Page<'_>, known: &PartialProduct) -> PartialProduct {
        let document = page.document;

        let title = if known.title.is_some() {
            None
        } else {
            generic_title(document)
        };

        let price = if known.price.is_some() {
            None
        } else {
            generic_price(document)
        };

        let in_stock = if known.in_stock.is_some() {
            None
        } else {
            let has_price = known.price.is_some() || price.is_some();
            Some(generic_stock(document, has_price))
        };

        PartialProduct {
            title,
            price,
            in_stock,
        }
    }

    fn title_fallback(&self, page: &Page<'_>) -> Option<String> {
        document_title(page.document)
    }
}

/// Title candidates in priority order: first heading, class names containing
/// "title", "product-name", "product", then the document `<title>`.
#[must_use]
pub fn generic_title(document: &Html) -> Option<String> {
    first_text(document, &["h1"])
        .or_else(|| text_of_class_match(document, "title"))
        .or_else(|| text_of_class_match(document, "product-name"))
        .or_else(|| text_of_class_match(document, "product"))
        .or_else(|| document_title(document))
}

fn text_of_class_match(document: &Html, needle: &str) -> Option<String> {
    find_element(document, |el| {
        !CONTAINER_ELEMENTS.contains(&el.value().name())
            && attr_contains(el, "class", needle)
            && !element_text(el).is_empty()
    })
    .map(element_text)
}

/// Price candidates in trust order; the first one that normalizes wins.
///
/// 1. `product:price:amount` meta tag
/// 2. class or id containing "price", excluding "old"/"regular" qualifiers
/// 3. class combining "current" and "price"
/// 4. `itemprop="price"` schema attribute
#[must_use]
pub fn generic_price(document: &Html) -> Option<Decimal> {
    let meta = select_first(document, &[r#"meta[property="product:price:amount"]"#])
        .and_then(|el| el.value().attr("content").map(str::to_owned));
    if let Some(price) = meta.as_deref().and_then(normalize_price) {
        return Some(price);
    }

    let is_current = |el: ElementRef<'_>| {
        !attr_contains(el, "class", "old") && !attr_contains(el, "class", "regular")
    };

    let candidates = [
        find_element(document, |el| {
            el.value().name() != "meta" && attr_contains(el, "class", "price") && is_current(el)
        }),
        find_element(document, |el| {
            el.value().name() != "meta" && attr_contains(el, "id", "price") && is_current(el)
        }),
        find_element(document, |el| {
            attr_contains(el, "class", "current") && attr_contains(el, "class", "price")
        }),
        select_first(document, &[r#"[itemprop="price"]"#]),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|el| normalize_price(&candidate_text(el)))
}

/// Schema attributes often carry the amount in `content` with no text.
fn candidate_text(element: ElementRef<'_>) -> String {
    let text = element_text(element);
    if text.is_empty() {
        element.value().attr("content").unwrap_or_default().to_owned()
    } else {
        text
    }
}

/// An add-to-cart-like control: marker in class or id, or a button/link
/// labelled exactly "add to cart" in the request locale or English.
#[must_use]
pub fn has_add_to_cart(document: &Html) -> bool {
    find_element(document, |el| {
        ADD_TO_CART_CLASS_MARKERS
            .iter()
            .any(|m| attr_contains(el, "class", m))
            || ADD_TO_CART_ID_MARKERS
                .iter()
                .any(|m| attr_contains(el, "id", m))
            || (matches!(el.value().name(), "button" | "a")
                && ADD_TO_CART_LABELS.contains(&element_text(el).to_lowercase().as_str()))
    })
    .is_some()
}

/// Sold-out phrase forces `false`, an add-to-cart control forces `true`,
/// otherwise a known price implies the product is purchasable.
fn generic_stock(document: &Html, has_price: bool) -> bool {
    let text = visible_text(document);
    if OUT_OF_STOCK_PHRASES.iter().any(|p| text.contains(p)) {
        return false;
    }
    if has_add_to_cart(document) {
        return true;
    }
    has_price
}

#[cfg(test)]
#[path = "generic_test.rs"]
mod tests;
