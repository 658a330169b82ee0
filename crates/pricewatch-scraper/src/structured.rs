//! schema.org `Product` extraction from JSON-LD blocks.

use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::heuristic::PartialProduct;
use crate::price::normalize_price;

/// Extracts title, price and availability from the first structurally valid
/// `Product` node found in the page's `application/ld+json` blocks.
///
/// Accepts a direct `Product` object, an `@graph` container, or a top-level
/// array. Malformed blocks are skipped; an unmatched page yields an empty
/// [`PartialProduct`].
#[must_use]
pub fn extract_structured(document: &Html) -> PartialProduct {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return PartialProduct::default();
    };

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        if let Some(product) = find_product_node(&value) {
            return product_to_partial(product);
        }
    }

    PartialProduct::default()
}

fn find_product_node(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find(|item| is_product(item)),
        Value::Object(map) => {
            if is_product(value) {
                return Some(value);
            }
            map.get("@graph")
                .and_then(Value::as_array)
                .and_then(|graph| graph.iter().find(|item| is_product(item)))
        }
        _ => None,
    }
}

/// `@type` may be a plain string or an array of strings.
fn is_product(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("Product"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.eq_ignore_ascii_case("Product")),
        _ => false,
    }
}

fn product_to_partial(product: &Value) -> PartialProduct {
    let title = product
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string);

    // A list of offers uses its first entry.
    let offer = product.get("offers").and_then(|offers| match offers {
        Value::Array(list) => list.first(),
        other => Some(other),
    });

    let price = offer.and_then(|o| {
        o.get("price")
            .or_else(|| o.get("lowPrice"))
            .and_then(offer_price)
    });

    let in_stock = offer
        .and_then(|o| o.get("availability"))
        .and_then(Value::as_str)
        .map(availability_in_stock);

    PartialProduct {
        title,
        price,
        in_stock,
    }
}

/// Prices arrive as JSON numbers or strings; strings that are not plain
/// decimals go through the price normalizer.
fn offer_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim())
            .ok()
            .or_else(|| normalize_price(s)),
        _ => None,
    }
}

fn availability_in_stock(marker: &str) -> bool {
    let lower = marker.to_lowercase();
    lower.contains("instock") || lower.contains("in stock")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json_ld: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><script type="application/ld+json">{json_ld}</script></head><body></body></html>"#
        ))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn direct_product_object() {
        let doc = page(
            r#"{"@context":"https://schema.org","@type":"Product","name":"Kettle",
                "offers":{"@type":"Offer","price":"199.90","availability":"https://schema.org/InStock"}}"#,
        );
        let partial = extract_structured(&doc);
        assert_eq!(partial.title.as_deref(), Some("Kettle"));
        assert_eq!(partial.price, Some(dec("199.90")));
        assert_eq!(partial.in_stock, Some(true));
    }

    #[test]
    fn graph_container() {
        let doc = page(
            r#"{"@graph":[{"@type":"BreadcrumbList"},{"@type":"Product","name":"Lamp",
                "offers":{"price":45.5,"availability":"OutOfStock"}}]}"#,
        );
        let partial = extract_structured(&doc);
        assert_eq!(partial.title.as_deref(), Some("Lamp"));
        assert_eq!(partial.price, Some(dec("45.5")));
        assert_eq!(partial.in_stock, Some(false));
    }

    #[test]
    fn top_level_array_with_offer_list() {
        let doc = page(
            r#"[{"@type":"Organization","name":"Shop"},
                {"@type":["Product","Thing"],"name":"Mug",
                 "offers":[{"price":"1.299,00 TL","availability":"in stock"},{"price":"5"}]}]"#,
        );
        let partial = extract_structured(&doc);
        assert_eq!(partial.title.as_deref(), Some("Mug"));
        assert_eq!(partial.price, Some(dec("1299.00")));
        assert_eq!(partial.in_stock, Some(true));
    }

    #[test]
    fn aggregate_offer_low_price() {
        let doc = page(r#"{"@type":"Product","name":"Set","offers":{"@type":"AggregateOffer","lowPrice":"12.50"}}"#);
        let partial = extract_structured(&doc);
        assert_eq!(partial.price, Some(dec("12.50")));
        assert!(partial.in_stock.is_none());
    }

    #[test]
    fn malformed_block_is_skipped_and_later_block_used() {
        let doc = Html::parse_document(
            r#"<html><head>
                <script type="application/ld+json">{ not json </script>
                <script type="application/ld+json">{"@type":"Product","name":"Chair"}</script>
            </head><body></body></html>"#,
        );
        let partial = extract_structured(&doc);
        assert_eq!(partial.title.as_deref(), Some("Chair"));
        assert!(partial.price.is_none());
    }

    #[test]
    fn non_product_types_yield_nothing() {
        let doc = page(r#"{"@type":"WebSite","name":"Shop"}"#);
        assert_eq!(extract_structured(&doc), PartialProduct::default());
    }

    #[test]
    fn page_without_json_ld_yields_nothing() {
        let doc = Html::parse_document("<html><body><h1>Plain</h1></body></html>");
        assert_eq!(extract_structured(&doc), PartialProduct::default());
    }
}
