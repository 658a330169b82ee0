//! Selector tables for the built-in storefronts.

use pricewatch_core::StoreInfo;
use scraper::{ElementRef, Html};

use crate::dom::{element_text, first_text, select_first};
use crate::heuristic::{generic_price, generic_title, ExtractionStrategy, Page, PartialProduct};
use crate::price::normalize_price;

/// How a storefront signals stock status.
#[derive(Debug, Clone, Copy)]
pub enum StockRule {
    /// In stock when no sold-out marker exists and an enabled add-to-cart
    /// control does.
    CartWithoutSoldOut {
        sold_out: &'static [&'static str],
        add_to_cart: &'static [&'static str],
    },
    /// Like [`StockRule::CartWithoutSoldOut`], but a sold-out marker only
    /// counts when its text contains `term`; its mere presence is inconclusive.
    CartUnlessSoldOutText {
        sold_out: &'static [&'static str],
        term: &'static str,
        add_to_cart: &'static [&'static str],
    },
    /// The availability element's text decides: out-of-stock terms win over
    /// in-stock terms. Without the element, an add-to-cart control decides.
    AvailabilityText {
        availability: &'static [&'static str],
        in_stock_terms: &'static [&'static str],
        out_of_stock_terms: &'static [&'static str],
        add_to_cart: &'static [&'static str],
    },
}

impl StockRule {
    #[must_use]
    pub fn evaluate(&self, document: &Html) -> bool {
        match *self {
            StockRule::CartWithoutSoldOut {
                sold_out,
                add_to_cart,
            } => select_first(document, sold_out).is_none() && has_enabled(document, add_to_cart),
            StockRule::CartUnlessSoldOutText {
                sold_out,
                term,
                add_to_cart,
            } => {
                let sold_out_confirmed = select_first(document, sold_out)
                    .is_some_and(|el| element_text(el).to_lowercase().contains(term));
                !sold_out_confirmed && has_enabled(document, add_to_cart)
            }
            StockRule::AvailabilityText {
                availability,
                in_stock_terms,
                out_of_stock_terms,
                add_to_cart,
            } => match select_first(document, availability) {
                Some(el) => {
                    let text = element_text(el).to_lowercase();
                    !out_of_stock_terms.iter().any(|t| text.contains(t))
                        && in_stock_terms.iter().any(|t| text.contains(t))
                }
                None => has_enabled(document, add_to_cart),
            },
        }
    }
}

fn has_enabled(document: &Html, selectors: &[&str]) -> bool {
    select_first(document, selectors).is_some_and(is_enabled)
}

fn is_enabled(element: ElementRef<'_>) -> bool {
    element.value().attr("disabled").is_none()
        && element.value().attr("aria-disabled") != Some("true")
}

/// Declarative per-site strategy: ordered selector candidates per field.
///
/// When the table's title or price selectors come up empty, the generic
/// title/price heuristics fill in. Stock status always comes from the table.
#[derive(Debug, Clone, Copy)]
pub struct SiteRules {
    pub title: &'static [&'static str],
    pub price: &'static [&'static str],
    pub stock: StockRule,
}

impl ExtractionStrategy for SiteRules {
    fn extract(&self, page: &Page<'_>, known: &PartialProduct) -> PartialProduct {
        let document = page.document;

        let title = if known.title.is_some() {
            None
        } else {
            first_text(document, self.title).or_else(|| generic_title(document))
        };

        let price = if known.price.is_some() {
            None
        } else {
            first_text(document, self.price)
                .and_then(|text| normalize_price(&text))
                .or_else(|| generic_price(document))
        };

        PartialProduct {
            title,
            price,
            in_stock: Some(self.stock.evaluate(document)),
        }
    }
}

const IN_STOCK_TERMS: &[&str] = &["stokta", "in stock"];
const OUT_OF_STOCK_TERMS: &[&str] = &["stokta yok", "out of stock", "tükendi"];

pub const TRENDYOL: SiteRules = SiteRules {
    title: &["h1.pr-new-br", "h1.product-name"],
    price: &[".prc-dsc", ".product-price"],
    stock: StockRule::CartWithoutSoldOut {
        sold_out: &[".pr-in-cn", ".soldOutProductCt"],
        add_to_cart: &[".add-to-basket", ".add-to-cart"],
    },
};

pub const HEPSIBURADA: SiteRules = SiteRules {
    title: &[
        "h1.product-name",
        r#"h1[data-bind="markupText: product.name"]"#,
    ],
    price: &[
        r#"[data-bind="markupText: product.price.currentPrice"]"#,
        ".product-price",
    ],
    stock: StockRule::CartUnlessSoldOutText {
        sold_out: &[".product-status-text", ".out-of-stock-text"],
        term: "tükendi",
        add_to_cart: &["#addToCart", ".add-to-cart"],
    },
};

pub const N11: SiteRules = SiteRules {
    title: &["h1.proName", "h1.productName"],
    // Discounted prices sit in an inner <ins>.
    price: &[".newPrice ins", ".newPrice", ".price ins", ".price"],
    stock: StockRule::CartWithoutSoldOut {
        sold_out: &[".unf-p-summary-out-of-stock", ".outOfStock"],
        add_to_cart: &["#addBasket", ".btnAddBasket"],
    },
};

pub const AMAZON: SiteRules = SiteRules {
    title: &["#productTitle"],
    price: &[".a-price .a-offscreen", "#priceblock_ourprice"],
    stock: StockRule::AvailabilityText {
        availability: &["#availability"],
        in_stock_terms: IN_STOCK_TERMS,
        out_of_stock_terms: OUT_OF_STOCK_TERMS,
        add_to_cart: &["#add-to-cart-button"],
    },
};

pub const TEKNOSA: SiteRules = SiteRules {
    title: &["h1.pdp-title"],
    price: &[".product-price"],
    stock: StockRule::CartWithoutSoldOut {
        sold_out: &[".add-to-cart--out-of-stock"],
        add_to_cart: &[".add-to-cart:not(.add-to-cart--out-of-stock)"],
    },
};

pub const MEDIAMARKT: SiteRules = SiteRules {
    title: &["h1.product-title"],
    price: &[".price"],
    stock: StockRule::AvailabilityText {
        availability: &[".availability"],
        in_stock_terms: IN_STOCK_TERMS,
        out_of_stock_terms: OUT_OF_STOCK_TERMS,
        add_to_cart: &[".add-to-cart"],
    },
};

/// Named storefronts with their selector tables, in menu order.
#[must_use]
pub fn builtin_sites() -> Vec<(StoreInfo, SiteRules)> {
    vec![
        (StoreInfo::new("trendyol", "Trendyol", "trendyol.com"), TRENDYOL),
        (
            StoreInfo::new("hepsiburada", "Hepsiburada", "hepsiburada.com"),
            HEPSIBURADA,
        ),
        (StoreInfo::new("n11", "N11", "n11.com"), N11),
        (StoreInfo::new("amazon", "Amazon", "amazon.com.tr"), AMAZON),
        (StoreInfo::new("teknosa", "Teknosa", "teknosa.com"), TEKNOSA),
        (
            StoreInfo::new("mediamarkt", "Media Markt", "mediamarkt.com.tr"),
            MEDIAMARKT,
        ),
    ]
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
