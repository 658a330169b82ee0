use std::str::FromStr;

use super::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn run(html: &str) -> PartialProduct {
    let document = Html::parse_document(html);
    let page = Page {
        document: &document,
        url: "https://shop.example.com/item",
    };
    GenericStrategy.extract(&page, &PartialProduct::default())
}

#[test]
fn title_prefers_h1_over_document_title() {
    let partial = run(
        r#"<html><head><title>Shop | Kettle</title></head>
           <body><h1> Steel Kettle </h1></body></html>"#,
    );
    assert_eq!(partial.title.as_deref(), Some("Steel Kettle"));
}

#[test]
fn title_falls_back_to_title_class() {
    let partial = run(
        r#"<html><body><div class="pdp-Title">Desk Lamp</div><span class="product-name">Other</span></body></html>"#,
    );
    assert_eq!(partial.title.as_deref(), Some("Desk Lamp"));
}

#[test]
fn title_ignores_body_product_class() {
    let partial = run(
        r#"<html><body class="product-template"><span class="product-label">Garden Hose</span></body></html>"#,
    );
    assert_eq!(partial.title.as_deref(), Some("Garden Hose"));
}

#[test]
fn title_uses_document_title_last() {
    let partial = run("<html><head><title>Only Title</title></head><body><p>x</p></body></html>");
    assert_eq!(partial.title.as_deref(), Some("Only Title"));
}

#[test]
fn meta_price_has_highest_trust() {
    let partial = run(
        r#"<html><head><meta property="product:price:amount" content="349.99"></head>
           <body><span class="price">999,00 TL</span></body></html>"#,
    );
    assert_eq!(partial.price, Some(dec("349.99")));
}

#[test]
fn old_price_class_is_skipped() {
    let partial = run(
        r#"<html><body>
            <span class="old-price">1.499,00 TL</span>
            <span class="sale-price">1.299,00 TL</span>
        </body></html>"#,
    );
    assert_eq!(partial.price, Some(dec("1299.00")));
}

#[test]
fn id_price_is_used_when_no_class_matches() {
    let partial = run(r#"<html><body><div id="productPrice">89,90 TL</div></body></html>"#);
    assert_eq!(partial.price, Some(dec("89.90")));
}

#[test]
fn itemprop_price_reads_content_attribute() {
    let partial = run(r#"<html><body><meta itemprop="price" content="45.00"></body></html>"#);
    assert_eq!(partial.price, Some(dec("45.00")));
}

#[test]
fn sold_out_phrase_forces_out_of_stock() {
    let partial = run(
        r#"<html><body><h1>Mug</h1><span class="price">50 TL</span>
           <button class="add-to-cart">Sepete Ekle</button><p>Bu ürün TÜKENDİ</p></body></html>"#,
    );
    assert_eq!(partial.in_stock, Some(false));
}

#[test]
fn add_to_cart_label_forces_in_stock() {
    let partial = run(r#"<html><body><h1>Mug</h1><button>Add to cart</button></body></html>"#);
    assert_eq!(partial.in_stock, Some(true));
    assert!(partial.price.is_none());
}

#[test]
fn price_implies_in_stock_without_other_signals() {
    let partial = run(r#"<html><body><h1>Mug</h1><span class="price">50 TL</span></body></html>"#);
    assert_eq!(partial.in_stock, Some(true));
}

#[test]
fn known_structured_price_implies_in_stock() {
    let document = Html::parse_document("<html><body><h1>Mug</h1></body></html>");
    let page = Page {
        document: &document,
        url: "https://shop.example.com/mug",
    };
    let known = PartialProduct {
        title: None,
        price: Some(dec("10")),
        in_stock: None,
    };
    let partial = GenericStrategy.extract(&page, &known);
    assert_eq!(partial.in_stock, Some(true));
    assert!(partial.price.is_none(), "known fields are not recomputed");
}

#[test]
fn nothing_found_defaults_to_out_of_stock() {
    let partial = run("<html><body><p>Hello</p></body></html>");
    assert!(partial.title.is_none());
    assert!(partial.price.is_none());
    assert_eq!(partial.in_stock, Some(false));
}

#[test]
fn title_fallback_reads_document_title() {
    let document =
        Html::parse_document("<html><head><title>  Fallback Name </title></head><body></body></html>");
    let page = Page {
        document: &document,
        url: "https://shop.example.com/x",
    };
    assert_eq!(
        GenericStrategy.title_fallback(&page).as_deref(),
        Some("Fallback Name")
    );
}
