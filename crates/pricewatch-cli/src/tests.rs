use clap::Parser;
use pricewatch_core::{ProductChange, ProductInfo};
use pricewatch_scraper::SiteRegistry;

use super::*;
use crate::check::{build_tracker, describe_change, ensure_url_matches_store, fetch_record};

fn record(price: Option<&str>, in_stock: bool) -> ProductInfo {
    ProductInfo {
        title: "Desk Lamp".to_owned(),
        price: price.map(|p| p.parse().expect("valid decimal")),
        in_stock,
    }
}

#[test]
fn parses_stores_command() {
    let cli = Cli::try_parse_from(["pricewatch", "stores"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Stores));
}

#[test]
fn parses_check_command() {
    let cli = Cli::try_parse_from([
        "pricewatch",
        "check",
        "trendyol",
        "https://www.trendyol.com/x-p-1",
        "--since",
        "last.json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Check { store, url, since } => {
            assert_eq!(store, "trendyol");
            assert_eq!(url, "https://www.trendyol.com/x-p-1");
            assert_eq!(since.as_deref(), Some(std::path::Path::new("last.json")));
        }
        other => panic!("expected Check, got {other:?}"),
    }
}

#[test]
fn check_requires_url() {
    assert!(Cli::try_parse_from(["pricewatch", "check", "trendyol"]).is_err());
}

#[test]
fn named_store_rejects_foreign_url() {
    let registry = SiteRegistry::with_builtin_sites();
    let err = ensure_url_matches_store(&registry, "n11", "https://www.trendyol.com/x-p-1")
        .expect_err("expected domain mismatch");
    assert!(err.to_string().contains("generic"));
}

#[test]
fn named_store_accepts_own_url() {
    let registry = SiteRegistry::with_builtin_sites();
    assert!(ensure_url_matches_store(&registry, "n11", "https://urun.n11.com/kulaklik/P1").is_ok());
}

#[test]
fn generic_store_accepts_any_url() {
    let registry = SiteRegistry::with_builtin_sites();
    assert!(ensure_url_matches_store(&registry, "generic", "https://small-shop.example/a").is_ok());
}

#[test]
fn unknown_store_is_rejected_before_fetching() {
    let registry = SiteRegistry::with_builtin_sites();
    assert!(ensure_url_matches_store(&registry, "ebay", "https://ebay.com/itm/1").is_err());
}

#[test]
fn describes_price_drop_and_restock() {
    let change = ProductChange::between(&record(Some("120.00"), false), &record(Some("99.90"), true))
        .expect("expected a change");
    assert_eq!(
        describe_change(&change),
        "price 120.00 -> 99.90 (dropped); stock out of stock -> in stock"
    );
}

#[test]
fn describes_price_from_unknown() {
    let change = ProductChange::between(&record(None, true), &record(Some("15"), true))
        .expect("expected a change");
    assert_eq!(describe_change(&change), "price unknown -> 15");
}

#[tokio::test]
async fn extraction_errors_keep_their_source() {
    let config = pricewatch_core::AppConfig {
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        max_attempts: 1,
        backoff_base_ms: 0,
        pacing_min_ms: 0,
        pacing_max_ms: 0,
        challenge_cooldown_min_ms: 0,
        challenge_cooldown_max_ms: 0,
        user_agents: vec!["pricewatch-test".to_owned()],
        accept_language: "en-US".to_owned(),
        accept_encoding: "gzip".to_owned(),
    };
    let tracker = build_tracker(&config).expect("tracker builds");

    let err = fetch_record(&tracker, "generic", "not a url")
        .await
        .expect_err("expected an invalid URL");

    assert!(err.to_string().contains("failed to check"));
    assert_eq!(err.chain().count(), 2);
    assert!(matches!(
        err.root_cause().downcast_ref::<pricewatch_scraper::ScraperError>(),
        Some(pricewatch_scraper::ScraperError::InvalidUrl { .. })
    ));
}
