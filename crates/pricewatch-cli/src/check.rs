//! Command handlers for `stores` and `check`.

use std::path::Path;

use anyhow::Context;
use pricewatch_core::{AppConfig, PriceDirection, ProductChange, ProductInfo, StoreInfo};
use pricewatch_scraper::{ProductTracker, SiteRegistry};

pub(crate) fn print_stores() {
    let registry = SiteRegistry::with_builtin_sites();
    for store in registry.stores() {
        println!("{}", store_line(store));
    }
}

fn store_line(store: &StoreInfo) -> String {
    let domain = if store.domain.is_empty() {
        "any site"
    } else {
        store.domain.as_str()
    };
    format!("{:<12} {:<14} {domain}", store.id, store.display_name)
}

/// Fetches one product and prints it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the URL does not belong to the chosen store, the
/// store is unknown, the fetch fails, or `since` cannot be read.
pub(crate) async fn run_check(
    config: &AppConfig,
    store_id: &str,
    url: &str,
    since: Option<&Path>,
) -> anyhow::Result<()> {
    let previous = since.map(load_record).transpose()?;

    let tracker = build_tracker(config)?;
    ensure_url_matches_store(tracker.registry(), store_id, url)?;
    tracing::debug!(store_id, url, "checking product");

    let info = fetch_record(&tracker, store_id, url).await?;
    println!("{}", serde_json::to_string_pretty(&info)?);

    if let Some(previous) = previous {
        match ProductChange::between(&previous, &info) {
            Some(change) => println!("{}", describe_change(&change)),
            None => println!("no change"),
        }
    }
    Ok(())
}

pub(crate) fn build_tracker(config: &AppConfig) -> anyhow::Result<ProductTracker> {
    ProductTracker::from_app_config(config).context("failed to build tracker")
}

/// Extraction errors keep their [`pricewatch_scraper::ScraperError`] source.
pub(crate) async fn fetch_record(
    tracker: &ProductTracker,
    store_id: &str,
    url: &str,
) -> anyhow::Result<ProductInfo> {
    tracker
        .extract(store_id, url)
        .await
        .with_context(|| format!("failed to check {url}"))
}

fn load_record(path: &Path) -> anyhow::Result<ProductInfo> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a product record", path.display()))
}

/// Rejects a named store paired with a URL from another host.
pub(crate) fn ensure_url_matches_store(
    registry: &SiteRegistry,
    store_id: &str,
    url: &str,
) -> anyhow::Result<()> {
    let Some(profile) = registry.resolve(store_id) else {
        anyhow::bail!("unknown store '{store_id}'; run `pricewatch stores` for the list");
    };
    if !profile.store.matches_url(url) {
        anyhow::bail!(
            "{url} is not a {} URL (expected {}); use store 'generic' for other sites",
            profile.store.display_name,
            profile.store.domain
        );
    }
    Ok(())
}

pub(crate) fn describe_change(change: &ProductChange) -> String {
    let mut parts = Vec::new();
    if change.price_changed() {
        let arrow = match change.price_direction() {
            Some(PriceDirection::Dropped) => " (dropped)",
            Some(PriceDirection::Rose) => " (rose)",
            None => "",
        };
        parts.push(format!(
            "price {} -> {}{arrow}",
            price_text(change.previous_price),
            price_text(change.current_price)
        ));
    }
    if change.stock_changed() {
        parts.push(format!(
            "stock {} -> {}",
            stock_text(change.previous_in_stock),
            stock_text(change.current_in_stock)
        ));
    }
    parts.join("; ")
}

fn price_text<T: std::fmt::Display>(price: Option<T>) -> String {
    price.map_or_else(|| "unknown".to_owned(), |p| p.to_string())
}

fn stock_text(in_stock: bool) -> &'static str {
    if in_stock {
        "in stock"
    } else {
        "out of stock"
    }
}
