//! Boundary consumed by the tracking service: store id + URL in, product
//! snapshot out.

use pricewatch_core::{AppConfig, ProductInfo, StoreInfo};

use crate::error::ScraperError;
use crate::fetch::Fetcher;
use crate::registry::{FailurePolicy, SiteRegistry};

/// Fetches product pages and routes them through the store registry.
///
/// Holds no per-call state; one tracker can serve any number of concurrent
/// lookups.
pub struct ProductTracker {
    registry: SiteRegistry,
    fetcher: Fetcher,
}

impl ProductTracker {
    #[must_use]
    pub fn new(registry: SiteRegistry, fetcher: Fetcher) -> Self {
        Self { registry, fetcher }
    }

    /// Built-in stores with a fetcher configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(
            SiteRegistry::with_builtin_sites(),
            Fetcher::from_app_config(config)?,
        ))
    }

    #[must_use]
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn stores(&self) -> impl Iterator<Item = &StoreInfo> {
        self.registry.stores()
    }

    /// Fetches and extracts one product, surfacing every failure.
    ///
    /// The store is resolved before any network traffic.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownStore`] if `store_id` is not registered.
    /// - Any fetch error from [`Fetcher::fetch`].
    pub async fn extract(&self, store_id: &str, url: &str) -> Result<ProductInfo, ScraperError> {
        let profile = self
            .registry
            .resolve(store_id)
            .ok_or_else(|| ScraperError::UnknownStore {
                store_id: store_id.to_owned(),
            })?;

        let page = self.fetcher.fetch(url).await?;
        let info = profile.extract(url, &page.body);

        tracing::info!(
            store_id,
            url,
            title = %info.title,
            price = ?info.price,
            in_stock = info.in_stock,
            "product extracted"
        );
        Ok(info)
    }

    /// Like [`extract`](Self::extract), but applies the store's
    /// [`FailurePolicy`] instead of returning errors.
    ///
    /// Returns `None` for an unknown store, or when a store that propagates
    /// failures could not be fetched. Stores that degrade get
    /// [`ProductInfo::degraded`] instead.
    pub async fn get_product_info(&self, store_id: &str, url: &str) -> Option<ProductInfo> {
        let Some(profile) = self.registry.resolve(store_id) else {
            tracing::error!(store_id, url, "unknown store");
            return None;
        };
        let policy = profile.failure_policy;

        match self.extract(store_id, url).await {
            Ok(info) => Some(info),
            Err(e) => match policy {
                FailurePolicy::Degrade => {
                    tracing::warn!(
                        store_id,
                        url,
                        error = %e,
                        "fetch failed; returning URL-derived fallback"
                    );
                    Some(ProductInfo::degraded(url))
                }
                FailurePolicy::Propagate => {
                    tracing::error!(store_id, url, error = %e, "product extraction failed");
                    None
                }
            },
        }
    }
}
