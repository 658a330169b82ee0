//! Store id → extraction strategy table, and the composition of structured
//! data with DOM heuristics.

use pricewatch_core::product::{last_path_segment, title_from_url};
use pricewatch_core::{ProductInfo, StoreInfo, GENERIC_STORE_ID};
use scraper::Html;

use crate::dom::clean_title;
use crate::error::ScraperError;
use crate::heuristic::{ExtractionStrategy, GenericStrategy, Page, PartialProduct};
use crate::sites::builtin_sites;
use crate::structured::extract_structured;

/// Titles shorter than this are treated as missing by the fallback chain.
const MIN_TITLE_CHARS: usize = 3;

/// What the boundary does when fetching a page for this store fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure so the caller never records misleading data.
    Propagate,
    /// Return [`ProductInfo::degraded`] so tracking of an unknown site
    /// survives temporary unreachability.
    Degrade,
}

/// A registered storefront bound to exactly one strategy.
pub struct SiteProfile {
    pub store: StoreInfo,
    pub failure_policy: FailurePolicy,
    strategy: Box<dyn ExtractionStrategy>,
}

impl SiteProfile {
    pub fn new<S>(store: StoreInfo, strategy: S, failure_policy: FailurePolicy) -> Self
    where
        S: ExtractionStrategy + 'static,
    {
        Self {
            store,
            failure_policy,
            strategy: Box::new(strategy),
        }
    }

    /// Runs the full extraction on fetched markup.
    ///
    /// The document is parsed once; structured data is read first and the
    /// strategy's heuristics fill whatever it left unset.
    #[must_use]
    pub fn extract(&self, url: &str, markup: &str) -> ProductInfo {
        let document = Html::parse_document(markup);
        let page = Page {
            document: &document,
            url,
        };

        let structured = extract_structured(&document);
        let heuristic = self.strategy.extract(&page, &structured);
        let mut merged = structured.or(heuristic);

        let title_missing = merged
            .title
            .as_deref()
            .is_none_or(|t| t.trim().chars().count() < MIN_TITLE_CHARS);
        if title_missing {
            if let Some(fallback) = self.strategy.title_fallback(&page) {
                merged.title = Some(fallback);
            }
        }

        finalize(merged, url)
    }
}

/// Applies declared defaults: cleaned title (URL-derived when nothing
/// usable was found), unknown price, out of stock.
fn finalize(partial: PartialProduct, url: &str) -> ProductInfo {
    let title = partial
        .title
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty())
        .or_else(|| title_from_url(url))
        .unwrap_or_else(|| format!("Product ({})", last_path_segment(url)));

    ProductInfo {
        title,
        price: partial.price,
        in_stock: partial.in_stock.unwrap_or(false),
    }
}

/// Immutable after startup; shared read-only across concurrent calls.
pub struct SiteRegistry {
    profiles: Vec<SiteProfile>,
}

impl SiteRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// The built-in storefronts followed by the generic catch-all.
    #[must_use]
    pub fn with_builtin_sites() -> Self {
        let mut profiles: Vec<SiteProfile> = builtin_sites()
            .into_iter()
            .map(|(store, rules)| SiteProfile::new(store, rules, FailurePolicy::Propagate))
            .collect();
        profiles.push(SiteProfile::new(
            StoreInfo::new(GENERIC_STORE_ID, "Other Site", ""),
            GenericStrategy,
            FailurePolicy::Degrade,
        ));
        Self { profiles }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::DuplicateStore`] if the id is already taken.
    pub fn register(&mut self, profile: SiteProfile) -> Result<(), ScraperError> {
        if self.resolve(&profile.store.id).is_some() {
            return Err(ScraperError::DuplicateStore {
                store_id: profile.store.id,
            });
        }
        self.profiles.push(profile);
        Ok(())
    }

    #[must_use]
    pub fn resolve(&self, store_id: &str) -> Option<&SiteProfile> {
        self.profiles.iter().find(|p| p.store.id == store_id)
    }

    /// Supported stores in registration order, for menus.
    pub fn stores(&self) -> impl Iterator<Item = &StoreInfo> {
        self.profiles.iter().map(|p| &p.store)
    }

    /// Extraction on already-fetched markup.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownStore`] if `store_id` is not registered.
    pub fn extract_markup(
        &self,
        store_id: &str,
        url: &str,
        markup: &str,
    ) -> Result<ProductInfo, ScraperError> {
        let profile = self
            .resolve(store_id)
            .ok_or_else(|| ScraperError::UnknownStore {
                store_id: store_id.to_owned(),
            })?;
        Ok(profile.extract(url, markup))
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::with_builtin_sites()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
