use serde::{Deserialize, Serialize};

/// Identifier of the catch-all store that accepts any URL.
pub const GENERIC_STORE_ID: &str = "generic";

/// Presentation record for a supported storefront, as shown in menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: String,
    pub display_name: String,
    /// Expected hostname substring. Empty means any host is accepted.
    pub domain: String,
}

impl StoreInfo {
    #[must_use]
    pub fn new(id: &str, display_name: &str, domain: &str) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            domain: domain.to_owned(),
        }
    }

    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.id == GENERIC_STORE_ID
    }

    /// Returns `true` when `url` belongs to this store.
    ///
    /// Unconstrained stores accept anything, including unparseable input;
    /// constrained stores require a parseable URL whose host contains the domain.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        if self.domain.is_empty() {
            return true;
        }
        reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| host.contains(&self.domain.to_ascii_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_domain_matches_any_url() {
        let store = StoreInfo::new(GENERIC_STORE_ID, "Other Site", "");
        assert!(store.matches_url("https://anything.example/item"));
        assert!(store.matches_url("garbage"));
        assert!(store.is_generic());
    }

    #[test]
    fn domain_matches_subdomains_case_insensitively() {
        let store = StoreInfo::new("trendyol", "Trendyol", "trendyol.com");
        assert!(store.matches_url("https://www.Trendyol.com/marka/urun-p-1"));
        assert!(!store.is_generic());
    }

    #[test]
    fn domain_mismatch_is_rejected() {
        let store = StoreInfo::new("n11", "N11", "n11.com");
        assert!(!store.matches_url("https://www.hepsiburada.com/urun"));
        assert!(!store.matches_url("not a url"));
    }
}
