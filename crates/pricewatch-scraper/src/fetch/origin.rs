//! URL origin extraction for the `Referer` header.

/// Extracts the scheme+host origin from a product URL.
///
/// Given `"https://www.trendyol.com/marka/urun-p-123"`, returns
/// `"https://www.trendyol.com"`, which is sent as the referer so the request
/// looks like in-site navigation.
#[must_use]
pub fn extract_origin(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |e| {
            tracing::warn!(
                url,
                error = %e,
                "could not parse product URL; falling back to string split for origin"
            );
            url.trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_and_query() {
        assert_eq!(
            extract_origin("https://www.trendyol.com/marka/urun-p-123?boutiqueId=1"),
            "https://www.trendyol.com"
        );
    }

    #[test]
    fn keeps_non_default_port() {
        assert_eq!(
            extract_origin("http://127.0.0.1:8080/product/1"),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn bare_domain() {
        assert_eq!(extract_origin("https://n11.com"), "https://n11.com");
    }

    #[test]
    fn unparseable_input_uses_string_split() {
        assert_eq!(extract_origin("//shop/item/1"), "//shop");
    }
}
