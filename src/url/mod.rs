//! URL handling for the crawler
//!
//! This module provides validation of crawl targets, the canonical URL form
//! shared by the frontier and the page store, hostname scoping and the
//! extension deny-list used when following links.

mod domain;
mod filter;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{extract_host, is_same_host, origin_base};
pub use filter::{has_denied_extension, is_navigable_scheme, DENIED_EXTENSIONS};
pub use normalize::{normalize_url, normalize_url_str, parse_http_url};

/// Decides whether a resolved link may join the crawl of `host`
///
/// All of the following must hold:
/// 1. the hostname equals `host` exactly
/// 2. the scheme is http or https
/// 3. the path does not end in a denied extension
pub fn is_crawlable(url: &Url, host: &str) -> bool {
    is_same_host(url, host) && is_navigable_scheme(url) && !has_denied_extension(url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_page_is_crawlable() {
        assert!(is_crawlable(&url("https://example.com/about"), "example.com"));
        assert!(is_crawlable(&url("http://example.com/about"), "example.com"));
    }

    #[test]
    fn test_other_host_is_not_crawlable() {
        assert!(!is_crawlable(&url("https://other.com/about"), "example.com"));
        assert!(!is_crawlable(&url("https://www.example.com/"), "example.com"));
    }

    #[test]
    fn test_denied_extension_is_not_crawlable() {
        assert!(!is_crawlable(
            &url("https://example.com/brochure.pdf"),
            "example.com"
        ));
    }

    #[test]
    fn test_non_http_scheme_is_not_crawlable() {
        assert!(!is_crawlable(&url("ftp://example.com/"), "example.com"));
    }
}
