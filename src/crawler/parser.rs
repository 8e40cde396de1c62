//! HTML parser for extracting links and metadata
//!
//! This module handles parsing a fetched page into:
//! - Same-host links to follow (from `<a href>` tags)
//! - Page title
//! - Main textual content (see `content`)

use crate::crawler::content::extract_document_content;
use crate::url::{extract_host, is_crawlable, normalize_url, origin_base};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// `<title>`, else the first `<h1>`
    pub title: Option<String>,

    /// Main content, whitespace-collapsed
    pub content: String,

    /// Same-host links in document order, without duplicates
    pub links: Vec<String>,
}

/// Parses a fetched page
///
/// Title and links are read from the untouched document; content extraction
/// then strips chrome, so navigation links are still discovered.
///
/// The page's own URL is not part of the result: callers store a page under
/// the key they fetched it by.
///
/// # Example
///
/// ```
/// use simplify_crawler::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><a href="/page/">Link</a><a href="https://other.com/">Away</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &page_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_page(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let links = collect_links(&document, page_url);
    let content = extract_document_content(document);

    ParsedPage {
        title,
        content,
        links,
    }
}

/// Extracts the crawlable links of an HTML document
///
/// # Link Rules
///
/// - every `<a href>` is resolved against the origin of `base_url`
/// - unresolvable hrefs are dropped
/// - the hostname must equal `base_url`'s hostname exactly
/// - the scheme must be http or https
/// - paths ending in a denied extension (pdf, images, css/js, ...) are dropped
/// - results are normalized (no fragment, no trailing slash) and deduplicated
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    collect_links(&Html::parse_document(html), base_url)
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    ["title", "h1"].into_iter().find_map(|tag| {
        let selector = Selector::parse(tag).ok()?;
        document
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let (Some(origin), Some(host)) = (origin_base(base_url), extract_host(base_url)) else {
        return Vec::new();
    };
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Ok(absolute_url) = origin.join(href.trim()) else {
            continue;
        };

        if !is_crawlable(&absolute_url, &host) {
            continue;
        }

        let normalized = normalize_url(&absolute_url);
        if seen.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/blog/post").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        extract_links(html, &base_url())
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = r#"<html><head><title> </title></head>
            <body><header><h1>Heading</h1></header><h1>Second</h1></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, Some("Heading".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body><p>Text</p></body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_doubled_trailing_slash_link_keeps_one_slash() {
        let html = r#"<a href="/a//">Doubled</a><a href="/a">Plain</a>"#;
        assert_eq!(
            links(html),
            vec![
                "https://example.com/a/".to_string(),
                "https://example.com/a".to_string()
            ]
        );
    }

    #[test]
    fn test_relative_links_resolve_against_origin() {
        let html = r#"<a href="/other">A</a><a href="sibling">B</a>"#;
        assert_eq!(
            links(html),
            vec![
                "https://example.com/other".to_string(),
                "https://example.com/sibling".to_string()
            ]
        );
    }

    #[test]
    fn test_absolute_same_host_link() {
        let html = r#"<a href="https://example.com/contact/">Contact</a>"#;
        assert_eq!(links(html), vec!["https://example.com/contact".to_string()]);
    }

    #[test]
    fn test_other_hosts_are_dropped() {
        let html = r#"
            <a href="https://other.com/page">Other</a>
            <a href="https://www.example.com/page">WWW</a>
            <a href="https://blog.example.com/page">Subdomain</a>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_non_http_schemes_are_dropped() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@example.com">Mail</a>
            <a href="tel:+1234567890">Call</a>
            <a href="ftp://example.com/file">FTP</a>
        "#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_denied_extensions_are_dropped() {
        let html = r#"
            <a href="/brochure.pdf">PDF</a>
            <a href="/logo.PNG">Logo</a>
            <a href="/feed.xml">Feed</a>
            <a href="/pricing">Pricing</a>
        "#;
        assert_eq!(links(html), vec!["https://example.com/pricing".to_string()]);
    }

    #[test]
    fn test_fragments_are_stripped_and_deduplicated() {
        let html = r##"
            <a href="/faq#one">One</a>
            <a href="/faq#two">Two</a>
            <a href="/faq/">Three</a>
        "##;
        assert_eq!(links(html), vec!["https://example.com/faq".to_string()]);
    }

    #[test]
    fn test_fragment_only_link_points_at_origin() {
        let html = r##"<a href="#section">Jump</a>"##;
        assert_eq!(links(html), vec!["https://example.com".to_string()]);
    }

    #[test]
    fn test_query_is_kept() {
        let html = r#"<a href="/search?q=rust">Search</a>"#;
        assert_eq!(
            links(html),
            vec!["https://example.com/search?q=rust".to_string()]
        );
    }

    #[test]
    fn test_malformed_href_is_dropped() {
        let html = r#"<a href="http://[::1">Broken</a><a href="/ok">Ok</a>"#;
        assert_eq!(links(html), vec!["https://example.com/ok".to_string()]);
    }

    #[test]
    fn test_navigation_links_are_discovered() {
        let html = r#"<html><body>
            <nav><a href="/services">Services</a></nav>
            <main><p>Content</p></main>
            <footer><a href="/privacy">Privacy</a></footer>
        </body></html>"#;
        let parsed = parse_page(html, &base_url());
        assert_eq!(
            parsed.links,
            vec![
                "https://example.com/services".to_string(),
                "https://example.com/privacy".to_string()
            ]
        );
        assert_eq!(parsed.content, "Content");
    }

    #[test]
    fn test_links_keep_document_order() {
        let html = r#"<a href="/c">C</a><a href="/a">A</a><a href="/b">B</a><a href="/a">A</a>"#;
        assert_eq!(
            links(html),
            vec![
                "https://example.com/c".to_string(),
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string()
            ]
        );
    }
}
