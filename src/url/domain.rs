use url::Url;

/// Extracts the hostname from a URL
///
/// The port is not part of the hostname. For http(s) URLs the `url` crate has
/// already lowercased the host; lowercasing here keeps the function total for
/// other schemes.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use simplify_crawler::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns true when the URL's hostname is exactly `host`
///
/// Subdomains and `www.` variants are different hosts.
pub fn is_same_host(url: &Url, host: &str) -> bool {
    extract_host(url).is_some_and(|h| h == host)
}

/// Builds the origin (`scheme://host[:port]/`) of a URL as a base for resolving
/// links
///
/// Returns None for URLs with an opaque origin such as `data:` or `file:`.
pub fn origin_base(url: &Url) -> Option<Url> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return None;
    }
    Url::parse(&origin.ascii_serialization()).ok()
}
