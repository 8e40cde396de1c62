use crate::UrlError;
use url::{Position, Url};

/// Parses an absolute http(s) URL, rejecting anything the crawler cannot fetch
///
/// # Examples
///
/// ```
/// use simplify_crawler::url::parse_http_url;
///
/// assert!(parse_http_url("https://example.com/about").is_ok());
/// assert!(parse_http_url("ftp://example.com/file").is_err());
/// assert!(parse_http_url("/relative/path").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}

/// Produces the canonical string form of a URL
///
/// The fragment is dropped and a single trailing slash is removed from the
/// path; the query string is kept as is. The frontier, the visited set and the
/// page store key all use this form, so every URL the crawler handles must go
/// through here exactly once.
///
/// # Examples
///
/// ```
/// use simplify_crawler::url::normalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/docs/#intro").unwrap();
/// assert_eq!(normalize_url(&url), "https://example.com/docs");
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(normalize_url(&url), "https://example.com");
/// ```
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let through_path = &url[..Position::AfterPath];
    let query = &url[Position::AfterPath..];
    let through_path = through_path.strip_suffix('/').unwrap_or(through_path);

    format!("{}{}", through_path, query)
}

/// Parses and normalizes in one step
pub fn normalize_url_str(url_str: &str) -> Result<String, UrlError> {
    parse_http_url(url_str).map(|url| normalize_url(&url))
}
