use url::Url;

/// Path extensions that never lead to an HTML page
pub const DENIED_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "gif", "svg", "css", "js", "xml", "json", "zip", "mp4", "mp3",
];

/// Returns true if the path ends in a denied extension (case-insensitive)
///
/// # Examples
///
/// ```
/// use simplify_crawler::url::has_denied_extension;
///
/// assert!(has_denied_extension("/files/report.PDF"));
/// assert!(!has_denied_extension("/blog/post"));
/// ```
pub fn has_denied_extension(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((_, ext)) => DENIED_EXTENSIONS
            .iter()
            .any(|denied| ext.eq_ignore_ascii_case(denied)),
        None => false,
    }
}

/// Returns true if the URL uses a scheme the fetcher can follow
pub fn is_navigable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_denied_extension() {
        for ext in DENIED_EXTENSIONS {
            let path = format!("/asset.{}", ext);
            assert!(has_denied_extension(&path), "{} should be denied", ext);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(has_denied_extension("/photo.JPG"));
        assert!(has_denied_extension("/Site.Css"));
    }

    #[test]
    fn test_page_like_paths_allowed() {
        assert!(!has_denied_extension("/"));
        assert!(!has_denied_extension("/about"));
        assert!(!has_denied_extension("/index.html"));
        assert!(!has_denied_extension("/page.php"));
    }

    #[test]
    fn test_extension_must_end_the_path() {
        assert!(!has_denied_extension("/report.pdf/view"));
        assert!(!has_denied_extension("/v1.json/"));
        assert!(!has_denied_extension("/jsonish"));
    }

    #[test]
    fn test_navigable_scheme() {
        assert!(is_navigable_scheme(&Url::parse("http://example.com").unwrap()));
        assert!(is_navigable_scheme(&Url::parse("https://example.com").unwrap()));
        assert!(!is_navigable_scheme(&Url::parse("ftp://example.com").unwrap()));
        assert!(!is_navigable_scheme(&Url::parse("javascript:void(0)").unwrap()));
    }
}
