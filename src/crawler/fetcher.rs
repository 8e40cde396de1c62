//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the identifying user agent
//! - Bounded GET requests (timeout and body-size cap)
//! - Status and Content-Type validation
//! - Classifying failures into skip reasons

use crate::config::UserAgentConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Accept header sent with every request
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// Page body, decoded as lossy UTF-8
    pub body: String,
}

/// Why a URL produced no page
///
/// None of these abort a crawl: the URL is marked visited and the crawl moves
/// on. `add_single_page` surfaces them to the caller instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("not HTML (content-type: {0:?})")]
    NotHtml(String),

    #[error("response body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("insufficient content ({length} characters)")]
    InsufficientContent { length: usize },
}

impl SkipReason {
    /// Short label for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::Network(_) => "network",
            Self::HttpStatus(_) => "http_status",
            Self::NotHtml(_) => "not_html",
            Self::TooLarge { .. } => "too_large",
            Self::InsufficientContent { .. } => "insufficient_content",
        }
    }
}

/// Result of a single fetch
pub type FetchOutcome = Result<FetchedPage, SkipReason>;

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed transparently (up to 10 hops).
///
/// # Example
///
/// ```no_run
/// use simplify_crawler::config::UserAgentConfig;
/// use simplify_crawler::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    Client::builder()
        .user_agent(config.header_value())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its HTML body
///
/// # Request Flow
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Connection/timeout/redirect error | `Network` |
/// | Non-2xx status | `HttpStatus` |
/// | Content-Type without `text/html` | `NotHtml` |
/// | Body larger than `max_body_bytes` | `TooLarge` |
/// | Otherwise | `Ok(FetchedPage)` |
///
/// The declared Content-Type is trusted as is; the body is never sniffed.
pub async fn fetch_url(client: &Client, url: &str, max_body_bytes: usize) -> FetchOutcome {
    let mut response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return Err(classify_error(&e)),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(SkipReason::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.to_ascii_lowercase().contains("text/html") {
        return Err(SkipReason::NotHtml(content_type));
    }

    if response
        .content_length()
        .is_some_and(|len| len > max_body_bytes as u64)
    {
        return Err(SkipReason::TooLarge {
            limit: max_body_bytes,
        });
    }

    // Content-Length may be absent or wrong, so the cap is enforced while reading
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if body.len() + chunk.len() > max_body_bytes {
                    return Err(SkipReason::TooLarge {
                        limit: max_body_bytes,
                    });
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => return Err(classify_error(&e)),
        }
    }

    Ok(FetchedPage {
        final_url,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn classify_error(e: &reqwest::Error) -> SkipReason {
    if e.is_timeout() {
        SkipReason::Network("request timeout".to_string())
    } else if e.is_connect() {
        SkipReason::Network("connection refused".to_string())
    } else if e.is_redirect() {
        SkipReason::Network("too many redirects".to_string())
    } else {
        SkipReason::Network(e.to_string())
    }
}
