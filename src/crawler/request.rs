//! Crawl invocation request/response types
//!
//! These are the JSON shapes exchanged with callers of [`Crawler::invoke`].
//!
//! [`Crawler::invoke`]: crate::crawler::Crawler::invoke

use serde::{Deserialize, Serialize};

/// What an invocation does with its URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlMode {
    /// Breadth-first crawl from the homepage
    #[default]
    Crawl,

    /// Fetch and store exactly one page
    Single,
}

/// A crawl invocation
///
/// ```
/// use simplify_crawler::crawler::{CrawlMode, CrawlRequest};
///
/// let request: CrawlRequest = serde_json::from_str(
///     r#"{"customerId": "c1", "homepageUrl": "https://example.com"}"#,
/// ).unwrap();
/// assert_eq!(request.mode, CrawlMode::Crawl);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequest {
    pub customer_id: String,

    #[serde(alias = "url")]
    pub homepage_url: String,

    #[serde(default)]
    pub mode: CrawlMode,
}

impl CrawlRequest {
    pub fn crawl(customer_id: impl Into<String>, homepage_url: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            homepage_url: homepage_url.into(),
            mode: CrawlMode::Crawl,
        }
    }

    pub fn single(customer_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            homepage_url: url.into(),
            mode: CrawlMode::Single,
        }
    }
}

/// Response to a crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CrawlResponse {
    #[serde(rename_all = "camelCase")]
    Crawl {
        pages_found: usize,
        pages_crawled: usize,
    },

    Single {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl CrawlResponse {
    /// Whether the invocation did what it was asked to
    pub fn is_success(&self) -> bool {
        match self {
            Self::Crawl { .. } => true,
            Self::Single { success, .. } => *success,
        }
    }
}
