//! Crawler module for page discovery and content capture
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a descriptive user agent and bounded bodies
//! - Main-content extraction and link extraction
//! - The breadth-first frontier scoped to one host
//! - Overall crawl coordination and page persistence

mod content;
mod engine;
mod fetcher;
mod frontier;
mod parser;
mod request;

pub use content::{collapse_whitespace, extract_content, MAIN_CONTENT_SELECTORS};
pub use engine::{CrawlOptions, CrawlReport, Crawler, MIN_CONTENT_LENGTH};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, FetchedPage, SkipReason, ACCEPT_HTML};
pub use frontier::CrawlFrontier;
pub use parser::{extract_links, parse_page, ParsedPage};
pub use request::{CrawlMode, CrawlRequest, CrawlResponse};
