use serde::Deserialize;

/// Pages stored per crawl when nothing else is configured
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Pause between consecutive fetches (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Main configuration structure for the crawler
///
/// Every section is optional; a missing file or section falls back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages stored per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Pause between consecutive requests (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Largest response body read before the page is skipped
    #[serde(rename = "max-body-bytes")]
    pub max_body_bytes: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            delay_ms: DEFAULT_DELAY_MS,
            request_timeout_secs: 30,
            max_body_bytes: 5 * 1024 * 1024,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// Short description shown in parentheses
    pub description: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SimplifySummarize".to_string(),
            crawler_version: "1.0".to_string(),
            description: "Content Accessibility Bot".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (Description)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} ({})",
            self.crawler_name, self.crawler_version, self.description
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the SQLite page store
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "./simplify-pages.db".to_string(),
        }
    }
}
