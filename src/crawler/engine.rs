//! Crawl engine - breadth-first traversal and page persistence
//!
//! This module contains the main crawl loop that coordinates:
//! - Dequeuing URLs from the frontier in discovery order
//! - Fetching, extracting and applying the content floor
//! - Upserting accepted pages into the page store
//! - Following same-host links within the page budget
//! - The politeness delay and cancellation

use crate::config::{Config, CrawlerConfig, DEFAULT_DELAY_MS, DEFAULT_MAX_PAGES};
use crate::crawler::fetcher::{build_http_client, fetch_url, SkipReason};
use crate::crawler::frontier::CrawlFrontier;
use crate::crawler::parser::{parse_page, ParsedPage};
use crate::crawler::request::{CrawlMode, CrawlRequest, CrawlResponse};
use crate::state::{CrawlPhase, PageStatus, StopReason};
use crate::storage::{PageStore, PageUpsert, StorageError, StorageResult};
use crate::url::{extract_host, normalize_url, parse_http_url};
use crate::{SimplifyError, UrlError};
use reqwest::Client;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Pages whose extracted content is shorter than this (in characters) are
/// treated as non-content pages
pub const MIN_CONTENT_LENGTH: usize = 100;

/// Per-invocation crawl limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Maximum number of pages stored
    pub max_pages: usize,

    /// Pause between consecutive fetches
    pub delay: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

impl CrawlOptions {
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    /// URLs dequeued and attempted
    pub pages_found: usize,

    /// Pages successfully upserted
    pub pages_crawled: usize,

    /// URLs abandoned (fetch failure, non-HTML, too little content)
    pub pages_skipped: usize,

    /// Pages accepted but not persisted
    pub store_failures: usize,

    pub stop_reason: StopReason,
}

impl From<&CrawlReport> for CrawlResponse {
    fn from(report: &CrawlReport) -> Self {
        CrawlResponse::Crawl {
            pages_found: report.pages_found,
            pages_crawled: report.pages_crawled,
        }
    }
}

/// What happened to an accepted page
#[derive(Debug)]
enum PageOutcome {
    Stored { page_id: i64 },
    StoreFailed(StorageError),
}

/// Discovers and stores the pages of customer websites
///
/// The page store is shared behind `Arc<Mutex<_>>`; the lock is only taken
/// for single store calls and never held across an await point.
pub struct Crawler<S: PageStore> {
    client: Client,
    storage: Arc<Mutex<S>>,
    max_body_bytes: usize,
    default_options: CrawlOptions,
}

impl<S: PageStore> Crawler<S> {
    /// Creates a crawler from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(SimplifyError)` - The HTTP client could not be built
    pub fn new(config: &Config, storage: Arc<Mutex<S>>) -> crate::Result<Self> {
        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(&config.user_agent, timeout)?;

        Ok(Self {
            client,
            storage,
            max_body_bytes: config.crawler.max_body_bytes,
            default_options: CrawlOptions::from(&config.crawler),
        })
    }

    /// Shared handle to the page store
    pub fn storage(&self) -> &Arc<Mutex<S>> {
        &self.storage
    }

    /// Options used by [`Crawler::invoke`]
    pub fn default_options(&self) -> CrawlOptions {
        self.default_options
    }

    fn lock_storage(&self) -> StorageResult<MutexGuard<'_, S>> {
        self.storage.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Handles a crawl invocation
    ///
    /// Validates the URL, records its hostname as the customer's domain and
    /// dispatches on the mode. A failed single-page add is reported in the
    /// response; an invalid URL or an unreachable store is an error.
    pub async fn invoke(
        &self,
        request: &CrawlRequest,
        cancel: &CancellationToken,
    ) -> crate::Result<CrawlResponse> {
        let url = parse_http_url(&request.homepage_url)?;
        let host = extract_host(&url)
            .ok_or_else(|| UrlError::MissingHost(request.homepage_url.clone()))?;

        self.lock_storage()?
            .set_customer_domain(&request.customer_id, &host)?;

        match request.mode {
            CrawlMode::Crawl => {
                let report = self
                    .crawl_with_cancellation(
                        &request.customer_id,
                        url.as_str(),
                        self.default_options,
                        cancel,
                    )
                    .await?;
                Ok(CrawlResponse::from(&report))
            }
            CrawlMode::Single => {
                let response = match self
                    .add_single_page(&request.customer_id, url.as_str())
                    .await
                {
                    Ok(_) => CrawlResponse::Single {
                        success: true,
                        error: None,
                    },
                    Err(e) => {
                        tracing::warn!("Failed to add {}: {}", request.homepage_url, e);
                        CrawlResponse::Single {
                            success: false,
                            error: Some(e.to_string()),
                        }
                    }
                };
                Ok(response)
            }
        }
    }

    /// Crawls a website breadth-first from its homepage
    ///
    /// See [`Crawler::crawl_with_cancellation`].
    pub async fn crawl(
        &self,
        customer_id: &str,
        homepage_url: &str,
        options: CrawlOptions,
    ) -> crate::Result<CrawlReport> {
        self.crawl_with_cancellation(customer_id, homepage_url, options, &CancellationToken::new())
            .await
    }

    /// Crawls a website breadth-first from its homepage
    ///
    /// Pages are fetched one at a time in discovery order. The crawl stops once
    /// `max_pages` pages are stored, the frontier is empty, or `cancel` fires.
    /// Per-page failures are logged and skipped; only an invalid homepage URL
    /// is an error.
    pub async fn crawl_with_cancellation(
        &self,
        customer_id: &str,
        homepage_url: &str,
        options: CrawlOptions,
        cancel: &CancellationToken,
    ) -> crate::Result<CrawlReport> {
        let homepage = parse_http_url(homepage_url)?;
        let mut frontier = CrawlFrontier::new(&homepage)
            .ok_or_else(|| UrlError::MissingHost(homepage_url.to_string()))?;

        tracing::info!(
            "Starting crawl of {} for customer {} (max {} pages)",
            homepage,
            customer_id,
            options.max_pages
        );

        let start_time = Instant::now();
        let mut phase = CrawlPhase::Idle.start();
        let mut pages_crawled = 0;
        let mut pages_skipped = 0;
        let mut store_failures = 0;

        while phase.is_running() {
            if cancel.is_cancelled() {
                phase = phase.stop(StopReason::Cancelled);
                continue;
            }
            if pages_crawled >= options.max_pages {
                phase = phase.stop(StopReason::BudgetExhausted);
                continue;
            }
            let Some(url) = frontier.next_url() else {
                phase = phase.stop(StopReason::FrontierEmpty);
                continue;
            };

            tracing::info!(
                "Crawling ({}/{}): {}",
                pages_crawled + 1,
                options.max_pages,
                url
            );

            match self.fetch_and_parse(&url).await {
                Ok(page) => {
                    match self.persist(customer_id, &url, &page) {
                        PageOutcome::Stored { page_id } => {
                            pages_crawled += 1;
                            tracing::debug!("Stored {} as page {}", url, page_id);
                        }
                        PageOutcome::StoreFailed(e) => {
                            store_failures += 1;
                            tracing::warn!("Failed to store {}: {}", url, e);
                        }
                    }

                    let queued = page
                        .links
                        .iter()
                        .filter(|link| frontier.enqueue(link))
                        .count();
                    tracing::debug!(
                        "Queued {} of {} links from {} ({} pending)",
                        queued,
                        page.links.len(),
                        url,
                        frontier.pending_len()
                    );
                }
                Err(reason) => {
                    pages_skipped += 1;
                    tracing::warn!("Skipping {} ({}): {}", url, reason.kind(), reason);
                }
            }

            let another_fetch = frontier.has_pending() && pages_crawled < options.max_pages;
            if another_fetch && !options.delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(options.delay) => {}
                }
            }
        }

        let stop_reason = phase.stop_reason().unwrap_or(StopReason::FrontierEmpty);
        let report = CrawlReport {
            pages_found: frontier.visited_len(),
            pages_crawled,
            pages_skipped,
            store_failures,
            stop_reason,
        };

        tracing::info!(
            "Crawl of {} finished ({}): {} found, {} stored in {:?}",
            homepage,
            stop_reason,
            report.pages_found,
            report.pages_crawled,
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Fetches, extracts and stores exactly one page, bypassing the frontier
    ///
    /// Unlike a crawl, failures are returned to the caller and nothing is
    /// written for a failed page.
    ///
    /// # Returns
    ///
    /// * `Ok(page_id)` - The page was upserted
    /// * `Err(SimplifyError::InsufficientContent)` - Too little text
    /// * `Err(SimplifyError::FetchFailed)` - Network, status or content-type failure
    pub async fn add_single_page(&self, customer_id: &str, url: &str) -> crate::Result<i64> {
        let page_url = parse_http_url(url)?;
        let normalized = normalize_url(&page_url);

        tracing::info!("Adding single page {} for customer {}", normalized, customer_id);

        let page = match self.fetch_and_parse(&normalized).await {
            Ok(page) => page,
            Err(SkipReason::InsufficientContent { length }) => {
                return Err(SimplifyError::InsufficientContent {
                    url: normalized,
                    length,
                });
            }
            Err(reason) => {
                return Err(SimplifyError::FetchFailed {
                    url: normalized,
                    reason,
                });
            }
        };

        match self.persist(customer_id, &normalized, &page) {
            PageOutcome::Stored { page_id } => Ok(page_id),
            PageOutcome::StoreFailed(e) => Err(e.into()),
        }
    }

    /// Fetches a URL and extracts its page, applying the content floor
    async fn fetch_and_parse(&self, url: &str) -> Result<ParsedPage, SkipReason> {
        let page_url = Url::parse(url).map_err(|e| SkipReason::InvalidUrl(e.to_string()))?;
        let fetched = fetch_url(&self.client, url, self.max_body_bytes).await?;
        if fetched.final_url != page_url.as_str() {
            tracing::debug!("{} redirected to {}", url, fetched.final_url);
        }

        let page = parse_page(&fetched.body, &page_url);
        let length = page.content.chars().count();
        if length < MIN_CONTENT_LENGTH {
            return Err(SkipReason::InsufficientContent { length });
        }

        Ok(page)
    }

    /// Upserts a page under `url`, the exact key it was fetched by
    fn persist(&self, customer_id: &str, url: &str, page: &ParsedPage) -> PageOutcome {
        let upsert = PageUpsert {
            customer_id,
            url,
            title: page.title.as_deref(),
            raw_content: &page.content,
            status: PageStatus::Pending,
        };

        match self
            .lock_storage()
            .and_then(|mut storage| storage.upsert_page(&upsert))
        {
            Ok(page_id) => PageOutcome::Stored { page_id },
            Err(e) => PageOutcome::StoreFailed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use serde_json::json;

    fn crawler() -> Crawler<SqliteStorage> {
        let storage = SqliteStorage::new_in_memory().unwrap();
        Crawler::new(&Config::default(), Arc::new(Mutex::new(storage))).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = CrawlOptions::default();
        assert_eq!(options.max_pages, 5);
        assert_eq!(options.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_options_from_config() {
        let config = CrawlerConfig {
            max_pages: 20,
            delay_ms: 250,
            ..CrawlerConfig::default()
        };
        let options = CrawlOptions::from(&config);
        assert_eq!(options.max_pages, 20);
        assert_eq!(options.delay, Duration::from_millis(250));

        let options = options.with_max_pages(3).with_delay(Duration::ZERO);
        assert_eq!(options.max_pages, 3);
        assert!(options.delay.is_zero());
    }

    #[test]
    fn test_report_json() {
        let report = CrawlReport {
            pages_found: 6,
            pages_crawled: 5,
            pages_skipped: 1,
            store_failures: 0,
            stop_reason: StopReason::BudgetExhausted,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "pagesFound": 6,
                "pagesCrawled": 5,
                "pagesSkipped": 1,
                "storeFailures": 0,
                "stopReason": "budget_exhausted"
            })
        );
        assert_eq!(
            CrawlResponse::from(&report),
            CrawlResponse::Crawl {
                pages_found: 6,
                pages_crawled: 5
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_homepage_is_an_error() {
        let crawler = crawler();
        let result = crawler
            .crawl("c1", "not a url", CrawlOptions::default())
            .await;
        assert!(matches!(result, Err(SimplifyError::Url(_))));

        let result = crawler
            .crawl("c1", "ftp://example.com", CrawlOptions::default())
            .await;
        assert!(matches!(result, Err(SimplifyError::Url(_))));
    }

    #[tokio::test]
    async fn test_zero_budget_fetches_nothing() {
        let crawler = crawler();
        let report = crawler
            .crawl(
                "c1",
                "http://127.0.0.1:9/",
                CrawlOptions::default().with_max_pages(0),
            )
            .await
            .unwrap();
        assert_eq!(report.pages_found, 0);
        assert_eq!(report.stop_reason, StopReason::BudgetExhausted);
    }

    #[tokio::test]
    async fn test_invoke_rejects_invalid_url_before_recording_domain() {
        let crawler = crawler();
        let request = CrawlRequest::crawl("c1", "javascript:alert(1)");
        let result = crawler.invoke(&request, &CancellationToken::new()).await;
        assert!(result.is_err());

        let storage = crawler.storage().lock().unwrap();
        assert_eq!(storage.customer_domain("c1").unwrap(), None);
    }

    #[tokio::test]
    async fn test_single_page_fetch_failure_writes_nothing() {
        let crawler = crawler();
        let result = crawler.add_single_page("c1", "http://127.0.0.1:9/page").await;
        assert!(matches!(
            result,
            Err(SimplifyError::FetchFailed {
                reason: SkipReason::Network(_),
                ..
            })
        ));

        let storage = crawler.storage().lock().unwrap();
        assert_eq!(storage.count_pages("c1").unwrap(), 0);
    }
}
