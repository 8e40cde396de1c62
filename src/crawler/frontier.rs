//! Breadth-first crawl frontier
//!
//! Owns the visited set and the FIFO queue of one crawl invocation.

use crate::url::{extract_host, normalize_url};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Visited set plus FIFO queue, scoped to a single host
///
/// A URL is queued at most once and never after it has been visited, so the
/// number of dequeues is bounded by the number of reachable same-host URLs.
#[derive(Debug)]
pub struct CrawlFrontier {
    host: String,
    visited: HashSet<String>,
    queue: VecDeque<String>,
    queued: HashSet<String>,
}

impl CrawlFrontier {
    /// Creates a frontier seeded with the normalized homepage
    ///
    /// Returns `None` when the homepage has no host to scope the crawl to.
    pub fn new(homepage: &Url) -> Option<Self> {
        let host = extract_host(homepage)?;
        let seed = normalize_url(homepage);

        let mut frontier = Self {
            host,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
        };
        frontier.queued.insert(seed.clone());
        frontier.queue.push_back(seed);
        Some(frontier)
    }

    /// Dequeues the next unvisited URL and marks it visited
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.queue.pop_front() {
            self.queued.remove(&url);
            if self.visited.insert(url.clone()) {
                return Some(url);
            }
        }
        None
    }

    /// Appends a discovered link
    ///
    /// Rejected when already visited, already queued, unparsable, or on a
    /// different host.
    ///
    /// # Returns
    ///
    /// `true` if the link was queued
    pub fn enqueue(&mut self, link: &str) -> bool {
        if self.visited.contains(link) || self.queued.contains(link) {
            return false;
        }

        let same_host = Url::parse(link)
            .ok()
            .and_then(|url| extract_host(&url))
            .is_some_and(|host| host == self.host);
        if !same_host {
            tracing::debug!("Rejected off-host link {}", link);
            return false;
        }

        self.queued.insert(link.to_string());
        self.queue.push_back(link.to_string());
        true
    }

    /// Whether another URL is waiting to be fetched
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs dequeued so far
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
