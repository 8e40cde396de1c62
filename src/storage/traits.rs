//! Storage traits and error types
//!
//! This module defines the page store interface the crawler writes through
//! and the associated error types.

use crate::state::PageStatus;
use crate::storage::{PageRecord, PageUpsert};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Page store collaborator
///
/// Pages are unique per `(customer_id, url)`. Writes go through
/// [`PageStore::upsert_page`], which is idempotent: running the same crawl
/// twice leaves one row per page.
pub trait PageStore {
    /// Inserts a page or updates the existing row for `(customer_id, url)`
    ///
    /// On conflict the title, raw content and status are overwritten; the id
    /// and creation time are preserved.
    ///
    /// # Returns
    ///
    /// The id of the inserted or updated row
    fn upsert_page(&mut self, page: &PageUpsert<'_>) -> StorageResult<i64>;

    /// Gets the page stored for `(customer_id, url)`
    fn get_page(&self, customer_id: &str, url: &str) -> StorageResult<Option<PageRecord>>;

    /// Lists a customer's pages, newest first
    fn list_pages(&self, customer_id: &str) -> StorageResult<Vec<PageRecord>>;

    /// Counts a customer's pages
    fn count_pages(&self, customer_id: &str) -> StorageResult<u64>;

    /// Counts a customer's pages in a given status
    fn count_pages_by_status(&self, customer_id: &str, status: PageStatus)
        -> StorageResult<u64>;

    /// Records the hostname a customer registered for crawling
    fn set_customer_domain(&mut self, customer_id: &str, domain: &str) -> StorageResult<()>;
}
