//! Storage module for persisting crawled pages
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Idempotent page upserts keyed on (customer, url)
//! - Page listing and status counts for reporting

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{PageStore, StorageError, StorageResult};

use crate::state::PageStatus;
use serde::Serialize;
use std::path::Path;

/// Opens the page store at `path`, creating it if needed
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// A page row as stored
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub id: i64,
    pub customer_id: String,
    pub url: String,
    pub title: Option<String>,
    pub raw_content: Option<String>,
    pub status: PageStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// The values written by one upsert
#[derive(Debug, Clone, Copy)]
pub struct PageUpsert<'a> {
    pub customer_id: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub raw_content: &'a str,
    pub status: PageStatus,
}
