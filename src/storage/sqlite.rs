//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the PageStore trait.

use crate::state::PageStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{PageStore, StorageError, StorageResult};
use crate::storage::{PageRecord, PageUpsert};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const PAGE_COLUMNS: &str =
    "id, customer_id, url, title, raw_content, status, created_at, updated_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the page store at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database or create the schema
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            PRAGMA busy_timeout = 5000;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns the domain recorded for a customer
    pub fn customer_domain(&self, customer_id: &str) -> StorageResult<Option<String>> {
        let domain = self
            .conn
            .query_row(
                "SELECT domain FROM customers WHERE id = ?1",
                params![customer_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(domain)
    }
}

fn to_count(count: i64) -> StorageResult<u64> {
    u64::try_from(count).map_err(|_| StorageError::Database(format!("negative row count {}", count)))
}

/// Fixed-width RFC 3339 so timestamps sort as text
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn row_to_page(row: &Row<'_>) -> rusqlite::Result<PageRecord> {
    let status: String = row.get(5)?;
    let status = PageStatus::from_db_string(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("unknown page status {:?}", status).into(),
        )
    })?;

    Ok(PageRecord {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        url: row.get(2)?,
        title: row.get(3)?,
        raw_content: row.get(4)?,
        status,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl PageStore for SqliteStorage {
    fn upsert_page(&mut self, page: &PageUpsert<'_>) -> StorageResult<i64> {
        let now = timestamp();
        let id = self.conn.query_row(
            "INSERT INTO pages (customer_id, url, title, raw_content, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(customer_id, url) DO UPDATE SET
                 title = excluded.title,
                 raw_content = excluded.raw_content,
                 status = excluded.status,
                 updated_at = excluded.updated_at
             RETURNING id",
            params![
                page.customer_id,
                page.url,
                page.title,
                page.raw_content,
                page.status.to_db_string(),
                now
            ],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn get_page(&self, customer_id: &str, url: &str) -> StorageResult<Option<PageRecord>> {
        let sql = format!(
            "SELECT {} FROM pages WHERE customer_id = ?1 AND url = ?2",
            PAGE_COLUMNS
        );
        let page = self
            .conn
            .query_row(&sql, params![customer_id, url], row_to_page)
            .optional()?;
        Ok(page)
    }

    fn list_pages(&self, customer_id: &str) -> StorageResult<Vec<PageRecord>> {
        let sql = format!(
            "SELECT {} FROM pages WHERE customer_id = ?1 ORDER BY created_at DESC, id DESC",
            PAGE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let pages = stmt
            .query_map(params![customer_id], row_to_page)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pages)
    }

    fn count_pages(&self, customer_id: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE customer_id = ?1",
            params![customer_id],
            |row| row.get(0),
        )?;
        to_count(count)
    }

    fn count_pages_by_status(
        &self,
        customer_id: &str,
        status: PageStatus,
    ) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pages WHERE customer_id = ?1 AND status = ?2",
            params![customer_id, status.to_db_string()],
            |row| row.get(0),
        )?;
        to_count(count)
    }

    fn set_customer_domain(&mut self, customer_id: &str, domain: &str) -> StorageResult<()> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO customers (id, domain, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(id) DO UPDATE SET domain = excluded.domain, updated_at = excluded.updated_at",
            params![customer_id, domain, now],
        )?;
        Ok(())
    }
}
