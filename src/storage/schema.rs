//! Database schema definitions
//!
//! This module contains the SQL schema for the page store.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Customers and the domain they registered
CREATE TABLE IF NOT EXISTS customers (
    id TEXT PRIMARY KEY,
    domain TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- One row per crawled page per customer
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id TEXT NOT NULL,
    url TEXT NOT NULL,
    title TEXT,
    raw_content TEXT,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(customer_id, url)
);

CREATE INDEX IF NOT EXISTS idx_pages_customer ON pages(customer_id);
CREATE INDEX IF NOT EXISTS idx_pages_status ON pages(customer_id, status);
"#;

/// Initializes the database schema
///
/// Safe to call on an existing database.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
