//! Output module for reporting crawl results
//!
//! This module handles:
//! - Printing invocation responses and reports as JSON
//! - Listing a customer's stored pages
//! - Page statistics per status

pub mod stats;

pub use stats::{load_statistics, print_statistics, PageStatistics};

use crate::storage::PageRecord;
use serde::Serialize;

/// Longest title shown in the page table
const TITLE_WIDTH: usize = 40;

/// Serializes a value as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Prints a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}

/// Formats one page as a table row
pub fn format_page_row(page: &PageRecord) -> String {
    let title = page.title.as_deref().unwrap_or("-");
    let title = if title.chars().count() > TITLE_WIDTH {
        let mut short: String = title.chars().take(TITLE_WIDTH - 3).collect();
        short.push_str("...");
        short
    } else {
        title.to_string()
    };
    let length = page.raw_content.as_deref().map_or(0, |c| c.chars().count());

    format!(
        "{:<6} {:<10} {:>8}  {:<width$}  {}",
        page.id,
        page.status,
        length,
        title,
        page.url,
        width = TITLE_WIDTH
    )
}

/// Prints a customer's pages as a table, newest first
pub fn print_pages(pages: &[PageRecord]) {
    if pages.is_empty() {
        println!("No pages stored.");
        return;
    }

    println!(
        "{:<6} {:<10} {:>8}  {:<width$}  URL",
        "ID",
        "STATUS",
        "CHARS",
        "TITLE",
        width = TITLE_WIDTH
    );
    for page in pages {
        println!("{}", format_page_row(page));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageStatus;

    fn record(title: Option<&str>) -> PageRecord {
        PageRecord {
            id: 7,
            customer_id: "c1".to_string(),
            url: "https://example.com/about".to_string(),
            title: title.map(str::to_string),
            raw_content: Some("abc".to_string()),
            status: PageStatus::Pending,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_page_row() {
        let row = format_page_row(&record(Some("About us")));
        assert!(row.starts_with("7 "));
        assert!(row.contains("pending"));
        assert!(row.contains("About us"));
        assert!(row.ends_with("https://example.com/about"));
    }

    #[test]
    fn test_long_title_is_shortened() {
        let title = "x".repeat(100);
        let row = format_page_row(&record(Some(&title)));
        assert!(row.contains(&format!("{}...", "x".repeat(TITLE_WIDTH - 3))));
        assert!(!row.contains(&"x".repeat(TITLE_WIDTH + 1)));
    }

    #[test]
    fn test_missing_title() {
        let row = format_page_row(&record(None));
        assert!(row.contains(" - "));
    }

    #[test]
    fn test_record_json() {
        let json = to_json(&record(None)).unwrap();
        assert!(json.contains("\"status\": \"pending\""));
        assert!(json.contains("\"title\": null"));
    }
}
