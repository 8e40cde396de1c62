//! Statistics over a customer's stored pages
//!
//! This module provides functionality for extracting and displaying
//! page counts from the storage layer.

use crate::state::PageStatus;
use crate::storage::PageStore;
use crate::SimplifyError;
use serde::Serialize;

/// Page statistics summary for one customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStatistics {
    pub customer_id: String,

    /// Total number of stored pages
    pub total_pages: u64,

    /// Count of pages per status, in pipeline order
    pub pages_by_status: Vec<(PageStatus, u64)>,
}

impl PageStatistics {
    /// Count for one status
    pub fn count(&self, status: PageStatus) -> u64 {
        self.pages_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count)
    }

    /// Pages the content pipeline has finished with
    pub fn terminal_pages(&self) -> u64 {
        self.pages_by_status
            .iter()
            .filter(|(s, _)| s.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }
}

/// Loads statistics from storage
///
/// # Returns
///
/// * `Ok(PageStatistics)` - Successfully loaded statistics
/// * `Err(SimplifyError)` - Failed to query the store
pub fn load_statistics<S: PageStore + ?Sized>(
    storage: &S,
    customer_id: &str,
) -> Result<PageStatistics, SimplifyError> {
    let total_pages = storage.count_pages(customer_id)?;

    let mut pages_by_status = Vec::with_capacity(PageStatus::ALL.len());
    for status in PageStatus::ALL {
        pages_by_status.push((status, storage.count_pages_by_status(customer_id, status)?));
    }

    Ok(PageStatistics {
        customer_id: customer_id.to_string(),
        total_pages,
        pages_by_status,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &PageStatistics) {
    println!("=== Page Statistics ({}) ===\n", stats.customer_id);
    println!("  Total pages: {}", stats.total_pages);
    println!();

    println!("Pages by Status:");
    for (status, count) in &stats.pages_by_status {
        let percentage = if stats.total_pages > 0 {
            (*count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    println!(
        "Processed: {} / {} pages",
        stats.terminal_pages(),
        stats.total_pages
    );
}
