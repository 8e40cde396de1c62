//! State module for pages and crawl runs
//!
//! # Components
//!
//! - `PageStatus`: where a stored page is in the content pipeline
//! - `CrawlPhase` / `StopReason`: the state machine of one crawl invocation

mod crawl_phase;
mod page_status;

// Re-export main types
pub use crawl_phase::{CrawlPhase, StopReason};
pub use page_status::PageStatus;
