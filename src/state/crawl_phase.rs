//! Crawl run phases
//!
//! A crawl moves `Idle -> Running -> Stopped(reason)`. There is no retry
//! state: each page is attempted once per run.

use serde::Serialize;
use std::fmt;

/// Why a crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `max_pages` pages were stored
    BudgetExhausted,

    /// No URLs left to fetch
    FrontierEmpty,

    /// The caller's cancellation token fired
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BudgetExhausted => "budget exhausted",
            Self::FrontierEmpty => "frontier empty",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Current phase of one crawl invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Idle,
    Running,
    Stopped(StopReason),
}

impl CrawlPhase {
    /// Moves from Idle to Running; any other phase is left unchanged
    pub fn start(self) -> Self {
        match self {
            Self::Idle => Self::Running,
            other => other,
        }
    }

    /// Stops a running crawl with the given reason
    ///
    /// A phase that has already stopped keeps its first reason.
    pub fn stop(self, reason: StopReason) -> Self {
        match self {
            Self::Stopped(_) => self,
            _ => Self::Stopped(reason),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns the stop reason once the crawl is done
    pub fn stop_reason(&self) -> Option<StopReason> {
        match self {
            Self::Stopped(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let phase = CrawlPhase::Idle;
        assert!(!phase.is_running());

        let phase = phase.start();
        assert!(phase.is_running());

        let phase = phase.stop(StopReason::FrontierEmpty);
        assert!(!phase.is_running());
        assert_eq!(phase.stop_reason(), Some(StopReason::FrontierEmpty));
    }

    #[test]
    fn test_first_stop_reason_wins() {
        let phase = CrawlPhase::Running
            .stop(StopReason::BudgetExhausted)
            .stop(StopReason::Cancelled);
        assert_eq!(phase.stop_reason(), Some(StopReason::BudgetExhausted));
    }

    #[test]
    fn test_stopped_crawl_does_not_restart() {
        let phase = CrawlPhase::Stopped(StopReason::Cancelled).start();
        assert_eq!(phase.stop_reason(), Some(StopReason::Cancelled));
    }
}
