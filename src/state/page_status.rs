//! Page status definitions for the content pipeline
//!
//! The crawler only ever writes `Pending`; the later states belong to the
//! content-generation stage that picks pages up from the store.

use serde::Serialize;
use std::fmt;

/// Lifecycle status of a stored page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Content captured, waiting for generation
    Pending,

    /// Generation in progress
    Processing,

    /// Simplified and summarized variants exist
    Completed,

    /// Generation failed
    Failed,
}

impl PageStatus {
    /// All statuses, in pipeline order
    pub const ALL: [PageStatus; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Failed,
    ];

    /// Returns true if no further processing will happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Converts the status to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its database string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_string_roundtrip() {
        for status in PageStatus::ALL {
            assert_eq!(
                PageStatus::from_db_string(status.to_db_string()),
                Some(status)
            );
        }
    }

    #[test]
    fn test_unknown_db_string() {
        assert_eq!(PageStatus::from_db_string("archived"), None);
        assert_eq!(PageStatus::from_db_string("Pending"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!PageStatus::Pending.is_terminal());
        assert!(!PageStatus::Processing.is_terminal());
        assert!(PageStatus::Completed.is_terminal());
        assert!(PageStatus::Failed.is_terminal());
    }

    #[test]
    fn test_display_matches_db_string() {
        assert_eq!(PageStatus::Pending.to_string(), "pending");
    }
}
