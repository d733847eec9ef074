//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// High-level error domain, derived from the numeric code band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Order,
    Payout,
    Catalog,
    System,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Order,
            5000..=5999 => ErrorCategory::Payout,
            6000..=6999 => ErrorCategory::Catalog,
            _ => ErrorCategory::System,
        }
    }
}
