use chrono::{DateTime, Utc};

use super::token::TokenEntry;

/// Snapshot of a wallet portfolio as produced by one successful fetch.
///
/// Snapshots are never patched in place; a newer fetch replaces the whole
/// value. `Default` is the zero-initialized portfolio shown before the
/// first fetch completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioSnapshot {
    pub native_balance: f64,
    pub tokens: Vec<TokenEntry>,
    pub total_value_estimate: f64,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl PortfolioSnapshot {
    /// Create a new snapshot stamped with the current time
    pub fn new(native_balance: f64, tokens: Vec<TokenEntry>, total_value_estimate: f64) -> Self {
        Self {
            native_balance,
            tokens,
            total_value_estimate,
            fetched_at: Some(Utc::now()),
        }
    }
}
