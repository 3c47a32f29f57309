//! Zakat treasury structures.

use serde::{Deserialize, Serialize};

use crate::{Amount, Timestamp};

/// A single recorded treasury contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    pub amount: Amount,
    pub timestamp: Timestamp,
    /// Wallet address of the contributor.
    pub contributor: String,
    /// Revenue source label, e.g. "NFT Sales Royalties".
    pub source: String,
}

/// Aggregate treasury state. Mutated only by contributions; distributions
/// draw from the yield pool, not from here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryAccount {
    /// Current balance. Never negative.
    pub balance: Amount,
    /// Sum of all contributions ever recorded. Monotonic.
    pub total_contributions: Amount,
    /// Count of all contributions ever recorded. Monotonic.
    pub contribution_count: u64,
}
