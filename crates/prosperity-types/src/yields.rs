//! Yield pool and distribution structures.

use serde::{Deserialize, Serialize};

use crate::{Amount, BasisPoints, Timestamp};

/// A single recorded yield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldRecord {
    pub amount: Amount,
    pub timestamp: Timestamp,
    /// Revenue source label, e.g. "NFT Marketplace".
    pub source: String,
    /// Token the yield was denominated in, e.g. "ETH".
    pub token: String,
}

/// Per-source yield breakdown entry. Informational only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldSource {
    pub name: String,
    pub amount: Amount,
}

/// Aggregate yield pool state.
///
/// Invariant: `pending_distribution == total_collected - total_distributed`
/// at all times.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPool {
    /// Sum of all recorded yields. Monotonic.
    pub total_collected: Amount,
    /// Sum of all distributed amounts. Monotonic.
    pub total_distributed: Amount,
    /// Undistributed yield available to `DistributeYield`.
    pub pending_distribution: Amount,
}

/// One line item of a distribution: a credit to a single wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionLine {
    /// Display name of the credited party.
    pub collaborator: String,
    pub wallet: String,
    pub amount: Amount,
    /// The weight that produced this share. `None` for the sovereign
    /// remainder line and for override payouts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<BasisPoints>,
}

/// Result of a successful `DistributeYield` operation.
///
/// The line items always sum to `total_distributed` exactly; floor-rounding
/// losses are swept into the final sovereign line, never dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionReport {
    pub distributions: Vec<DistributionLine>,
    /// The amount distributed by this operation.
    pub total_distributed: Amount,
    /// Pending distribution remaining in the pool afterwards.
    pub remaining: Amount,
    pub timestamp: Timestamp,
}
