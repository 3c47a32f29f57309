//! Read-only report projections over ledger state.

use serde::{Deserialize, Serialize};

use crate::audit::AuditEntry;
use crate::treasury::TreasuryAccount;
use crate::{Amount, BasisPoints, Timestamp};

/// Collaborator aggregates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorSummary {
    pub total: usize,
    pub active: usize,
    /// Sum of active collaborators' weights, in basis points.
    pub total_weight_allocated: BasisPoints,
    pub total_earned_all_time: Amount,
}

/// Yield pool aggregates with derived efficiency.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldSummary {
    pub total_collected: Amount,
    pub total_distributed: Amount,
    pub pending_distribution: Amount,
    /// Distributed / collected, as a percentage. Zero when nothing collected.
    pub distribution_efficiency: f64,
}

/// Dashboard overview: one snapshot of every subsystem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub timestamp: Timestamp,
    pub zakat_treasury: TreasuryAccount,
    pub collaborators: CollaboratorSummary,
    pub yields: YieldSummary,
    pub override_status: bool,
    /// Most recent audit entries, newest first.
    pub recent_activity: Vec<AuditEntry>,
}

/// Treasury-side aggregates for the analytics report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryAnalytics {
    pub zakat_balance: Amount,
    pub total_contributions: Amount,
    /// Mean contribution size. Zero when no contributions recorded.
    pub average_contribution: f64,
}

/// A top-earning active collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    pub name: String,
    pub role: String,
    pub total_earned: Amount,
    pub revenue_weight: BasisPoints,
}

/// Comprehensive analytics report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub timestamp: Timestamp,
    pub treasury: TreasuryAnalytics,
    pub revenue: YieldSummary,
    pub collaborators: CollaboratorSummary,
    /// Active collaborators ranked by all-time earnings, highest first.
    pub top_performers: Vec<TopPerformer>,
}
