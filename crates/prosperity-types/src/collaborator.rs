//! Revenue-share collaborator structures.

use serde::{Deserialize, Serialize};

use crate::{Amount, BasisPoints, Timestamp};

/// A revenue-share participant.
///
/// Collaborators are never deleted; deactivation is the only removal path,
/// which preserves audit continuity and all-time earnings totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    /// Sequential id, assigned at creation.
    pub id: u64,
    pub name: String,
    /// Unique key. Immutable once created.
    pub wallet: String,
    /// Free-text role description, e.g. "Technical Lead".
    pub role: String,
    /// Share of each distribution, in basis points (0-10000).
    pub revenue_weight: BasisPoints,
    pub is_active: bool,
    /// All-time earnings. Monotonic.
    pub total_earned: Amount,
    /// When this collaborator last received a distribution share.
    pub last_distribution: Timestamp,
}
