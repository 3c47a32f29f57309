//! Audit trail structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Action tag for an audit entry. One per mutating ledger operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    ZakatContributed,
    CollaboratorAdded,
    WeightAdjusted,
    CollaboratorStatusChanged,
    YieldRecorded,
    RevenueDistributed,
    PermissionGranted,
    PermissionRevoked,
    OverrideActivated,
    OverrideDeactivated,
}

impl AuditAction {
    /// Wire tag for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::ZakatContributed => "ZAKAT_CONTRIBUTED",
            AuditAction::CollaboratorAdded => "COLLABORATOR_ADDED",
            AuditAction::WeightAdjusted => "WEIGHT_ADJUSTED",
            AuditAction::CollaboratorStatusChanged => "COLLABORATOR_STATUS_CHANGED",
            AuditAction::YieldRecorded => "YIELD_RECORDED",
            AuditAction::RevenueDistributed => "REVENUE_DISTRIBUTED",
            AuditAction::PermissionGranted => "PERMISSION_GRANTED",
            AuditAction::PermissionRevoked => "PERMISSION_REVOKED",
            AuditAction::OverrideActivated => "OVERRIDE_ACTIVATED",
            AuditAction::OverrideDeactivated => "OVERRIDE_DEACTIVATED",
        }
    }

    /// Parse a wire tag. Returns `None` for unknown tags.
    pub fn parse(tag: &str) -> Option<AuditAction> {
        const ALL: [AuditAction; 10] = [
            AuditAction::ZakatContributed,
            AuditAction::CollaboratorAdded,
            AuditAction::WeightAdjusted,
            AuditAction::CollaboratorStatusChanged,
            AuditAction::YieldRecorded,
            AuditAction::RevenueDistributed,
            AuditAction::PermissionGranted,
            AuditAction::PermissionRevoked,
            AuditAction::OverrideActivated,
            AuditAction::OverrideDeactivated,
        ];
        ALL.iter().copied().find(|a| a.as_str() == tag)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable audit log entry. Ids increase monotonically across the
/// lifetime of the ledger, even after old entries are evicted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: u64,
    pub timestamp: Timestamp,
    /// Identity supplied by the (already authorized) caller.
    pub actor: String,
    pub action: AuditAction,
    pub details: String,
}
