//! Governance permission structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Governance role tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    TreasuryManager,
    RevenueManager,
    Auditor,
}

impl Role {
    /// The fixed set of available roles.
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::TreasuryManager,
        Role::RevenueManager,
        Role::Auditor,
    ];

    /// Wire tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::TreasuryManager => "TREASURY_MANAGER",
            Role::RevenueManager => "REVENUE_MANAGER",
            Role::Auditor => "AUDITOR",
        }
    }

    /// Parse a wire tag. Returns `None` for unknown tags.
    pub fn parse(tag: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.as_str() == tag)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role grants for a single address.
///
/// Created on first grant; never physically deleted, only emptied of roles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub address: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
}

impl Permission {
    /// Whether the address currently holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
