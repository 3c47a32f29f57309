//! Revenue override state machine.

use serde::{Deserialize, Serialize};

use crate::Timestamp;

/// Full-override redirect of all distributions to one beneficiary.
///
/// Two states: inactive (default) and active. While active, every
/// distribution routes 100% of the amount to `beneficiary` instead of the
/// proportional collaborator split. When `is_active` is false the remaining
/// fields are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideState {
    pub is_active: bool,
    pub beneficiary: Option<String>,
    pub activated_at: Option<Timestamp>,
    pub activated_by: Option<String>,
}

impl OverrideState {
    /// An active override for the given beneficiary.
    pub fn active(beneficiary: String, activated_by: String, activated_at: Timestamp) -> Self {
        Self {
            is_active: true,
            beneficiary: Some(beneficiary),
            activated_at: Some(activated_at),
            activated_by: Some(activated_by),
        }
    }

    /// The inactive state.
    pub fn inactive() -> Self {
        Self::default()
    }
}
