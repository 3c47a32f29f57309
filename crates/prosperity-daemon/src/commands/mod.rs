//! IPC command handlers.
//!
//! Each submodule implements the commands for one governance domain.

pub mod audit;
pub mod collaborators;
pub mod overrides;
pub mod permissions;
pub mod treasury;
pub mod yields;

use serde_json::Value;

use crate::rpc::RpcError;

/// Shared result alias for command handlers.
pub type Result = std::result::Result<Value, RpcError>;

/// Acting identity for the audit trail, defaulting to "system".
///
/// Authorization happens upstream; the daemon only records the supplied
/// identity.
pub fn actor(params: &Value) -> &str {
    params.get("actor").and_then(|v| v.as_str()).unwrap_or("system")
}

/// Extract a required positive amount.
pub fn require_amount(params: &Value) -> std::result::Result<u64, RpcError> {
    match params.get("amount").and_then(|v| v.as_u64()) {
        Some(amount) if amount > 0 => Ok(amount),
        _ => Err(RpcError::invalid_amount()),
    }
}

/// Extract a required string field.
pub fn require_str<'a>(params: &'a Value, field: &str) -> std::result::Result<&'a str, RpcError> {
    params
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params(&format!("{field} required")))
}
