//! Permission management command handlers.

use std::sync::Arc;

use prosperity_types::permissions::Role;
use serde_json::Value;

use crate::commands::{actor, require_str, Result};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

fn require_role(params: &Value) -> std::result::Result<Role, RpcError> {
    let tag = require_str(params, "role")?;
    Role::parse(tag).ok_or_else(|| RpcError::invalid_role(tag))
}

/// Get all permission records and the available role set.
pub async fn get_permissions(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    Ok(serde_json::json!({
        "permissions": ledger.permissions(),
        "availableRoles": Role::ALL,
    }))
}

/// Grant a role to an address.
pub async fn grant_permission(state: &Arc<DaemonState>, params: &Value) -> Result {
    let address = require_str(params, "address")?;
    let role = require_role(params)?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let permission = ledger.grant_permission(address, role, actor, now);

    state.event_bus.emit(Event {
        event_type: "PermissionGranted".to_string(),
        timestamp: now,
        payload: serde_json::json!({"address": address, "role": role}),
    });

    Ok(serde_json::json!({"permission": permission}))
}

/// Revoke a role from an address.
pub async fn revoke_permission(state: &Arc<DaemonState>, params: &Value) -> Result {
    let address = require_str(params, "address")?;
    let role = require_role(params)?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let permission = ledger.revoke_permission(address, role, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "PermissionRevoked".to_string(),
        timestamp: now,
        payload: serde_json::json!({"address": address, "role": role}),
    });

    Ok(serde_json::json!({"permission": permission}))
}
