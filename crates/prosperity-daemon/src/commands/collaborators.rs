//! Collaborator management command handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::commands::{actor, require_str, Result};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

/// Extract a basis-point weight from the given field.
fn require_weight(params: &Value, field: &str) -> std::result::Result<u32, RpcError> {
    let raw = params
        .get(field)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| RpcError::invalid_params(&format!("{field} required")))?;
    // Range ceiling is enforced by the ledger; reject negatives here.
    u32::try_from(raw).map_err(|_| RpcError::invalid_weight(raw))
}

/// Get all collaborators with a summary block.
pub async fn get_collaborators(state: &Arc<DaemonState>, params: &Value) -> Result {
    let active_only = params
        .get("activeOnly")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let ledger = state.ledger.read().await;
    Ok(serde_json::json!({
        "collaborators": ledger.collaborators(active_only),
        "summary": ledger.collaborator_summary(),
    }))
}

/// Get a single collaborator by wallet.
pub async fn get_collaborator(state: &Arc<DaemonState>, params: &Value) -> Result {
    let wallet = require_str(params, "wallet")?;

    let ledger = state.ledger.read().await;
    let collaborator = ledger.collaborator(wallet)?;
    Ok(serde_json::json!({"collaborator": collaborator}))
}

/// Add a new collaborator.
pub async fn add_collaborator(state: &Arc<DaemonState>, params: &Value) -> Result {
    let name = require_str(params, "name")?;
    let wallet = require_str(params, "wallet")?;
    let role = require_str(params, "role")?;
    let weight = require_weight(params, "revenueWeight")?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let collaborator = ledger.add_collaborator(name, wallet, weight, role, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "CollaboratorAdded".to_string(),
        timestamp: now,
        payload: serde_json::json!({"wallet": wallet, "revenueWeight": weight}),
    });

    Ok(serde_json::json!({"collaborator": collaborator}))
}

/// Update a collaborator's revenue weight.
pub async fn set_collaborator_weight(state: &Arc<DaemonState>, params: &Value) -> Result {
    let wallet = require_str(params, "wallet")?;
    let new_weight = require_weight(params, "newWeight")?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let (collaborator, old_weight, new_weight) =
        ledger.set_weight(wallet, new_weight, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "WeightAdjusted".to_string(),
        timestamp: now,
        payload: serde_json::json!({"wallet": wallet, "oldWeight": old_weight, "newWeight": new_weight}),
    });

    Ok(serde_json::json!({
        "collaborator": collaborator,
        "oldWeight": old_weight,
        "newWeight": new_weight,
    }))
}

/// Activate or deactivate a collaborator.
pub async fn set_collaborator_status(state: &Arc<DaemonState>, params: &Value) -> Result {
    let wallet = require_str(params, "wallet")?;
    let is_active = params
        .get("isActive")
        .and_then(|v| v.as_bool())
        .ok_or_else(|| RpcError::invalid_params("isActive required"))?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let collaborator = ledger.set_active_status(wallet, is_active, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "CollaboratorStatusChanged".to_string(),
        timestamp: now,
        payload: serde_json::json!({"wallet": wallet, "isActive": is_active}),
    });

    Ok(serde_json::json!({"collaborator": collaborator}))
}
