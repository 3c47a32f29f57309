//! Revenue override command handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::commands::{actor, Result};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

/// Get the current override state.
pub async fn get_override(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    Ok(serde_json::json!({"override": ledger.override_state()}))
}

/// Activate the revenue override for a beneficiary.
pub async fn activate_override(state: &Arc<DaemonState>, params: &Value) -> Result {
    let beneficiary = params
        .get("beneficiary")
        .and_then(|v| v.as_str())
        .ok_or_else(RpcError::invalid_beneficiary)?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let override_state = ledger.activate_override(beneficiary, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "OverrideActivated".to_string(),
        timestamp: now,
        payload: serde_json::json!({"beneficiary": beneficiary}),
    });

    Ok(serde_json::json!({"override": override_state}))
}

/// Deactivate the revenue override.
pub async fn deactivate_override(state: &Arc<DaemonState>, params: &Value) -> Result {
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let (current, previous) = ledger.deactivate_override(actor, now);

    state.event_bus.emit(Event {
        event_type: "OverrideDeactivated".to_string(),
        timestamp: now,
        payload: serde_json::json!({"previousBeneficiary": previous.beneficiary}),
    });

    Ok(serde_json::json!({"override": current, "previous": previous}))
}
