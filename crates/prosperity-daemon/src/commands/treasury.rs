//! Dashboard overview & zakat treasury command handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::commands::{actor, require_amount, Result};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

/// Get the complete governance dashboard overview.
pub async fn get_overview(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    let overview = ledger.overview(unix_now());
    serde_json::to_value(overview).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Get zakat treasury details and statistics.
pub async fn get_treasury(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    let treasury = ledger.treasury();
    let average = if treasury.contribution_count == 0 {
        0.0
    } else {
        treasury.total_contributions as f64 / treasury.contribution_count as f64
    };

    Ok(serde_json::json!({
        "current": treasury,
        "analytics": {
            "averageContribution": average,
        },
    }))
}

/// Get recent zakat contributions.
pub async fn get_contributions(state: &Arc<DaemonState>, params: &Value) -> Result {
    let limit = params.get("limit").and_then(|v| v.as_u64()).unwrap_or(20) as usize;

    let ledger = state.ledger.read().await;
    Ok(serde_json::json!({
        "contributions": ledger.recent_contributions(limit),
        "total": ledger.treasury().contribution_count,
    }))
}

/// Record a new zakat contribution.
pub async fn contribute_zakat(state: &Arc<DaemonState>, params: &Value) -> Result {
    let amount = require_amount(params)?;
    let source = params
        .get("source")
        .and_then(|v| v.as_str())
        .unwrap_or("Manual Contribution");
    let actor = actor(params);
    let contributor = params
        .get("contributor")
        .and_then(|v| v.as_str())
        .unwrap_or(actor);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let contribution = ledger.contribute(amount, source, contributor, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "ZakatContributed".to_string(),
        timestamp: now,
        payload: serde_json::json!({"amount": amount, "source": source}),
    });

    Ok(serde_json::json!({"contribution": contribution}))
}
