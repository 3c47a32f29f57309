//! Yield tracking & distribution command handlers.

use std::sync::Arc;

use serde_json::Value;

use crate::commands::{actor, require_amount, Result};
use crate::events::Event;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

/// Get yield statistics and analytics.
pub async fn get_yields(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    let analytics = ledger.analytics(unix_now());

    Ok(serde_json::json!({
        "overview": analytics.revenue,
        "sources": ledger.yield_sources(),
        "recentYields": ledger.recent_yields(prosperity_types::RECENT_WINDOW),
    }))
}

/// Record a new yield into the pool.
pub async fn record_yield(state: &Arc<DaemonState>, params: &Value) -> Result {
    let amount = require_amount(params)?;
    let source = params
        .get("source")
        .and_then(|v| v.as_str())
        .unwrap_or("Unspecified");
    let token = params.get("token").and_then(|v| v.as_str()).unwrap_or("ETH");
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let record = ledger.record_yield(amount, source, token, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "YieldRecorded".to_string(),
        timestamp: now,
        payload: serde_json::json!({"amount": amount, "source": source, "token": token}),
    });

    Ok(serde_json::json!({"yield": record}))
}

/// Distribute revenue from the pool.
pub async fn distribute_yield(state: &Arc<DaemonState>, params: &Value) -> Result {
    let amount = require_amount(params)?;
    let actor = actor(params);

    let now = unix_now();
    let mut ledger = state.ledger.write().await;
    let report = ledger.distribute_yield(amount, actor, now)?;

    state.event_bus.emit(Event {
        event_type: "RevenueDistributed".to_string(),
        timestamp: now,
        payload: serde_json::json!({
            "amount": amount,
            "recipients": report.distributions.len(),
        }),
    });

    serde_json::to_value(report).map_err(|e| RpcError::internal_error(&e.to_string()))
}
