//! Audit trail & analytics command handlers.

use std::sync::Arc;

use prosperity_types::audit::AuditAction;
use serde_json::Value;

use crate::commands::Result;
use crate::rpc::RpcError;
use crate::{unix_now, DaemonState};

/// Get the audit trail, newest first.
pub async fn get_audit_trail(state: &Arc<DaemonState>, params: &Value) -> Result {
    let limit = params.get("limit").and_then(|v| v.as_u64()).unwrap_or(50) as usize;
    let action = match params.get("action").and_then(|v| v.as_str()) {
        Some(tag) => Some(
            AuditAction::parse(tag)
                .ok_or_else(|| RpcError::invalid_params(&format!("unknown action: {tag}")))?,
        ),
        None => None,
    };

    let ledger = state.ledger.read().await;
    let view = ledger.audit_trail(limit, action);
    Ok(serde_json::json!({
        "logs": view.logs,
        "total": view.total,
        "actions": view.actions,
    }))
}

/// Export the full retained audit trail as JSON or CSV.
pub async fn export_audit(state: &Arc<DaemonState>, params: &Value) -> Result {
    let format = params
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("json");

    let ledger = state.ledger.read().await;
    match format {
        "csv" => Ok(serde_json::json!({
            "format": "csv",
            "exportedAt": unix_now(),
            "content": ledger.audit_csv(),
        })),
        "json" => Ok(serde_json::json!({
            "format": "json",
            "exportedAt": unix_now(),
            "logs": ledger.audit_entries(),
        })),
        other => Err(RpcError::invalid_params(&format!(
            "format must be json or csv, got {other}"
        ))),
    }
}

/// Get the comprehensive analytics report.
pub async fn get_analytics(state: &Arc<DaemonState>) -> Result {
    let ledger = state.ledger.read().await;
    let analytics = ledger.analytics(unix_now());
    serde_json::to_value(analytics).map_err(|e| RpcError::internal_error(&e.to_string()))
}
