//! JSON-RPC server over Unix socket.
//!
//! Listens on a Unix domain socket, accepts connections, and dispatches
//! JSON-RPC method calls to the appropriate command handlers. One request
//! per line, one response per line.

use std::path::PathBuf;
use std::sync::Arc;

use prosperity_ledger::LedgerError;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tracing::{debug, error, info, warn};

use crate::commands;
use crate::DaemonState;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC success response.
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Result or error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Error name.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl RpcError {
    // Standard JSON-RPC errors

    /// Parse error (-32700).
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "PARSE_ERROR".to_string(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "METHOD_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"method": method})),
        }
    }

    /// Invalid params (-32602). Covers missing required fields.
    pub fn invalid_params(detail: &str) -> Self {
        Self {
            code: -32602,
            message: "INVALID_PARAMS".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// Internal error (-32603).
    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: -32603,
            message: "INTERNAL_ERROR".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    // Domain errors

    /// Invalid amount (-32040).
    pub fn invalid_amount() -> Self {
        Self {
            code: -32040,
            message: "INVALID_AMOUNT".to_string(),
            data: None,
        }
    }

    /// Insufficient pending distribution (-32041).
    pub fn insufficient_pending(requested: u64, pending: u64) -> Self {
        Self {
            code: -32041,
            message: "INSUFFICIENT_PENDING".to_string(),
            data: Some(serde_json::json!({"requested": requested, "pending": pending})),
        }
    }

    /// Distribution over-committed (-32042).
    pub fn over_committed(committed: u64, amount: u64) -> Self {
        Self {
            code: -32042,
            message: "OVER_COMMITTED".to_string(),
            data: Some(serde_json::json!({"committed": committed, "amount": amount})),
        }
    }

    /// Invalid revenue weight (-32050).
    pub fn invalid_weight(weight: i64) -> Self {
        Self {
            code: -32050,
            message: "INVALID_WEIGHT".to_string(),
            data: Some(serde_json::json!({"weight": weight})),
        }
    }

    /// Duplicate collaborator wallet (-32051).
    pub fn duplicate_wallet(wallet: &str) -> Self {
        Self {
            code: -32051,
            message: "DUPLICATE_WALLET".to_string(),
            data: Some(serde_json::json!({"wallet": wallet})),
        }
    }

    /// Collaborator not found (-32052).
    pub fn collaborator_not_found(wallet: &str) -> Self {
        Self {
            code: -32052,
            message: "COLLABORATOR_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"wallet": wallet})),
        }
    }

    /// Invalid role tag (-32053).
    pub fn invalid_role(role: &str) -> Self {
        Self {
            code: -32053,
            message: "INVALID_ROLE".to_string(),
            data: Some(serde_json::json!({"role": role})),
        }
    }

    /// Permission not found (-32054).
    pub fn permission_not_found(address: &str) -> Self {
        Self {
            code: -32054,
            message: "PERMISSION_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"address": address})),
        }
    }

    /// Invalid override beneficiary (-32055).
    pub fn invalid_beneficiary() -> Self {
        Self {
            code: -32055,
            message: "INVALID_BENEFICIARY".to_string(),
            data: None,
        }
    }
}

impl From<LedgerError> for RpcError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount => RpcError::invalid_amount(),
            LedgerError::InvalidWeight { weight } => RpcError::invalid_weight(i64::from(weight)),
            LedgerError::DuplicateWallet { wallet } => RpcError::duplicate_wallet(&wallet),
            LedgerError::CollaboratorNotFound { wallet } => {
                RpcError::collaborator_not_found(&wallet)
            }
            LedgerError::InvalidBeneficiary => RpcError::invalid_beneficiary(),
            LedgerError::InsufficientPending { requested, pending } => {
                RpcError::insufficient_pending(requested, pending)
            }
            LedgerError::PermissionNotFound { address } => {
                RpcError::permission_not_found(&address)
            }
            LedgerError::OverCommitted { committed, amount } => {
                RpcError::over_committed(committed, amount)
            }
            LedgerError::Overflow => RpcError::internal_error("arithmetic overflow"),
        }
    }
}

/// The RPC server.
pub struct RpcServer {
    state: Arc<DaemonState>,
    socket_path: PathBuf,
}

impl RpcServer {
    /// Create a new RPC server.
    pub fn new(state: Arc<DaemonState>, socket_path: PathBuf) -> Self {
        Self { state, socket_path }
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> anyhow::Result<()> {
        // Remove stale socket file
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        info!("IPC server listening on {:?}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(state, stream).await {
                            warn!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(
    state: Arc<DaemonState>,
    stream: tokio::net::UnixStream,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => dispatch_request(state.clone(), request).await,
            Err(_) => RpcResponse::error(serde_json::Value::Null, RpcError::parse_error()),
        };

        let mut response_json = serde_json::to_string(&response)?;
        response_json.push('\n');
        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Dispatch a JSON-RPC request to the appropriate command handler.
async fn dispatch_request(state: Arc<DaemonState>, request: RpcRequest) -> RpcResponse {
    let id = request.id.clone();
    let method = request.method.as_str();

    debug!("Dispatching RPC method: {}", method);

    let result = match method {
        // Dashboard & treasury
        "get_overview" => commands::treasury::get_overview(&state).await,
        "get_treasury" => commands::treasury::get_treasury(&state).await,
        "get_contributions" => commands::treasury::get_contributions(&state, &request.params).await,
        "contribute_zakat" => commands::treasury::contribute_zakat(&state, &request.params).await,

        // Collaborators
        "get_collaborators" => {
            commands::collaborators::get_collaborators(&state, &request.params).await
        }
        "get_collaborator" => {
            commands::collaborators::get_collaborator(&state, &request.params).await
        }
        "add_collaborator" => {
            commands::collaborators::add_collaborator(&state, &request.params).await
        }
        "set_collaborator_weight" => {
            commands::collaborators::set_collaborator_weight(&state, &request.params).await
        }
        "set_collaborator_status" => {
            commands::collaborators::set_collaborator_status(&state, &request.params).await
        }

        // Yields
        "get_yields" => commands::yields::get_yields(&state).await,
        "record_yield" => commands::yields::record_yield(&state, &request.params).await,
        "distribute_yield" => commands::yields::distribute_yield(&state, &request.params).await,

        // Permissions
        "get_permissions" => commands::permissions::get_permissions(&state).await,
        "grant_permission" => commands::permissions::grant_permission(&state, &request.params).await,
        "revoke_permission" => {
            commands::permissions::revoke_permission(&state, &request.params).await
        }

        // Override
        "get_override" => commands::overrides::get_override(&state).await,
        "activate_override" => {
            commands::overrides::activate_override(&state, &request.params).await
        }
        "deactivate_override" => commands::overrides::deactivate_override(&state, &request.params).await,

        // Audit & analytics
        "get_audit_trail" => commands::audit::get_audit_trail(&state, &request.params).await,
        "export_audit" => commands::audit::export_audit(&state, &request.params).await,
        "get_analytics" => commands::audit::get_analytics(&state).await,

        _ => Err(RpcError::method_not_found(method)),
    };

    match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(err) => RpcResponse::error(id, err),
    }
}
