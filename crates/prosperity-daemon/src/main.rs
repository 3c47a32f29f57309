//! prosperity-daemon: the Prosperity governance daemon.
//!
//! Single OS process running a Tokio async runtime. One [`Ledger`] instance
//! owns all governance state behind a reader-writer lock; dashboards talk to
//! the daemon via JSON-RPC over Unix socket.

mod commands;
mod config;
mod events;
mod rpc;

use std::sync::Arc;

use prosperity_db::sink::SqliteAuditSink;
use prosperity_ledger::Ledger;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

use crate::config::DaemonConfig;
use crate::events::EventBus;
use crate::rpc::RpcServer;

/// Daemon-wide shared state.
pub struct DaemonState {
    /// The governance ledger. Writers serialize every mutating operation;
    /// readers observe consistent snapshots.
    pub ledger: RwLock<Ledger>,
    /// Configuration.
    pub config: DaemonConfig,
    /// Event bus for pushing events to subscribers.
    pub event_bus: EventBus,
    /// Shutdown signal sender.
    pub shutdown_tx: broadcast::Sender<()>,
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Filter from the configured level; `RUST_LOG` directives take precedence.
fn log_filter(level: &str) -> anyhow::Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("prosperity={level}").parse()?))
}

/// Install the global tracing subscriber per the `[advanced]` config section.
fn init_tracing(advanced: &config::AdvancedConfig) -> anyhow::Result<()> {
    let filter = log_filter(&advanced.log_level)?;
    if advanced.log_file.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&advanced.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config, then initialize tracing from it
    let config = DaemonConfig::load()?;
    init_tracing(&config.advanced)?;

    info!("Prosperity daemon starting");

    let data_dir = config.data_dir();

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)?;

    // 2. Build the ledger
    let mut ledger = Ledger::new(
        config.governance.sovereign_name.clone(),
        config.governance.sovereign_wallet.clone(),
    );

    // 3. Attach the durable audit sink
    if config.storage.persist_audit {
        let db_path = data_dir.join("prosperity.db");
        match prosperity_db::open(&db_path) {
            Ok(conn) => {
                info!("Durable audit trail at {:?}", db_path);
                ledger.set_audit_sink(Box::new(SqliteAuditSink::new(conn)));
            }
            Err(e) => {
                // Audit persistence is best-effort; run with memory only.
                warn!("Could not open audit database: {e}");
            }
        }
    }

    // 4. Create event bus and shutdown channel
    let event_bus = EventBus::new(1000);
    let (shutdown_tx, _shutdown_rx) = broadcast::channel(1);

    // 5. Build daemon state
    let state = Arc::new(DaemonState {
        ledger: RwLock::new(ledger),
        config,
        event_bus,
        shutdown_tx: shutdown_tx.clone(),
    });

    // 6. Start IPC server
    let socket_path = data_dir.join("daemon.sock");
    let rpc_server = RpcServer::new(state.clone(), socket_path.clone());

    info!("Starting JSON-RPC server on {:?}", socket_path);

    // 7. Emit DaemonStarted event
    state.event_bus.emit(events::Event {
        event_type: "DaemonStarted".to_string(),
        timestamp: unix_now(),
        payload: serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        }),
    });

    // 8. Run the RPC server until shutdown
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = shutdown_rx.recv() => {
            info!("Shutdown signal received");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    // Graceful shutdown
    info!("Daemon shutting down gracefully");

    // Clean up socket file
    let _ = std::fs::remove_file(&socket_path);

    info!("Daemon stopped");
    Ok(())
}
