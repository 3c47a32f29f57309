//! Durable audit sink backed by SQLite.

use std::sync::Mutex;

use prosperity_ledger::audit::AuditSink;
use prosperity_types::audit::AuditEntry;
use rusqlite::Connection;
use tracing::warn;

/// Mirrors every audit entry into the `audit_log` table.
///
/// Appends are best-effort: a failed insert is logged and the originating
/// ledger operation proceeds unaffected.
pub struct SqliteAuditSink {
    // Mutex-wrapped so the sink is `Sync`; `rusqlite::Connection` is not.
    conn: Mutex<Connection>,
}

impl SqliteAuditSink {
    /// Wrap an open database connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Access the underlying connection, for inspection in tests.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AuditSink for SqliteAuditSink {
    fn append(&mut self, entry: &AuditEntry) {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = crate::queries::audit::insert(&conn, entry) {
            warn!("audit sink append failed for entry {}: {e}", entry.id);
        }
    }
}
