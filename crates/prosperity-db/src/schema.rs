//! SQL schema definitions.

/// Complete schema for the Prosperity v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Durable audit trail
-- ============================================================

-- entry_id is the ledger-assigned id, which restarts from 1 with each
-- process lifetime; rowid keys the durable history across restarts.
CREATE TABLE IF NOT EXISTS audit_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_id INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,
    actor TEXT NOT NULL,
    action TEXT NOT NULL,
    details TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audit_log_action ON audit_log(action);
CREATE INDEX IF NOT EXISTS idx_audit_log_timestamp ON audit_log(timestamp);
"#;
