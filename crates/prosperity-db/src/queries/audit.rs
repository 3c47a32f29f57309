//! Audit trail query functions.

use rusqlite::Connection;

use prosperity_types::audit::{AuditAction, AuditEntry};

use crate::{DbError, Result};

/// Append one audit entry to the durable log.
pub fn insert(conn: &Connection, entry: &AuditEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO audit_log (entry_id, timestamp, actor, action, details)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            entry.id as i64,
            entry.timestamp as i64,
            entry.actor,
            entry.action.as_str(),
            entry.details,
        ],
    )?;
    Ok(())
}

/// Total number of durable audit rows.
pub fn count(conn: &Connection) -> Result<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM audit_log", [], |row| row.get(0))
        .map_err(DbError::Sqlite)?;
    Ok(count as u64)
}

/// The most recent entries, newest first, optionally filtered by action.
pub fn recent(conn: &Connection, limit: u32, action: Option<AuditAction>) -> Result<Vec<AuditEntry>> {
    let mut out = Vec::new();
    match action {
        Some(action) => {
            let mut stmt = conn.prepare(
                "SELECT entry_id, timestamp, actor, action, details FROM audit_log
                 WHERE action = ?1 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(rusqlite::params![action.as_str(), limit], row_to_entry)?;
            for row in rows {
                out.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT entry_id, timestamp, actor, action, details FROM audit_log
                 ORDER BY id DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(rusqlite::params![limit], row_to_entry)?;
            for row in rows {
                out.push(row?);
            }
        }
    }
    Ok(out)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEntry> {
    let entry_id: i64 = row.get(0)?;
    let timestamp: i64 = row.get(1)?;
    let actor: String = row.get(2)?;
    let action_tag: String = row.get(3)?;
    let details: String = row.get(4)?;
    let action = AuditAction::parse(&action_tag).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown audit action tag: {action_tag}").into(),
        )
    })?;
    Ok(AuditEntry {
        id: entry_id as u64,
        timestamp: timestamp as u64,
        actor,
        action,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, action: AuditAction) -> AuditEntry {
        AuditEntry {
            id,
            timestamp: 1_700_000_000 + id,
            actor: "0xSovereign".to_string(),
            action,
            details: format!("entry {id}"),
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = crate::open_memory().expect("open");
        insert(&conn, &entry(1, AuditAction::ZakatContributed)).expect("insert");
        insert(&conn, &entry(2, AuditAction::RevenueDistributed)).expect("insert");
        assert_eq!(count(&conn).expect("count"), 2);
    }

    #[test]
    fn test_recent_newest_first_with_filter() {
        let conn = crate::open_memory().expect("open");
        insert(&conn, &entry(1, AuditAction::YieldRecorded)).expect("insert");
        insert(&conn, &entry(2, AuditAction::RevenueDistributed)).expect("insert");
        insert(&conn, &entry(3, AuditAction::YieldRecorded)).expect("insert");

        let all = recent(&conn, 10, None).expect("recent");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, 3);

        let filtered = recent(&conn, 10, Some(AuditAction::YieldRecorded)).expect("recent");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.action == AuditAction::YieldRecorded));
    }

    #[test]
    fn test_entry_ids_may_repeat_across_restarts() {
        // Two process lifetimes both write entry_id 1; both rows survive.
        let conn = crate::open_memory().expect("open");
        insert(&conn, &entry(1, AuditAction::ZakatContributed)).expect("insert");
        insert(&conn, &entry(1, AuditAction::ZakatContributed)).expect("insert");
        assert_eq!(count(&conn).expect("count"), 2);
    }
}
