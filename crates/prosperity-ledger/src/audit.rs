//! Bounded audit log.
//!
//! Every mutating ledger operation appends exactly one entry. The in-memory
//! log is authoritative and capped at [`AUDIT_LOG_CAP`] entries,
//! oldest-evicted-first; ids keep increasing across evictions. An optional
//! [`AuditSink`] receives a copy of each appended entry for external
//! retention. Sink delivery is best-effort and never fails or rolls back
//! the operation that produced the entry.

use std::collections::VecDeque;

use prosperity_types::audit::{AuditAction, AuditEntry};
use prosperity_types::{Timestamp, AUDIT_LOG_CAP};

/// External append-only destination for audit entries.
///
/// Implementations log their own failures; the ledger does not observe
/// them.
pub trait AuditSink: Send + Sync {
    /// Record a copy of a freshly appended entry.
    fn append(&mut self, entry: &AuditEntry);
}

/// The bounded in-memory audit log.
pub struct AuditLog {
    /// Oldest first; newest at the back.
    entries: VecDeque<AuditEntry>,
    next_id: u64,
    cap: usize,
    sink: Option<Box<dyn AuditSink>>,
}

impl AuditLog {
    /// Create an empty log with the standard retention cap.
    pub fn new() -> Self {
        Self::with_capacity(AUDIT_LOG_CAP)
    }

    /// Create an empty log with a custom retention cap.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(64)),
            next_id: 0,
            cap,
            sink: None,
        }
    }

    /// Attach an external sink. Replaces any previous sink.
    pub fn set_sink(&mut self, sink: Box<dyn AuditSink>) {
        self.sink = Some(sink);
    }

    /// Append one entry, evicting the oldest past the cap.
    ///
    /// Returns the assigned id.
    pub fn append(
        &mut self,
        timestamp: Timestamp,
        actor: &str,
        action: AuditAction,
        details: String,
    ) -> u64 {
        self.next_id += 1;
        let entry = AuditEntry {
            id: self.next_id,
            timestamp,
            actor: actor.to_string(),
            action,
            details,
        };

        if let Some(sink) = self.sink.as_mut() {
            sink.append(&entry);
        }

        self.entries.push_back(entry);
        if self.entries.len() > self.cap {
            self.entries.pop_front();
        }

        self.next_id
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entries, newest first, optionally filtered by action.
    pub fn recent(&self, limit: usize, action: Option<AuditAction>) -> Vec<AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| action.map_or(true, |a| e.action == a))
            .take(limit)
            .cloned()
            .collect()
    }

    /// All retained entries, oldest first.
    pub fn all(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Distinct actions present in the log, in order of first appearance.
    pub fn actions(&self) -> Vec<AuditAction> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.action) {
                seen.push(entry.action);
            }
        }
        seen
    }

    /// Export the retained log as CSV, oldest first.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("id,timestamp,actor,action,details\n");
        for entry in &self.entries {
            // Details may contain commas; embedded quotes are doubled.
            let details = entry.details.replace('"', "\"\"");
            out.push_str(&format!(
                "{},{},{},{},\"{}\"\n",
                entry.id, entry.timestamp, entry.actor, entry.action, details
            ));
        }
        out
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}
