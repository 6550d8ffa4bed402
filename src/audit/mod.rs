use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;

/// One recorded mutation of the role store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub at: String,
    pub action: String,
    pub target_type: String,
    pub target_id: String,
    pub details: Value,
}

/// Bounded, in-memory audit trail. Oldest entries go first once `retention`
/// is exceeded.
#[derive(Debug, Clone)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    retention: usize,
}

impl Default for AuditLog {
    fn default() -> Self {
        AuditLog::new(Self::DEFAULT_RETENTION)
    }
}

impl AuditLog {
    pub const DEFAULT_RETENTION: usize = 500;

    pub fn new(retention: usize) -> Self {
        AuditLog {
            entries: VecDeque::new(),
            retention: retention.max(1),
        }
    }

    pub fn log(&mut self, action: &str, target_type: &str, target_id: &str, details: Value) {
        log::debug!("audit {action} {target_type}:{target_id}");
        self.entries.push_back(AuditEntry {
            at: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            action: action.to_string(),
            target_type: target_type.to_string(),
            target_id: target_id.to_string(),
            details,
        });
        self.cleanup_old_entries();
    }

    /// Drop entries beyond the retention limit. Returns how many were removed.
    pub fn cleanup_old_entries(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.retention);
        self.entries.drain(..excess);
        excess
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn set_retention(&mut self, retention: usize) {
        self.retention = retention.max(1);
        let removed = self.cleanup_old_entries();
        if removed > 0 {
            log::info!("Audit retention lowered to {}, dropped {removed} entries", self.retention);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AuditEntry> {
        self.entries.back()
    }

    /// Entries with the given action, oldest first.
    pub fn find_by_action<'a>(&'a self, action: &'a str) -> impl Iterator<Item = &'a AuditEntry> {
        self.entries.iter().filter(move |e| e.action == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
