//! Audit Trail Module
//!
//! Bounded in-memory record of catalog actions, mirrored to tracing.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

// == Audit Action ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    Search,
    SearchCacheHit,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AddProduct => "ADD_PRODUCT",
            AuditAction::UpdateProduct => "UPDATE_PRODUCT",
            AuditAction::DeleteProduct => "DELETE_PRODUCT",
            AuditAction::Search => "SEARCH",
            AuditAction::SearchCacheHit => "SEARCH_CACHE_HIT",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Audit Entry ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub action: AuditAction,
    pub details: String,
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] user={} action={} details={}",
            self.timestamp.to_rfc3339(),
            self.username,
            self.action,
            self.details
        )
    }
}

// == Audit Log ==
/// Keeps the most recent `capacity` entries, oldest first.
#[derive(Debug)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    capacity: usize,
}

impl AuditLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends an entry, dropping the oldest one when full.
    pub fn record(&mut self, username: &str, action: AuditAction, details: impl Into<String>) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            username: username.to_string(),
            action,
            details: details.into(),
        };
        info!(target: "audit", "{}", entry);

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Copy of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }
}
