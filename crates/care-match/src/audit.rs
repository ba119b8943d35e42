//! Append-then-forward audit trail, constructed once at start-up and shared by `Arc`.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    MatchRequested,
    ComplianceEvaluated,
    ReminderSent,
    ReminderFailed,
    WorkerSuspended,
    SuspensionFailed,
    ShiftAssigned,
    ShiftAssignmentFailed,
    DataExported,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MatchRequested => "match_requested",
            Self::ComplianceEvaluated => "compliance_evaluated",
            Self::ReminderSent => "reminder_sent",
            Self::ReminderFailed => "reminder_failed",
            Self::WorkerSuspended => "worker_suspended",
            Self::SuspensionFailed => "suspension_failed",
            Self::ShiftAssigned => "shift_assigned",
            Self::ShiftAssignmentFailed => "shift_assignment_failed",
            Self::DataExported => "data_exported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub sequence: u64,
    pub recorded_at: DateTime<Utc>,
    pub actor: String,
    pub action: AuditAction,
    pub target: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuditSinkError {
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Downstream destination for audit entries once they are appended locally.
pub trait AuditSink: Send + Sync {
    fn forward(&self, entry: &AuditEntry) -> Result<(), AuditSinkError>;
}

/// Forwards entries as structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn forward(&self, entry: &AuditEntry) -> Result<(), AuditSinkError> {
        info!(
            sequence = entry.sequence,
            actor = %entry.actor,
            action = entry.action.label(),
            target = %entry.target,
            "audit"
        );
        Ok(())
    }
}

#[derive(Default)]
struct AuditState {
    next_sequence: u64,
    entries: VecDeque<AuditEntry>,
}

pub struct AuditLog {
    clock: Arc<dyn Clock>,
    sink: Arc<dyn AuditSink>,
    retention: Option<usize>,
    state: Mutex<AuditState>,
}

impl AuditLog {
    pub fn new(clock: Arc<dyn Clock>, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            clock,
            sink,
            retention: None,
            state: Mutex::new(AuditState::default()),
        }
    }

    /// Keep at most `max_entries` locally, dropping the oldest first. Sequence numbers keep
    /// counting, and every entry is still forwarded to the sink.
    pub fn with_retention(mut self, max_entries: usize) -> Self {
        self.retention = Some(max_entries.max(1));
        self
    }

    /// Append an entry, then forward it. Sink failures are logged and the entry is kept.
    pub fn record(
        &self,
        actor: &str,
        action: AuditAction,
        target: impl Into<String>,
        details: BTreeMap<String, String>,
    ) -> AuditEntry {
        let entry = {
            let mut state = self.lock();
            state.next_sequence += 1;
            let entry = AuditEntry {
                sequence: state.next_sequence,
                recorded_at: self.clock.now(),
                actor: actor.to_string(),
                action,
                target: target.into(),
                details,
            };
            state.entries.push_back(entry.clone());
            if let Some(max_entries) = self.retention {
                while state.entries.len() > max_entries {
                    state.entries.pop_front();
                }
            }
            entry
        };

        if let Err(err) = self.sink.forward(&entry) {
            warn!(sequence = entry.sequence, error = %err, "audit entry not forwarded");
        }

        entry
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Newest matching entries first, filtered under the lock and capped at `limit`.
    pub fn query(
        &self,
        action: Option<AuditAction>,
        target: Option<&str>,
        limit: usize,
    ) -> Vec<AuditEntry> {
        self.lock()
            .entries
            .iter()
            .rev()
            .filter(|entry| action.map_or(true, |action| entry.action == action))
            .filter(|entry| target.map_or(true, |target| entry.target == target))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Newest entries first.
    pub fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        self.lock()
            .entries
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn by_action(&self, action: AuditAction) -> Vec<AuditEntry> {
        self.lock()
            .entries
            .iter()
            .filter(|entry| entry.action == action)
            .cloned()
            .collect()
    }

    pub fn for_target(&self, target: &str) -> Vec<AuditEntry> {
        self.lock()
            .entries
            .iter()
            .filter(|entry| entry.target == target)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AuditState> {
        // Entries are only ever appended, so a poisoned lock still holds a consistent log.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLog")
            .field("entries", &self.len())
            .field("retention", &self.retention)
            .finish()
    }
}

pub(crate) fn details<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
