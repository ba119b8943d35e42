use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::audit::{details, AuditAction, AuditLog};
use crate::batch::{run_batch, BatchOutcome};
use crate::domain::WorkerId;

use super::views::ComplianceAlert;

/// Rendered reminder handed to the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReminder {
    pub alert_id: String,
    pub worker_id: WorkerId,
    pub subject: String,
    pub body: String,
}

impl ComplianceReminder {
    pub fn from_alert(alert: &ComplianceAlert) -> Self {
        let due = alert
            .due_date
            .map(|date| date.format("%d %B %Y").to_string())
            .unwrap_or_else(|| "not recorded".to_string());

        let subject = format!(
            "[{}] {} renewal for worker {}",
            alert.severity.label(),
            alert.document_type,
            alert.worker_id
        );
        let body = format!(
            "{}.\nExpiry date: {}\nAction required: {}\nReminders previously sent: {}",
            alert.message, due, alert.action_required, alert.reminders_sent
        );

        Self {
            alert_id: alert.id.clone(),
            worker_id: alert.worker_id.clone(),
            subject,
            body,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
    #[error("no contact details on file for worker {0}")]
    MissingContact(WorkerId),
}

#[derive(Debug, thiserror::Error)]
pub enum StatusStoreError {
    #[error("worker {0} not found")]
    NotFound(WorkerId),
    #[error("status store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound reminder channel (e-mail, SMS, ...).
pub trait ComplianceNotifier: Send + Sync {
    fn send_reminder(&self, reminder: ComplianceReminder) -> Result<(), NotificationError>;
}

/// Persistence hook used to take non-compliant workers off the roster.
pub trait WorkerStatusStore: Send + Sync {
    fn suspend(&self, worker_id: &WorkerId, reason: &str) -> Result<(), StatusStoreError>;
}

/// Performs the side effects the evaluator only recommends.
pub struct ComplianceActionService<N, S> {
    notifier: Arc<N>,
    status_store: Arc<S>,
    audit: Arc<AuditLog>,
}

impl<N, S> ComplianceActionService<N, S>
where
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    pub fn new(notifier: Arc<N>, status_store: Arc<S>, audit: Arc<AuditLog>) -> Self {
        Self {
            notifier,
            status_store,
            audit,
        }
    }

    /// Send one reminder per alert, keyed by alert id.
    pub fn dispatch_reminders(
        &self,
        actor: &str,
        alerts: &[ComplianceAlert],
    ) -> BatchOutcome<String> {
        let outcome = run_batch(
            alerts,
            |alert| alert.id.clone(),
            |alert| {
                let result = self
                    .notifier
                    .send_reminder(ComplianceReminder::from_alert(alert));
                let (action, mut entry_details) = match &result {
                    Ok(()) => (AuditAction::ReminderSent, details([])),
                    Err(err) => {
                        warn!(alert_id = %alert.id, error = %err, "compliance reminder failed");
                        (
                            AuditAction::ReminderFailed,
                            details([("error", err.to_string())]),
                        )
                    }
                };
                entry_details.insert("worker_id".to_string(), alert.worker_id.to_string());
                entry_details.insert("severity".to_string(), alert.severity.label().to_string());
                self.audit
                    .record(actor, action, alert.id.clone(), entry_details);
                result
            },
        );

        info!(
            sent = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "compliance reminders dispatched"
        );
        outcome
    }

    /// Suspend each worker holding an already-expired document, once per worker.
    pub fn suspend_expired(
        &self,
        actor: &str,
        alerts: &[ComplianceAlert],
    ) -> BatchOutcome<WorkerId> {
        let mut seen = BTreeSet::new();
        let targets: Vec<&ComplianceAlert> = alerts
            .iter()
            .filter(|alert| alert.is_expired())
            .filter(|alert| seen.insert(alert.worker_id.clone()))
            .collect();

        let outcome = run_batch(
            targets,
            |alert| alert.worker_id.clone(),
            |alert| {
                let worker_id = &alert.worker_id;
                let result = self.status_store.suspend(worker_id, &alert.message);
                match &result {
                    Ok(()) => {
                        self.audit.record(
                            actor,
                            AuditAction::WorkerSuspended,
                            worker_id.to_string(),
                            details([("reason", alert.message.clone())]),
                        );
                    }
                    Err(err) => {
                        warn!(%worker_id, error = %err, "worker suspension failed");
                        self.audit.record(
                            actor,
                            AuditAction::SuspensionFailed,
                            worker_id.to_string(),
                            details([("error", err.to_string())]),
                        );
                    }
                }
                result
            },
        );

        info!(
            suspended = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "expired workers suspended"
        );
        outcome
    }
}
