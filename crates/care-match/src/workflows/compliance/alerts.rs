use chrono::{DateTime, Duration, Utc};

use crate::domain::{ComplianceDocument, DocumentType, SupportWorkerProfile};

use super::views::{AlertResponseStatus, AlertSeverity, ComplianceAlert};

const CRITICAL_WINDOW_DAYS: i64 = 7;
const WARNING_WINDOW_DAYS: i64 = 30;
const INFO_WINDOW_DAYS: i64 = 60;

/// Whole days until `expiry`, rounded up at full clock precision. Negative once the
/// document has lapsed.
pub fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let remaining = expiry - now;
    let whole_days = remaining.num_days();
    if remaining - Duration::days(whole_days) > Duration::zero() {
        whole_days + 1
    } else {
        whole_days
    }
}

/// Alerts for every dated document expiring within 60 days (or already expired), most
/// urgent first.
pub fn generate_compliance_alerts(
    workers: &[SupportWorkerProfile],
    now: DateTime<Utc>,
) -> Vec<ComplianceAlert> {
    let mut alerts: Vec<ComplianceAlert> = workers
        .iter()
        .flat_map(|worker| {
            worker
                .compliance_status
                .documents
                .iter()
                .filter_map(move |(document_type, document)| {
                    evaluate_document(worker, *document_type, document, now)
                })
        })
        .collect();

    sort_alerts(&mut alerts);
    alerts
}

pub(crate) fn sort_alerts(alerts: &mut [ComplianceAlert]) {
    alerts.sort_by_key(|alert| (alert.severity, alert.days_until_due.unwrap_or(0)));
}

fn evaluate_document(
    worker: &SupportWorkerProfile,
    document_type: DocumentType,
    document: &ComplianceDocument,
    now: DateTime<Utc>,
) -> Option<ComplianceAlert> {
    let expiry = document.expiry_date?;
    let days = days_until(expiry, now);
    let label = document_type.label();

    let (severity, message, action) = if days < 0 {
        (
            AlertSeverity::Critical,
            format!("{label} expired {} days ago", -days),
            "Immediate renewal required — worker suspended",
        )
    } else if days <= CRITICAL_WINDOW_DAYS {
        (
            AlertSeverity::Critical,
            format!("{label} expires in {days} days"),
            "Urgent renewal required",
        )
    } else if days <= WARNING_WINDOW_DAYS {
        (
            AlertSeverity::Warning,
            format!("{label} expires in {days} days"),
            "Schedule renewal within 30 days",
        )
    } else if days <= INFO_WINDOW_DAYS {
        (
            AlertSeverity::Info,
            format!("{label} expires in {days} days"),
            "Plan renewal",
        )
    } else {
        return None;
    };

    Some(ComplianceAlert {
        id: format!("{}-{}", worker.id, document_type.key()),
        worker_id: worker.id.clone(),
        document_type: label.to_string(),
        document_key: document_type,
        severity,
        message,
        due_date: Some(expiry),
        days_until_due: Some(days),
        action_required: action.to_string(),
        response_status: AlertResponseStatus::Pending,
        reminders_sent: document.reminders_sent,
    })
}
