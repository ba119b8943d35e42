use chrono::{DateTime, Utc};

use crate::domain::{DocumentStatus, DocumentType, SupportWorkerProfile};

use super::alerts::{days_until, generate_compliance_alerts};
use super::views::{AlertSeverity, ComplianceReport, DocumentComplianceSummary};

const EXPIRING_SOON_DAYS: i64 = 30;

/// Percentage of `part` in `whole`; an empty population is reported as 0%.
fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn generate_compliance_report(
    workers: &[SupportWorkerProfile],
    now: DateTime<Utc>,
) -> ComplianceReport {
    let total_workers = workers.len();
    let compliant_workers = workers
        .iter()
        .filter(|worker| worker.compliance_status.is_compliant())
        .count();

    let document_breakdown = DocumentType::reported()
        .into_iter()
        .map(|document_type| summarize_document(workers, document_type, now))
        .collect();

    let alerts = generate_compliance_alerts(workers, now);
    let count_severity = |severity: AlertSeverity| {
        alerts
            .iter()
            .filter(|alert| alert.severity == severity)
            .count()
    };

    ComplianceReport {
        generated_at: now,
        total_workers,
        compliant_workers,
        overall_compliance_rate: rate(compliant_workers, total_workers),
        document_breakdown,
        critical_alerts: count_severity(AlertSeverity::Critical),
        warning_alerts: count_severity(AlertSeverity::Warning),
    }
}

fn summarize_document(
    workers: &[SupportWorkerProfile],
    document_type: DocumentType,
    now: DateTime<Utc>,
) -> DocumentComplianceSummary {
    let total_required = workers.len();
    let mut compliant = 0;
    let mut expiring_soon = 0;
    let mut expired = 0;

    for document in workers
        .iter()
        .filter_map(|worker| worker.compliance_status.document(document_type))
    {
        if document.status == DocumentStatus::Approved {
            compliant += 1;
        }

        if let Some(expiry) = document.expiry_date {
            let days = days_until(expiry, now);
            if days < 0 {
                expired += 1;
            } else if days <= EXPIRING_SOON_DAYS {
                expiring_soon += 1;
            }
        }
    }

    DocumentComplianceSummary {
        document_type,
        label: document_type.label().to_string(),
        total_required,
        compliant,
        expiring_soon,
        expired,
        compliance_rate: rate(compliant, total_required),
    }
}
