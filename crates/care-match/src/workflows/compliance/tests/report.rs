use chrono::Duration;

use super::common::*;
use crate::domain::{DocumentStatus, DocumentType, OverallComplianceStatus};
use crate::workflows::compliance::generate_compliance_report;

#[test]
fn empty_worker_list_reports_zero_rates() {
    let report = generate_compliance_report(&[], now());

    assert_eq!(report.total_workers, 0);
    assert_eq!(report.overall_compliance_rate, 0.0);
    assert_eq!(report.document_breakdown.len(), 5);
    assert!(report
        .document_breakdown
        .iter()
        .all(|summary| summary.compliance_rate == 0.0 && summary.total_required == 0));
}

#[test]
fn overall_rate_counts_compliant_workers() {
    let workers = vec![
        worker_with("w-1", OverallComplianceStatus::Compliant, Vec::new()),
        worker_with("w-2", OverallComplianceStatus::NonCompliant, Vec::new()),
        worker_with("w-3", OverallComplianceStatus::PendingReview, Vec::new()),
        worker_with("w-4", OverallComplianceStatus::Suspended, Vec::new()),
    ];

    let report = generate_compliance_report(&workers, now());

    assert_eq!(report.compliant_workers, 1);
    assert_eq!(report.overall_compliance_rate, 25.0);
}

#[test]
fn breakdown_covers_the_five_required_documents() {
    let report = generate_compliance_report(&[], now());

    let types: Vec<DocumentType> = report
        .document_breakdown
        .iter()
        .map(|summary| summary.document_type)
        .collect();
    assert_eq!(types, DocumentType::reported().to_vec());
}

#[test]
fn breakdown_counts_approved_expiring_and_expired_documents() {
    let mut pending = expiring_in(45);
    pending.status = DocumentStatus::Pending;
    let workers = vec![
        worker_with(
            "w-1",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, expiring_in(10))],
        ),
        worker_with(
            "w-2",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, expiring_in(-4))],
        ),
        worker_with(
            "w-3",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, pending)],
        ),
        worker_with(
            "w-4",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, undated(DocumentStatus::Approved))],
        ),
    ];

    let report = generate_compliance_report(&workers, now());
    let police = report
        .document_breakdown
        .iter()
        .find(|summary| summary.document_type == DocumentType::PoliceCheck)
        .expect("police check summary");

    assert_eq!(police.total_required, 4);
    assert_eq!(police.compliant, 3);
    assert_eq!(police.expiring_soon, 1);
    assert_eq!(police.expired, 1);
    assert_eq!(police.compliance_rate, 75.0);
    assert_eq!(police.label, "Police Check");
    assert_eq!(report.critical_alerts, 1);
    assert_eq!(report.warning_alerts, 1);
}

#[test]
fn expiring_soon_window_respects_sub_second_remainders() {
    let mut just_outside = expiring_in(30);
    just_outside.expiry_date = just_outside
        .expiry_date
        .map(|expiry| expiry + Duration::milliseconds(400));
    let workers = vec![
        worker_with(
            "w-1",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, just_outside)],
        ),
        worker_with(
            "w-2",
            OverallComplianceStatus::Compliant,
            vec![(DocumentType::PoliceCheck, expiring_in(30))],
        ),
    ];

    let report = generate_compliance_report(&workers, now());
    let police = report
        .document_breakdown
        .iter()
        .find(|summary| summary.document_type == DocumentType::PoliceCheck)
        .expect("police check summary");

    assert_eq!(police.expiring_soon, 1);
    assert_eq!(report.warning_alerts, 1);
}
