use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::audit::{AuditLog, TracingAuditSink};
use crate::clock::FixedClock;
use crate::domain::{
    ComplianceDocument, ComplianceStatus, DocumentStatus, DocumentType, OverallComplianceStatus,
    PerformanceMetrics, SupportWorkerProfile, WorkerId,
};
use crate::workflows::compliance::{
    ComplianceNotifier, ComplianceReminder, NotificationError, StatusStoreError,
    WorkerStatusStore,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap()
}

pub(super) fn expiring_in(days: i64) -> ComplianceDocument {
    ComplianceDocument {
        status: DocumentStatus::Approved,
        expiry_date: Some(now() + Duration::days(days)),
        reminders_sent: 0,
        reviewed_at: None,
    }
}

pub(super) fn undated(status: DocumentStatus) -> ComplianceDocument {
    ComplianceDocument {
        status,
        expiry_date: None,
        reminders_sent: 0,
        reviewed_at: None,
    }
}

pub(super) fn worker_with(
    id: &str,
    overall_status: OverallComplianceStatus,
    documents: Vec<(DocumentType, ComplianceDocument)>,
) -> SupportWorkerProfile {
    SupportWorkerProfile {
        id: WorkerId::new(id),
        address: "1 Near St".to_string(),
        hourly_rate: 55.0,
        service_categories: BTreeSet::new(),
        qualifications: Vec::new(),
        availability: Vec::new(),
        performance_metrics: PerformanceMetrics {
            average_rating: 4.0,
            total_services_completed: 10,
        },
        compliance_status: ComplianceStatus {
            documents: documents.into_iter().collect::<BTreeMap<_, _>>(),
            overall_status,
            last_review_date: None,
            next_review_date: None,
        },
    }
}

pub(super) fn worker_with_document(id: &str, document: ComplianceDocument) -> SupportWorkerProfile {
    worker_with(
        id,
        OverallComplianceStatus::Compliant,
        vec![(DocumentType::PoliceCheck, document)],
    )
}

pub(super) fn audit_log() -> Arc<AuditLog> {
    Arc::new(AuditLog::new(
        Arc::new(FixedClock(now())),
        Arc::new(TracingAuditSink),
    ))
}

#[derive(Default)]
pub(super) struct RecordingNotifier {
    failing_workers: Vec<WorkerId>,
    sent: Mutex<Vec<ComplianceReminder>>,
}

impl RecordingNotifier {
    pub(super) fn failing_for(worker_id: &str) -> Self {
        Self {
            failing_workers: vec![WorkerId::new(worker_id)],
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn sent(&self) -> Vec<ComplianceReminder> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ComplianceNotifier for RecordingNotifier {
    fn send_reminder(&self, reminder: ComplianceReminder) -> Result<(), NotificationError> {
        if self.failing_workers.contains(&reminder.worker_id) {
            return Err(NotificationError::MissingContact(reminder.worker_id));
        }
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(reminder);
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct RecordingStatusStore {
    unavailable: bool,
    suspended: Mutex<Vec<WorkerId>>,
}

impl RecordingStatusStore {
    pub(super) fn offline() -> Self {
        Self {
            unavailable: true,
            suspended: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn suspended(&self) -> Vec<WorkerId> {
        self.suspended
            .lock()
            .expect("status mutex poisoned")
            .clone()
    }
}

impl WorkerStatusStore for RecordingStatusStore {
    fn suspend(&self, worker_id: &WorkerId, _reason: &str) -> Result<(), StatusStoreError> {
        if self.unavailable {
            return Err(StatusStoreError::Unavailable("database offline".to_string()));
        }
        self.suspended
            .lock()
            .expect("status mutex poisoned")
            .push(worker_id.clone());
        Ok(())
    }
}
