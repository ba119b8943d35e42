use care_match::domain::validation;
use care_match::domain::{SupportWorkerProfile, WorkerId};
use care_match::error::AppError;
use care_match::export::ExportFormat;
use care_match::workflows::compliance::{
    ComplianceNotifier, ComplianceReminder, NotificationError, StatusStoreError,
    WorkerStatusStore,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Outbox standing in for the email/SMS gateway until one is wired up.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<ComplianceReminder>>>,
}

impl ComplianceNotifier for InMemoryNotifier {
    fn send_reminder(&self, reminder: ComplianceReminder) -> Result<(), NotificationError> {
        info!(
            alert_id = %reminder.alert_id,
            worker_id = %reminder.worker_id,
            subject = %reminder.subject,
            "compliance reminder queued"
        );
        let mut guard = self.sent.lock().expect("notifier mutex poisoned");
        guard.push(reminder);
        Ok(())
    }
}

impl InMemoryNotifier {
    #[cfg(test)]
    pub(crate) fn sent(&self) -> Vec<ComplianceReminder> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStatusStore {
    suspended: Arc<Mutex<BTreeMap<WorkerId, String>>>,
}

impl WorkerStatusStore for InMemoryStatusStore {
    fn suspend(&self, worker_id: &WorkerId, reason: &str) -> Result<(), StatusStoreError> {
        let mut guard = self.suspended.lock().expect("status mutex poisoned");
        guard.insert(worker_id.clone(), reason.to_string());
        Ok(())
    }
}

impl InMemoryStatusStore {
    #[cfg(test)]
    pub(crate) fn suspended(&self) -> Vec<WorkerId> {
        self.suspended
            .lock()
            .expect("status mutex poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

/// Worker files may hold a bare array or an object with a `workers` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WorkersFile {
    List(Vec<SupportWorkerProfile>),
    Wrapped { workers: Vec<SupportWorkerProfile> },
}

impl WorkersFile {
    pub(crate) fn into_workers(self) -> Vec<SupportWorkerProfile> {
        match self {
            WorkersFile::List(workers) | WorkersFile::Wrapped { workers } => workers,
        }
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| AppError::Input(format!("{}: {err}", path.display())))
}

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    validation::parse_timestamp(raw).map_err(|err| err.to_string())
}
