//! Expiry alerting and aggregate reporting over worker credential registers.

mod actions;
mod alerts;
mod report;
mod views;

#[cfg(test)]
mod tests;

pub use actions::{
    ComplianceActionService, ComplianceNotifier, ComplianceReminder, NotificationError,
    StatusStoreError, WorkerStatusStore,
};
pub use alerts::{days_until, generate_compliance_alerts};
pub use report::generate_compliance_report;
pub use views::{
    AlertResponseStatus, AlertSeverity, ComplianceAlert, ComplianceReport,
    DocumentComplianceSummary,
};

use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::domain::SupportWorkerProfile;

/// Clock-bound front for the pure alert and report generators.
#[derive(Clone)]
pub struct ComplianceEvaluator {
    clock: Arc<dyn Clock>,
}

impl Default for ComplianceEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ComplianceEvaluator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn alerts(&self, workers: &[SupportWorkerProfile]) -> Vec<ComplianceAlert> {
        let alerts = generate_compliance_alerts(workers, self.clock.now());
        debug!(
            workers = workers.len(),
            alerts = alerts.len(),
            "compliance alerts generated"
        );
        alerts
    }

    pub fn report(&self, workers: &[SupportWorkerProfile]) -> ComplianceReport {
        generate_compliance_report(workers, self.clock.now())
    }
}

impl std::fmt::Debug for ComplianceEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceEvaluator")
            .field("now", &self.clock.now())
            .finish()
    }
}
