use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DocumentType, WorkerId};

/// Ordered most urgent first, so sorting by severity puts critical alerts at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertResponseStatus {
    Pending,
    Acknowledged,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceAlert {
    pub id: String,
    pub worker_id: WorkerId,
    pub document_type: String,
    pub document_key: DocumentType,
    pub severity: AlertSeverity,
    pub message: String,
    pub due_date: Option<DateTime<Utc>>,
    pub days_until_due: Option<i64>,
    pub action_required: String,
    pub response_status: AlertResponseStatus,
    pub reminders_sent: u32,
}

impl ComplianceAlert {
    pub fn is_expired(&self) -> bool {
        self.days_until_due.map(|days| days < 0).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentComplianceSummary {
    pub document_type: DocumentType,
    pub label: String,
    pub total_required: usize,
    pub compliant: usize,
    pub expiring_soon: usize,
    pub expired: usize,
    pub compliance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub generated_at: DateTime<Utc>,
    pub total_workers: usize,
    pub compliant_workers: usize,
    pub overall_compliance_rate: f64,
    pub document_breakdown: Vec<DocumentComplianceSummary>,
    pub critical_alerts: usize,
    pub warning_alerts: usize,
}
