//! CSV/JSON renditions of match lists, alerts and reports for download.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::compliance::{ComplianceAlert, ComplianceReport};
use crate::workflows::matching::WorkerMatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}' (expected csv or json)")]
    UnsupportedFormat(String),
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export buffer could not be flushed: {0}")]
    Flush(String),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct MatchRow<'a> {
    rank: usize,
    worker_id: &'a str,
    match_score: String,
    distance_km: String,
    travel_time_minutes: u32,
    estimated_cost: String,
    is_available: bool,
    risk_compatibility: bool,
    factors: String,
}

#[derive(Serialize)]
struct AlertRow<'a> {
    id: &'a str,
    worker_id: &'a str,
    document_type: &'a str,
    severity: &'static str,
    days_until_due: Option<i64>,
    due_date: Option<String>,
    message: &'a str,
    action_required: &'a str,
    reminders_sent: u32,
}

#[derive(Serialize)]
struct ReportRow<'a> {
    document_type: &'a str,
    total_required: usize,
    compliant: usize,
    expiring_soon: usize,
    expired: usize,
    compliance_rate: String,
}

pub fn export_matches(
    matches: &[WorkerMatchResult],
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(matches)?),
        ExportFormat::Csv => write_csv(matches.iter().enumerate().map(|(index, result)| MatchRow {
            rank: index + 1,
            worker_id: result.worker_id.as_str(),
            match_score: format!("{:.1}", result.match_score),
            distance_km: format!("{:.1}", result.distance_km),
            travel_time_minutes: result.travel_time_minutes,
            estimated_cost: format!("{:.2}", result.estimated_cost),
            is_available: result.availability.is_available,
            risk_compatibility: result.risk_compatibility,
            factors: result
                .factors
                .iter()
                .map(|factor| format!("{}: {}", factor.category.label(), factor.description))
                .collect::<Vec<_>>()
                .join(" | "),
        })),
    }
}

pub fn export_alerts(
    alerts: &[ComplianceAlert],
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(alerts)?),
        ExportFormat::Csv => write_csv(alerts.iter().map(|alert| AlertRow {
            id: &alert.id,
            worker_id: alert.worker_id.as_str(),
            document_type: &alert.document_type,
            severity: alert.severity.label(),
            days_until_due: alert.days_until_due,
            due_date: alert.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
            message: &alert.message,
            action_required: &alert.action_required,
            reminders_sent: alert.reminders_sent,
        })),
    }
}

/// JSON keeps the full report; CSV flattens it to one row per document type.
pub fn export_report(report: &ComplianceReport, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ExportFormat::Csv => write_csv(report.document_breakdown.iter().map(|summary| ReportRow {
            document_type: &summary.label,
            total_required: summary.total_required,
            compliant: summary.compliant,
            expiring_soon: summary.expiring_soon,
            expired: summary.expired,
            compliance_rate: format!("{:.1}", summary.compliance_rate),
        })),
    }
}

fn write_csv<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentType, WorkerId};
    use crate::workflows::compliance::{AlertResponseStatus, AlertSeverity};
    use chrono::{TimeZone, Utc};

    fn alert() -> ComplianceAlert {
        ComplianceAlert {
            id: "w-1-police_check".to_string(),
            worker_id: WorkerId::new("w-1"),
            document_type: "Police Check".to_string(),
            document_key: DocumentType::PoliceCheck,
            severity: AlertSeverity::Warning,
            message: "Police Check expires in 12 days, renew soon".to_string(),
            due_date: Some(Utc.with_ymd_and_hms(2025, 6, 13, 0, 0, 0).unwrap()),
            days_until_due: Some(12),
            action_required: "Schedule renewal within 30 days".to_string(),
            response_status: AlertResponseStatus::Pending,
            reminders_sent: 1,
        }
    }

    #[test]
    fn alerts_export_as_csv_with_header() {
        let csv = export_alerts(&[alert()], ExportFormat::Csv).expect("csv renders");
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("id,worker_id,document_type,severity,days_until_due,due_date,message,action_required,reminders_sent")
        );
        let row = lines.next().expect("data row");
        assert!(row.starts_with("w-1-police_check,w-1,Police Check,Warning,12,2025-06-13,"));
        assert!(row.contains("\"Police Check expires in 12 days, renew soon\""));
    }

    #[test]
    fn alerts_export_as_json_array() {
        let json = export_alerts(&[alert()], ExportFormat::Json).expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value[0]["severity"], "warning");
        assert_eq!(value[0]["document_key"], "police_check");
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }
}
