//! JSON endpoints over the matching, compliance, assignment and audit workflows.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audit::{details, AuditAction, AuditEntry, AuditLog};
use crate::batch::BatchOutcome;
use crate::config::{ComplianceConfig, MatchingConfig};
use crate::domain::{
    ParticipantProfile, RequestId, ServiceRequest, Shift, ShiftId, SupportWorkerProfile, WorkerId,
};
use crate::error::AppError;
use crate::export::{export_alerts, export_report, ExportFormat};
use crate::workflows::compliance::{
    AlertSeverity, ComplianceActionService, ComplianceAlert, ComplianceEvaluator,
    ComplianceNotifier, ComplianceReport, WorkerStatusStore,
};
use crate::workflows::matching::{
    find_best_worker_matches, DistanceTable, RouteDistance, WorkerMatchResult,
};
use crate::workflows::shifts::{ShiftAssignmentService, ShiftRepository};

const DEFAULT_ACTOR: &str = "api";
const DEFAULT_AUDIT_PAGE: usize = 50;

/// Shared state behind every care route.
pub struct CareApi<R, N, S> {
    pub evaluator: ComplianceEvaluator,
    pub actions: ComplianceActionService<N, S>,
    pub assignments: ShiftAssignmentService<R>,
    pub audit: Arc<AuditLog>,
    pub matching: MatchingConfig,
    pub compliance: ComplianceConfig,
}

pub fn care_router<R, N, S>(api: Arc<CareApi<R, N, S>>) -> Router
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    Router::new()
        .route("/api/v1/matching/workers", post(match_workers::<R, N, S>))
        .route("/api/v1/compliance/alerts", post(compliance_alerts::<R, N, S>))
        .route("/api/v1/compliance/report", post(compliance_report::<R, N, S>))
        .route("/api/v1/compliance/export", post(compliance_export::<R, N, S>))
        .route(
            "/api/v1/compliance/reminders",
            post(compliance_reminders::<R, N, S>),
        )
        .route("/api/v1/shifts/assign", post(assign_shifts::<R, N, S>))
        .route("/api/v1/audit", get(audit_entries::<R, N, S>))
        .with_state(api)
}

#[derive(Debug, Deserialize)]
pub struct MatchWorkersRequest {
    pub request: ServiceRequest,
    pub participant: ParticipantProfile,
    pub candidates: Vec<SupportWorkerProfile>,
    #[serde(default)]
    pub existing_shifts: Vec<Shift>,
    /// Precomputed worker-to-participant distances.
    #[serde(default)]
    pub routes: Vec<RouteDistance>,
    /// Distance assumed for pairs missing from `routes`.
    #[serde(default)]
    pub fallback_km: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub actor: Option<String>,
}

impl MatchWorkersRequest {
    /// Rank the candidates and keep the best `limit`, falling back to `default_limit`.
    pub fn rank(&self, default_limit: usize) -> Result<Vec<WorkerMatchResult>, AppError> {
        let limit = self.limit.unwrap_or(default_limit);
        if limit == 0 {
            return Err(AppError::Input("limit must be at least 1".to_string()));
        }

        let mut distances = DistanceTable::from_routes(self.routes.iter().cloned());
        if let Some(fallback_km) = self.fallback_km {
            distances = distances.with_fallback(fallback_km);
        }

        let mut matches = find_best_worker_matches(
            &distances,
            &self.request,
            &self.participant,
            &self.candidates,
            &self.existing_shifts,
        )?;
        matches.truncate(limit);
        Ok(matches)
    }
}

#[derive(Debug, Serialize)]
pub struct MatchWorkersResponse {
    pub request_id: RequestId,
    pub total_candidates: usize,
    pub matches: Vec<WorkerMatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct WorkersPayload {
    pub workers: Vec<SupportWorkerProfile>,
    #[serde(default)]
    pub actor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
    pub alerts: Vec<ComplianceAlert>,
}

impl AlertsResponse {
    fn new(alerts: Vec<ComplianceAlert>) -> Self {
        let count = |severity: AlertSeverity| {
            alerts
                .iter()
                .filter(|alert| alert.severity == severity)
                .count()
        };
        Self {
            total: alerts.len(),
            critical: count(AlertSeverity::Critical),
            warning: count(AlertSeverity::Warning),
            info: count(AlertSeverity::Info),
            alerts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Alerts,
    Report,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub workers: Vec<SupportWorkerProfile>,
    pub kind: ExportKind,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub actor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemindersResponse {
    pub alerts: usize,
    pub reminders: BatchOutcome<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspensions: Option<BatchOutcome<WorkerId>>,
}

#[derive(Debug, Deserialize)]
pub struct AssignShiftsRequest {
    pub worker_id: WorkerId,
    pub shift_ids: Vec<ShiftId>,
    #[serde(default)]
    pub actor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub action: Option<AuditAction>,
    #[serde(default)]
    pub target: Option<String>,
}

fn actor(raw: &Option<String>) -> &str {
    raw.as_deref()
        .map(str::trim)
        .filter(|actor| !actor.is_empty())
        .unwrap_or(DEFAULT_ACTOR)
}

pub(crate) async fn match_workers<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<MatchWorkersRequest>,
) -> Result<Json<MatchWorkersResponse>, AppError>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let matches = payload.rank(api.matching.result_limit)?;

    api.audit.record(
        actor(&payload.actor),
        AuditAction::MatchRequested,
        payload.request.id.to_string(),
        details([
            ("candidates", payload.candidates.len().to_string()),
            ("returned", matches.len().to_string()),
        ]),
    );

    Ok(Json(MatchWorkersResponse {
        request_id: payload.request.id,
        total_candidates: payload.candidates.len(),
        matches,
    }))
}

pub(crate) async fn compliance_alerts<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<WorkersPayload>,
) -> Json<AlertsResponse>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let response = AlertsResponse::new(api.evaluator.alerts(&payload.workers));
    api.audit.record(
        actor(&payload.actor),
        AuditAction::ComplianceEvaluated,
        "alerts",
        details([
            ("workers", payload.workers.len().to_string()),
            ("alerts", response.total.to_string()),
        ]),
    );
    Json(response)
}

pub(crate) async fn compliance_report<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<WorkersPayload>,
) -> Json<ComplianceReport>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let report = api.evaluator.report(&payload.workers);
    api.audit.record(
        actor(&payload.actor),
        AuditAction::ComplianceEvaluated,
        "report",
        details([
            ("workers", report.total_workers.to_string()),
            ("compliance_rate", format!("{:.1}", report.overall_compliance_rate)),
        ]),
    );
    Json(report)
}

pub(crate) async fn compliance_export<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<ExportRequest>,
) -> Result<Response, AppError>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let (name, body) = match payload.kind {
        ExportKind::Alerts => (
            "compliance-alerts",
            export_alerts(&api.evaluator.alerts(&payload.workers), payload.format)?,
        ),
        ExportKind::Report => (
            "compliance-report",
            export_report(&api.evaluator.report(&payload.workers), payload.format)?,
        ),
    };
    let filename = format!("{name}.{}", payload.format.extension());

    api.audit.record(
        actor(&payload.actor),
        AuditAction::DataExported,
        filename.clone(),
        details([("bytes", body.len().to_string())]),
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, payload.format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

pub(crate) async fn compliance_reminders<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<WorkersPayload>,
) -> Json<RemindersResponse>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let actor = actor(&payload.actor);
    let alerts = api.evaluator.alerts(&payload.workers);
    let reminders = api.actions.dispatch_reminders(actor, &alerts);
    let suspensions = api
        .compliance
        .suspend_expired
        .then(|| api.actions.suspend_expired(actor, &alerts));

    info!(
        alerts = alerts.len(),
        reminder_failures = reminders.failed.len(),
        "compliance reminder run finished"
    );

    Json(RemindersResponse {
        alerts: alerts.len(),
        reminders,
        suspensions,
    })
}

pub(crate) async fn assign_shifts<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Json(payload): Json<AssignShiftsRequest>,
) -> Json<BatchOutcome<ShiftId>>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    Json(api.assignments.assign_many(
        actor(&payload.actor),
        &payload.worker_id,
        &payload.shift_ids,
    ))
}

pub(crate) async fn audit_entries<R, N, S>(
    State(api): State<Arc<CareApi<R, N, S>>>,
    Query(query): Query<AuditQuery>,
) -> Json<Vec<AuditEntry>>
where
    R: ShiftRepository + 'static,
    N: ComplianceNotifier + 'static,
    S: WorkerStatusStore + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_PAGE);
    let entries = api
        .audit
        .query(query.action, query.target.as_deref(), limit);
    Json(entries)
}
