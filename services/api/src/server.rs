use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotifier, InMemoryStatusStore};
use crate::routes::with_care_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_match::audit::{AuditLog, TracingAuditSink};
use care_match::clock::{Clock, SystemClock};
use care_match::config::AppConfig;
use care_match::error::AppError;
use care_match::router::CareApi;
use care_match::telemetry;
use care_match::workflows::compliance::{ComplianceActionService, ComplianceEvaluator};
use care_match::workflows::shifts::{InMemoryShiftRepository, ShiftAssignmentService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let audit = Arc::new(
        AuditLog::new(clock.clone(), Arc::new(TracingAuditSink))
            .with_retention(config.audit.retention),
    );
    let api = Arc::new(CareApi {
        evaluator: ComplianceEvaluator::new(clock),
        actions: ComplianceActionService::new(
            Arc::new(InMemoryNotifier::default()),
            Arc::new(InMemoryStatusStore::default()),
            audit.clone(),
        ),
        assignments: ShiftAssignmentService::new(
            Arc::new(InMemoryShiftRepository::default()),
            audit.clone(),
        ),
        audit,
        matching: config.matching,
        compliance: config.compliance,
    });

    let app = with_care_routes(api)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        match_limit = config.matching.result_limit,
        suspend_expired = config.compliance.suspend_expired,
        "care match service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
