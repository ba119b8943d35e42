use crate::infra::{parse_format, parse_timestamp, read_json, WorkersFile};
use care_match::clock::{Clock, FixedClock, SystemClock};
use care_match::config::{AppConfig, MatchingConfig};
use care_match::domain::SupportWorkerProfile;
use care_match::error::AppError;
use care_match::export::{export_alerts, export_matches, export_report, ExportFormat};
use care_match::router::MatchWorkersRequest;
use care_match::workflows::compliance::{ComplianceAlert, ComplianceEvaluator, ComplianceReport};
use care_match::workflows::matching::WorkerMatchResult;
use chrono::{DateTime, Utc};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON file holding the request, participant, candidates and route distances
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Emit machine-readable output (json or csv) instead of a summary
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<ExportFormat>,
    /// Maximum number of ranked workers to return
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ComplianceArgs {
    /// JSON file holding worker profiles (array or {"workers": [...]})
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Reference time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Emit machine-readable output (json or csv) instead of a summary
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<ExportFormat>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let output = match_output(args, &config.matching)?;
    println!("{output}");
    Ok(())
}

/// Ranks the file's candidates. `--limit`, then the file's own `limit`, then the configured
/// default bound the result count.
pub(crate) fn match_output(args: MatchArgs, matching: &MatchingConfig) -> Result<String, AppError> {
    let MatchArgs {
        input,
        format,
        limit,
    } = args;

    let mut request: MatchWorkersRequest = read_json(&input)?;
    if limit.is_some() {
        request.limit = limit;
    }
    let matches = request.rank(matching.result_limit)?;

    Ok(match format {
        Some(format) => export_matches(&matches, format)?,
        None => render_matches(&request, &matches),
    })
}

pub(crate) fn run_compliance_alerts(args: ComplianceArgs) -> Result<(), AppError> {
    let (evaluator, workers, format) = load_compliance(args)?;
    let alerts = evaluator.alerts(&workers);

    let output = match format {
        Some(format) => export_alerts(&alerts, format)?,
        None => render_alerts(&alerts),
    };
    println!("{output}");
    Ok(())
}

pub(crate) fn run_compliance_report(args: ComplianceArgs) -> Result<(), AppError> {
    let (evaluator, workers, format) = load_compliance(args)?;
    let report = evaluator.report(&workers);

    let output = match format {
        Some(format) => export_report(&report, format)?,
        None => render_report(&report),
    };
    println!("{output}");
    Ok(())
}

type ComplianceInput = (
    ComplianceEvaluator,
    Vec<SupportWorkerProfile>,
    Option<ExportFormat>,
);

fn load_compliance(args: ComplianceArgs) -> Result<ComplianceInput, AppError> {
    let ComplianceArgs { input, now, format } = args;
    let workers = read_json::<WorkersFile>(&input)?.into_workers();
    let clock: Arc<dyn Clock> = match now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };
    Ok((ComplianceEvaluator::new(clock), workers, format))
}

pub(crate) fn render_matches(request: &MatchWorkersRequest, matches: &[WorkerMatchResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Worker matches for request {} ({} on {}, {:.1}h)",
        request.request.id,
        request.request.service_category.label(),
        request.request.preferred_date,
        request.request.duration_hours
    );
    let _ = writeln!(
        out,
        "- {} candidate(s) scored, showing {}",
        request.candidates.len(),
        matches.len()
    );

    for (rank, result) in matches.iter().enumerate() {
        let availability = if result.availability.is_available {
            "available"
        } else {
            "unavailable"
        };
        let risk = if result.risk_compatibility {
            ""
        } else {
            " | risk mismatch"
        };
        let _ = writeln!(
            out,
            "{}. {} score {:.1} | {:.1} km ({} min) | ${:.2} | {}{}",
            rank + 1,
            result.worker_id,
            result.match_score,
            result.distance_km,
            result.travel_time_minutes,
            result.estimated_cost,
            availability,
            risk
        );
        for factor in &result.factors {
            let _ = writeln!(out, "   - {}: {}", factor.category.label(), factor.description);
        }
    }
    out
}

pub(crate) fn render_alerts(alerts: &[ComplianceAlert]) -> String {
    if alerts.is_empty() {
        return "No compliance alerts within the next 60 days".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Compliance alerts ({})", alerts.len());
    for alert in alerts {
        let _ = writeln!(
            out,
            "[{}] {} - {} -> {}",
            alert.severity.label(),
            alert.worker_id,
            alert.message,
            alert.action_required
        );
    }
    out
}

pub(crate) fn render_report(report: &ComplianceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Compliance report generated {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "- {}/{} workers compliant ({:.1}%)",
        report.compliant_workers, report.total_workers, report.overall_compliance_rate
    );
    let _ = writeln!(
        out,
        "- {} critical | {} warning alert(s)",
        report.critical_alerts, report.warning_alerts
    );
    let _ = writeln!(out, "Document breakdown:");
    for summary in &report.document_breakdown {
        let _ = writeln!(
            out,
            "  - {}: {:.1}% approved | {} expiring soon | {} expired",
            summary.label, summary.compliance_rate, summary.expiring_soon, summary.expired
        );
    }
    out
}
