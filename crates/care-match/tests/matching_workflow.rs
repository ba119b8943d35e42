//! End-to-end ranking scenarios through the public matcher facade.

mod common {
    use std::collections::BTreeMap;

    use chrono::{NaiveDate, NaiveTime};

    use care_match::domain::{
        AvailabilitySlot, ComplianceStatus, OverallComplianceStatus, ParticipantId,
        ParticipantProfile, PerformanceMetrics, Qualification, RequestId, RequirementKind,
        RiskAssessment, RiskLevel, ServiceCategory, ServiceRequest, ServiceRequirement, Shift,
        ShiftId, ShiftStatus, SupportWorkerProfile, WorkerId,
    };
    use care_match::workflows::matching::{DistanceTable, ShiftMatcher};

    pub(super) fn time(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time")
    }

    /// Monday 2 June 2025.
    pub(super) fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
    }

    pub(super) fn request() -> ServiceRequest {
        ServiceRequest {
            id: RequestId::new("req-100"),
            participant_id: ParticipantId::new("p-1"),
            service_category: ServiceCategory::CommunityAccess,
            requirements: vec![ServiceRequirement {
                kind: RequirementKind::Mandatory,
                description: "First Aid".to_string(),
            }],
            preferred_date: monday(),
            duration_hours: 3.0,
        }
    }

    pub(super) fn participant(risk: RiskLevel) -> ParticipantProfile {
        ParticipantProfile {
            id: ParticipantId::new("p-1"),
            address: "10 Elm St".to_string(),
            communication_preferences: vec!["Plain language".to_string()],
            risk_assessment: Some(RiskAssessment {
                overall_risk_level: risk,
                notes: None,
            }),
        }
    }

    pub(super) struct WorkerSpec<'a> {
        pub(super) id: &'a str,
        pub(super) address: &'a str,
        pub(super) rate: f64,
        pub(super) categories: &'a [ServiceCategory],
        pub(super) qualifications: &'a [&'a str],
        pub(super) day: u8,
        pub(super) rating: f64,
        pub(super) completed: u32,
    }

    pub(super) fn worker(spec: WorkerSpec<'_>) -> SupportWorkerProfile {
        SupportWorkerProfile {
            id: WorkerId::new(spec.id),
            address: spec.address.to_string(),
            hourly_rate: spec.rate,
            service_categories: spec.categories.iter().copied().collect(),
            qualifications: spec
                .qualifications
                .iter()
                .map(|name| Qualification {
                    name: name.to_string(),
                    issuer: None,
                    obtained_on: None,
                })
                .collect(),
            availability: vec![AvailabilitySlot {
                day_of_week: spec.day,
                start_time: time(9),
                end_time: time(17),
            }],
            performance_metrics: PerformanceMetrics {
                average_rating: spec.rating,
                total_services_completed: spec.completed,
            },
            compliance_status: ComplianceStatus {
                documents: BTreeMap::new(),
                overall_status: OverallComplianceStatus::Compliant,
                last_review_date: None,
                next_review_date: None,
            },
        }
    }

    pub(super) fn roster() -> Vec<SupportWorkerProfile> {
        vec![
            worker(WorkerSpec {
                id: "w-c",
                address: "3 Gum St",
                rate: 70.0,
                categories: &[],
                qualifications: &[],
                day: 5,
                rating: 5.0,
                completed: 25,
            }),
            worker(WorkerSpec {
                id: "w-b",
                address: "2 Pine St",
                rate: 45.0,
                categories: &[ServiceCategory::CommunityAccess],
                qualifications: &["Manual Handling"],
                day: 1,
                rating: 4.0,
                completed: 10,
            }),
            worker(WorkerSpec {
                id: "w-a",
                address: "1 Oak St",
                rate: 50.0,
                categories: &[ServiceCategory::CommunityAccess, ServiceCategory::Transport],
                qualifications: &["Advanced First Aid"],
                day: 1,
                rating: 4.8,
                completed: 120,
            }),
        ]
    }

    pub(super) fn shift(id: &str, worker: &str, status: ShiftStatus) -> Shift {
        Shift {
            id: ShiftId::new(id),
            worker_id: Some(WorkerId::new(worker)),
            participant_id: ParticipantId::new("p-other"),
            date: monday(),
            start_time: time(13),
            end_time: time(15),
            status,
        }
    }

    pub(super) fn matcher() -> ShiftMatcher<DistanceTable> {
        let mut table = DistanceTable::new();
        table.insert("1 Oak St", "10 Elm St", 2.0);
        table.insert("2 Pine St", "10 Elm St", 5.0);
        table.insert("3 Gum St", "10 Elm St", 8.0);
        ShiftMatcher::new(table)
    }

    pub(super) fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }
}

use care_match::domain::{RiskLevel, ShiftId, ShiftStatus};
use care_match::workflows::matching::{FactorCategory, MatchingError};
use common::*;

#[test]
fn ranks_roster_best_first_with_explanations() {
    let matches = matcher()
        .find_best_worker_matches(&request(), &participant(RiskLevel::High), &roster(), &[])
        .expect("roster ranks");

    let order: Vec<&str> = matches.iter().map(|m| m.worker_id.as_str()).collect();
    assert_eq!(order, vec!["w-a", "w-b", "w-c"]);

    let best = &matches[0];
    assert_close(best.breakdown.distance, 90.0);
    assert_close(best.breakdown.specialization, 100.0);
    assert_close(best.breakdown.experience, 100.0);
    assert_close(best.match_score - matches[1].match_score, 20.15);
    assert_close(best.estimated_cost, 165.0);
    assert_eq!(best.travel_time_minutes, 6);

    let categories: Vec<FactorCategory> = best.factors.iter().map(|f| f.category).collect();
    assert_eq!(
        categories,
        vec![
            FactorCategory::Distance,
            FactorCategory::Specialization,
            FactorCategory::Rating
        ]
    );
}

#[test]
fn high_risk_participants_flag_unqualified_workers() {
    let matches = matcher()
        .find_best_worker_matches(&request(), &participant(RiskLevel::High), &roster(), &[])
        .expect("roster ranks");

    let compatible: Vec<(&str, bool)> = matches
        .iter()
        .map(|m| (m.worker_id.as_str(), m.risk_compatibility))
        .collect();
    assert_eq!(
        compatible,
        vec![("w-a", true), ("w-b", false), ("w-c", false)]
    );
}

#[test]
fn extreme_risk_does_not_require_a_credential() {
    let matches = matcher()
        .find_best_worker_matches(&request(), &participant(RiskLevel::Extreme), &roster(), &[])
        .expect("roster ranks");

    assert!(matches.iter().all(|m| m.risk_compatibility));
}

#[test]
fn rostered_shifts_block_availability_unless_cancelled() {
    let existing = vec![
        shift("s-busy", "w-b", ShiftStatus::Assigned),
        shift("s-dropped", "w-a", ShiftStatus::Cancelled),
    ];

    let matches = matcher()
        .find_best_worker_matches(&request(), &participant(RiskLevel::Low), &roster(), &existing)
        .expect("roster ranks");

    let by_id = |id: &str| {
        matches
            .iter()
            .find(|m| m.worker_id.as_str() == id)
            .expect("worker ranked")
    };

    assert!(by_id("w-a").availability.is_available);
    assert!(!by_id("w-b").availability.is_available);
    assert_eq!(
        by_id("w-b").availability.conflicting_shifts,
        vec![ShiftId::new("s-busy")]
    );
    assert!(!by_id("w-c").availability.is_available);
    assert!(by_id("w-c").availability.available_slots.is_empty());
}

#[test]
fn missing_route_names_the_worker() {
    let mut roster = roster();
    roster[1].address = "99 Unknown Rd".to_string();

    let err = matcher()
        .find_best_worker_matches(&request(), &participant(RiskLevel::Low), &roster, &[])
        .expect_err("unknown route fails the ranking");

    match err {
        MatchingError::Distance { worker_id, .. } => assert_eq!(worker_id.as_str(), "w-b"),
        other => panic!("expected distance error, got {other:?}"),
    }
}

#[test]
fn negative_duration_is_rejected() {
    let mut request = request();
    request.duration_hours = -1.0;

    let err = matcher()
        .find_best_worker_matches(&request, &participant(RiskLevel::Low), &roster(), &[])
        .expect_err("negative duration rejected");

    assert!(matches!(err, MatchingError::Validation(_)));
}
