use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};

use crate::domain::{
    AvailabilitySlot, ComplianceStatus, OverallComplianceStatus, ParticipantId,
    ParticipantProfile, PerformanceMetrics, Qualification, RequestId, RequirementKind,
    RiskAssessment, RiskLevel, ServiceCategory, ServiceRequest, ServiceRequirement, Shift,
    ShiftId, ShiftStatus, SupportWorkerProfile, WorkerId,
};
use crate::workflows::matching::{DistanceTable, ShiftMatcher};

pub(super) const PARTICIPANT_ADDRESS: &str = "18 Wattle Ave, Parramatta NSW";

/// Wednesday, so availability slots for day 3 line up with the request.
pub(super) fn preferred_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 4).expect("valid date")
}

pub(super) fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time")
}

pub(super) fn request() -> ServiceRequest {
    ServiceRequest {
        id: RequestId::new("req-100"),
        participant_id: ParticipantId::new("p-1"),
        service_category: ServiceCategory::PersonalCare,
        requirements: vec![
            ServiceRequirement {
                kind: RequirementKind::Mandatory,
                description: "Manual handling".to_string(),
            },
            ServiceRequirement {
                kind: RequirementKind::Preferred,
                description: "Medication administration".to_string(),
            },
        ],
        preferred_date: preferred_date(),
        duration_hours: 3.0,
    }
}

pub(super) fn participant() -> ParticipantProfile {
    ParticipantProfile {
        id: ParticipantId::new("p-1"),
        address: PARTICIPANT_ADDRESS.to_string(),
        communication_preferences: vec!["English".to_string(), "Easy Read".to_string()],
        risk_assessment: None,
    }
}

pub(super) fn high_risk_participant() -> ParticipantProfile {
    let mut participant = participant();
    participant.risk_assessment = Some(RiskAssessment {
        overall_risk_level: RiskLevel::High,
        notes: Some("Two-person transfers".to_string()),
    });
    participant
}

pub(super) fn qualification(name: &str) -> Qualification {
    Qualification {
        name: name.to_string(),
        issuer: None,
        obtained_on: None,
    }
}

pub(super) fn compliance() -> ComplianceStatus {
    ComplianceStatus {
        documents: BTreeMap::new(),
        overall_status: OverallComplianceStatus::Compliant,
        last_review_date: None,
        next_review_date: None,
    }
}

pub(super) fn worker(id: &str, address: &str) -> SupportWorkerProfile {
    SupportWorkerProfile {
        id: WorkerId::new(id),
        address: address.to_string(),
        hourly_rate: 60.0,
        service_categories: BTreeSet::from([ServiceCategory::PersonalCare]),
        qualifications: vec![
            qualification("Manual Handling Certificate"),
            qualification("Advanced First Aid"),
        ],
        availability: vec![AvailabilitySlot {
            day_of_week: 3,
            start_time: time(9),
            end_time: time(17),
        }],
        performance_metrics: PerformanceMetrics {
            average_rating: 4.5,
            total_services_completed: 30,
        },
        compliance_status: compliance(),
    }
}

pub(super) fn shift(id: &str, worker_id: &str, date: NaiveDate, status: ShiftStatus) -> Shift {
    Shift {
        id: ShiftId::new(id),
        worker_id: Some(WorkerId::new(worker_id)),
        participant_id: ParticipantId::new("p-9"),
        date,
        start_time: time(10),
        end_time: time(12),
        status,
    }
}

pub(super) fn distances() -> DistanceTable {
    let mut table = DistanceTable::new();
    table.insert("1 Near St", PARTICIPANT_ADDRESS, 4.0);
    table.insert("2 Middle Rd", PARTICIPANT_ADDRESS, 10.0);
    table.insert("3 Far Hwy", PARTICIPANT_ADDRESS, 30.0);
    table
}

pub(super) fn matcher() -> ShiftMatcher<DistanceTable> {
    ShiftMatcher::new(distances())
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
