use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::{ShiftId, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Distance,
    Specialization,
    Rating,
    Experience,
    Language,
    Availability,
}

impl FactorCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Distance => "Distance",
            Self::Specialization => "Specialization",
            Self::Rating => "Rating",
            Self::Experience => "Experience",
            Self::Language => "Language",
            Self::Availability => "Availability",
        }
    }
}

/// Explainable contribution to a match, rendered alongside the score in the admin UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFactor {
    pub category: FactorCategory,
    pub score: f64,
    pub weight: f64,
    pub description: String,
}

/// Raw 0-100 sub-scores before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: f64,
    pub specialization: f64,
    pub rating: f64,
    pub experience: f64,
    pub language: f64,
    pub availability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityMatch {
    pub is_available: bool,
    pub conflicting_shifts: Vec<ShiftId>,
    pub available_slots: Vec<TimeSlot>,
    pub preferred_slots: Vec<TimeSlot>,
}

impl AvailabilityMatch {
    pub(crate) fn unavailable() -> Self {
        Self {
            is_available: false,
            conflicting_shifts: Vec::new(),
            available_slots: Vec::new(),
            preferred_slots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerMatchResult {
    pub worker_id: WorkerId,
    pub match_score: f64,
    pub factors: Vec<MatchFactor>,
    pub breakdown: ScoreBreakdown,
    pub availability: AvailabilityMatch,
    pub estimated_cost: f64,
    pub travel_time_minutes: u32,
    pub distance_km: f64,
    pub risk_compatibility: bool,
}
