use crate::domain::{ParticipantProfile, RiskLevel, ServiceRequest, SupportWorkerProfile};

use super::views::{FactorCategory, MatchFactor, ScoreBreakdown};
use super::weights::{MatchWeights, DISTANCE_PENALTY_PER_KM, GST_MULTIPLIER};

const CATEGORY_POINTS: f64 = 80.0;
const REQUIREMENT_BONUS_POINTS: f64 = 20.0;
const NEUTRAL_LANGUAGE_SCORE: f64 = 50.0;

/// Spoken languages recognised in participant communication preferences.
pub const RECOGNISED_LANGUAGES: [&str; 13] = [
    "english",
    "mandarin",
    "cantonese",
    "arabic",
    "vietnamese",
    "italian",
    "greek",
    "hindi",
    "punjabi",
    "spanish",
    "korean",
    "tagalog",
    "auslan",
];

/// Qualification name fragments accepted for high-risk participants. Matched case-sensitively.
pub const HIGH_RISK_QUALIFICATIONS: [&str; 3] = ["Advanced", "Specialist", "Personal Care"];

pub(crate) struct Specialization {
    pub score: f64,
    pub provides_category: bool,
    pub matched_requirements: usize,
    pub total_requirements: usize,
}

pub(crate) fn distance_score(distance_km: f64) -> f64 {
    (100.0 - DISTANCE_PENALTY_PER_KM * distance_km).max(0.0)
}

pub(crate) fn specialization(
    request: &ServiceRequest,
    worker: &SupportWorkerProfile,
) -> Specialization {
    let provides_category = worker.provides(request.service_category);
    let category_points = if provides_category {
        CATEGORY_POINTS
    } else {
        0.0
    };

    let qualification_names: Vec<String> = worker
        .qualifications
        .iter()
        .map(|qualification| qualification.name.to_lowercase())
        .collect();

    let total_requirements = request.requirements.len();
    let matched_requirements = request
        .requirements
        .iter()
        .filter(|requirement| {
            let needle = requirement.description.trim().to_lowercase();
            !needle.is_empty() && qualification_names.iter().any(|name| name.contains(&needle))
        })
        .count();

    let requirement_ratio = if total_requirements == 0 {
        0.0
    } else {
        matched_requirements as f64 / total_requirements as f64
    };

    Specialization {
        score: category_points + REQUIREMENT_BONUS_POINTS * requirement_ratio,
        provides_category,
        matched_requirements,
        total_requirements,
    }
}

pub(crate) fn rating_score(average_rating: f64) -> f64 {
    (average_rating / 5.0) * 100.0
}

pub(crate) fn experience_score(total_services_completed: u32) -> f64 {
    (total_services_completed as f64 * 2.0).min(100.0)
}

/// Neutral unless the participant names a recognised spoken language. The worker's own
/// languages are not recorded, so this never penalises a candidate.
pub(crate) fn language_score(participant: &ParticipantProfile) -> f64 {
    let mentions_language = participant
        .communication_preferences
        .iter()
        .map(|preference| preference.to_lowercase())
        .any(|preference| {
            RECOGNISED_LANGUAGES
                .iter()
                .any(|language| preference.contains(language))
        });

    if mentions_language {
        100.0
    } else {
        NEUTRAL_LANGUAGE_SCORE
    }
}

/// Any declared availability counts; the requested day is checked separately.
pub(crate) fn availability_score(worker: &SupportWorkerProfile) -> f64 {
    if worker.availability.is_empty() {
        0.0
    } else {
        100.0
    }
}

/// Only `High` demands a qualifying credential; `Extreme` is deliberately left unconstrained
/// until the risk policy is revisited.
pub(crate) fn risk_compatible(
    participant: &ParticipantProfile,
    worker: &SupportWorkerProfile,
) -> bool {
    match participant.risk_level() {
        Some(RiskLevel::High) => worker.qualifications.iter().any(|qualification| {
            HIGH_RISK_QUALIFICATIONS
                .iter()
                .any(|keyword| qualification.name.contains(keyword))
        }),
        _ => true,
    }
}

pub(crate) fn estimated_cost(request: &ServiceRequest, worker: &SupportWorkerProfile) -> f64 {
    request.duration_hours * worker.hourly_rate * GST_MULTIPLIER
}

pub(crate) fn composite(breakdown: &ScoreBreakdown, weights: &MatchWeights) -> f64 {
    let weighted = breakdown.distance * weights.distance
        + breakdown.specialization * weights.specialization
        + breakdown.rating * weights.rating
        + breakdown.experience * weights.experience
        + breakdown.language * weights.language
        + breakdown.availability * weights.availability;

    weighted.clamp(0.0, 100.0)
}

/// Human-readable factors shown next to a match: distance, specialization and rating.
pub(crate) fn explain(
    request: &ServiceRequest,
    worker: &SupportWorkerProfile,
    breakdown: &ScoreBreakdown,
    specialization: &Specialization,
    distance_km: f64,
    weights: &MatchWeights,
) -> Vec<MatchFactor> {
    let specialization_note = if specialization.provides_category {
        format!("Provides {}", request.service_category.label())
    } else {
        format!("Does not list {}", request.service_category.label())
    };
    let requirements_note = if specialization.total_requirements == 0 {
        "no specific requirements".to_string()
    } else {
        format!(
            "{} of {} requirement(s) matched by qualifications",
            specialization.matched_requirements, specialization.total_requirements
        )
    };

    vec![
        MatchFactor {
            category: FactorCategory::Distance,
            score: breakdown.distance,
            weight: weights.distance,
            description: format!("{distance_km:.1} km from participant"),
        },
        MatchFactor {
            category: FactorCategory::Specialization,
            score: breakdown.specialization,
            weight: weights.specialization,
            description: format!("{specialization_note}; {requirements_note}"),
        },
        MatchFactor {
            category: FactorCategory::Rating,
            score: breakdown.rating,
            weight: weights.rating,
            description: format!(
                "Average rating {:.1}/5 across {} completed service(s)",
                worker.performance_metrics.average_rating,
                worker.performance_metrics.total_services_completed
            ),
        },
    ]
}
