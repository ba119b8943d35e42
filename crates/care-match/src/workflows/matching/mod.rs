//! Ranks candidate support workers against a participant's service request.

mod availability;
mod distance;
mod scoring;
mod views;
mod weights;

#[cfg(test)]
mod tests;

pub use availability::check_availability;
pub use distance::{
    DistanceError, DistanceEstimate, DistanceProvider, DistanceTable, FixedDistance, RouteDistance,
};
pub use scoring::{HIGH_RISK_QUALIFICATIONS, RECOGNISED_LANGUAGES};
pub use views::{
    AvailabilityMatch, FactorCategory, MatchFactor, ScoreBreakdown, TimeSlot, WorkerMatchResult,
};
pub use weights::{MatchWeights, MATCH_WEIGHTS};

use tracing::debug;

use crate::domain::validation::non_negative;
use crate::domain::{
    ParticipantProfile, ServiceRequest, Shift, SupportWorkerProfile, ValidationError, WorkerId,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("distance lookup failed for worker {worker_id}: {source}")]
    Distance {
        worker_id: WorkerId,
        #[source]
        source: DistanceError,
    },
}

/// Stateless matcher bound to a distance provider.
#[derive(Debug, Clone)]
pub struct ShiftMatcher<D> {
    distances: D,
}

impl<D: DistanceProvider> ShiftMatcher<D> {
    pub fn new(distances: D) -> Self {
        Self { distances }
    }

    pub fn distances(&self) -> &D {
        &self.distances
    }

    pub fn find_best_worker_matches(
        &self,
        request: &ServiceRequest,
        participant: &ParticipantProfile,
        candidates: &[SupportWorkerProfile],
        existing_shifts: &[Shift],
    ) -> Result<Vec<WorkerMatchResult>, MatchingError> {
        find_best_worker_matches(
            &self.distances,
            request,
            participant,
            candidates,
            existing_shifts,
        )
    }

    pub fn evaluate(
        &self,
        request: &ServiceRequest,
        participant: &ParticipantProfile,
        worker: &SupportWorkerProfile,
        existing_shifts: &[Shift],
    ) -> Result<WorkerMatchResult, MatchingError> {
        evaluate_worker(
            &self.distances,
            request,
            participant,
            worker,
            existing_shifts,
        )
    }
}

/// Score every candidate and return them best first. Equal scores keep candidate order.
/// A malformed request fails even when there are no candidates.
pub fn find_best_worker_matches<D: DistanceProvider + ?Sized>(
    distances: &D,
    request: &ServiceRequest,
    participant: &ParticipantProfile,
    candidates: &[SupportWorkerProfile],
    existing_shifts: &[Shift],
) -> Result<Vec<WorkerMatchResult>, MatchingError> {
    validate_request(request)?;

    let mut results = candidates
        .iter()
        .map(|worker| evaluate_worker(distances, request, participant, worker, existing_shifts))
        .collect::<Result<Vec<_>, _>>()?;

    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

    debug!(
        request_id = %request.id,
        candidates = candidates.len(),
        best = ?results.first().map(|result| result.match_score),
        "ranked worker matches"
    );

    Ok(results)
}

fn evaluate_worker<D: DistanceProvider + ?Sized>(
    distances: &D,
    request: &ServiceRequest,
    participant: &ParticipantProfile,
    worker: &SupportWorkerProfile,
    existing_shifts: &[Shift],
) -> Result<WorkerMatchResult, MatchingError> {
    validate_request(request)?;
    validate_worker(worker)?;

    let estimate = distances
        .estimate(&worker.address, &participant.address)
        .map_err(|source| MatchingError::Distance {
            worker_id: worker.id.clone(),
            source,
        })?;
    let distance_km = non_negative(
        format!("distance to worker {}", worker.id),
        estimate.distance_km,
    )?;

    let specialization = scoring::specialization(request, worker);
    let breakdown = ScoreBreakdown {
        distance: scoring::distance_score(distance_km),
        specialization: specialization.score,
        rating: scoring::rating_score(worker.performance_metrics.average_rating),
        experience: scoring::experience_score(worker.performance_metrics.total_services_completed),
        language: scoring::language_score(participant),
        availability: scoring::availability_score(worker),
    };

    let factors = scoring::explain(
        request,
        worker,
        &breakdown,
        &specialization,
        distance_km,
        &MATCH_WEIGHTS,
    );

    Ok(WorkerMatchResult {
        worker_id: worker.id.clone(),
        match_score: scoring::composite(&breakdown, &MATCH_WEIGHTS),
        factors,
        breakdown,
        availability: check_availability(worker, request, existing_shifts),
        estimated_cost: scoring::estimated_cost(request, worker),
        travel_time_minutes: estimate.travel_minutes(),
        distance_km,
        risk_compatibility: scoring::risk_compatible(participant, worker),
    })
}

fn validate_request(request: &ServiceRequest) -> Result<(), ValidationError> {
    non_negative("request.duration_hours", request.duration_hours)?;
    Ok(())
}

fn validate_worker(worker: &SupportWorkerProfile) -> Result<(), ValidationError> {
    non_negative(format!("worker {} hourly_rate", worker.id), worker.hourly_rate)?;
    non_negative(
        format!("worker {} average_rating", worker.id),
        worker.performance_metrics.average_rating,
    )?;

    if let Some(slot) = worker.availability.iter().find(|slot| slot.day_of_week > 6) {
        return Err(ValidationError::InvalidDayOfWeek {
            field: format!("worker {} availability", worker.id),
            value: slot.day_of_week,
        });
    }

    Ok(())
}
