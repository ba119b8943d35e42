use std::sync::Arc;

use tracing::info;

use crate::audit::{details, AuditAction, AuditLog};
use crate::batch::{run_batch, BatchOutcome};
use crate::domain::{ShiftId, ShiftStatus, WorkerId};

use super::repository::{RepositoryError, ShiftRepository};

#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    #[error("shift {0} not found")]
    ShiftNotFound(ShiftId),
    #[error("shift {shift_id} is {status} and cannot be assigned")]
    NotAssignable { shift_id: ShiftId, status: &'static str },
    #[error("shift {shift_id} is already assigned to worker {worker_id}")]
    AlreadyAssigned { shift_id: ShiftId, worker_id: WorkerId },
    #[error("shift {shift_id} overlaps shift {conflict} already held by the worker")]
    Overlap { shift_id: ShiftId, conflict: ShiftId },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub struct ShiftAssignmentService<R> {
    repository: Arc<R>,
    audit: Arc<AuditLog>,
}

impl<R> ShiftAssignmentService<R>
where
    R: ShiftRepository + 'static,
{
    pub fn new(repository: Arc<R>, audit: Arc<AuditLog>) -> Self {
        Self { repository, audit }
    }

    /// Assign one shift to a worker, rejecting cancelled, completed, taken or clashing shifts.
    pub fn assign(&self, worker_id: &WorkerId, shift_id: &ShiftId) -> Result<(), AssignmentError> {
        let mut shift = self
            .repository
            .fetch(shift_id)?
            .ok_or_else(|| AssignmentError::ShiftNotFound(shift_id.clone()))?;

        if matches!(shift.status, ShiftStatus::Cancelled | ShiftStatus::Completed) {
            return Err(AssignmentError::NotAssignable {
                shift_id: shift_id.clone(),
                status: shift.status.label(),
            });
        }

        match &shift.worker_id {
            Some(current) if current == worker_id => return Ok(()),
            Some(current) => {
                return Err(AssignmentError::AlreadyAssigned {
                    shift_id: shift_id.clone(),
                    worker_id: current.clone(),
                })
            }
            None => {}
        }

        if let Some(conflict) = self
            .repository
            .for_worker(worker_id)?
            .into_iter()
            .find(|held| held.id != shift.id && !held.is_cancelled() && held.overlaps(&shift))
        {
            return Err(AssignmentError::Overlap {
                shift_id: shift_id.clone(),
                conflict: conflict.id,
            });
        }

        shift.worker_id = Some(worker_id.clone());
        shift.status = ShiftStatus::Assigned;
        self.repository.update(shift)?;
        Ok(())
    }

    /// Assign many shifts independently; each failure is reported without stopping the rest.
    pub fn assign_many(
        &self,
        actor: &str,
        worker_id: &WorkerId,
        shift_ids: &[ShiftId],
    ) -> BatchOutcome<ShiftId> {
        let outcome = run_batch(shift_ids, |shift_id| (*shift_id).clone(), |shift_id| {
            let result = self.assign(worker_id, shift_id);
            let (action, entry_details) = match &result {
                Ok(()) => (
                    AuditAction::ShiftAssigned,
                    details([("worker_id", worker_id.to_string())]),
                ),
                Err(err) => (
                    AuditAction::ShiftAssignmentFailed,
                    details([
                        ("worker_id", worker_id.to_string()),
                        ("error", err.to_string()),
                    ]),
                ),
            };
            self.audit
                .record(actor, action, shift_id.to_string(), entry_details);
            result
        });

        info!(
            %worker_id,
            assigned = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "bulk shift assignment finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::TracingAuditSink;
    use crate::clock::FixedClock;
    use crate::domain::{ParticipantId, Shift};
    use crate::workflows::shifts::InMemoryShiftRepository;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn shift(id: &str, worker: Option<&str>, start: u32, end: u32, status: ShiftStatus) -> Shift {
        Shift {
            id: ShiftId::new(id),
            worker_id: worker.map(WorkerId::new),
            participant_id: ParticipantId::new("p-1"),
            date: NaiveDate::from_ymd_opt(2025, 6, 4).expect("valid date"),
            start_time: NaiveTime::from_hms_opt(start, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(end, 0, 0).expect("valid time"),
            status,
        }
    }

    fn service(
        shifts: Vec<Shift>,
    ) -> (
        ShiftAssignmentService<InMemoryShiftRepository>,
        Arc<InMemoryShiftRepository>,
        Arc<AuditLog>,
    ) {
        let repository = Arc::new(InMemoryShiftRepository::with_shifts(shifts));
        let audit = Arc::new(AuditLog::new(
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap())),
            Arc::new(TracingAuditSink),
        ));
        (
            ShiftAssignmentService::new(repository.clone(), audit.clone()),
            repository,
            audit,
        )
    }

    #[test]
    fn bulk_assignment_partitions_successes_and_failures() {
        let (service, repository, audit) = service(vec![
            shift("s-1", None, 9, 11, ShiftStatus::Open),
            shift("s-2", None, 13, 15, ShiftStatus::Cancelled),
            shift("s-3", Some("w-other"), 16, 18, ShiftStatus::Assigned),
            shift("s-4", None, 18, 20, ShiftStatus::Open),
        ]);
        let ids: Vec<ShiftId> = ["s-1", "s-2", "s-missing", "s-3", "s-4"]
            .into_iter()
            .map(ShiftId::new)
            .collect();

        let outcome = service.assign_many("coordinator", &WorkerId::new("w-1"), &ids);

        assert_eq!(outcome.succeeded, vec![ShiftId::new("s-1"), ShiftId::new("s-4")]);
        let failed: Vec<&str> = outcome
            .failed
            .iter()
            .map(|failure| failure.id.as_str())
            .collect();
        assert_eq!(failed, vec!["s-2", "s-missing", "s-3"]);
        assert!(outcome.failed[0].reason.contains("Cancelled"));

        let assigned = repository
            .for_worker(&WorkerId::new("w-1"))
            .expect("repository reads");
        assert_eq!(assigned.len(), 2);
        assert!(assigned
            .iter()
            .all(|shift| shift.status == ShiftStatus::Assigned));
        assert_eq!(audit.by_action(AuditAction::ShiftAssigned).len(), 2);
        assert_eq!(audit.by_action(AuditAction::ShiftAssignmentFailed).len(), 3);
    }

    #[test]
    fn overlapping_shifts_are_rejected() {
        let (service, _, _) = service(vec![
            shift("s-held", Some("w-1"), 9, 12, ShiftStatus::Confirmed),
            shift("s-new", None, 11, 13, ShiftStatus::Open),
        ]);

        match service.assign(&WorkerId::new("w-1"), &ShiftId::new("s-new")) {
            Err(AssignmentError::Overlap { conflict, .. }) => assert_eq!(conflict.as_str(), "s-held"),
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn reassigning_to_the_same_worker_is_a_no_op() {
        let (service, _, _) = service(vec![shift("s-1", Some("w-1"), 9, 11, ShiftStatus::Assigned)]);

        assert!(service
            .assign(&WorkerId::new("w-1"), &ShiftId::new("s-1"))
            .is_ok());
    }
}
