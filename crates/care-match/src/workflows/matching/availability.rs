use chrono::Datelike;

use crate::domain::{ServiceRequest, Shift, ShiftId, SupportWorkerProfile};

use super::views::{AvailabilityMatch, TimeSlot};

/// Day-specific availability: the worker's slot for the requested weekday, minus clashes with
/// non-cancelled shifts already rostered on the requested date.
pub fn check_availability(
    worker: &SupportWorkerProfile,
    request: &ServiceRequest,
    existing_shifts: &[Shift],
) -> AvailabilityMatch {
    let day_of_week = request.preferred_date.weekday().num_days_from_sunday() as u8;

    let Some(slot) = worker.slot_for_day(day_of_week) else {
        return AvailabilityMatch::unavailable();
    };

    let conflicting_shifts: Vec<ShiftId> = existing_shifts
        .iter()
        .filter(|shift| {
            shift.belongs_to(&worker.id)
                && shift.date == request.preferred_date
                && !shift.is_cancelled()
        })
        .map(|shift| shift.id.clone())
        .collect();

    let is_available = conflicting_shifts.is_empty();
    let available_slots = if is_available {
        vec![TimeSlot {
            start_time: slot.start_time,
            end_time: slot.end_time,
        }]
    } else {
        Vec::new()
    };

    AvailabilityMatch {
        is_available,
        conflicting_shifts,
        available_slots,
        preferred_slots: Vec::new(),
    }
}
