use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ids::{ParticipantId, ShiftId, WorkerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Open,
    Assigned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Assigned => "Assigned",
            Self::Confirmed => "Confirmed",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Rostered block of support, possibly not yet assigned to a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    #[serde(default)]
    pub worker_id: Option<WorkerId>,
    pub participant_id: ParticipantId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
}

impl Shift {
    pub fn is_cancelled(&self) -> bool {
        self.status == ShiftStatus::Cancelled
    }

    pub fn belongs_to(&self, worker_id: &WorkerId) -> bool {
        self.worker_id.as_ref() == Some(worker_id)
    }

    pub fn overlaps(&self, other: &Shift) -> bool {
        self.date == other.date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}
