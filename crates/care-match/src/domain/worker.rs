use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::documents::ComplianceStatus;
use super::ids::WorkerId;
use super::request::ServiceCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub obtained_on: Option<NaiveDate>,
}

/// Weekly availability window. `day_of_week` counts from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub average_rating: f64,
    pub total_services_completed: u32,
}

/// Registered support worker as read from the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportWorkerProfile {
    pub id: WorkerId,
    pub address: String,
    pub hourly_rate: f64,
    #[serde(default)]
    pub service_categories: BTreeSet<ServiceCategory>,
    #[serde(default)]
    pub qualifications: Vec<Qualification>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    pub performance_metrics: PerformanceMetrics,
    pub compliance_status: ComplianceStatus,
}

impl SupportWorkerProfile {
    pub fn provides(&self, category: ServiceCategory) -> bool {
        self.service_categories.contains(&category)
    }

    pub fn slot_for_day(&self, day_of_week: u8) -> Option<&AvailabilitySlot> {
        self.availability
            .iter()
            .find(|slot| slot.day_of_week == day_of_week)
    }
}
