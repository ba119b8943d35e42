use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{ParticipantId, RequestId};

/// Support categories a worker can be registered to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    PersonalCare,
    CommunityAccess,
    DomesticAssistance,
    Transport,
    TherapySupport,
    RespiteCare,
    BehaviourSupport,
    NursingCare,
}

impl ServiceCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalCare => "Personal Care",
            Self::CommunityAccess => "Community Access",
            Self::DomesticAssistance => "Domestic Assistance",
            Self::Transport => "Transport",
            Self::TherapySupport => "Therapy Support",
            Self::RespiteCare => "Respite Care",
            Self::BehaviourSupport => "Behaviour Support",
            Self::NursingCare => "Nursing Care",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    Mandatory,
    Preferred,
    Optional,
}

/// Free-text requirement attached to a request (e.g. "Manual handling").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequirement {
    pub kind: RequirementKind,
    pub description: String,
}

/// Participant request for a single block of support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub participant_id: ParticipantId,
    pub service_category: ServiceCategory,
    #[serde(default)]
    pub requirements: Vec<ServiceRequirement>,
    pub preferred_date: NaiveDate,
    pub duration_hours: f64,
}
