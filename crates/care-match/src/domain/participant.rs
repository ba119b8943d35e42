use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Participant details consumed by matching. The address is only used as a distance key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    pub address: String,
    #[serde(default)]
    pub communication_preferences: Vec<String>,
    #[serde(default)]
    pub risk_assessment: Option<RiskAssessment>,
}

impl ParticipantProfile {
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_assessment
            .as_ref()
            .map(|assessment| assessment.overall_risk_level)
    }
}
