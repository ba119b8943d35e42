use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Credential types tracked per worker, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    NdisWorkerScreening,
    WorkingWithChildrenCheck,
    PoliceCheck,
    FirstAidCertificate,
    ProfessionalIndemnityInsurance,
    DriversLicence,
    VehicleInsurance,
}

impl DocumentType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::NdisWorkerScreening,
            Self::WorkingWithChildrenCheck,
            Self::PoliceCheck,
            Self::FirstAidCertificate,
            Self::ProfessionalIndemnityInsurance,
            Self::DriversLicence,
            Self::VehicleInsurance,
        ]
    }

    /// Document types every worker must hold; these drive the compliance report breakdown.
    pub const fn reported() -> [Self; 5] {
        [
            Self::NdisWorkerScreening,
            Self::WorkingWithChildrenCheck,
            Self::PoliceCheck,
            Self::FirstAidCertificate,
            Self::ProfessionalIndemnityInsurance,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::NdisWorkerScreening => "ndis_worker_screening",
            Self::WorkingWithChildrenCheck => "working_with_children_check",
            Self::PoliceCheck => "police_check",
            Self::FirstAidCertificate => "first_aid_certificate",
            Self::ProfessionalIndemnityInsurance => "professional_indemnity_insurance",
            Self::DriversLicence => "drivers_licence",
            Self::VehicleInsurance => "vehicle_insurance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NdisWorkerScreening => "NDIS Worker Screening",
            Self::WorkingWithChildrenCheck => "Working With Children Check",
            Self::PoliceCheck => "Police Check",
            Self::FirstAidCertificate => "First Aid Certificate",
            Self::ProfessionalIndemnityInsurance => "Professional Indemnity Insurance",
            Self::DriversLicence => "Drivers Licence",
            Self::VehicleInsurance => "Vehicle Insurance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
    ExpiresSoon,
}

impl DocumentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
            Self::ExpiresSoon => "Expires Soon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceDocument {
    pub status: DocumentStatus,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminders_sent: u32,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallComplianceStatus {
    Compliant,
    NonCompliant,
    PendingReview,
    Suspended,
}

/// Per-worker credential register plus review bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    #[serde(default)]
    pub documents: BTreeMap<DocumentType, ComplianceDocument>,
    pub overall_status: OverallComplianceStatus,
    #[serde(default)]
    pub last_review_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_review_date: Option<NaiveDate>,
}

impl ComplianceStatus {
    pub fn document(&self, document_type: DocumentType) -> Option<&ComplianceDocument> {
        self.documents.get(&document_type)
    }

    pub fn is_compliant(&self) -> bool {
        self.overall_status == OverallComplianceStatus::Compliant
    }
}
