//! Plain data records shared by the matching and compliance workflows.

mod documents;
mod ids;
mod participant;
mod request;
mod shift;
pub mod validation;
mod worker;

pub use documents::{
    ComplianceDocument, ComplianceStatus, DocumentStatus, DocumentType, OverallComplianceStatus,
};
pub use ids::{ParticipantId, RequestId, ShiftId, WorkerId};
pub use participant::{ParticipantProfile, RiskAssessment, RiskLevel};
pub use request::{RequirementKind, ServiceCategory, ServiceRequest, ServiceRequirement};
pub use shift::{Shift, ShiftStatus};
pub use validation::ValidationError;
pub use worker::{AvailabilitySlot, PerformanceMetrics, Qualification, SupportWorkerProfile};
