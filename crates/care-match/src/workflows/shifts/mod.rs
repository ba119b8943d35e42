//! Bulk shift assignment against an injected roster store.

mod assignment;
mod repository;

pub use assignment::{AssignmentError, ShiftAssignmentService};
pub use repository::{InMemoryShiftRepository, RepositoryError, ShiftRepository};
