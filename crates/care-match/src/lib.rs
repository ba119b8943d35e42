//! Support worker matching and compliance alerting for disability service marketplaces.
//!
//! The scoring and alerting cores live under [`workflows`] and are pure functions over the
//! records in [`domain`]. Side effects (reminders, suspensions, shift assignment, audit
//! forwarding) go through injected collaborator traits so the cores stay testable offline.

pub mod audit;
pub mod batch;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod router;
pub mod telemetry;
pub mod workflows;
