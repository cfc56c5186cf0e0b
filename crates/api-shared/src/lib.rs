//! # API Shared
//!
//! Shared definitions for the RxDesk REST server and its client.
//!
//! Contains:
//! - Query-string filters for the list endpoints
//! - Error and health response bodies
//! - `HealthService`
//!
//! Entity bodies are the `rx-core` domain types themselves; nothing here duplicates them.

pub mod errors;
pub mod health;
pub mod queries;

pub use errors::{ErrorBody, ValidationErrorBody};
pub use health::{HealthRes, HealthService};
pub use queries::{
    AppointmentQuery, MedicationQuery, PatientQuery, PharmacyQuery, PrescriptionQuery,
};
