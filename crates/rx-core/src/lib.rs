//! # RxDesk Core
//!
//! Core business logic for the RxDesk prescription and appointment service.
//!
//! This crate contains the domain model and pure data operations:
//! - Patients, pharmacies, prescriptions and appointments with JSON file storage
//! - Field validation with per-field messages
//! - Status trackers, search, formatting, calendar and dashboard helpers
//!
//! **No API concerns**: HTTP servers, clients and wire-only types belong in `api-rest`,
//! `rx-client` or `api-shared`.

pub mod appointment;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod medication;
pub mod patient;
pub mod pharmacy;
pub mod prescription;
pub mod repositories;
pub mod search;
pub mod status;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use error::{RxError, RxResult};
pub use repositories::appointments::AppointmentService;
pub use repositories::medications::MedicationCatalog;
pub use repositories::patients::PatientService;
pub use repositories::pharmacies::PharmacyService;
pub use repositories::prescriptions::PrescriptionService;
pub use rx_types::{NonEmptyText, TextError};
pub use rx_uuid::RecordId;
