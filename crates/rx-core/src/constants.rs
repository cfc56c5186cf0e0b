//! Constants used throughout the RxDesk core crate.
//!
//! Directory and file names live here so the on-disk layout is defined in one place.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "rx_data";

/// Default service name reported by health checks.
pub const DEFAULT_SERVICE_NAME: &str = "rxdesk";

/// Collection directory for patient records.
pub const PATIENTS_DIR_NAME: &str = "patients";

/// Collection directory for pharmacy records.
pub const PHARMACIES_DIR_NAME: &str = "pharmacies";

/// Collection directory for prescription records.
pub const PRESCRIPTIONS_DIR_NAME: &str = "prescriptions";

/// Collection directory for appointment records.
pub const APPOINTMENTS_DIR_NAME: &str = "appointments";

/// Filename holding a single record inside its sharded directory.
pub const RECORD_JSON_FILENAME: &str = "record.json";

/// Extra minutes added to a pharmacy's fill time when the order is delivered.
pub const DELIVERY_EXTRA_MINUTES: i64 = 60;

/// Oldest accepted patient age, in years.
pub const MAX_PATIENT_AGE_YEARS: i32 = 150;

/// Time assumed for an appointment whose time has not been chosen yet.
pub const DEFAULT_APPOINTMENT_TIME: &str = "00:00";

/// Default prescription quantity offered by new-prescription forms.
pub const DEFAULT_QUANTITY: i64 = 30;

/// Default appointment length in minutes.
pub const DEFAULT_APPOINTMENT_DURATION: i64 = 30;
