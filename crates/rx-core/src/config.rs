//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services as
//! `Arc<CoreConfig>`. Request handlers never read environment variables, which keeps behaviour
//! consistent across threads and test harnesses.

use crate::constants::{
    APPOINTMENTS_DIR_NAME, DEFAULT_DATA_DIR, DEFAULT_SERVICE_NAME, PATIENTS_DIR_NAME,
    PHARMACIES_DIR_NAME, PRESCRIPTIONS_DIR_NAME,
};
use crate::{NonEmptyText, RxResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    service_name: NonEmptyText,
    seed_samples: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(data_dir: PathBuf, service_name: NonEmptyText, seed_samples: bool) -> Self {
        Self {
            data_dir,
            service_name,
            seed_samples,
        }
    }

    /// Build a configuration from raw (typically environment) values.
    ///
    /// Missing or blank values fall back to defaults: `rx_data` for the data directory and
    /// `rxdesk` for the service name. `seed_samples` accepts `1`, `true`, `yes` or `on`.
    ///
    /// # Errors
    ///
    /// Returns `RxError::Text` if the default service name were ever blank; in practice this
    /// only fails if the constants are edited incorrectly.
    pub fn from_values(
        data_dir: Option<String>,
        service_name: Option<String>,
        seed_samples: Option<String>,
    ) -> RxResult<Self> {
        let data_dir = data_dir
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into());

        let service_name = match NonEmptyText::from_optional(service_name.as_deref()) {
            Some(name) => name,
            None => NonEmptyText::new(DEFAULT_SERVICE_NAME)?,
        };

        Ok(Self::new(
            PathBuf::from(data_dir),
            service_name,
            parse_flag(seed_samples.as_deref()),
        ))
    }

    /// Reads `RX_DATA_DIR`, `RX_SERVICE_NAME` and `RX_SEED_SAMPLES`.
    ///
    /// Intended for binaries at startup only.
    pub fn from_env() -> RxResult<Self> {
        Self::from_values(
            std::env::var("RX_DATA_DIR").ok(),
            std::env::var("RX_SERVICE_NAME").ok(),
            std::env::var("RX_SEED_SAMPLES").ok(),
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn patients_dir(&self) -> PathBuf {
        self.data_dir.join(PATIENTS_DIR_NAME)
    }

    pub fn pharmacies_dir(&self) -> PathBuf {
        self.data_dir.join(PHARMACIES_DIR_NAME)
    }

    pub fn prescriptions_dir(&self) -> PathBuf {
        self.data_dir.join(PRESCRIPTIONS_DIR_NAME)
    }

    pub fn appointments_dir(&self) -> PathBuf {
        self.data_dir.join(APPOINTMENTS_DIR_NAME)
    }

    pub fn service_name(&self) -> &str {
        self.service_name.as_str()
    }

    pub fn seed_samples(&self) -> bool {
        self.seed_samples
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
