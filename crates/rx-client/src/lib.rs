//! # RxDesk Client
//!
//! Async client for the RxDesk REST API.
//!
//! Every operation issues exactly one request. Any non-2xx response becomes
//! [`ClientError::Status`] carrying a short description of what was being attempted, e.g.
//! "Failed to fetch prescriptions". There are no retries and no caching; callers re-fetch lists
//! after a mutation.
//!
//! ```no_run
//! # async fn run() -> Result<(), rx_client::ClientError> {
//! use api_shared::PharmacyQuery;
//!
//! let client = rx_client::RxClient::new("http://localhost:3000");
//! let delivering = client
//!     .pharmacies()
//!     .list(&PharmacyQuery { delivery_only: Some(true) })
//!     .await?;
//! # Ok(()) }
//! ```

mod resource;

pub use resource::{Catalog, Resource};

use api_shared::{AppointmentQuery, PatientQuery, PharmacyQuery, PrescriptionQuery};
use rx_core::appointment::{Appointment, AppointmentDraft};
use rx_core::patient::{Patient, PatientDraft};
use rx_core::pharmacy::{Pharmacy, PharmacyDraft};
use rx_core::prescription::{Prescription, PrescriptionDraft};
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{action} (HTTP {status})")]
    Status { action: String, status: u16 },
    /// The request never got a usable response.
    #[error("{action}: {source}")]
    Transport {
        action: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Entry point: holds the base URL and a shared connection pool.
#[derive(Clone, Debug)]
pub struct RxClient {
    base_url: String,
    http: reqwest::Client,
}

impl RxClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`; `/api` is appended per call.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prescriptions(
        &self,
    ) -> Resource<'_, Prescription, PrescriptionDraft, PrescriptionQuery> {
        Resource::new(self, "prescriptions", "prescription")
    }

    pub fn appointments(&self) -> Resource<'_, Appointment, AppointmentDraft, AppointmentQuery> {
        Resource::new(self, "appointments", "appointment")
    }

    pub fn patients(&self) -> Resource<'_, Patient, PatientDraft, PatientQuery> {
        Resource::new(self, "patients", "patient")
    }

    pub fn pharmacies(&self) -> Resource<'_, Pharmacy, PharmacyDraft, PharmacyQuery> {
        Resource::new(self, "pharmacies", "pharmacy")
    }

    pub fn medications(&self) -> Catalog<'_> {
        Catalog::new(self)
    }

    /// Books a follow-up appointment linked to a prescription.
    pub async fn schedule_follow_up(
        &self,
        prescription_id: &str,
        draft: &AppointmentDraft,
    ) -> ClientResult<Appointment> {
        let request = self
            .http
            .post(self.url(&format!("prescriptions/{prescription_id}/follow-up")))
            .json(draft);
        self.send_json(request, "Failed to schedule follow-up".into())
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Sends `request`, failing with `action` on transport errors or a non-2xx status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        action: String,
    ) -> ClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                action: action.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "{}", action);
            return Err(ClientError::Status {
                action,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        action: String,
    ) -> ClientResult<T> {
        let response = self.send(request, action.clone()).await?;
        response
            .json()
            .await
            .map_err(|source| ClientError::Transport { action, source })
    }
}
