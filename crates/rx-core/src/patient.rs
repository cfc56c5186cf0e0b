//! Patient records.

use crate::store::Record;
use crate::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored patient: identity, contact details and clinical background lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

/// Partial patient used as the create body, the update patch and the validation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<String>>,
}

impl Patient {
    /// Builds a patient from a draft that has already passed validation.
    pub fn from_draft(id: RecordId, draft: PatientDraft) -> Self {
        Self {
            id,
            name: draft.name.unwrap_or_default().trim().to_string(),
            email: draft.email.unwrap_or_default().trim().to_string(),
            phone: draft.phone.unwrap_or_default(),
            date_of_birth: draft.date_of_birth.unwrap_or_default(),
            address: draft.address.unwrap_or_default().trim().to_string(),
            insurance_provider: draft.insurance_provider.filter(|s| !s.trim().is_empty()),
            allergies: draft.allergies.unwrap_or_default(),
            medical_history: draft.medical_history.unwrap_or_default(),
        }
    }

    /// The stored record expressed as a fully populated draft.
    pub fn to_draft(&self) -> PatientDraft {
        PatientDraft {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            date_of_birth: Some(self.date_of_birth.clone()),
            address: Some(self.address.clone()),
            insurance_provider: self.insurance_provider.clone(),
            allergies: Some(self.allergies.clone()),
            medical_history: Some(self.medical_history.clone()),
        }
    }

    /// Returns the draft that results from laying `patch` over this record.
    pub fn merged(&self, patch: PatientDraft) -> PatientDraft {
        let current = self.to_draft();
        PatientDraft {
            name: patch.name.or(current.name),
            email: patch.email.or(current.email),
            phone: patch.phone.or(current.phone),
            date_of_birth: patch.date_of_birth.or(current.date_of_birth),
            address: patch.address.or(current.address),
            insurance_provider: patch.insurance_provider.or(current.insurance_provider),
            allergies: patch.allergies.or(current.allergies),
            medical_history: patch.medical_history.or(current.medical_history),
        }
    }
}

impl Record for Patient {
    const KIND: &'static str = "patient";

    fn id(&self) -> RecordId {
        self.id
    }
}
