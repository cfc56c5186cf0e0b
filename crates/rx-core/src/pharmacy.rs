//! Pharmacy records.

use crate::store::Record;
use crate::RecordId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub hours: String,
    pub delivery_available: bool,
    /// Estimated minutes to prepare a prescription.
    pub estimated_fill_time: i64,
    /// 0 to 5.
    pub rating: f64,
    /// Miles from the patient, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_fill_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Pharmacy {
    /// Builds a pharmacy from a validated draft. Missing optional numbers default to a 30 minute
    /// fill time and a zero rating.
    pub fn from_draft(id: RecordId, draft: PharmacyDraft) -> Self {
        Self {
            id,
            name: draft.name.unwrap_or_default().trim().to_string(),
            address: draft.address.unwrap_or_default().trim().to_string(),
            phone: draft.phone.unwrap_or_default(),
            hours: draft.hours.unwrap_or_default(),
            delivery_available: draft.delivery_available.unwrap_or(false),
            estimated_fill_time: draft.estimated_fill_time.unwrap_or(30),
            rating: draft.rating.unwrap_or(0.0),
            distance: draft.distance,
        }
    }

    pub fn to_draft(&self) -> PharmacyDraft {
        PharmacyDraft {
            name: Some(self.name.clone()),
            address: Some(self.address.clone()),
            phone: Some(self.phone.clone()),
            hours: Some(self.hours.clone()),
            delivery_available: Some(self.delivery_available),
            estimated_fill_time: Some(self.estimated_fill_time),
            rating: Some(self.rating),
            distance: self.distance,
        }
    }

    pub fn merged(&self, patch: PharmacyDraft) -> PharmacyDraft {
        let current = self.to_draft();
        PharmacyDraft {
            name: patch.name.or(current.name),
            address: patch.address.or(current.address),
            phone: patch.phone.or(current.phone),
            hours: patch.hours.or(current.hours),
            delivery_available: patch.delivery_available.or(current.delivery_available),
            estimated_fill_time: patch.estimated_fill_time.or(current.estimated_fill_time),
            rating: patch.rating.or(current.rating),
            distance: patch.distance.or(current.distance),
        }
    }
}

impl Record for Pharmacy {
    const KIND: &'static str = "pharmacy";

    fn id(&self) -> RecordId {
        self.id
    }
}
