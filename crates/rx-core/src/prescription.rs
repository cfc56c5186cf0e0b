//! Prescription records and their lifecycle vocabulary.
//!
//! Only the current status is stored. There is no transition history and any status may be
//! written over any other; see [`PrescriptionStatus::is_backward_from`] for the one check the
//! services make (it only logs).

use crate::store::Record;
use crate::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    #[default]
    Pending,
    Filled,
    Ready,
    Delivered,
    Cancelled,
}

impl PrescriptionStatus {
    pub const ALL: [PrescriptionStatus; 5] = [
        PrescriptionStatus::Pending,
        PrescriptionStatus::Filled,
        PrescriptionStatus::Ready,
        PrescriptionStatus::Delivered,
        PrescriptionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrescriptionStatus::Pending => "pending",
            PrescriptionStatus::Filled => "filled",
            PrescriptionStatus::Ready => "ready",
            PrescriptionStatus::Delivered => "delivered",
            PrescriptionStatus::Cancelled => "cancelled",
        }
    }

    /// Position in the display order of the tracker; `None` for cancelled.
    pub fn stage(&self) -> Option<u8> {
        match self {
            PrescriptionStatus::Pending => Some(0),
            PrescriptionStatus::Filled => Some(1),
            PrescriptionStatus::Ready => Some(2),
            PrescriptionStatus::Delivered => Some(3),
            PrescriptionStatus::Cancelled => None,
        }
    }

    /// True when moving from `previous` to `self` goes back up the tracker, e.g. delivered to
    /// pending. Moves into or out of cancelled are never backward.
    pub fn is_backward_from(&self, previous: PrescriptionStatus) -> bool {
        match (previous.stage(), self.stage()) {
            (Some(before), Some(after)) => after < before,
            _ => false,
        }
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrescriptionStatus {
    type Err = crate::RxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                crate::RxError::InvalidInput(format!("unknown prescription status: {s}"))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    #[default]
    Pickup,
    Delivery,
}

impl DeliveryOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Pickup => "pickup",
            DeliveryOption::Delivery => "delivery",
        }
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub patient_id: String,
    pub patient_name: String,
    /// Catalog id, empty when the medication was entered as free text.
    #[serde(default)]
    pub medication_id: String,
    pub medication: String,
    pub dosage: String,
    pub quantity: i64,
    pub refills: i64,
    pub instructions: String,
    /// RFC 3339 timestamp set by the server on creation.
    pub prescribed_date: String,
    pub status: PrescriptionStatus,
    pub pharmacy_id: String,
    pub pharmacy: String,
    pub delivery_option: DeliveryOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_ready: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial prescription. `status` is ignored on create (new prescriptions are always pending).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refills: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PrescriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pharmacy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_option: Option<DeliveryOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_ready: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Prescription {
    /// Builds a prescription from a validated draft.
    ///
    /// The delivery address is dropped for pickup orders and blank notes are discarded.
    pub fn from_draft(
        id: RecordId,
        draft: PrescriptionDraft,
        prescribed_date: String,
        status: PrescriptionStatus,
    ) -> Self {
        let delivery_option = draft.delivery_option.unwrap_or_default();
        Self {
            id,
            patient_id: draft.patient_id.unwrap_or_default(),
            patient_name: draft.patient_name.unwrap_or_default(),
            medication_id: draft.medication_id.unwrap_or_default(),
            medication: draft.medication.unwrap_or_default().trim().to_string(),
            dosage: draft.dosage.unwrap_or_default().trim().to_string(),
            quantity: draft.quantity.unwrap_or(crate::constants::DEFAULT_QUANTITY),
            refills: draft.refills.unwrap_or(0),
            instructions: draft.instructions.unwrap_or_default().trim().to_string(),
            prescribed_date,
            status,
            pharmacy_id: draft.pharmacy_id.unwrap_or_default(),
            pharmacy: draft.pharmacy.unwrap_or_default(),
            delivery_option,
            delivery_address: match delivery_option {
                DeliveryOption::Delivery => draft.delivery_address,
                DeliveryOption::Pickup => None,
            },
            estimated_ready: draft.estimated_ready,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
        }
    }

    pub fn to_draft(&self) -> PrescriptionDraft {
        PrescriptionDraft {
            patient_id: Some(self.patient_id.clone()),
            patient_name: Some(self.patient_name.clone()),
            medication_id: Some(self.medication_id.clone()),
            medication: Some(self.medication.clone()),
            dosage: Some(self.dosage.clone()),
            quantity: Some(self.quantity),
            refills: Some(self.refills),
            instructions: Some(self.instructions.clone()),
            status: Some(self.status),
            pharmacy_id: Some(self.pharmacy_id.clone()),
            pharmacy: Some(self.pharmacy.clone()),
            delivery_option: Some(self.delivery_option),
            delivery_address: self.delivery_address.clone(),
            estimated_ready: self.estimated_ready.clone(),
            notes: self.notes.clone(),
        }
    }

    pub fn merged(&self, patch: PrescriptionDraft) -> PrescriptionDraft {
        let current = self.to_draft();
        PrescriptionDraft {
            patient_id: patch.patient_id.or(current.patient_id),
            patient_name: patch.patient_name.or(current.patient_name),
            medication_id: patch.medication_id.or(current.medication_id),
            medication: patch.medication.or(current.medication),
            dosage: patch.dosage.or(current.dosage),
            quantity: patch.quantity.or(current.quantity),
            refills: patch.refills.or(current.refills),
            instructions: patch.instructions.or(current.instructions),
            status: patch.status.or(current.status),
            pharmacy_id: patch.pharmacy_id.or(current.pharmacy_id),
            pharmacy: patch.pharmacy.or(current.pharmacy),
            delivery_option: patch.delivery_option.or(current.delivery_option),
            delivery_address: patch.delivery_address.or(current.delivery_address),
            estimated_ready: patch.estimated_ready.or(current.estimated_ready),
            notes: patch.notes.or(current.notes),
        }
    }
}

impl Record for Prescription {
    const KIND: &'static str = "prescription";

    fn id(&self) -> RecordId {
        self.id
    }
}
