//! Appointment records.

use crate::store::Record;
use crate::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    CheckUp,
    Urgent,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "consultation",
            AppointmentType::FollowUp => "follow-up",
            AppointmentType::CheckUp => "check-up",
            AppointmentType::Urgent => "urgent",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }

    /// Scheduled and confirmed appointments are still expected to happen.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = crate::RxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                crate::RxError::InvalidInput(format!("unknown appointment status: {s}"))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[schema(value_type = String)]
    pub id: RecordId,
    pub patient_id: String,
    pub patient_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, 24 hour clock.
    pub time: String,
    /// Minutes.
    pub duration: i64,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Prescriptions this visit follows up on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription_ids: Option<Vec<String>>,
}

impl Appointment {
    /// Builds an appointment from a validated draft; status defaults to scheduled.
    pub fn from_draft(id: RecordId, draft: AppointmentDraft) -> Self {
        Self {
            id,
            patient_id: draft.patient_id.unwrap_or_default(),
            patient_name: draft.patient_name.unwrap_or_default(),
            date: draft.date.unwrap_or_default(),
            time: draft.time.unwrap_or_default(),
            duration: draft
                .duration
                .unwrap_or(crate::constants::DEFAULT_APPOINTMENT_DURATION),
            kind: draft.kind.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            reason: draft.reason.unwrap_or_default().trim().to_string(),
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
            prescription_ids: draft.prescription_ids.filter(|ids| !ids.is_empty()),
        }
    }

    pub fn to_draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            patient_id: Some(self.patient_id.clone()),
            patient_name: Some(self.patient_name.clone()),
            date: Some(self.date.clone()),
            time: Some(self.time.clone()),
            duration: Some(self.duration),
            kind: Some(self.kind),
            status: Some(self.status),
            reason: Some(self.reason.clone()),
            notes: self.notes.clone(),
            prescription_ids: self.prescription_ids.clone(),
        }
    }

    pub fn merged(&self, patch: AppointmentDraft) -> AppointmentDraft {
        let current = self.to_draft();
        AppointmentDraft {
            patient_id: patch.patient_id.or(current.patient_id),
            patient_name: patch.patient_name.or(current.patient_name),
            date: patch.date.or(current.date),
            time: patch.time.or(current.time),
            duration: patch.duration.or(current.duration),
            kind: patch.kind.or(current.kind),
            status: patch.status.or(current.status),
            reason: patch.reason.or(current.reason),
            notes: patch.notes.or(current.notes),
            prescription_ids: patch.prescription_ids.or(current.prescription_ids),
        }
    }
}

impl Record for Appointment {
    const KIND: &'static str = "appointment";

    fn id(&self) -> RecordId {
        self.id
    }
}
