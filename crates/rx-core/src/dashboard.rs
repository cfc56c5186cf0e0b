//! Headline counts for the front-desk dashboard.

use crate::appointment::Appointment;
use crate::prescription::{DeliveryOption, Prescription, PrescriptionStatus};
use crate::validation::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Prescriptions written today.
    pub todays_prescriptions: usize,
    /// Ready prescriptions waiting for collection.
    pub ready_for_pickup: usize,
    /// Ready prescriptions going out by delivery.
    pub out_for_delivery: usize,
    /// Scheduled or confirmed appointments dated today or later.
    pub upcoming_appointments: usize,
}

impl DashboardSummary {
    pub fn compute(
        prescriptions: &[Prescription],
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> Self {
        let ready = |option: DeliveryOption| {
            prescriptions
                .iter()
                .filter(|p| p.status == PrescriptionStatus::Ready && p.delivery_option == option)
                .count()
        };

        Self {
            todays_prescriptions: prescriptions
                .iter()
                .filter(|p| parse_date(&p.prescribed_date) == Some(today))
                .count(),
            ready_for_pickup: ready(DeliveryOption::Pickup),
            out_for_delivery: ready(DeliveryOption::Delivery),
            upcoming_appointments: appointments
                .iter()
                .filter(|a| a.status.is_open())
                .filter(|a| parse_date(&a.date).is_some_and(|d| d >= today))
                .count(),
        }
    }
}
