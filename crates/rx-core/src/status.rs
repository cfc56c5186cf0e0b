//! Status presentation: colour tokens, status labels and tracker steps.
//!
//! Everything here is a static lookup over the current status value. Trackers derive their
//! `completed`/`current` flags by membership checks and never look at history, so a caller can
//! set any status and the tracker simply renders it as the new current step.

use crate::prescription::{DeliveryOption, Prescription, PrescriptionStatus};
use serde::Serialize;
use utoipa::ToSchema;

/// Display colour assigned to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Orange,
    Yellow,
    Blue,
    Green,
    Red,
    /// Neutral fallback for statuses the table does not know.
    Gray,
}

impl StatusColor {
    /// Stylesheet token understood by the web front end.
    pub fn token(&self) -> &'static str {
        match self {
            StatusColor::Orange => "text-orange-400",
            StatusColor::Yellow => "text-yellow-400",
            StatusColor::Blue => "text-blue-400",
            StatusColor::Green => "text-green-400",
            StatusColor::Red => "text-red-400",
            StatusColor::Gray => "text-gray-400",
        }
    }
}

/// Looks up the colour for a prescription or appointment status string.
///
/// Unknown statuses map to [`StatusColor::Gray`].
pub fn status_color(status: &str) -> StatusColor {
    match status {
        "pending" => StatusColor::Orange,
        "filled" => StatusColor::Yellow,
        "ready" | "scheduled" => StatusColor::Blue,
        "delivered" | "confirmed" | "completed" => StatusColor::Green,
        "cancelled" | "no-show" => StatusColor::Red,
        _ => StatusColor::Gray,
    }
}

/// Status with its first letter upper-cased, e.g. `no-show` becomes `No-show`.
pub fn status_label(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One stage of the prescription status tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStep {
    pub status: PrescriptionStatus,
    pub label: String,
    pub description: String,
    pub completed: bool,
    pub current: bool,
    /// Estimated pickup/delivery time, only on the ready step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_ready: Option<String>,
}

/// Everything needed to render a prescription's status tracker.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackerView {
    pub status: PrescriptionStatus,
    pub status_label: String,
    pub color: StatusColor,
    pub cancelled: bool,
    pub steps: Vec<TrackerStep>,
    pub delivery: DeliveryTracking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The four lifecycle steps of a prescription in display order.
pub fn prescription_steps(prescription: &Prescription) -> Vec<TrackerStep> {
    use PrescriptionStatus::*;

    let status = prescription.status;
    let delivered = prescription.delivery_option == DeliveryOption::Delivery;

    vec![
        TrackerStep {
            status: Pending,
            label: "Prescription Submitted".into(),
            description: "Prescription has been sent to pharmacy".into(),
            completed: matches!(status, Filled | Ready | Delivered),
            current: status == Pending,
            estimated_ready: None,
        },
        TrackerStep {
            status: Filled,
            label: "Filled by Pharmacy".into(),
            description: "Pharmacy has prepared the medication".into(),
            completed: matches!(status, Ready | Delivered),
            current: status == Filled,
            estimated_ready: None,
        },
        TrackerStep {
            status: Ready,
            label: "Ready for Pickup/Delivery".into(),
            description: if delivered {
                "Ready for delivery to your address".into()
            } else {
                "Ready for pickup at pharmacy".into()
            },
            completed: status == Delivered,
            current: status == Ready,
            estimated_ready: prescription.estimated_ready.clone(),
        },
        TrackerStep {
            status: Delivered,
            label: if delivered { "Delivered" } else { "Picked Up" }.into(),
            description: if delivered {
                "Medication delivered to your address".into()
            } else {
                "Medication picked up successfully".into()
            },
            completed: status == Delivered,
            current: status == Delivered,
            estimated_ready: None,
        },
    ]
}

/// One stage of the delivery tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStep {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub label: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    pub completed: bool,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Delivery progress for a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DeliveryTracking {
    /// Collected in person; there is nothing to track beyond readiness.
    Pickup {
        pharmacy: String,
        #[serde(rename = "readyForPickup")]
        ready_for_pickup: bool,
    },
    Delivery {
        #[serde(rename = "estimatedDelivery")]
        estimated_delivery: String,
        steps: Vec<DeliveryStep>,
    },
}

impl DeliveryTracking {
    /// Index of the step flagged current, if any.
    pub fn current_step(&self) -> Option<usize> {
        match self {
            DeliveryTracking::Pickup { .. } => None,
            DeliveryTracking::Delivery { steps, .. } => steps.iter().position(|s| s.current),
        }
    }
}

pub fn delivery_tracking(prescription: &Prescription) -> DeliveryTracking {
    use PrescriptionStatus::*;

    let status = prescription.status;

    if prescription.delivery_option != DeliveryOption::Delivery {
        return DeliveryTracking::Pickup {
            pharmacy: prescription.pharmacy.clone(),
            ready_for_pickup: status == Ready,
        };
    }

    let steps = vec![
        DeliveryStep {
            id: "packed",
            label: "Order Packed",
            description: "Your prescription has been packed and is ready for delivery",
            completed: matches!(status, Ready | Delivered),
            current: status == Ready,
            location: None,
        },
        DeliveryStep {
            id: "picked-up",
            label: "Picked Up by Driver",
            description: "A delivery driver has picked up your order",
            completed: status == Delivered,
            current: status == Filled,
            location: None,
        },
        DeliveryStep {
            id: "out-for-delivery",
            label: "Out for Delivery",
            description: "Your order is on the way to your address",
            completed: status == Delivered,
            current: status == Ready,
            location: Some("2 miles away".into()),
        },
        DeliveryStep {
            id: "delivered",
            label: "Delivered",
            description: "Your prescription has been delivered successfully",
            completed: status == Delivered,
            current: status == Delivered,
            location: prescription.delivery_address.clone(),
        },
    ];

    DeliveryTracking::Delivery {
        estimated_delivery: prescription
            .estimated_ready
            .clone()
            .unwrap_or_else(|| "TBD".into()),
        steps,
    }
}

/// Builds the full tracker view for a prescription.
pub fn tracker_view(prescription: &Prescription) -> TrackerView {
    TrackerView {
        status: prescription.status,
        status_label: status_label(prescription.status.as_str()),
        color: status_color(prescription.status.as_str()),
        cancelled: prescription.status == PrescriptionStatus::Cancelled,
        steps: prescription_steps(prescription),
        delivery: delivery_tracking(prescription),
        notes: prescription.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prescription::PrescriptionDraft;
    use crate::RecordId;

    fn prescription(status: PrescriptionStatus, option: DeliveryOption) -> Prescription {
        Prescription::from_draft(
            RecordId::new(),
            PrescriptionDraft {
                patient_name: Some("Emily Davis".into()),
                medication: Some("Metformin 500mg".into()),
                pharmacy: Some("Rite Aid".into()),
                delivery_option: Some(option),
                delivery_address: Some("9 Birch Ln".into()),
                estimated_ready: Some("3:45 PM".into()),
                ..Default::default()
            },
            "2024-01-13T10:00:00Z".into(),
            status,
        )
    }

    fn flags(steps: &[TrackerStep]) -> Vec<(bool, bool)> {
        steps.iter().map(|s| (s.completed, s.current)).collect()
    }

    #[test]
    fn test_status_color_table() {
        assert_eq!(status_color("pending"), StatusColor::Orange);
        assert_eq!(status_color("filled"), StatusColor::Yellow);
        assert_eq!(status_color("ready").token(), "text-blue-400");
        assert_eq!(status_color("scheduled"), StatusColor::Blue);
        assert_eq!(status_color("completed"), StatusColor::Green);
        assert_eq!(status_color("no-show"), StatusColor::Red);
    }

    #[test]
    fn test_unknown_status_color_is_neutral() {
        assert_eq!(status_color("out-for-delivery"), StatusColor::Gray);
        assert_eq!(status_color(""), StatusColor::Gray);
        assert_eq!(status_color("PENDING").token(), "text-gray-400");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label("pending"), "Pending");
        assert_eq!(status_label("no-show"), "No-show");
        assert_eq!(status_label(""), "");
    }

    #[test]
    fn test_steps_for_filled_prescription() {
        let rx = prescription(PrescriptionStatus::Filled, DeliveryOption::Pickup);
        let steps = prescription_steps(&rx);

        assert_eq!(
            flags(&steps),
            vec![(true, false), (false, true), (false, false), (false, false)]
        );
        assert_eq!(steps[2].description, "Ready for pickup at pharmacy");
        assert_eq!(steps[3].label, "Picked Up");
        assert_eq!(steps[2].estimated_ready.as_deref(), Some("3:45 PM"));
    }

    #[test]
    fn test_steps_for_delivered_prescription() {
        let rx = prescription(PrescriptionStatus::Delivered, DeliveryOption::Delivery);
        let steps = prescription_steps(&rx);

        assert_eq!(
            flags(&steps),
            vec![(true, false), (true, false), (true, false), (true, true)]
        );
        assert_eq!(steps[3].label, "Delivered");
    }

    #[test]
    fn test_cancelled_prescription_has_no_progress() {
        let rx = prescription(PrescriptionStatus::Cancelled, DeliveryOption::Pickup);
        let view = tracker_view(&rx);

        assert!(view.cancelled);
        assert_eq!(view.color, StatusColor::Red);
        assert!(view.steps.iter().all(|s| !s.completed && !s.current));
    }

    #[test]
    fn test_pickup_delivery_tracking() {
        let rx = prescription(PrescriptionStatus::Ready, DeliveryOption::Pickup);

        assert_eq!(
            delivery_tracking(&rx),
            DeliveryTracking::Pickup {
                pharmacy: "Rite Aid".into(),
                ready_for_pickup: true,
            }
        );
        assert_eq!(delivery_tracking(&rx).current_step(), None);
    }

    #[test]
    fn test_delivery_tracking_ready() {
        let rx = prescription(PrescriptionStatus::Ready, DeliveryOption::Delivery);
        let tracking = delivery_tracking(&rx);

        match &tracking {
            DeliveryTracking::Delivery {
                estimated_delivery,
                steps,
            } => {
                assert_eq!(estimated_delivery, "3:45 PM");
                assert!(steps[0].completed && steps[0].current);
                assert!(!steps[1].completed && !steps[1].current);
                assert!(steps[2].current);
                assert_eq!(steps[3].location.as_deref(), Some("9 Birch Ln"));
            }
            other => panic!("expected delivery tracking, got {other:?}"),
        }
        assert_eq!(tracking.current_step(), Some(0));
    }

    #[test]
    fn test_tracker_view_serializes_mode_tag() {
        let rx = prescription(PrescriptionStatus::Pending, DeliveryOption::Delivery);
        let json = serde_json::to_value(tracker_view(&rx)).unwrap();

        assert_eq!(json["statusLabel"], "Pending");
        assert_eq!(json["color"], "orange");
        assert_eq!(json["delivery"]["mode"], "delivery");
        assert_eq!(json["delivery"]["steps"][1]["id"], "picked-up");
    }
}
