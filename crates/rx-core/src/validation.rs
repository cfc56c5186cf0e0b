//! Input validation for patients, prescriptions, appointments and pharmacies.
//!
//! Every validator is a pure function from a draft to a list of [`FieldError`]s; an empty list
//! means the draft is valid. Field names are the camelCase names used on the wire so clients can
//! attach messages to their inputs directly.
//!
//! Validators that depend on the current date have an `*_at`/`*_on` variant taking the clock
//! value explicitly.

use crate::appointment::AppointmentDraft;
use crate::constants::{DEFAULT_APPOINTMENT_TIME, MAX_PATIENT_AGE_YEARS};
use crate::patient::PatientDraft;
use crate::pharmacy::PharmacyDraft;
use crate::prescription::{DeliveryOption, PrescriptionDraft};
use crate::{NonEmptyText, RxError, RxResult};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([0-9]{3}\) [0-9]{3}-[0-9]{4}$").expect("valid phone regex"));

/// A single problem with one field of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Returns true if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns true if `phone` is formatted exactly as `(XXX) XXX-XXXX`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

fn is_blank(value: Option<&str>) -> bool {
    NonEmptyText::from_optional(value).is_none()
}

fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// Parses a `YYYY-MM-DD` date, also accepting a full RFC 3339 timestamp.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parses `HH:MM` (seconds optional).
pub(crate) fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

/// Validates a patient draft against today's local date.
pub fn validate_patient(patient: &PatientDraft) -> Vec<FieldError> {
    validate_patient_on(patient, Local::now().date_naive())
}

/// Validates a patient draft, computing age relative to `today`.
///
/// Age is the difference in calendar years, so it only has to land in `[0, 150]`.
pub fn validate_patient_on(patient: &PatientDraft, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();

    match patient.name.as_deref() {
        name if is_blank(name) => errors.push(FieldError::new("name", "Name is required")),
        Some(name) if name.chars().count() < 2 => errors.push(FieldError::new(
            "name",
            "Name must be at least 2 characters",
        )),
        _ => {}
    }

    match patient.email.as_deref() {
        email if is_blank(email) => errors.push(FieldError::new("email", "Email is required")),
        Some(email) if !is_valid_email(email) => errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        )),
        _ => {}
    }

    match patient.phone.as_deref() {
        phone if is_blank(phone) => {
            errors.push(FieldError::new("phone", "Phone number is required"))
        }
        Some(phone) if !is_valid_phone(phone) => errors.push(FieldError::new(
            "phone",
            "Phone must be in format (XXX) XXX-XXXX",
        )),
        _ => {}
    }

    match patient.date_of_birth.as_deref() {
        dob if is_missing(dob) => {
            errors.push(FieldError::new("dateOfBirth", "Date of birth is required"))
        }
        Some(dob) => {
            let age = parse_date(dob).map(|birth| today.year() - birth.year());
            if !matches!(age, Some(0..=MAX_PATIENT_AGE_YEARS)) {
                errors.push(FieldError::new(
                    "dateOfBirth",
                    "Please enter a valid date of birth",
                ));
            }
        }
        None => {}
    }

    if is_blank(patient.address.as_deref()) {
        errors.push(FieldError::new("address", "Address is required"));
    }

    errors
}

pub fn validate_prescription(prescription: &PrescriptionDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_missing(prescription.patient_id.as_deref()) {
        errors.push(FieldError::new("patientId", "Patient is required"));
    }

    if is_blank(prescription.medication.as_deref()) {
        errors.push(FieldError::new("medication", "Medication is required"));
    }

    if is_blank(prescription.dosage.as_deref()) {
        errors.push(FieldError::new(
            "dosage",
            "Dosage instructions are required",
        ));
    }

    if is_blank(prescription.instructions.as_deref()) {
        errors.push(FieldError::new("instructions", "Instructions are required"));
    }

    if matches!(prescription.quantity, Some(q) if q <= 0) {
        errors.push(FieldError::new(
            "quantity",
            "Quantity must be greater than 0",
        ));
    }

    if matches!(prescription.refills, Some(r) if r < 0) {
        errors.push(FieldError::new("refills", "Refills cannot be negative"));
    }

    if is_missing(prescription.pharmacy_id.as_deref()) {
        errors.push(FieldError::new(
            "pharmacyId",
            "Pharmacy selection is required",
        ));
    }

    if prescription.delivery_option == Some(DeliveryOption::Delivery)
        && is_blank(prescription.delivery_address.as_deref())
    {
        errors.push(FieldError::new(
            "deliveryAddress",
            "Delivery address is required for delivery",
        ));
    }

    errors
}

/// Validates an appointment draft against the current local time.
pub fn validate_appointment(appointment: &AppointmentDraft) -> Vec<FieldError> {
    validate_appointment_at(appointment, Local::now().naive_local())
}

/// Validates an appointment draft; the composed date and time must be strictly after `now`.
///
/// A missing time is treated as midnight for the future-date check, and is also reported as
/// missing in its own right.
pub fn validate_appointment_at(
    appointment: &AppointmentDraft,
    now: NaiveDateTime,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_missing(appointment.patient_id.as_deref()) {
        errors.push(FieldError::new("patientId", "Patient is required"));
    }

    match appointment.date.as_deref() {
        date if is_missing(date) => errors.push(FieldError::new("date", "Date is required")),
        Some(date) => {
            let time = appointment
                .time
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_APPOINTMENT_TIME);
            let scheduled = parse_date(date)
                .zip(parse_time(time))
                .map(|(d, t)| d.and_time(t));
            if !matches!(scheduled, Some(at) if at > now) {
                errors.push(FieldError::new(
                    "date",
                    "Appointment must be scheduled for a future date and time",
                ));
            }
        }
        None => {}
    }

    if is_missing(appointment.time.as_deref()) {
        errors.push(FieldError::new("time", "Time is required"));
    }

    if is_blank(appointment.reason.as_deref()) {
        errors.push(FieldError::new("reason", "Reason for visit is required"));
    }

    if matches!(appointment.duration, Some(d) if d <= 0) {
        errors.push(FieldError::new(
            "duration",
            "Duration must be greater than 0 minutes",
        ));
    }

    errors
}

pub fn validate_pharmacy(pharmacy: &PharmacyDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if is_blank(pharmacy.name.as_deref()) {
        errors.push(FieldError::new("name", "Pharmacy name is required"));
    }

    if is_blank(pharmacy.address.as_deref()) {
        errors.push(FieldError::new("address", "Address is required"));
    }

    if is_blank(pharmacy.phone.as_deref()) {
        errors.push(FieldError::new("phone", "Phone number is required"));
    }

    if is_blank(pharmacy.hours.as_deref()) {
        errors.push(FieldError::new("hours", "Hours of operation are required"));
    }

    if matches!(pharmacy.estimated_fill_time, Some(t) if t <= 0) {
        errors.push(FieldError::new(
            "estimatedFillTime",
            "Fill time must be greater than 0 minutes",
        ));
    }

    if matches!(pharmacy.rating, Some(r) if !(0.0..=5.0).contains(&r)) {
        errors.push(FieldError::new("rating", "Rating must be between 0 and 5"));
    }

    errors
}

/// Formats errors one per line as `field: message`.
pub fn format_validation_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn has_validation_errors(errors: &[FieldError]) -> bool {
    !errors.is_empty()
}

/// Turns a validator's output into a result.
pub fn ensure_valid(errors: Vec<FieldError>) -> RxResult<()> {
    if has_validation_errors(&errors) {
        return Err(RxError::Validation(errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn valid_patient() -> PatientDraft {
        PatientDraft {
            name: Some("Sarah Johnson".into()),
            email: Some("sarah.johnson@example.com".into()),
            phone: Some("(555) 123-4567".into()),
            date_of_birth: Some("1985-03-12".into()),
            address: Some("12 Elm St, Anytown, ST 12345".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_patient_has_no_errors() {
        assert!(validate_patient_on(&valid_patient(), today()).is_empty());
    }

    #[test]
    fn test_empty_patient_reports_every_required_field() {
        let errors = validate_patient_on(&PatientDraft::default(), today());

        assert_eq!(
            fields(&errors),
            vec!["name", "email", "phone", "dateOfBirth", "address"]
        );
        assert_eq!(errors[0].message, "Name is required");
    }

    #[test]
    fn test_patient_name_too_short() {
        let patient = PatientDraft {
            name: Some("A".into()),
            ..valid_patient()
        };

        let errors = validate_patient_on(&patient, today());
        assert_eq!(
            errors,
            vec![FieldError::new("name", "Name must be at least 2 characters")]
        );
    }

    #[test]
    fn test_patient_phone_format() {
        let unformatted = PatientDraft {
            phone: Some("5551234567".into()),
            ..valid_patient()
        };
        assert_eq!(
            fields(&validate_patient_on(&unformatted, today())),
            vec!["phone"]
        );

        let formatted = PatientDraft {
            phone: Some("(555) 123-4567".into()),
            ..valid_patient()
        };
        assert!(validate_patient_on(&formatted, today()).is_empty());
    }

    #[test]
    fn test_patient_email_format() {
        for bad in ["sarah", "sarah@example", "sa rah@example.com", "@example.com"] {
            let patient = PatientDraft {
                email: Some(bad.into()),
                ..valid_patient()
            };
            let errors = validate_patient_on(&patient, today());
            assert_eq!(fields(&errors), vec!["email"], "{bad} should be rejected");
            assert_eq!(errors[0].message, "Please enter a valid email address");
        }
    }

    #[test]
    fn test_patient_date_of_birth_age_bounds() {
        for (dob, ok) in [
            ("2027-01-01", false),
            ("1875-06-01", false),
            ("1876-01-01", true),
            ("2026-10-19", true),
            ("not a date", false),
        ] {
            let patient = PatientDraft {
                date_of_birth: Some(dob.into()),
                ..valid_patient()
            };
            let errors = validate_patient_on(&patient, today());
            if ok {
                assert!(errors.is_empty(), "{dob} should be accepted");
            } else {
                assert_eq!(fields(&errors), vec!["dateOfBirth"], "{dob} should be rejected");
            }
        }
    }

    #[test]
    fn test_prescription_delivery_address_required_only_for_delivery() {
        let delivery = PrescriptionDraft {
            delivery_option: Some(DeliveryOption::Delivery),
            ..Default::default()
        };
        assert!(fields(&validate_prescription(&delivery)).contains(&"deliveryAddress"));

        let pickup = PrescriptionDraft {
            delivery_option: Some(DeliveryOption::Pickup),
            ..Default::default()
        };
        assert!(!fields(&validate_prescription(&pickup)).contains(&"deliveryAddress"));

        let blank_address = PrescriptionDraft {
            delivery_option: Some(DeliveryOption::Delivery),
            delivery_address: Some("   ".into()),
            ..Default::default()
        };
        assert!(fields(&validate_prescription(&blank_address)).contains(&"deliveryAddress"));
    }

    #[test]
    fn test_prescription_numeric_rules() {
        let draft = PrescriptionDraft {
            patient_id: Some("p".into()),
            medication: Some("Amoxicillin 500mg".into()),
            dosage: Some("500mg".into()),
            instructions: Some("3x daily for 7 days".into()),
            pharmacy_id: Some("ph".into()),
            quantity: Some(0),
            refills: Some(-1),
            ..Default::default()
        };

        let errors = validate_prescription(&draft);
        assert_eq!(fields(&errors), vec!["quantity", "refills"]);

        let fixed = PrescriptionDraft {
            quantity: Some(30),
            refills: Some(0),
            ..draft
        };
        assert!(validate_prescription(&fixed).is_empty());
    }

    #[test]
    fn test_appointment_in_the_past_reports_date() {
        let draft = AppointmentDraft {
            date: Some("2020-01-01".into()),
            time: Some("10:00".into()),
            reason: Some("x".into()),
            patient_id: Some("p".into()),
            ..Default::default()
        };

        let errors = validate_appointment(&draft);
        assert_eq!(fields(&errors), vec!["date"]);
        assert_eq!(
            errors[0].message,
            "Appointment must be scheduled for a future date and time"
        );
    }

    #[test]
    fn test_appointment_future_is_valid_and_missing_time_defaults_to_midnight() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let future = AppointmentDraft {
            date: Some("2026-10-19".into()),
            time: Some("12:30".into()),
            reason: Some("Check-up".into()),
            patient_id: Some("p".into()),
            duration: Some(30),
            ..Default::default()
        };
        assert!(validate_appointment_at(&future, now).is_empty());

        // Same day without a time composes to 00:00, which is already past.
        let no_time = AppointmentDraft {
            time: None,
            ..future.clone()
        };
        assert_eq!(
            fields(&validate_appointment_at(&no_time, now)),
            vec!["date", "time"]
        );

        let exactly_now = AppointmentDraft {
            time: Some("12:00".into()),
            ..future
        };
        assert_eq!(
            fields(&validate_appointment_at(&exactly_now, now)),
            vec!["date"]
        );
    }

    #[test]
    fn test_appointment_duration_must_be_positive() {
        let now = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let draft = AppointmentDraft {
            date: Some("2026-02-01".into()),
            time: Some("09:15".into()),
            reason: Some("Follow-up".into()),
            patient_id: Some("p".into()),
            duration: Some(0),
            ..Default::default()
        };

        assert_eq!(fields(&validate_appointment_at(&draft, now)), vec!["duration"]);
    }

    #[test]
    fn test_pharmacy_rules() {
        let draft = PharmacyDraft {
            name: Some("CVS Pharmacy".into()),
            address: Some("123 Main St".into()),
            phone: Some("(555) 123-4567".into()),
            hours: Some("Mon-Fri: 8AM-10PM".into()),
            estimated_fill_time: Some(0),
            rating: Some(5.5),
            ..Default::default()
        };

        let errors = validate_pharmacy(&draft);
        assert_eq!(fields(&errors), vec!["estimatedFillTime", "rating"]);

        let empty = validate_pharmacy(&PharmacyDraft::default());
        assert_eq!(fields(&empty), vec!["name", "address", "phone", "hours"]);
    }

    #[test]
    fn test_format_and_ensure_valid() {
        let errors = vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("phone", "Phone number is required"),
        ];

        assert_eq!(
            format_validation_errors(&errors),
            "name: Name is required\nphone: Phone number is required"
        );
        assert!(has_validation_errors(&errors));
        assert!(matches!(
            ensure_valid(errors),
            Err(RxError::Validation(list)) if list.len() == 2
        ));
        assert!(ensure_valid(vec![]).is_ok());
    }
}
