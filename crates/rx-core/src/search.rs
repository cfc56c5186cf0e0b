//! Case-insensitive substring filtering over in-memory lists.
//!
//! Lists are small and fetched in full, so filtering is a linear scan re-run on every query.

use crate::appointment::Appointment;
use crate::medication::Medication;
use crate::patient::Patient;
use crate::prescription::Prescription;

/// Accessor for one searchable string field of `T`.
pub type SearchField<T> = fn(&T) -> Option<&str>;

/// Keeps the items where any of `fields` contains `term`, ignoring case.
///
/// A blank term keeps everything.
pub fn search_items<'a, T>(items: &'a [T], term: &str, fields: &[SearchField<T>]) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return items.iter().collect();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| matches_any(*item, &needle, fields))
        .collect()
}

fn matches_any<T>(item: &T, needle: &str, fields: &[SearchField<T>]) -> bool {
    fields
        .iter()
        .any(|field| field(item).is_some_and(|value| value.to_lowercase().contains(needle)))
}

const PATIENT_FIELDS: [SearchField<Patient>; 2] =
    [|p| Some(p.name.as_str()), |p| Some(p.email.as_str())];

const MEDICATION_FIELDS: [SearchField<Medication>; 3] = [
    |m| Some(m.name.as_str()),
    |m| m.generic_name.as_deref(),
    |m| Some(m.strength.as_str()),
];

const PRESCRIPTION_FIELDS: [SearchField<Prescription>; 2] = [
    |p| Some(p.patient_name.as_str()),
    |p| Some(p.medication.as_str()),
];

const APPOINTMENT_FIELDS: [SearchField<Appointment>; 2] =
    [|a| Some(a.patient_name.as_str()), |a| Some(a.kind.as_str())];

/// Patients whose name or email contains `term` (any case), or whose phone contains it as typed.
pub fn filter_patients<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    if term.trim().is_empty() {
        return patients.iter().collect();
    }
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| matches_any(*p, &needle, &PATIENT_FIELDS) || p.phone.contains(term))
        .collect()
}

pub fn filter_medications<'a>(medications: &'a [Medication], term: &str) -> Vec<&'a Medication> {
    search_items(medications, term, &MEDICATION_FIELDS)
}

pub fn filter_prescriptions<'a>(
    prescriptions: &'a [Prescription],
    term: &str,
) -> Vec<&'a Prescription> {
    search_items(prescriptions, term, &PRESCRIPTION_FIELDS)
}

pub fn filter_appointments<'a>(
    appointments: &'a [Appointment],
    term: &str,
) -> Vec<&'a Appointment> {
    search_items(appointments, term, &APPOINTMENT_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentDraft, AppointmentType};
    use crate::catalog::common_medications;
    use crate::patient::PatientDraft;
    use crate::RecordId;

    fn patients() -> Vec<Patient> {
        [
            ("Sarah Johnson", "sarah.j@example.com", "(555) 100-0001"),
            ("Michael Chen", "mchen@example.com", "(555) 100-0002"),
            ("Emily Davis", "emily.davis@example.com", "(555) 100-0003"),
            ("Robert Wilson", "rwilson@example.com", "(555) 100-0004"),
            ("Lisa Anderson", "lisa.a@example.com", "(555) 100-0005"),
            ("David Brown", "dbrown@example.com", "(555) 100-0006"),
            ("Olivia Martinez", "olivia.m@example.com", "(555) 100-0007"),
            ("James Taylor", "jtaylor@example.com", "(555) 100-0008"),
            ("Sophia Thomas", "sophia.t@example.com", "(555) 100-0009"),
            ("Daniel Moore", "dmoore@example.com", "(555) 100-0010"),
        ]
        .into_iter()
        .map(|(name, email, phone)| {
            Patient::from_draft(
                RecordId::new(),
                PatientDraft {
                    name: Some(name.into()),
                    email: Some(email.into()),
                    phone: Some(phone.into()),
                    date_of_birth: Some("1980-01-01".into()),
                    address: Some("1 Main St".into()),
                    ..Default::default()
                },
            )
        })
        .collect()
    }

    #[test]
    fn test_blank_term_keeps_everything() {
        let all = patients();
        assert_eq!(filter_patients(&all, "").len(), 10);
        assert_eq!(filter_patients(&all, "   ").len(), 10);
    }

    #[test]
    fn test_unique_substring_returns_single_patient() {
        let all = patients();

        let by_name = filter_patients(&all, "CHEN");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Michael Chen");

        let by_email = filter_patients(&all, "olivia.m@");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Olivia Martinez");
    }

    #[test]
    fn test_phone_matches_as_typed() {
        let all = patients();

        let matched = filter_patients(&all, "100-0004");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Robert Wilson");
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter_patients(&patients(), "zzz").is_empty());
    }

    #[test]
    fn test_medication_search_covers_generic_name_and_strength() {
        let catalog = common_medications();

        let generic = filter_medications(&catalog, "hcl");
        assert_eq!(generic.len(), 1);
        assert_eq!(generic[0].name, "Metformin");

        let strength = filter_medications(&catalog, "20mg");
        let names: Vec<&str> = strength.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Atorvastatin", "Omeprazole"]);
    }

    #[test]
    fn test_appointment_search_matches_type() {
        let appointments = vec![
            Appointment::from_draft(
                RecordId::new(),
                AppointmentDraft {
                    patient_name: Some("Robert Wilson".into()),
                    kind: Some(AppointmentType::FollowUp),
                    ..Default::default()
                },
            ),
            Appointment::from_draft(
                RecordId::new(),
                AppointmentDraft {
                    patient_name: Some("Lisa Anderson".into()),
                    kind: Some(AppointmentType::Consultation),
                    ..Default::default()
                },
            ),
        ];

        let matched = filter_appointments(&appointments, "follow");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].patient_name, "Robert Wilson");
    }
}
