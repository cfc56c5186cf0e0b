//! Built-in reference data: the common medications list and sample pharmacies.

use crate::medication::{Medication, MedicationForm};
use crate::pharmacy::PharmacyDraft;

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    generic_name: &'static str,
    strength: &'static str,
    form: MedicationForm,
    ndc: &'static str,
}

const COMMON_MEDICATIONS: [CatalogEntry; 5] = [
    CatalogEntry {
        id: "1",
        name: "Amoxicillin",
        generic_name: "Amoxicillin",
        strength: "500mg",
        form: MedicationForm::Capsule,
        ndc: "12345-678-90",
    },
    CatalogEntry {
        id: "2",
        name: "Lisinopril",
        generic_name: "Lisinopril",
        strength: "10mg",
        form: MedicationForm::Tablet,
        ndc: "12345-678-91",
    },
    CatalogEntry {
        id: "3",
        name: "Metformin",
        generic_name: "Metformin HCl",
        strength: "500mg",
        form: MedicationForm::Tablet,
        ndc: "12345-678-92",
    },
    CatalogEntry {
        id: "4",
        name: "Atorvastatin",
        generic_name: "Atorvastatin Calcium",
        strength: "20mg",
        form: MedicationForm::Tablet,
        ndc: "12345-678-93",
    },
    CatalogEntry {
        id: "5",
        name: "Omeprazole",
        generic_name: "Omeprazole",
        strength: "20mg",
        form: MedicationForm::Capsule,
        ndc: "12345-678-94",
    },
];

/// The medications offered when writing a prescription, in catalog order.
pub fn common_medications() -> Vec<Medication> {
    COMMON_MEDICATIONS
        .iter()
        .map(|entry| Medication {
            id: entry.id.into(),
            name: entry.name.into(),
            generic_name: Some(entry.generic_name.into()),
            strength: entry.strength.into(),
            form: entry.form,
            manufacturer: "Generic".into(),
            ndc: entry.ndc.into(),
        })
        .collect()
}

/// Looks up a catalog medication by id.
pub fn find_medication(id: &str) -> Option<Medication> {
    common_medications().into_iter().find(|m| m.id == id)
}

/// Sample pharmacies used to seed an empty data directory.
pub fn sample_pharmacies() -> Vec<PharmacyDraft> {
    [
        (
            "CVS Pharmacy",
            "123 Main St, Anytown, ST 12345",
            "(555) 123-4567",
            "Mon-Fri: 8AM-10PM, Sat-Sun: 9AM-9PM",
            true,
            30,
            4.5,
        ),
        (
            "Walgreens",
            "456 Oak Ave, Anytown, ST 12345",
            "(555) 234-5678",
            "Mon-Fri: 7AM-11PM, Sat-Sun: 8AM-10PM",
            true,
            25,
            4.3,
        ),
        (
            "Rite Aid",
            "789 Pine St, Anytown, ST 12345",
            "(555) 345-6789",
            "Mon-Fri: 8AM-9PM, Sat-Sun: 9AM-8PM",
            false,
            45,
            4.1,
        ),
    ]
    .into_iter()
    .map(
        |(name, address, phone, hours, delivery, fill_time, rating)| PharmacyDraft {
            name: Some(name.into()),
            address: Some(address.into()),
            phone: Some(phone.into()),
            hours: Some(hours.into()),
            delivery_available: Some(delivery),
            estimated_fill_time: Some(fill_time),
            rating: Some(rating),
            distance: None,
        },
    )
    .collect()
}
