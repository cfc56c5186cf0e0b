//! Prescription records and their status lifecycle.
//!
//! Creating a prescription resolves the patient and pharmacy references to their display names,
//! fills in the catalog medication where one matches, and stamps the prescribed date and an
//! estimated ready time. Status changes are accepted in any direction.

use crate::config::CoreConfig;
use crate::format::estimate_ready_time;
use crate::patient::Patient;
use crate::pharmacy::Pharmacy;
use crate::prescription::{Prescription, PrescriptionDraft, PrescriptionStatus};
use crate::repositories::medications::MedicationCatalog;
use crate::repositories::resolve_reference;
use crate::status::{tracker_view, TrackerView};
use crate::store::RecordStore;
use crate::validation::{ensure_valid, validate_prescription, FieldError};
use crate::{RecordId, RxResult};
use chrono::{DateTime, Local, SecondsFormat};
use std::cmp::Reverse;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PrescriptionService {
    store: RecordStore<Prescription>,
    patients: RecordStore<Patient>,
    pharmacies: RecordStore<Pharmacy>,
    catalog: MedicationCatalog,
}

impl PrescriptionService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.prescriptions_dir()),
            patients: RecordStore::new(cfg.patients_dir()),
            pharmacies: RecordStore::new(cfg.pharmacies_dir()),
            catalog: MedicationCatalog::new(),
        }
    }

    /// Lists prescriptions, newest first, optionally filtered by patient and status.
    ///
    /// Prescribed dates are compared as instants, so records written under different UTC offsets
    /// still order correctly. Unparseable dates sort last.
    pub fn list(
        &self,
        patient_id: Option<&str>,
        status: Option<PrescriptionStatus>,
    ) -> Vec<Prescription> {
        let mut prescriptions: Vec<Prescription> = self
            .store
            .list()
            .into_iter()
            .filter(|p| patient_id.map_or(true, |id| p.patient_id == id))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .collect();
        prescriptions.sort_by_cached_key(|p| {
            Reverse(DateTime::parse_from_rfc3339(&p.prescribed_date).ok())
        });
        prescriptions
    }

    pub fn get(&self, id: &RecordId) -> RxResult<Prescription> {
        self.store.get(id)
    }

    /// The status tracker for one prescription.
    pub fn tracker(&self, id: &RecordId) -> RxResult<TrackerView> {
        Ok(tracker_view(&self.store.get(id)?))
    }

    pub fn create(&self, draft: PrescriptionDraft) -> RxResult<Prescription> {
        self.create_at(draft, Local::now())
    }

    /// Creates a pending prescription as if written at `now`.
    ///
    /// # Errors
    ///
    /// Returns `RxError::Validation` if the draft is invalid or names a patient or pharmacy that
    /// does not exist.
    pub fn create_at(
        &self,
        mut draft: PrescriptionDraft,
        now: DateTime<Local>,
    ) -> RxResult<Prescription> {
        self.fill_medication(&mut draft);

        let mut errors = validate_prescription(&draft);
        self.resolve_patient(&mut draft, &mut errors)?;
        let pharmacy = self.resolve_pharmacy(&mut draft, &mut errors)?;
        ensure_valid(errors)?;

        if let Some(pharmacy) = pharmacy {
            let option = draft.delivery_option.unwrap_or_default();
            draft.estimated_ready =
                estimate_ready_time(pharmacy.estimated_fill_time, option, now.naive_local());
        }

        let prescription = Prescription::from_draft(
            RecordId::new(),
            draft,
            now.to_rfc3339_opts(SecondsFormat::Millis, false),
            PrescriptionStatus::Pending,
        );
        self.store.insert(&prescription)?;
        tracing::info!(
            id = %prescription.id,
            medication = %prescription.medication,
            "prescription created"
        );
        Ok(prescription)
    }

    /// Applies the fields present in `patch`.
    ///
    /// Any status may replace any other; moving back up the tracker is logged as a warning.
    /// Patient and pharmacy references are only looked up again when the patch changes them, so
    /// the stored names survive the referenced record being deleted. Changing the medication id
    /// or name alone re-derives the other from the catalog.
    pub fn update(&self, id: &RecordId, patch: PrescriptionDraft) -> RxResult<Prescription> {
        let existing = self.store.get(id)?;
        let patient_changed = patch
            .patient_id
            .as_ref()
            .is_some_and(|p| *p != existing.patient_id);
        let pharmacy_changed = patch
            .pharmacy_id
            .as_ref()
            .is_some_and(|p| *p != existing.pharmacy_id);
        let medication_id_changed = patch.medication.is_none()
            && patch
                .medication_id
                .as_ref()
                .is_some_and(|m| *m != existing.medication_id);
        let medication_renamed = patch.medication_id.is_none()
            && patch
                .medication
                .as_ref()
                .is_some_and(|m| m.trim() != existing.medication);

        let mut merged = existing.merged(patch);
        if medication_id_changed {
            merged.medication = None;
        }
        if medication_renamed {
            merged.medication_id = None;
        }
        self.fill_medication(&mut merged);

        let mut errors = validate_prescription(&merged);
        if patient_changed {
            self.resolve_patient(&mut merged, &mut errors)?;
        }
        if pharmacy_changed {
            self.resolve_pharmacy(&mut merged, &mut errors)?;
        }
        ensure_valid(errors)?;

        let status = merged.status.unwrap_or(existing.status);
        if status.is_backward_from(existing.status) {
            tracing::warn!(
                id = %existing.id,
                from = %existing.status,
                to = %status,
                "prescription status moved backwards"
            );
        }

        let prescription =
            Prescription::from_draft(existing.id, merged, existing.prescribed_date, status);
        self.store.replace(&prescription)?;
        tracing::info!(id = %prescription.id, status = %prescription.status, "prescription updated");
        Ok(prescription)
    }

    pub fn set_status(&self, id: &RecordId, status: PrescriptionStatus) -> RxResult<Prescription> {
        self.update(
            id,
            PrescriptionDraft {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn delete(&self, id: &RecordId) -> RxResult<()> {
        self.store.remove(id)?;
        tracing::info!(id = %id, "prescription deleted");
        Ok(())
    }

    /// Completes the medication name from the catalog id, or the id from the name.
    fn fill_medication(&self, draft: &mut PrescriptionDraft) {
        let named = draft
            .medication
            .as_deref()
            .is_some_and(|m| !m.trim().is_empty());

        if !named {
            if let Some(found) = draft
                .medication_id
                .as_deref()
                .and_then(|id| self.catalog.get(id).ok())
            {
                draft.medication = Some(found.name);
            }
        } else if draft.medication_id.as_deref().map_or(true, str::is_empty) {
            if let Some(found) = draft
                .medication
                .as_deref()
                .and_then(|name| self.catalog.find_by_name(name))
            {
                draft.medication_id = Some(found.id.clone());
            }
        }
    }

    /// Copies the patient name onto the draft, reporting a dangling reference.
    fn resolve_patient(
        &self,
        draft: &mut PrescriptionDraft,
        errors: &mut Vec<FieldError>,
    ) -> RxResult<()> {
        if let Some(patient) = resolve_reference(
            &self.patients,
            draft.patient_id.as_deref(),
            "patientId",
            "Patient not found",
            errors,
        )? {
            draft.patient_name = Some(patient.name);
        }
        Ok(())
    }

    fn resolve_pharmacy(
        &self,
        draft: &mut PrescriptionDraft,
        errors: &mut Vec<FieldError>,
    ) -> RxResult<Option<Pharmacy>> {
        let pharmacy = resolve_reference(
            &self.pharmacies,
            draft.pharmacy_id.as_deref(),
            "pharmacyId",
            "Pharmacy not found",
            errors,
        )?;
        if let Some(pharmacy) = &pharmacy {
            draft.pharmacy = Some(pharmacy.name.clone());
        }
        Ok(pharmacy)
    }
}
