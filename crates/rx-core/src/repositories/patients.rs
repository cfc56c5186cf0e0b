//! Patient records.

use crate::config::CoreConfig;
use crate::patient::{Patient, PatientDraft};
use crate::search::filter_patients;
use crate::store::RecordStore;
use crate::validation::{ensure_valid, validate_patient};
use crate::{RecordId, RxResult};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PatientService {
    store: RecordStore<Patient>,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.patients_dir()),
        }
    }

    /// Lists patients sorted by name, optionally narrowed by a search term.
    pub fn list(&self, search: Option<&str>) -> Vec<Patient> {
        let mut patients = self.store.list();
        patients.sort_by(|a, b| a.name.cmp(&b.name));

        match search {
            Some(term) => filter_patients(&patients, term)
                .into_iter()
                .cloned()
                .collect(),
            None => patients,
        }
    }

    pub fn get(&self, id: &RecordId) -> RxResult<Patient> {
        self.store.get(id)
    }

    /// Creates a patient from a draft.
    ///
    /// # Errors
    ///
    /// Returns `RxError::Validation` if the draft fails [`validate_patient`], or a storage error
    /// if the record cannot be written.
    pub fn create(&self, draft: PatientDraft) -> RxResult<Patient> {
        ensure_valid(validate_patient(&draft))?;

        let patient = Patient::from_draft(RecordId::new(), draft);
        self.store.insert(&patient)?;
        tracing::info!(id = %patient.id, "patient created");
        Ok(patient)
    }

    /// Applies the fields present in `patch` and re-validates the result.
    pub fn update(&self, id: &RecordId, patch: PatientDraft) -> RxResult<Patient> {
        let existing = self.store.get(id)?;
        let merged = existing.merged(patch);
        ensure_valid(validate_patient(&merged))?;

        let patient = Patient::from_draft(existing.id, merged);
        self.store.replace(&patient)?;
        tracing::info!(id = %patient.id, "patient updated");
        Ok(patient)
    }

    pub fn delete(&self, id: &RecordId) -> RxResult<()> {
        self.store.remove(id)?;
        tracing::info!(id = %id, "patient deleted");
        Ok(())
    }
}
