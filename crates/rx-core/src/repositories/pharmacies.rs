//! Pharmacy records, including the sample set used to seed a fresh data directory.

use crate::catalog::sample_pharmacies;
use crate::config::CoreConfig;
use crate::pharmacy::{Pharmacy, PharmacyDraft};
use crate::store::RecordStore;
use crate::validation::{ensure_valid, validate_pharmacy};
use crate::{RecordId, RxResult};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct PharmacyService {
    store: RecordStore<Pharmacy>,
}

impl PharmacyService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.pharmacies_dir()),
        }
    }

    /// Lists pharmacies sorted by name. With `delivery_only`, only those offering delivery.
    pub fn list(&self, delivery_only: bool) -> Vec<Pharmacy> {
        let mut pharmacies: Vec<Pharmacy> = self
            .store
            .list()
            .into_iter()
            .filter(|p| !delivery_only || p.delivery_available)
            .collect();
        pharmacies.sort_by(|a, b| a.name.cmp(&b.name));
        pharmacies
    }

    pub fn get(&self, id: &RecordId) -> RxResult<Pharmacy> {
        self.store.get(id)
    }

    pub fn create(&self, draft: PharmacyDraft) -> RxResult<Pharmacy> {
        ensure_valid(validate_pharmacy(&draft))?;

        let pharmacy = Pharmacy::from_draft(RecordId::new(), draft);
        self.store.insert(&pharmacy)?;
        tracing::info!(id = %pharmacy.id, name = %pharmacy.name, "pharmacy created");
        Ok(pharmacy)
    }

    pub fn update(&self, id: &RecordId, patch: PharmacyDraft) -> RxResult<Pharmacy> {
        let existing = self.store.get(id)?;
        let merged = existing.merged(patch);
        ensure_valid(validate_pharmacy(&merged))?;

        let pharmacy = Pharmacy::from_draft(existing.id, merged);
        self.store.replace(&pharmacy)?;
        tracing::info!(id = %pharmacy.id, "pharmacy updated");
        Ok(pharmacy)
    }

    pub fn delete(&self, id: &RecordId) -> RxResult<()> {
        self.store.remove(id)?;
        tracing::info!(id = %id, "pharmacy deleted");
        Ok(())
    }

    /// Inserts each sample pharmacy whose name is not already on file.
    ///
    /// Returns the number of pharmacies added, so repeated calls add nothing.
    pub fn seed_samples(&self) -> RxResult<usize> {
        let existing: Vec<String> = self.store.list().into_iter().map(|p| p.name).collect();

        let mut added = 0;
        for sample in sample_pharmacies() {
            if sample
                .name
                .as_ref()
                .is_some_and(|name| existing.contains(name))
            {
                continue;
            }
            self.create(sample)?;
            added += 1;
        }

        if added > 0 {
            tracing::info!(added, "seeded sample pharmacies");
        }
        Ok(added)
    }
}
