//! Read-only access to the medication catalog.

use crate::catalog::common_medications;
use crate::medication::Medication;
use crate::search::filter_medications;
use crate::{RxError, RxResult};

#[derive(Clone, Debug)]
pub struct MedicationCatalog {
    medications: Vec<Medication>,
}

impl Default for MedicationCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MedicationCatalog {
    pub fn new() -> Self {
        Self {
            medications: common_medications(),
        }
    }

    pub fn list(&self, search: Option<&str>) -> Vec<Medication> {
        match search {
            Some(term) => filter_medications(&self.medications, term)
                .into_iter()
                .cloned()
                .collect(),
            None => self.medications.clone(),
        }
    }

    pub fn get(&self, id: &str) -> RxResult<Medication> {
        self.medications
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| RxError::NotFound {
                kind: "medication",
                id: id.to_string(),
            })
    }

    /// Finds a catalog entry by exact name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Medication> {
        let name = name.trim();
        self.medications
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_search() {
        let catalog = MedicationCatalog::new();
        assert_eq!(catalog.list(None).len(), 5);
        assert_eq!(catalog.list(Some("")).len(), 5);

        let found = catalog.list(Some("lisino"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_get_unknown_medication() {
        let catalog = MedicationCatalog::new();
        assert_eq!(catalog.get("5").unwrap().name, "Omeprazole");
        assert!(matches!(
            catalog.get("42"),
            Err(RxError::NotFound { kind: "medication", .. })
        ));
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let catalog = MedicationCatalog::new();
        assert_eq!(catalog.find_by_name(" metformin ").unwrap().id, "3");
        assert!(catalog.find_by_name("Ibuprofen").is_none());
    }
}
