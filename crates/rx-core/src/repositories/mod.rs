//! Services over the file-backed record stores.
//!
//! Each service owns the store for its collection, validates drafts before anything is written
//! and fills the fields the server is responsible for (ids, timestamps, denormalised names).

pub mod appointments;
pub mod medications;
pub mod patients;
pub mod pharmacies;
pub mod prescriptions;

use crate::store::{Record, RecordStore};
use crate::validation::FieldError;
use crate::{RecordId, RxError, RxResult};

/// Resolves a stringly-typed reference to another record.
///
/// A blank reference resolves to `Ok(None)`. A malformed or dangling one also resolves to
/// `Ok(None)` after pushing `message` against `field` onto `errors`.
///
/// # Errors
///
/// Storage failures other than a missing record are returned as-is.
pub(crate) fn resolve_reference<T: Record>(
    store: &RecordStore<T>,
    raw_id: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> RxResult<Option<T>> {
    let Some(raw_id) = raw_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    let Ok(id) = RecordId::parse(raw_id) else {
        errors.push(FieldError::new(field, message));
        return Ok(None);
    };
    match store.get(&id) {
        Ok(record) => Ok(Some(record)),
        Err(RxError::NotFound { .. }) => {
            errors.push(FieldError::new(field, message));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
