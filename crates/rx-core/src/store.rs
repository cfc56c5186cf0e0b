//! File-backed JSON record storage.
//!
//! Each record is written to its own file inside a sharded directory:
//!
//! ```text
//! <collection_dir>/
//!   <s1>/
//!     <s2>/
//!       <id>/
//!         record.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record id (see
//! [`RecordId::sharded_dir`]). Records are always written whole; there is no locking, so the
//! last writer wins.

use crate::constants::RECORD_JSON_FILENAME;
use crate::{RecordId, RxError, RxResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A value that can be stored in a [`RecordStore`].
pub trait Record: Serialize + DeserializeOwned {
    /// Human-readable kind, used in not-found errors and log lines.
    const KIND: &'static str;

    fn id(&self) -> RecordId;
}

/// Stores records of one type under a collection directory.
#[derive(Debug)]
pub struct RecordStore<T> {
    dir: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            _record: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &RecordId) -> PathBuf {
        id.sharded_dir(&self.dir).join(RECORD_JSON_FILENAME)
    }

    fn not_found(id: &RecordId) -> RxError {
        RxError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    fn write(&self, record: &T) -> RxResult<()> {
        let record_dir = record.id().sharded_dir(&self.dir);
        fs::create_dir_all(&record_dir).map_err(RxError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(record).map_err(RxError::Serialization)?;
        fs::write(record_dir.join(RECORD_JSON_FILENAME), json).map_err(RxError::FileWrite)?;
        Ok(())
    }

    /// Writes a new record.
    ///
    /// # Errors
    ///
    /// Returns `RxError::InvalidInput` if a record with the same id already exists, or a storage
    /// error if the directory or file cannot be written.
    pub fn insert(&self, record: &T) -> RxResult<()> {
        if self.record_path(&record.id()).is_file() {
            return Err(RxError::InvalidInput(format!(
                "{} already exists: {}",
                T::KIND,
                record.id()
            )));
        }
        self.write(record)?;
        tracing::debug!(kind = T::KIND, id = %record.id(), "record inserted");
        Ok(())
    }

    /// Reads one record.
    ///
    /// # Errors
    ///
    /// Returns `RxError::NotFound` if no record exists for `id`.
    pub fn get(&self, id: &RecordId) -> RxResult<T> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Err(Self::not_found(id));
        }
        let contents = fs::read_to_string(&path).map_err(RxError::FileRead)?;
        serde_json::from_str(&contents).map_err(RxError::Deserialization)
    }

    /// Overwrites an existing record.
    ///
    /// # Errors
    ///
    /// Returns `RxError::NotFound` if the record does not exist yet.
    pub fn replace(&self, record: &T) -> RxResult<()> {
        if !self.record_path(&record.id()).is_file() {
            return Err(Self::not_found(&record.id()));
        }
        self.write(record)?;
        tracing::debug!(kind = T::KIND, id = %record.id(), "record replaced");
        Ok(())
    }

    /// Deletes a record directory.
    ///
    /// # Errors
    ///
    /// Returns `RxError::NotFound` if the record does not exist.
    pub fn remove(&self, id: &RecordId) -> RxResult<()> {
        let record_dir = id.sharded_dir(&self.dir);
        if !record_dir.join(RECORD_JSON_FILENAME).is_file() {
            return Err(Self::not_found(id));
        }
        fs::remove_dir_all(&record_dir).map_err(RxError::FileRemove)?;
        tracing::debug!(kind = T::KIND, id = %id, "record removed");
        Ok(())
    }

    /// Lists every readable record in the collection.
    ///
    /// A missing collection directory yields an empty list. Files that cannot be read or parsed
    /// are logged as warnings and skipped. Order follows the directory walk and is not stable.
    pub fn list(&self) -> Vec<T> {
        let mut records = Vec::new();

        let s1_iter = match fs::read_dir(&self.dir) {
            Ok(it) => it,
            Err(_) => return records,
        };
        for s1 in s1_iter.flatten() {
            let s1_path = s1.path();
            if !s1_path.is_dir() {
                continue;
            }

            let s2_iter = match fs::read_dir(&s1_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for s2 in s2_iter.flatten() {
                let s2_path = s2.path();
                if !s2_path.is_dir() {
                    continue;
                }

                let id_iter = match fs::read_dir(&s2_path) {
                    Ok(it) => it,
                    Err(_) => continue,
                };

                for id_ent in id_iter.flatten() {
                    let record_path = id_ent.path().join(RECORD_JSON_FILENAME);
                    if !record_path.is_file() {
                        continue;
                    }

                    match fs::read_to_string(&record_path) {
                        Ok(contents) => match serde_json::from_str::<T>(&contents) {
                            Ok(record) => records.push(record),
                            Err(e) => tracing::warn!(
                                "failed to parse {}: {} - {}",
                                T::KIND,
                                record_path.display(),
                                e
                            ),
                        },
                        Err(e) => tracing::warn!(
                            "failed to read {}: {} - {}",
                            T::KIND,
                            record_path.display(),
                            e
                        ),
                    }
                }
            }
        }

        records
    }
}
