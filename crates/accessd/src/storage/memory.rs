//! In-process record store.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::RwLock;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::debug;

use access_core::{Cpid, DatabaseIncident, Ocid};

use super::{STORAGE_TARGET, TenderRecord, TenderRepository};

type Key = (String, String);

/// Errors raised while seeding the store from a records file.
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The file could not be read.
    #[error("failed to read records from {path}: {source}")]
    Read {
        /// Records file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a JSON array of tender records.
    #[error("failed to decode records from {path}: {source}")]
    Decode {
        /// Records file.
        path: Utf8PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
}

/// Tender records held in memory behind a read-write lock.
///
/// Readers never block each other. A poisoned lock is reported as a
/// [`DatabaseIncident`] rather than a panic.
#[derive(Debug, Default)]
pub struct InMemoryTenderRepository {
    records: RwLock<HashMap<Key, TenderRecord>>,
}

impl InMemoryTenderRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records`. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = TenderRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (key(&record.cpid, &record.ocid), record))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// Seeds a store from a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] when the file cannot be read or decoded.
    pub fn load(path: &Utf8Path) -> Result<Self, RecordsError> {
        let text = fs::read_to_string(path).map_err(|source| RecordsError::Read {
            path: path.to_owned(),
            source,
        })?;
        let records: Vec<TenderRecord> =
            serde_json::from_str(&text).map_err(|source| RecordsError::Decode {
                path: path.to_owned(),
                source,
            })?;
        debug!(target: STORAGE_TARGET, %path, count = records.len(), "seeded tender records");
        Ok(Self::from_records(records))
    }

    /// Inserts or replaces a record.
    ///
    /// # Errors
    ///
    /// Returns a [`DatabaseIncident`] when the lock is poisoned.
    pub fn insert(&self, record: TenderRecord) -> Result<(), DatabaseIncident> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DatabaseIncident::new("insert tender", "record store lock poisoned"))?;
        records.insert(key(&record.cpid, &record.ocid), record);
        Ok(())
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns a [`DatabaseIncident`] when the lock is poisoned.
    pub fn count(&self) -> Result<usize, DatabaseIncident> {
        self.records
            .read()
            .map(|records| records.len())
            .map_err(|_| DatabaseIncident::new("count tenders", "record store lock poisoned"))
    }
}

impl TenderRepository for InMemoryTenderRepository {
    fn find_tender(
        &self,
        cpid: &Cpid,
        ocid: &Ocid,
    ) -> Result<Option<TenderRecord>, DatabaseIncident> {
        let records = self
            .records
            .read()
            .map_err(|_| DatabaseIncident::new("find tender", "record store lock poisoned"))?;
        Ok(records.get(&key(cpid, ocid)).cloned())
    }
}

fn key(cpid: &Cpid, ocid: &Ocid) -> Key {
    (cpid.as_str().to_owned(), ocid.as_str().to_owned())
}
