//! Storage collaborator.
//!
//! Handlers reach tender records only through [`TenderRepository`]. An
//! implementation catches its own low-level faults and reports them as a
//! [`DatabaseIncident`]; a missing record is `Ok(None)`, never an error.

mod memory;
mod records;

use std::sync::Arc;

use access_core::{Cpid, DatabaseIncident, Ocid};

pub use self::memory::{InMemoryTenderRepository, RecordsError};
pub use self::records::{
    LotRecord, LotStatus, LotStatusDetails, TenderRecord, TenderStatus, TenderStatusDetails,
};

/// Tracing target for storage operations.
pub(crate) const STORAGE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::storage");

/// Read access to tender records.
pub trait TenderRepository: Send + Sync {
    /// Loads the tender identified by `cpid` and `ocid`.
    ///
    /// # Errors
    ///
    /// Returns a [`DatabaseIncident`] when the lookup itself fails.
    fn find_tender(&self, cpid: &Cpid, ocid: &Ocid)
    -> Result<Option<TenderRecord>, DatabaseIncident>;
}

impl<T> TenderRepository for Arc<T>
where
    T: TenderRepository + ?Sized,
{
    fn find_tender(
        &self,
        cpid: &Cpid,
        ocid: &Ocid,
    ) -> Result<Option<TenderRecord>, DatabaseIncident> {
        (**self).find_tender(cpid, ocid)
    }
}
