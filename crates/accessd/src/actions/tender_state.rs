//! `getTenderState`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use access_core::{Cpid, DomainError, Failure, Ocid};

use super::fields;
use crate::dispatch::QueryHandler;
use crate::storage::{TenderRepository, TenderStatus, TenderStatusDetails};

/// Request shape carrying only the tender identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenderKeyRequest {
    /// Raw process identifier.
    pub cpid: Option<String>,
    /// Raw contracting-process identifier.
    pub ocid: Option<String>,
}

/// Validated tender identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderKey {
    /// Process identifier.
    pub cpid: Cpid,
    /// Contracting-process identifier.
    pub ocid: Ocid,
}

impl TenderKey {
    /// Parses both identifiers, `cpid` first, and rejects an ocid issued
    /// under a different process.
    ///
    /// # Errors
    ///
    /// Returns a missing attribute or malformed identifier error, or a data
    /// format mismatch naming `ocid` when the two do not belong together.
    pub fn parse(cpid: Option<String>, ocid: Option<String>) -> Result<Self, DomainError> {
        let cpid = fields::cpid(cpid)?;
        let ocid = fields::ocid(ocid)?;
        if !ocid.belongs_to(&cpid) {
            return Err(DomainError::data_format_mismatch(
                "ocid",
                format!("an ocid of process '{}'", cpid.as_str()),
                ocid.as_str(),
            ));
        }
        Ok(Self { cpid, ocid })
    }
}

impl TryFrom<TenderKeyRequest> for TenderKey {
    type Error = DomainError;

    fn try_from(request: TenderKeyRequest) -> Result<Self, Self::Error> {
        Self::parse(request.cpid, request.ocid)
    }
}

/// Current status of a tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderState {
    /// Lifecycle status.
    pub status: TenderStatus,
    /// Status refinement.
    pub status_details: TenderStatusDetails,
}

/// Reports the status of a tender.
pub struct GetTenderState {
    repository: Arc<dyn TenderRepository>,
}

impl GetTenderState {
    /// Creates the handler over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }
}

impl QueryHandler for GetTenderState {
    type Request = TenderKeyRequest;
    type Params = TenderKey;
    type Payload = TenderState;

    fn convert(&self, request: TenderKeyRequest) -> Result<TenderKey, DomainError> {
        TenderKey::try_from(request)
    }

    fn execute(&self, key: TenderKey) -> Result<TenderState, Failure> {
        let tender = fields::load_tender(self.repository.as_ref(), &key.cpid, &key.ocid)?;
        Ok(TenderState {
            status: tender.status,
            status_details: tender.status_details,
        })
    }
}
