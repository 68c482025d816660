//! `checkResponder`.

use std::sync::Arc;

use serde::Deserialize;

use access_core::{DomainError, Failure, PersonId, ResultExt, ValidationResult};

use super::fields;
use super::tender_state::TenderKey;
use crate::dispatch::AssertionHandler;
use crate::storage::TenderRepository;

/// Raw reference to a person.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponderRef {
    /// Raw person identifier.
    pub id: Option<String>,
}

/// Raw `checkResponder` params.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponderRequest {
    /// Raw process identifier.
    pub cpid: Option<String>,
    /// Raw contracting-process identifier.
    pub ocid: Option<String>,
    /// Person to check.
    pub responder: Option<ResponderRef>,
}

/// Validated `checkResponder` params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderParams {
    /// Tender identifiers.
    pub key: TenderKey,
    /// Person to check.
    pub responder: PersonId,
}

/// Asserts that a person is registered as a responder of the tender.
pub struct CheckResponder {
    repository: Arc<dyn TenderRepository>,
}

impl CheckResponder {
    /// Creates the handler over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }
}

impl AssertionHandler for CheckResponder {
    type Request = ResponderRequest;
    type Params = ResponderParams;

    fn convert(&self, request: ResponderRequest) -> Result<ResponderParams, DomainError> {
        let key = TenderKey::parse(request.cpid, request.ocid)?;
        let responder = fields::required("responder", request.responder)?;
        let id = fields::required("responder.id", responder.id)?;
        Ok(ResponderParams {
            key,
            responder: PersonId::parse(&id)?,
        })
    }

    fn check(&self, params: ResponderParams) -> ValidationResult<Failure> {
        let ResponderParams { key, responder } = params;
        fields::load_tender(self.repository.as_ref(), &key.cpid, &key.ocid)
            .validate(|tender| {
                ValidationResult::ensure(tender.has_responder(&responder), || {
                    DomainError::responder_not_found(responder.as_str()).into()
                })
            })
            .into_validation()
    }
}
