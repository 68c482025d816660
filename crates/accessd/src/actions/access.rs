//! `checkAccessToTender`.

use std::sync::Arc;

use serde::Deserialize;

use access_core::{DomainError, Failure, Owner, Token, ValidationResult};

use super::fields;
use super::tender_state::TenderKey;
use crate::dispatch::AssertionHandler;
use crate::storage::{TenderRecord, TenderRepository};

/// Raw `checkAccessToTender` params.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessRequest {
    /// Raw process identifier.
    pub cpid: Option<String>,
    /// Raw contracting-process identifier.
    pub ocid: Option<String>,
    /// Raw access token.
    pub token: Option<String>,
    /// Raw owning platform.
    pub owner: Option<String>,
}

/// Validated `checkAccessToTender` params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessParams {
    /// Tender identifiers.
    pub key: TenderKey,
    /// Token presented by the caller.
    pub token: Token,
    /// Platform presented by the caller.
    pub owner: Owner,
}

/// Asserts that the caller's token and owner match the stored tender.
pub struct CheckAccessToTender {
    repository: Arc<dyn TenderRepository>,
}

impl CheckAccessToTender {
    /// Creates the handler over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<dyn TenderRepository>) -> Self {
        Self { repository }
    }
}

impl AssertionHandler for CheckAccessToTender {
    type Request = AccessRequest;
    type Params = AccessParams;

    fn convert(&self, request: AccessRequest) -> Result<AccessParams, DomainError> {
        Ok(AccessParams {
            key: TenderKey::parse(request.cpid, request.ocid)?,
            token: Token::parse(&fields::required("token", request.token)?)?,
            owner: Owner::parse(&fields::required("owner", request.owner)?)?,
        })
    }

    fn check(&self, params: AccessParams) -> ValidationResult<Failure> {
        match fields::load_tender(self.repository.as_ref(), &params.key.cpid, &params.key.ocid) {
            Ok(tender) => grants_access(&tender, &params),
            Err(failure) => ValidationResult::Invalid(failure),
        }
    }
}

/// Token is compared before owner.
fn grants_access(tender: &TenderRecord, params: &AccessParams) -> ValidationResult<Failure> {
    ValidationResult::ensure(tender.token == params.token, || {
        DomainError::invalid_token(params.token.to_string()).into()
    })
    .and_then(|| {
        ValidationResult::ensure(tender.owner == params.owner, || {
            DomainError::invalid_owner(params.owner.to_string()).into()
        })
    })
}
