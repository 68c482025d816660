//! Validation and failure algebra for the procurement access service.
//!
//! Every command the service accepts is parsed, validated and converted into
//! typed domain values before any business collaborator runs. This crate holds
//! the pieces that pipeline is built from:
//!
//! - [`validation`]: [`ValidationResult`] for checks without a payload and the
//!   [`ResultExt`] helpers that splice those checks into `Result` chains.
//! - [`failure`]: the closed [`Failure`] taxonomy separating caller-facing
//!   [`DomainError`]s from opaque [`Incident`]s.
//! - [`identifiers`]: strict parsers for the service's identifier value types.
//!
//! Nothing here performs I/O. Values are immutable once built and are safe to
//! share between concurrent requests without locking.

pub mod failure;
pub mod identifiers;
pub mod validation;

pub use failure::{
    Cause, DatabaseIncident, DomainError, ErrorView, Failure, Incident, ParsingIncident,
    SerializationIncident,
};
pub use identifiers::{Cpid, LotId, Ocid, Owner, PersonId, SingleStageOcid, Stage, Token};
pub use validation::{ResultExt, ValidationResult};
