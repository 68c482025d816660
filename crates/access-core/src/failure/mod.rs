//! Closed failure taxonomy shared by every fallible step.
//!
//! A [`Failure`] is exactly one of two things:
//!
//! - a [`DomainError`]: the caller sent something that breaks a shape or
//!   business rule. Its code and description are stable and deterministic, so
//!   callers may match on them and correct their input.
//! - an [`Incident`]: the service itself failed (storage, parsing internals,
//!   response encoding). The underlying cause is kept for logs but never shown
//!   to the caller.
//!
//! Each failure has two independent renderings. `Display` (and
//! [`Failure::report`]) is the internal view and includes incident causes.
//! [`ErrorView`] is the external view: a stable code plus a sanitized
//! description.

mod domain;
mod incident;

use std::error::Error as StdError;

use serde::Serialize;
use thiserror::Error;

pub use self::domain::DomainError;
pub use self::incident::{
    Cause, DatabaseIncident, Incident, ParsingIncident, SerializationIncident,
};

/// Any outcome that stops a command pipeline.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    /// Caller-correctable domain violation.
    #[error(transparent)]
    Error(#[from] DomainError),
    /// System-level fault that is not attributable to caller input.
    #[error(transparent)]
    Incident(#[from] Incident),
}

impl Failure {
    /// Stable short code identifying the failure kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Error(error) => error.code(),
            Self::Incident(incident) => incident.code(),
        }
    }

    /// Caller-safe description. Incidents yield a fixed text per kind.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Error(error) => error.description(),
            Self::Incident(incident) => incident.description().to_owned(),
        }
    }

    /// Code and description joined for display to the caller.
    #[must_use]
    pub fn message(&self) -> String {
        format!("{}: {}", self.code(), self.description())
    }

    /// External view of the failure.
    #[must_use]
    pub fn view(&self) -> ErrorView {
        ErrorView::new(self.code(), self.description())
    }

    /// Returns `true` when the failure is an [`Incident`].
    #[must_use]
    pub const fn is_incident(&self) -> bool {
        matches!(self, Self::Incident(_))
    }

    /// Returns the incident, if this failure is one.
    #[must_use]
    pub const fn as_incident(&self) -> Option<&Incident> {
        match self {
            Self::Incident(incident) => Some(incident),
            Self::Error(_) => None,
        }
    }

    /// Returns the domain error, if this failure is one.
    #[must_use]
    pub const fn as_error(&self) -> Option<&DomainError> {
        match self {
            Self::Error(error) => Some(error),
            Self::Incident(_) => None,
        }
    }

    /// Internal view: the failure followed by its full cause chain.
    ///
    /// Only for log sinks. Incident causes appear verbatim.
    #[must_use]
    pub fn report(&self) -> String {
        report_chain(self)
    }
}

/// Renders an error followed by every `source` beneath it.
pub(crate) fn report_chain(error: &dyn StdError) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

impl From<DatabaseIncident> for Failure {
    fn from(incident: DatabaseIncident) -> Self {
        Self::Incident(Incident::Database(incident))
    }
}

impl From<ParsingIncident> for Failure {
    fn from(incident: ParsingIncident) -> Self {
        Self::Incident(Incident::Parsing(incident))
    }
}

impl From<SerializationIncident> for Failure {
    fn from(incident: SerializationIncident) -> Self {
        Self::Incident(Incident::Serialization(incident))
    }
}

/// External rendering of a failure, safe to send to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorView {
    /// Stable failure code.
    pub code: String,
    /// Sanitized, deterministic description.
    pub description: String,
}

impl ErrorView {
    /// Builds a view from its parts.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Suffixes the code with the identifier of the emitting service, as in
    /// `DR-4/3`.
    #[must_use]
    pub fn qualified(self, service_id: &str) -> Self {
        Self {
            code: format!("{}/{service_id}", self.code),
            description: self.description,
        }
    }
}
