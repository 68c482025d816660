//! Handler shapes and the shared parse step.
//!
//! Every handler runs the same skeleton: decode `params` into a request
//! shape, convert it into validated domain parameters, then execute. Two
//! shapes exist and differ only in the terminal step:
//!
//! - [`QueryHandler`] produces a payload, threaded through `Result`.
//! - [`AssertionHandler`] only checks a condition, threaded through
//!   [`ValidationResult`].
//!
//! The [`Query`] and [`Assertion`] adapters erase either shape into a
//! [`CommandHandler`] so the registry can hold them side by side.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;

use access_core::{DomainError, Failure, ParsingIncident, SerializationIncident, ValidationResult};

/// Result of a handler that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Payload produced by a query handler.
    Payload(Value),
    /// An assertion handler's check passed.
    Asserted,
}

impl Outcome {
    /// Payload to place in the response, if any.
    #[must_use]
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Self::Payload(value) => Some(value),
            Self::Asserted => None,
        }
    }
}

/// Object-safe capability shared by every registered handler.
pub trait CommandHandler: Send + Sync {
    /// Runs the handler against raw `params`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Failure`] raised by any step.
    fn handle(&self, params: Value) -> Result<Outcome, Failure>;
}

/// Handler that produces a payload.
pub trait QueryHandler: Send + Sync {
    /// Shape `params` is decoded into.
    type Request: DeserializeOwned;
    /// Validated domain parameters.
    type Params;
    /// Payload placed in the response.
    type Payload: Serialize;

    /// Validates the request field by field; the first failing field wins.
    ///
    /// # Errors
    ///
    /// Returns the [`DomainError`] of the first failing field.
    fn convert(&self, request: Self::Request) -> Result<Self::Params, DomainError>;

    /// Runs the business collaborator.
    ///
    /// # Errors
    ///
    /// Returns a domain error for business-rule violations or an incident for
    /// infrastructure faults.
    fn execute(&self, params: Self::Params) -> Result<Self::Payload, Failure>;
}

/// Handler that only asserts a condition.
pub trait AssertionHandler: Send + Sync {
    /// Shape `params` is decoded into.
    type Request: DeserializeOwned;
    /// Validated domain parameters.
    type Params;

    /// Validates the request field by field; the first failing field wins.
    ///
    /// # Errors
    ///
    /// Returns the [`DomainError`] of the first failing field.
    fn convert(&self, request: Self::Request) -> Result<Self::Params, DomainError>;

    /// Checks the condition against the business collaborator.
    fn check(&self, params: Self::Params) -> ValidationResult<Failure>;
}

/// Registers a [`QueryHandler`] as a [`CommandHandler`].
#[derive(Debug, Clone)]
pub struct Query<H>(pub H);

/// Registers an [`AssertionHandler`] as a [`CommandHandler`].
#[derive(Debug, Clone)]
pub struct Assertion<H>(pub H);

impl<H: QueryHandler> CommandHandler for Query<H> {
    fn handle(&self, params: Value) -> Result<Outcome, Failure> {
        let request = decode::<H::Request>(params)?;
        let converted = self.0.convert(request)?;
        let payload = self.0.execute(converted)?;
        encode(&payload).map(Outcome::Payload)
    }
}

impl<H: AssertionHandler> CommandHandler for Assertion<H> {
    fn handle(&self, params: Value) -> Result<Outcome, Failure> {
        let request = decode::<H::Request>(params)?;
        let converted = self.0.convert(request)?;
        self.0.check(converted).map_valid(|| Outcome::Asserted)
    }
}

/// Decodes `params` into a handler's request shape.
fn decode<R: DeserializeOwned>(params: Value) -> Result<R, Failure> {
    serde_json::from_value(params).map_err(classify::<R>)
}

/// Maps a decoder error onto the failure taxonomy.
///
/// Shape and type mismatches are the caller's fault and become
/// [`DomainError::MalformedParams`]. An I/O fault has no caller meaning and
/// becomes a [`ParsingIncident`]. Decoding from an in-memory [`Value`] never
/// performs I/O, so that arm only fires for decoders that read from a stream.
fn classify<R>(error: serde_json::Error) -> Failure {
    match error.classify() {
        Category::Io => ParsingIncident::of::<R>(error).into(),
        Category::Syntax | Category::Data | Category::Eof => {
            DomainError::malformed_params(error.to_string()).into()
        }
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, Failure> {
    serde_json::to_value(payload).map_err(|error| SerializationIncident::of::<P>(error).into())
}
