//! System-level incidents.
//!
//! Incidents wrap a low-level cause for the logs and expose only a fixed code
//! and description to callers.

use std::any;
use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Shared, type-erased cause of an incident.
pub type Cause = Arc<dyn StdError + Send + Sync>;

/// Fault that the caller cannot correct.
#[derive(Debug, Clone, Error)]
pub enum Incident {
    /// A storage operation failed.
    #[error(transparent)]
    Database(#[from] DatabaseIncident),
    /// A decoder faulted for a reason unrelated to caller input.
    #[error(transparent)]
    Parsing(#[from] ParsingIncident),
    /// A response payload could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationIncident),
}

impl Incident {
    /// Coarse-grained incident code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "INC-1",
            Self::Parsing(_) => "INC-2",
            Self::Serialization(_) => "INC-3",
        }
    }

    /// Static caller-facing description. Never includes cause text.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Database(_) => "Database incident.",
            Self::Parsing(_) => "Internal parsing incident.",
            Self::Serialization(_) => "Response serialization incident.",
        }
    }

    /// Internal view with the full cause chain, for log sinks only.
    #[must_use]
    pub fn report(&self) -> String {
        super::report_chain(self)
    }
}

/// Storage operation failure raised by a storage collaborator.
#[derive(Debug, Clone, Error)]
#[error("database operation '{operation}' failed")]
pub struct DatabaseIncident {
    operation: String,
    #[source]
    cause: Cause,
}

impl DatabaseIncident {
    /// Wraps the cause of a failed storage operation.
    #[must_use]
    pub fn new(
        operation: impl Into<String>,
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Name of the storage operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Underlying cause.
    #[must_use]
    pub const fn cause(&self) -> &Cause {
        &self.cause
    }
}

/// Unexpected decoder fault while building a typed value.
#[derive(Debug, Clone, Error)]
#[error("failed to parse {target}")]
pub struct ParsingIncident {
    target: String,
    #[source]
    cause: Cause,
}

impl ParsingIncident {
    /// Wraps a decoder fault for the named target type.
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        cause: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            target: target.into(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Wraps a decoder fault, naming the target by its Rust type.
    #[must_use]
    pub fn of<T: ?Sized>(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(any::type_name::<T>(), cause)
    }

    /// Name of the type that failed to parse.
    #[must_use]
    pub const fn target(&self) -> &str {
        self.target.as_str()
    }

    /// Underlying cause.
    #[must_use]
    pub const fn cause(&self) -> &Cause {
        &self.cause
    }
}

/// Failure to encode a handler payload into the response.
#[derive(Debug, Clone, Error)]
#[error("failed to serialize {target}")]
pub struct SerializationIncident {
    target: String,
    #[source]
    cause: Cause,
}

impl SerializationIncident {
    /// Wraps an encoder fault, naming the payload by its Rust type.
    #[must_use]
    pub fn of<T: ?Sized>(cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            target: any::type_name::<T>().to_owned(),
            cause: Arc::from(cause.into()),
        }
    }

    /// Name of the payload type.
    #[must_use]
    pub const fn target(&self) -> &str {
        self.target.as_str()
    }
}
