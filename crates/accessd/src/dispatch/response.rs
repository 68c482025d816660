//! Outbound response envelope and its JSONL writer.

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use access_core::{ErrorView, Failure};

use super::errors::ServeError;

/// Outcome class reported in every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The handler completed.
    Success,
    /// The request broke a shape or business rule.
    Error,
    /// The service failed internally.
    Incident,
}

/// Response sent for each request line.
///
/// `id` serializes as `null` when the request id could not be recovered.
/// `result` is omitted for assertion handlers and on failure; `errors` is
/// omitted on success and holds exactly one entry otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Echoed correlation id.
    pub id: Option<String>,
    /// Echoed or fallback protocol version.
    pub version: String,
    /// Outcome class.
    pub status: ResponseStatus,
    /// Handler payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// External failure views.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorView>,
}

impl ResponseEnvelope {
    /// Success response, with or without a payload.
    #[must_use]
    pub const fn success(id: Option<String>, version: String, result: Option<Value>) -> Self {
        Self {
            id,
            version,
            status: ResponseStatus::Success,
            result,
            errors: Vec::new(),
        }
    }

    /// Failure response carrying the sanitized view of `failure`, with the
    /// code qualified by `service_id`.
    #[must_use]
    pub fn failure(
        id: Option<String>,
        version: String,
        failure: &Failure,
        service_id: &str,
    ) -> Self {
        let status = if failure.is_incident() {
            ResponseStatus::Incident
        } else {
            ResponseStatus::Error
        };
        Self {
            id,
            version,
            status,
            result: None,
            errors: vec![failure.view().qualified(service_id)],
        }
    }

    /// First error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.errors.first().map(|view| view.code.as_str())
    }
}

/// Writes response envelopes as JSONL.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    /// Wraps an output stream.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one envelope followed by a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when encoding or writing fails.
    pub fn write_response(&mut self, response: &ResponseEnvelope) -> Result<(), ServeError> {
        serde_json::to_writer(&mut self.writer, response).map_err(ServeError::Encode)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
