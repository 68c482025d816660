//! Inbound command envelope.
//!
//! An envelope is one JSON object with `id`, `version`, `action` and
//! `params`. The first three are required strings; `params` is handed to the
//! selected handler untouched and defaults to an empty object.

use serde::Deserialize;
use serde_json::{Map, Value};

use access_core::DomainError;

/// Parsed command envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandEnvelope {
    /// Correlation identifier echoed in the response.
    pub id: String,
    /// Protocol version echoed in the response.
    pub version: String,
    /// Name of the handler to run.
    pub action: String,
    /// Handler-specific payload.
    #[serde(default = "empty_params")]
    pub params: Value,
}

/// Envelope that could not be accepted, with whatever correlation data could
/// be recovered for the response.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEnvelope {
    /// Recovered correlation id.
    pub id: Option<String>,
    /// Recovered protocol version.
    pub version: Option<String>,
    /// Reason for rejection.
    pub error: DomainError,
}

impl CommandEnvelope {
    /// Parses one request line. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`RejectedEnvelope`] carrying [`DomainError::InvalidEnvelope`]
    /// when the line is not a JSON object with the required fields.
    pub fn parse(line: &[u8]) -> Result<Self, RejectedEnvelope> {
        let document: Value = serde_json::from_slice(line.trim_ascii()).map_err(|error| {
            RejectedEnvelope::anonymous(format!("not a JSON document ({error})"))
        })?;

        if !document.is_object() {
            return Err(RejectedEnvelope::anonymous("expected a JSON object"));
        }

        let id = text_field(&document, "id");
        let version = text_field(&document, "version");
        serde_json::from_value(document).map_err(|error| RejectedEnvelope {
            id,
            version,
            error: DomainError::invalid_envelope(error.to_string()),
        })
    }
}

impl RejectedEnvelope {
    /// Rejection with no recoverable correlation data.
    #[must_use]
    pub fn anonymous(reason: impl Into<String>) -> Self {
        Self {
            id: None,
            version: None,
            error: DomainError::invalid_envelope(reason),
        }
    }
}

fn text_field(document: &Value, name: &str) -> Option<String> {
    document.get(name).and_then(Value::as_str).map(str::to_owned)
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}
