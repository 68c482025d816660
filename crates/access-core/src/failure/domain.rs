//! Caller-facing domain errors.

use thiserror::Error;

/// Stable, caller-correctable violation of a shape or business rule.
///
/// Codes never change between releases. Descriptions are a pure function of
/// the variant's fields, so the same input always yields the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum DomainError {
    /// The command envelope is not valid JSON or lacks required fields.
    #[error("Invalid command envelope: {reason}.")]
    InvalidEnvelope {
        /// What is wrong with the envelope.
        reason: String,
    },

    /// No handler is registered for the requested action.
    #[error("Unsupported action '{action}'.")]
    UnsupportedAction {
        /// Action as sent by the caller.
        action: String,
    },

    /// The params object does not match the handler's request shape.
    #[error("Malformed params: {reason}.")]
    MalformedParams {
        /// Structural mismatch reported by the decoder.
        reason: String,
    },

    /// A required attribute is absent.
    #[error("Missing required attribute '{name}'.")]
    MissingAttribute {
        /// Attribute path.
        name: String,
    },

    /// An attribute value does not match its expected textual format.
    #[error("Attribute '{name}' has invalid format: expected {expected}, actual '{actual}'.")]
    DataFormatMismatch {
        /// Attribute path.
        name: String,
        /// Human description of the accepted format.
        expected: String,
        /// Offending value.
        actual: String,
    },

    /// An attribute holds a value outside its closed set.
    #[error(
        "Attribute '{name}' has unknown value '{actual}', expected one of: {}.",
        .expected.join(", ")
    )]
    UnknownValue {
        /// Attribute path.
        name: String,
        /// Accepted values.
        expected: Vec<String>,
        /// Offending value.
        actual: String,
    },

    /// A string attribute is blank.
    #[error("Attribute '{name}' is an empty string.")]
    EmptyString {
        /// Attribute path.
        name: String,
    },

    /// An array attribute has no elements.
    #[error("Attribute '{name}' is an empty array.")]
    EmptyArray {
        /// Attribute path.
        name: String,
    },

    /// An array attribute repeats a value that must be unique.
    #[error("Attribute '{name}' contains duplicate value '{value}'.")]
    DuplicateValue {
        /// Attribute path.
        name: String,
        /// Repeated value.
        value: String,
    },

    /// A structured identifier has a segment that breaks its grammar.
    #[error("Attribute '{name}' has malformed {segment} in '{actual}': expected {expected}.")]
    MalformedIdentifier {
        /// Attribute path.
        name: String,
        /// Grammar segment that failed.
        segment: String,
        /// Description of what the segment must look like.
        expected: String,
        /// Full offending value.
        actual: String,
    },

    /// No tender record exists for the identifiers.
    #[error("Tender '{cpid}'/'{ocid}' not found.")]
    TenderNotFound {
        /// Requested process identifier.
        cpid: String,
        /// Requested contracting-process identifier.
        ocid: String,
    },

    /// The request token does not match the stored one.
    #[error("Request token '{token}' does not match the tender token.")]
    InvalidToken {
        /// Token sent by the caller.
        token: String,
    },

    /// The request owner does not match the stored one.
    #[error("Request owner '{owner}' does not match the tender owner.")]
    InvalidOwner {
        /// Owner sent by the caller.
        owner: String,
    },

    /// Some requested lots are not part of the tender.
    #[error("Lots not found: {}.", .ids.join(", "))]
    LotsNotFound {
        /// Unknown lot identifiers, in request order.
        ids: Vec<String>,
    },

    /// The person is not registered as a responder of the tender.
    #[error("Person '{id}' is not a responder of the tender.")]
    ResponderNotFound {
        /// Requested person identifier.
        id: String,
    },
}

impl DomainError {
    /// Stable short code for the variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEnvelope { .. } => "RQ-1",
            Self::UnsupportedAction { .. } => "RQ-2",
            Self::MalformedParams { .. } => "RQ-3",
            Self::MissingAttribute { .. } => "DR-1",
            Self::DataFormatMismatch { .. } => "DR-2",
            Self::UnknownValue { .. } => "DR-3",
            Self::EmptyString { .. } => "DR-4",
            Self::EmptyArray { .. } => "DR-5",
            Self::DuplicateValue { .. } => "DR-6",
            Self::MalformedIdentifier { .. } => "DR-7",
            Self::TenderNotFound { .. } => "VR-1",
            Self::InvalidToken { .. } => "VR-2",
            Self::InvalidOwner { .. } => "VR-3",
            Self::LotsNotFound { .. } => "VR-4",
            Self::ResponderNotFound { .. } => "VR-5",
        }
    }

    /// Caller-facing description.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Creates an invalid envelope error.
    #[must_use]
    pub fn invalid_envelope(reason: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported action error.
    #[must_use]
    pub fn unsupported_action(action: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    /// Creates a malformed params error.
    #[must_use]
    pub fn malformed_params(reason: impl Into<String>) -> Self {
        Self::MalformedParams {
            reason: reason.into(),
        }
    }

    /// Creates a missing attribute error.
    #[must_use]
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    /// Creates a format mismatch error.
    #[must_use]
    pub fn data_format_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::DataFormatMismatch {
            name: name.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an unknown value error listing the accepted values.
    #[must_use]
    pub fn unknown_value<I, S>(name: impl Into<String>, expected: I, actual: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::UnknownValue {
            name: name.into(),
            expected: expected.into_iter().map(Into::into).collect(),
            actual: actual.into(),
        }
    }

    /// Creates an empty string error.
    #[must_use]
    pub fn empty_string(name: impl Into<String>) -> Self {
        Self::EmptyString { name: name.into() }
    }

    /// Creates an empty array error.
    #[must_use]
    pub fn empty_array(name: impl Into<String>) -> Self {
        Self::EmptyArray { name: name.into() }
    }

    /// Creates a duplicate value error.
    #[must_use]
    pub fn duplicate_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a malformed identifier error naming the failing segment.
    #[must_use]
    pub fn malformed_identifier(
        name: impl Into<String>,
        segment: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::MalformedIdentifier {
            name: name.into(),
            segment: segment.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a tender not found error.
    #[must_use]
    pub fn tender_not_found(cpid: impl Into<String>, ocid: impl Into<String>) -> Self {
        Self::TenderNotFound {
            cpid: cpid.into(),
            ocid: ocid.into(),
        }
    }

    /// Creates an invalid token error.
    #[must_use]
    pub fn invalid_token(token: impl Into<String>) -> Self {
        Self::InvalidToken {
            token: token.into(),
        }
    }

    /// Creates an invalid owner error.
    #[must_use]
    pub fn invalid_owner(owner: impl Into<String>) -> Self {
        Self::InvalidOwner {
            owner: owner.into(),
        }
    }

    /// Creates a lots not found error listing the unknown ids in order.
    #[must_use]
    pub fn lots_not_found<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::LotsNotFound {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a responder not found error.
    #[must_use]
    pub fn responder_not_found(id: impl Into<String>) -> Self {
        Self::ResponderNotFound { id: id.into() }
    }
}
