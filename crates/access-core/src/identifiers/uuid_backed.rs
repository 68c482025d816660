//! Identifiers that wrap a canonical UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::failure::DomainError;

/// Length of the hyphenated UUID form, the only accepted textual form.
const CANONICAL_LEN: usize = 36;

fn parse_canonical(name: &str, text: &str) -> Result<Uuid, DomainError> {
    let mismatch = || DomainError::data_format_mismatch(name, "uuid", text);
    if text.len() != CANONICAL_LEN {
        return Err(mismatch());
    }
    Uuid::parse_str(text).map_err(|_| mismatch())
}

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Attribute name reported when parsing fails.
            pub const FIELD: &'static str = $field;

            /// Parses the canonical hyphenated UUID form.
            ///
            /// # Errors
            ///
            /// Returns [`DomainError::DataFormatMismatch`] naming the field when
            /// the text is not a canonical UUID.
            pub fn parse(text: &str) -> Result<Self, DomainError> {
                parse_canonical(Self::FIELD, text).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0.hyphenated(), formatter)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                Self::parse(text)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(text: String) -> Result<Self, Self::Error> {
                Self::parse(&text)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

uuid_identifier!(
    /// Platform owner of a tender.
    Owner,
    "owner"
);

uuid_identifier!(
    /// Access token issued for a tender.
    Token,
    "token"
);

uuid_identifier!(
    /// Lot identifier within a tender.
    LotId,
    "lotId"
);
