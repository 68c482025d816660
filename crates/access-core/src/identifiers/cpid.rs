//! Procurement process identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{segment, timestamp};
use crate::failure::DomainError;

const FIELD: &str = "cpid";
const PREFIX: &str = "ocds";
const AUTHORITY_LEN: usize = 6;
const COUNTRY_LEN: usize = 2;

/// Contracting process identifier, e.g. `ocds-b3wdp1-MD-1580458690892`.
///
/// The grammar is `<prefix>-<authority>-<country>-<timestamp>`: the literal
/// `ocds`, six lowercase alphanumerics naming the registration authority, a
/// two-letter uppercase country code and a 13-digit millisecond timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpid {
    value: String,
    timestamp: u64,
}

impl Cpid {
    /// Parses a process identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedIdentifier`] naming the first segment
    /// that breaks the grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_core::Cpid;
    ///
    /// let cpid = Cpid::parse("ocds-b3wdp1-MD-1580458690892").expect("valid cpid");
    /// assert_eq!(cpid.country(), "MD");
    /// ```
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        Self::parse_field(FIELD, text)
    }

    pub(super) fn parse_field(name: &str, text: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = text.split('-').collect();
        let [prefix, authority, country, stamp] = segments.as_slice() else {
            return Err(DomainError::malformed_identifier(
                name,
                "structure",
                "4 '-'-separated segments",
                text,
            ));
        };
        Self::from_segments(name, text, [*prefix, *authority, *country, *stamp])
    }

    /// Validates the four leading segments shared by `Cpid` and single-stage
    /// `Ocid` values. `text` is the full input, used for error reporting.
    pub(super) fn from_segments(
        name: &str,
        text: &str,
        [prefix, authority, country, stamp]: [&str; 4],
    ) -> Result<Self, DomainError> {
        segment(prefix == PREFIX, name, "prefix", "literal 'ocds'", text)
            .and_then(|| {
                segment(
                    is_authority(authority),
                    name,
                    "registration authority",
                    "6 lowercase ASCII alphanumerics",
                    text,
                )
            })
            .and_then(|| {
                segment(
                    is_country(country),
                    name,
                    "country",
                    "2 uppercase ASCII letters",
                    text,
                )
            })
            .into_result()?;

        let millis = timestamp(name, "timestamp", stamp, text)?;
        Ok(Self {
            value: format!("{prefix}-{authority}-{country}-{stamp}"),
            timestamp: millis,
        })
    }

    /// Normalized text form.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Two-letter country code.
    #[must_use]
    pub fn country(&self) -> &str {
        self.value.split('-').nth(2).unwrap_or_default()
    }

    /// Registration timestamp in epoch milliseconds.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

fn is_authority(value: &str) -> bool {
    value.len() == AUTHORITY_LEN
        && value
            .bytes()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit())
}

fn is_country(value: &str) -> bool {
    value.len() == COUNTRY_LEN && value.bytes().all(|byte| byte.is_ascii_uppercase())
}

impl fmt::Display for Cpid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.value)
    }
}

impl FromStr for Cpid {
    type Err = DomainError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl TryFrom<String> for Cpid {
    type Error = DomainError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Cpid> for String {
    fn from(cpid: Cpid) -> Self {
        cpid.value
    }
}
