//! Validated identifier value types.
//!
//! Each identifier has a single construction path, `parse`, which enforces the
//! identifier's grammar and returns a [`DomainError`] naming the offending
//! field or segment. `FromStr`, `TryFrom<String>` and serde deserialization all
//! delegate to it, so an identifier in scope is always known to be valid.
//! Equality and hashing use the normalized text.

mod cpid;
mod ocid;
mod person;
mod uuid_backed;

pub use self::cpid::Cpid;
pub use self::ocid::{Ocid, SingleStageOcid, Stage};
pub use self::person::PersonId;
pub use self::uuid_backed::{LotId, Owner, Token};

use crate::failure::DomainError;
use crate::validation::ValidationResult;

/// Number of digits in a millisecond timestamp segment.
const TIMESTAMP_DIGITS: usize = 13;

/// Checks one segment of a structured identifier.
fn segment(
    accepted: bool,
    name: &str,
    segment: &str,
    expected: &str,
    text: &str,
) -> ValidationResult<DomainError> {
    ValidationResult::ensure(accepted, || {
        DomainError::malformed_identifier(name, segment, expected, text)
    })
}

/// Parses a 13-digit millisecond timestamp segment.
fn timestamp(name: &str, label: &str, value: &str, text: &str) -> Result<u64, DomainError> {
    let malformed =
        || DomainError::malformed_identifier(name, label, "13 ASCII digits", text);
    if value.len() != TIMESTAMP_DIGITS || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(malformed());
    }
    value.parse().map_err(|_| malformed())
}
