//! Field conversions shared by the action handlers.
//!
//! Request shapes keep every attribute optional so that an absent field is
//! reported as a missing attribute rather than a decoder failure.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;

use strum::VariantNames;

use access_core::{Cpid, DomainError, Failure, Ocid};

use crate::storage::{TenderRecord, TenderRepository};

/// Unwraps a required attribute.
pub(crate) fn required<T>(name: &str, value: Option<T>) -> Result<T, DomainError> {
    value.ok_or_else(|| DomainError::missing_attribute(name))
}

pub(crate) fn cpid(value: Option<String>) -> Result<Cpid, DomainError> {
    Cpid::parse(&required("cpid", value)?)
}

pub(crate) fn ocid(value: Option<String>) -> Result<Ocid, DomainError> {
    Ocid::parse(&required("ocid", value)?)
}

/// Rejects an empty array.
pub(crate) fn non_empty<T>(name: &str, values: Vec<T>) -> Result<Vec<T>, DomainError> {
    if values.is_empty() {
        Err(DomainError::empty_array(name))
    } else {
        Ok(values)
    }
}

/// Rejects the first repeated element.
pub(crate) fn unique<T>(name: &str, values: &[T]) -> Result<(), DomainError>
where
    T: Eq + Hash + Display,
{
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .find(|value| !seen.insert(*value))
        .map_or(Ok(()), |value| Err(DomainError::duplicate_value(name, value.to_string())))
}

/// Parses a member of a closed set, listing the accepted values on failure.
pub(crate) fn enumerated<T>(name: &str, text: &str) -> Result<T, DomainError>
where
    T: FromStr + VariantNames,
{
    text.parse()
        .map_err(|_| DomainError::unknown_value(name, T::VARIANTS.iter().copied(), text))
}

/// Loads a tender, turning an absent record into a business-rule error.
pub(crate) fn load_tender(
    repository: &dyn TenderRepository,
    cpid: &Cpid,
    ocid: &Ocid,
) -> Result<TenderRecord, Failure> {
    repository
        .find_tender(cpid, ocid)?
        .ok_or_else(|| DomainError::tender_not_found(cpid.as_str(), ocid.as_str()).into())
}
