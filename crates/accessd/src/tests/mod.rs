//! Test suites for the access service.

pub(crate) mod support;
mod unit;
