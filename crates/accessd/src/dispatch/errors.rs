//! Process-level failures of the serve loop.
//!
//! These never become response envelopes: they mean the loop can no longer
//! read requests or deliver responses.

use std::io;

use thiserror::Error;

/// Errors that stop the serve loop.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Reading a request or writing a response failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A response envelope could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}
