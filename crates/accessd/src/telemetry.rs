//! Structured telemetry initialisation for the service.
//!
//! Logs go to stderr so stdout stays reserved for response envelopes. The
//! global subscriber is installed at most once per process; bootstrap may run
//! again (in tests, or after a failed attempt) without tripping over it.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};

use access_config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Outcome of [`initialise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    installed: bool,
}

impl TelemetryHandle {
    /// Returns `true` only for the call that installed the global subscriber.
    #[must_use]
    pub const fn installed(self) -> bool {
        self.installed
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the stderr subscriber described by `config` the first time it is
/// called.
///
/// Later calls leave the global subscriber alone, even when their
/// configuration differs, and report `installed() == false`. A failed first
/// attempt does not count, so a corrected configuration can retry.
///
/// # Examples
///
/// ```
/// use access_config::Config;
/// use accessd::telemetry;
///
/// # fn main() -> Result<(), accessd::TelemetryError> {
/// let config = Config::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
/// assert!(first.installed());
/// assert!(!second.installed());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the log filter does not parse and
/// [`TelemetryError::Subscriber`] when another subscriber is already global.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    let mut installed = false;
    TELEMETRY_GUARD.get_or_try_init(|| {
        let built = subscriber(config, io::stderr, io::stderr().is_terminal())?;
        tracing::subscriber::set_global_default(built).map_err(TelemetryError::Subscriber)?;
        installed = true;
        Ok::<(), TelemetryError>(())
    })?;
    Ok(TelemetryHandle { installed })
}

/// Parses the configured filter expression.
pub(crate) fn build_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter(error.to_string()))
}

/// Builds the subscriber for `config` without installing it. JSON events are
/// flattened so dispatch fields sit beside `level` and `target`.
pub(crate) fn subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = fmt::Subscriber::builder()
        .with_env_filter(build_filter(config.log_filter())?)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
