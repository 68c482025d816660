//! Shared configuration for the procurement access service.
//!
//! Configuration is layered with `ortho_config`: built-in defaults, then an
//! optional file (`--config-path` or `ACCESS_CONFIG_PATH`), then `ACCESS_*`
//! environment variables, then command-line flags. Later layers win.
//!
//! The service metadata carried here (service identifier, name and protocol
//! version) is resolved once at start-up and handed to the dispatcher as an
//! immutable [`ServiceMetadata`] value.

mod defaults;
mod logging;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_REQUEST_BYTES, DEFAULT_PROTOCOL_VERSION, DEFAULT_SERVICE_ID,
    DEFAULT_SERVICE_NAME, default_log_filter, default_log_format, default_max_request_bytes,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ACCESS")]
pub struct Config {
    /// Tracing filter expression, e.g. `info` or `accessd::dispatch=debug`.
    #[ortho_config(default = defaults::default_log_filter_string())]
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format of the log stream.
    #[ortho_config(default = defaults::default_log_format())]
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
    /// Identifier appended to outbound error codes.
    #[ortho_config(default = defaults::default_service_id())]
    #[serde(default = "defaults::default_service_id")]
    pub service_id: String,
    /// Name reported in lifecycle events.
    #[ortho_config(default = defaults::default_service_name())]
    #[serde(default = "defaults::default_service_name")]
    pub service_name: String,
    /// Protocol version used when a response cannot echo the request's.
    #[ortho_config(default = defaults::default_protocol_version())]
    #[serde(default = "defaults::default_protocol_version")]
    pub protocol_version: String,
    /// Largest accepted request line, in bytes.
    #[ortho_config(default = defaults::default_max_request_bytes())]
    #[serde(default = "defaults::default_max_request_bytes")]
    pub max_request_bytes: usize,
    /// Optional JSON file of tender records used to seed the store.
    #[serde(default)]
    pub records_path: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
            service_id: defaults::default_service_id(),
            service_name: defaults::default_service_name(),
            protocol_version: defaults::default_protocol_version(),
            max_request_bytes: defaults::default_max_request_bytes(),
            records_path: None,
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Largest accepted request line, in bytes.
    #[must_use]
    pub const fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    /// Seed file for the record store, if configured.
    #[must_use]
    pub const fn records_path(&self) -> Option<&Utf8PathBuf> {
        self.records_path.as_ref()
    }

    /// Snapshot of the service identity.
    #[must_use]
    pub fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata {
            service_id: self.service_id.clone(),
            service_name: self.service_name.clone(),
            protocol_version: self.protocol_version.clone(),
        }
    }
}

/// Immutable identity of the running service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ServiceMetadata {
    service_id: String,
    service_name: String,
    protocol_version: String,
}

impl ServiceMetadata {
    /// Builds metadata from its parts.
    #[must_use]
    pub fn new(
        service_id: impl Into<String>,
        service_name: impl Into<String>,
        protocol_version: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            service_name: service_name.into(),
            protocol_version: protocol_version.into(),
        }
    }

    /// Identifier appended to outbound error codes.
    #[must_use]
    pub const fn service_id(&self) -> &str {
        self.service_id.as_str()
    }

    /// Service name.
    #[must_use]
    pub const fn service_name(&self) -> &str {
        self.service_name.as_str()
    }

    /// Fallback protocol version.
    #[must_use]
    pub const fn protocol_version(&self) -> &str {
        self.protocol_version.as_str()
    }
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        Config::default().metadata()
    }
}
