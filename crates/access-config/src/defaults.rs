use crate::logging::LogFormat;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Identifier appended to every outbound error code, as in `DR-4/3`.
pub const DEFAULT_SERVICE_ID: &str = "3";

/// Name the service reports in lifecycle events.
pub const DEFAULT_SERVICE_NAME: &str = "access";

/// Protocol version used when a response cannot echo the request version.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2.0.0";

/// Largest accepted request line, in bytes.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Default log filter expression.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned default service identifier.
#[must_use]
pub fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_owned()
}

/// Owned default service name.
#[must_use]
pub fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_owned()
}

/// Owned default protocol version.
#[must_use]
pub fn default_protocol_version() -> String {
    DEFAULT_PROTOCOL_VERSION.to_owned()
}

/// Default request size limit.
#[must_use]
pub const fn default_max_request_bytes() -> usize {
    DEFAULT_MAX_REQUEST_BYTES
}
