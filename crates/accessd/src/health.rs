//! Structured health reporting for service lifecycle events.

use std::sync::Arc;

use access_config::Config;

use crate::bootstrap::BootstrapError;
use crate::dispatch::ServeSummary;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked after the record store has been seeded.
    fn records_loaded(&self, count: usize);

    /// Invoked when the input stream closes.
    fn serve_completed(&self, summary: &ServeSummary);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter + ?Sized,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn records_loaded(&self, count: usize) {
        (**self).records_loaded(count);
    }

    fn serve_completed(&self, summary: &ServeSummary) {
        (**self).serve_completed(summary);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting service bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        let metadata = config.metadata();
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            service_id = metadata.service_id(),
            service_name = metadata.service_name(),
            protocol_version = metadata.protocol_version(),
            max_request_bytes = config.max_request_bytes(),
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "service bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "service bootstrap failed"
        );
    }

    fn records_loaded(&self, count: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "records_loaded",
            count,
            "tender records loaded"
        );
    }

    fn serve_completed(&self, summary: &ServeSummary) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "serve_completed",
            succeeded = summary.succeeded,
            rejected = summary.rejected,
            incidents = summary.incidents,
            "input stream closed"
        );
    }
}
