//! Service bootstrap orchestration.

use std::io::{BufRead, Write};
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use access_config::Config;
use access_core::DatabaseIncident;

use crate::dispatch::{Dispatcher, HandlerRegistry, ServeError, ServeSummary, serve};
use crate::health::HealthReporter;
use crate::incident::{IncidentSink, TracingIncidentSink};
use crate::storage::{InMemoryTenderRepository, RecordsError, TenderRepository};
use crate::telemetry::{self, TelemetryError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the service configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader error when any configuration layer is invalid.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that always yields the same, already resolved configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The seed file could not be loaded.
    #[error("failed to load tender records: {source}")]
    Records {
        /// Read or decode failure.
        #[source]
        source: RecordsError,
    },
    /// The seeded store could not be inspected.
    #[error("failed to inspect tender records: {source}")]
    Store {
        /// Store fault.
        #[source]
        source: DatabaseIncident,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Service {
    config: Config,
    dispatcher: Dispatcher,
    reporter: Arc<dyn HealthReporter>,
}

impl Service {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Answers request lines from `reader` on `writer` until the input ends.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the transport fails.
    pub fn serve<R, W>(&self, reader: R, writer: W) -> Result<ServeSummary, ServeError>
    where
        R: BufRead,
        W: Write,
    {
        let summary = serve(
            &self.dispatcher,
            reader,
            writer,
            self.config.max_request_bytes(),
        )?;
        self.reporter.serve_completed(&summary);
        Ok(summary)
    }
}

/// Bootstraps the service using the default incident sink.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first step that fails. The reporter is
/// told about the failure before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Service, BootstrapError> {
    bootstrap_with_sink(loader, reporter, Arc::new(TracingIncidentSink::new()))
}

/// Bootstraps the service with an explicit incident sink.
///
/// # Errors
///
/// Returns [`BootstrapError`] for the first step that fails.
pub fn bootstrap_with_sink(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    sink: Arc<dyn IncidentSink>,
) -> Result<Service, BootstrapError> {
    reporter.bootstrap_starting();
    match assemble(loader, reporter.as_ref(), sink) {
        Ok((config, dispatcher)) => {
            reporter.bootstrap_succeeded(&config);
            Ok(Service {
                config,
                dispatcher,
                reporter,
            })
        }
        Err(error) => {
            reporter.bootstrap_failed(&error);
            Err(error)
        }
    }
}

fn assemble(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
    sink: Arc<dyn IncidentSink>,
) -> Result<(Config, Dispatcher), BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    if !telemetry.installed() {
        tracing::debug!(
            log_format = %config.log_format(),
            "telemetry already initialised; keeping the existing subscriber"
        );
    }

    let store = match config.records_path() {
        Some(path) => InMemoryTenderRepository::load(path)
            .map_err(|source| BootstrapError::Records { source })?,
        None => InMemoryTenderRepository::new(),
    };
    let count = store
        .count()
        .map_err(|source| BootstrapError::Store { source })?;
    reporter.records_loaded(count);

    let repository: Arc<dyn TenderRepository> = Arc::new(store);
    let dispatcher = Dispatcher::new(
        HandlerRegistry::standard(&repository),
        config.metadata(),
        sink,
    );
    Ok((config, dispatcher))
}
