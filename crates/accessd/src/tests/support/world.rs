//! BDD test world: holds the loader, reporter, bootstrapped service and the
//! responses it produced.

use std::cell::RefCell;
use std::io::Cursor;
use std::sync::Arc;

use serde_json::Value;

use crate::bootstrap::{BootstrapError, ConfigLoader, Service, bootstrap_with_sink};
use crate::dispatch::ServeSummary;

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::fixtures::tender_record;
use super::reporter::RecordingHealthReporter;
use super::sink::RecordingIncidentSink;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    pub sink: Arc<RecordingIncidentSink>,
    service: Option<Service>,
    bootstrap_error: Option<BootstrapError>,
    responses: Vec<Value>,
    summary: Option<ServeSummary>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            sink: Arc::new(RecordingIncidentSink::default()),
            service: None,
            bootstrap_error: None,
            responses: Vec::new(),
            summary: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader that succeeds with an empty store.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::new());
        self.reset_results();
    }

    /// Installs a loader seeded with the canonical tender.
    pub fn use_seeded_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::with_records(&[tender_record()]));
        self.reset_results();
    }

    /// Installs a loader whose seed file does not decode.
    pub fn use_corrupt_records_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::with_corrupt_records());
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.service.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        match bootstrap_with_sink(&*self.loader, self.reporter.clone(), self.sink.clone()) {
            Ok(service) => self.service = Some(service),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Feeds `input` through the bootstrapped service.
    pub fn serve(&mut self, input: &str) {
        let Some(service) = self.service.as_ref() else {
            return;
        };
        let mut output = Vec::new();
        let summary = service
            .serve(Cursor::new(input.as_bytes()), &mut output)
            .expect("serve loop");
        let text = String::from_utf8(output).expect("utf-8 output");
        self.responses = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json response"))
            .collect();
        self.summary = Some(summary);
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub const fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns true when the service handle is available.
    #[must_use]
    pub const fn service_started(&self) -> bool {
        self.service.is_some()
    }

    /// Responses written by the last serve run.
    #[must_use]
    pub fn responses(&self) -> &[Value] {
        &self.responses
    }

    /// Summary of the last serve run.
    #[must_use]
    pub const fn summary(&self) -> Option<ServeSummary> {
        self.summary
    }

    fn reset_results(&mut self) {
        self.service = None;
        self.bootstrap_error = None;
        self.responses.clear();
        self.summary = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
