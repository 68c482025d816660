//! Test harness utilities shared by unit and behavioural suites.

mod config_loader;
pub mod fixtures;
mod reporter;
mod sink;
mod world;

pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use sink::{RecordedIncident, RecordingIncidentSink};
pub use world::{TestWorld, world};
