//! Command dispatcher for the procurement access service.
//!
//! `accessd` answers access-control and state queries about tenders. Each
//! request is a JSON command envelope naming an action; the dispatcher finds
//! the registered handler, converts the raw params into validated domain
//! values and only then consults the tender store. Every outcome, including
//! rejected envelopes and infrastructure faults, becomes exactly one response
//! envelope.
//!
//! Failures follow the taxonomy in [`access_core`]. Domain errors are returned
//! to the caller with their stable code qualified by the service identifier.
//! Incidents are handed in full to an [`IncidentSink`] and the caller receives
//! only a fixed code and description.
//!
//! The binary wires these pieces to stdin and stdout via [`bootstrap_with`]
//! and [`Service::serve`].

pub mod actions;
mod bootstrap;
pub mod dispatch;
mod health;
mod incident;
pub mod storage;
pub mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Service, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
    bootstrap_with_sink,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use incident::{IncidentContext, IncidentSink, TracingIncidentSink};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
