//! Logging collaborator for incidents.
//!
//! The dispatcher hands every [`Incident`] to an [`IncidentSink`] before the
//! sanitized response is built. The sink receives the internal view, cause
//! chain included; callers only ever see the fixed incident code and text.

use std::sync::Arc;

use access_core::Incident;

/// Tracing target for incident events.
pub(crate) const INCIDENT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::incident");

/// Request details attached to an incident record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentContext<'a> {
    /// Correlation id, when the envelope carried one.
    pub request_id: Option<&'a str>,
    /// Requested action, when known.
    pub action: Option<&'a str>,
}

/// Receives the full internal view of incidents.
pub trait IncidentSink: Send + Sync {
    /// Records an incident raised while handling a request.
    fn record(&self, context: IncidentContext<'_>, incident: &Incident);
}

impl<T> IncidentSink for Arc<T>
where
    T: IncidentSink + ?Sized,
{
    fn record(&self, context: IncidentContext<'_>, incident: &Incident) {
        (**self).record(context, incident);
    }
}

/// Sink that emits one `tracing` error event per incident.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingIncidentSink;

impl TracingIncidentSink {
    /// Builds a new sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IncidentSink for TracingIncidentSink {
    fn record(&self, context: IncidentContext<'_>, incident: &Incident) {
        tracing::error!(
            target: INCIDENT_TARGET,
            event = "incident",
            request_id = context.request_id.unwrap_or_default(),
            action = context.action.unwrap_or_default(),
            code = incident.code(),
            cause = %incident.report(),
            "request failed with an incident"
        );
    }
}
