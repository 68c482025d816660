//! Test double for [`IncidentSink`] that keeps the internal view of each
//! incident.

use std::sync::Mutex;

use access_core::Incident;

use crate::incident::{IncidentContext, IncidentSink};

/// One recorded incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedIncident {
    pub request_id: Option<String>,
    pub code: &'static str,
    pub report: String,
}

#[derive(Debug, Default)]
pub struct RecordingIncidentSink {
    incidents: Mutex<Vec<RecordedIncident>>,
}

impl RecordingIncidentSink {
    #[must_use]
    pub fn incidents(&self) -> Vec<RecordedIncident> {
        self.incidents
            .lock()
            .expect("incident sink mutex poisoned")
            .clone()
    }

    /// Full cause reports, in recording order.
    #[must_use]
    pub fn reports(&self) -> Vec<String> {
        self.incidents()
            .into_iter()
            .map(|incident| incident.report)
            .collect()
    }
}

impl IncidentSink for RecordingIncidentSink {
    fn record(&self, context: IncidentContext<'_>, incident: &Incident) {
        self.incidents
            .lock()
            .expect("incident sink mutex poisoned")
            .push(RecordedIncident {
                request_id: context.request_id.map(str::to_owned),
                code: incident.code(),
                report: incident.report(),
            });
    }
}
