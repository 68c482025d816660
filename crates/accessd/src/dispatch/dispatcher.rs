//! Per-request pipeline: lookup, parse, convert, execute, respond.

use std::sync::Arc;

use tracing::debug;

use access_config::ServiceMetadata;
use access_core::{DomainError, Failure};

use super::DISPATCH_TARGET;
use super::envelope::{CommandEnvelope, RejectedEnvelope};
use super::handler::Outcome;
use super::registry::HandlerRegistry;
use super::response::ResponseEnvelope;
use crate::incident::{IncidentContext, IncidentSink};

/// Routes envelopes to handlers and turns every outcome into a response.
///
/// This is the only place a [`Failure`] is rendered. Incidents reach the
/// [`IncidentSink`] before their sanitized response is built.
pub struct Dispatcher {
    registry: HandlerRegistry,
    metadata: ServiceMetadata,
    sink: Arc<dyn IncidentSink>,
}

impl Dispatcher {
    /// Builds a dispatcher over a frozen registry.
    #[must_use]
    pub const fn new(
        registry: HandlerRegistry,
        metadata: ServiceMetadata,
        sink: Arc<dyn IncidentSink>,
    ) -> Self {
        Self {
            registry,
            metadata,
            sink,
        }
    }

    /// Handles one request line. Never panics and never fails: every outcome
    /// becomes a response envelope.
    #[must_use]
    pub fn dispatch(&self, line: &[u8]) -> ResponseEnvelope {
        let envelope = match CommandEnvelope::parse(line) {
            Ok(envelope) => envelope,
            Err(rejected) => return self.reject(rejected),
        };

        debug!(
            target: DISPATCH_TARGET,
            request_id = envelope.id.as_str(),
            action = envelope.action.as_str(),
            "dispatching request"
        );

        let outcome = self
            .registry
            .lookup(&envelope.action)
            .map_err(Failure::from)
            .and_then(|handler| handler.handle(envelope.params));

        let context = IncidentContext {
            request_id: Some(envelope.id.as_str()),
            action: Some(envelope.action.as_str()),
        };
        self.respond(context, Some(envelope.version.clone()), outcome)
    }

    /// Response for a line that exceeded the configured size limit.
    #[must_use]
    pub fn reject_oversized(&self, size: usize, limit: usize) -> ResponseEnvelope {
        self.reject(RejectedEnvelope::anonymous(format!(
            "request of {size} bytes exceeds the {limit} byte limit"
        )))
    }

    fn reject(&self, rejected: RejectedEnvelope) -> ResponseEnvelope {
        let context = IncidentContext {
            request_id: rejected.id.as_deref(),
            action: None,
        };
        self.respond(context, rejected.version.clone(), Err(rejected.error.into()))
    }

    fn respond(
        &self,
        context: IncidentContext<'_>,
        requested_version: Option<String>,
        outcome: Result<Outcome, Failure>,
    ) -> ResponseEnvelope {
        let id = context.request_id.map(str::to_owned);
        let version = requested_version
            .unwrap_or_else(|| self.metadata.protocol_version().to_owned());

        match outcome {
            Ok(completed) => ResponseEnvelope::success(id, version, completed.into_payload()),
            Err(failure) => {
                match &failure {
                    Failure::Incident(incident) => self.sink.record(context, incident),
                    Failure::Error(error) => log_rejection(context, error),
                }
                ResponseEnvelope::failure(id, version, &failure, self.metadata.service_id())
            }
        }
    }
}

fn log_rejection(context: IncidentContext<'_>, error: &DomainError) {
    debug!(
        target: DISPATCH_TARGET,
        request_id = context.request_id.unwrap_or_default(),
        action = context.action.unwrap_or_default(),
        code = error.code(),
        %error,
        "request rejected"
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::mock;
    use serde_json::json;

    use access_core::{Cpid, DatabaseIncident, Ocid};

    use super::*;
    use crate::dispatch::response::ResponseStatus;
    use crate::storage::{TenderRecord, TenderRepository};
    use crate::tests::support::fixtures::{CPID, OCID, OWNER, TOKEN, tender_record};
    use crate::tests::support::RecordingIncidentSink;

    mock! {
        Repository {}
        impl TenderRepository for Repository {
            fn find_tender(
                &self,
                cpid: &Cpid,
                ocid: &Ocid,
            ) -> Result<Option<TenderRecord>, DatabaseIncident>;
        }
    }

    fn dispatcher_over(
        repository: MockRepository,
    ) -> (Dispatcher, Arc<RecordingIncidentSink>) {
        let repository: Arc<dyn TenderRepository> = Arc::new(repository);
        let sink = Arc::new(RecordingIncidentSink::default());
        let dispatcher = Dispatcher::new(
            HandlerRegistry::standard(&repository),
            ServiceMetadata::new("3", "access", "2.0.0"),
            sink.clone(),
        );
        (dispatcher, sink)
    }

    fn line(action: &str, params: &serde_json::Value) -> Vec<u8> {
        json!({"id": "r-1", "version": "2.0.0", "action": action, "params": params})
            .to_string()
            .into_bytes()
    }

    #[test]
    fn unsupported_action_never_reaches_storage() {
        let (dispatcher, sink) = dispatcher_over(MockRepository::new());
        let response = dispatcher.dispatch(&line("dance", &json!({})));
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.error_code(), Some("RQ-2/3"));
        assert_eq!(response.id.as_deref(), Some("r-1"));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn conversion_failure_never_reaches_storage() {
        let (dispatcher, _sink) = dispatcher_over(MockRepository::new());
        let params = json!({"cpid": "ocds-b3wdp1-md-1580458690892", "ocid": OCID});
        let response = dispatcher.dispatch(&line("getTenderState", &params));
        assert_eq!(response.error_code(), Some("DR-7/3"));
        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].description.contains("'cpid'"));
    }

    #[test]
    fn storage_fault_is_logged_then_sanitized() {
        let mut repository = MockRepository::new();
        repository.expect_find_tender().once().returning(|_, _| {
            Err(DatabaseIncident::new("find tender", "connection refused by 10.1.2.3"))
        });
        let (dispatcher, sink) = dispatcher_over(repository);

        let params = json!({"cpid": CPID, "ocid": OCID});
        let response = dispatcher.dispatch(&line("getTenderState", &params));

        assert_eq!(response.status, ResponseStatus::Incident);
        assert_eq!(response.error_code(), Some("INC-1/3"));
        assert_eq!(response.errors[0].description, "Database incident.");
        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("connection refused by 10.1.2.3"));
    }

    #[test]
    fn successful_query_carries_payload() {
        let mut repository = MockRepository::new();
        repository
            .expect_find_tender()
            .once()
            .returning(|_, _| Ok(Some(tender_record())));
        let (dispatcher, _sink) = dispatcher_over(repository);

        let params = json!({"cpid": CPID, "ocid": OCID});
        let response = dispatcher.dispatch(&line("getTenderState", &params));

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(
            response.result,
            Some(json!({"status": "active", "statusDetails": "tendering"}))
        );
    }

    #[test]
    fn assertion_success_has_no_result() {
        let mut repository = MockRepository::new();
        repository
            .expect_find_tender()
            .once()
            .returning(|_, _| Ok(Some(tender_record())));
        let (dispatcher, _sink) = dispatcher_over(repository);

        let params = json!({"cpid": CPID, "ocid": OCID, "token": TOKEN, "owner": OWNER});
        let response = dispatcher.dispatch(&line("checkAccessToTender", &params));

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.result, None);
    }

    #[test]
    fn unparseable_line_falls_back_to_configured_version() {
        let (dispatcher, _sink) = dispatcher_over(MockRepository::new());
        let response = dispatcher.dispatch(b"{oops");
        assert_eq!(response.id, None);
        assert_eq!(response.version, "2.0.0");
        assert_eq!(response.error_code(), Some("RQ-1/3"));
    }

    #[test]
    fn oversized_requests_are_invalid_envelopes() {
        let (dispatcher, _sink) = dispatcher_over(MockRepository::new());
        let response = dispatcher.reject_oversized(2048, 1024);
        assert_eq!(response.error_code(), Some("RQ-1/3"));
        assert!(response.errors[0].description.contains("2048"));
    }
}
