//! Unit tests for the service bootstrap utilities.

use std::io::Cursor;
use std::sync::Arc;

use rstest::rstest;

use access_config::Config;

use crate::{BootstrapError, StaticConfigLoader, bootstrap_with};

use super::support::fixtures::{CPID, OCID, tender_record};
use super::support::{HealthEvent, RecordingHealthReporter, TestConfigLoader};

#[rstest]
fn bootstrap_reports_empty_store() {
    let loader = TestConfigLoader::new();
    let reporter = Arc::new(RecordingHealthReporter::default());

    bootstrap_with(&loader, reporter.clone()).expect("bootstrap should succeed");

    assert_eq!(
        reporter.events(),
        vec![
            HealthEvent::BootstrapStarting,
            HealthEvent::RecordsLoaded(0),
            HealthEvent::BootstrapSucceeded,
        ]
    );
}

#[rstest]
fn static_loader_metadata_reaches_error_codes() {
    let config = Config {
        service_id: "19".to_owned(),
        ..Config::default()
    };
    let reporter = Arc::new(RecordingHealthReporter::default());
    let service =
        bootstrap_with(&StaticConfigLoader::new(config), reporter).expect("bootstrap succeeds");

    let response = service.dispatcher().dispatch(b"{}");
    assert_eq!(response.error_code(), Some("RQ-1/19"));
    assert_eq!(service.config().service_id, "19");
}

#[rstest]
fn seeded_service_serves_and_reports_summary() {
    let loader = TestConfigLoader::with_records(&[tender_record()]);
    let reporter = Arc::new(RecordingHealthReporter::default());
    let service = bootstrap_with(&loader, reporter.clone()).expect("bootstrap succeeds");

    let input = format!(
        "{}\n{}\n",
        format_args!(
            r#"{{"id":"1","version":"2.0.0","action":"getLotIds","params":{{"cpid":"{CPID}","ocid":"{OCID}"}}}}"#
        ),
        r#"{"id":"2","version":"2.0.0","action":"getLotIds","params":{}}"#
    );
    let mut output = Vec::new();
    let summary = service
        .serve(Cursor::new(input.into_bytes()), &mut output)
        .expect("serve succeeds");

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.rejected, 1);
    assert!(reporter.events().contains(&HealthEvent::ServeCompleted(summary)));
}

#[rstest]
fn corrupt_seed_file_fails_bootstrap() {
    let loader = TestConfigLoader::with_corrupt_records();
    let reporter = Arc::new(RecordingHealthReporter::default());

    let Err(error) = bootstrap_with(&loader, reporter.clone()) else {
        panic!("bootstrap should fail");
    };

    assert!(matches!(error, BootstrapError::Records { .. }));
    assert!(
        reporter
            .events()
            .iter()
            .any(|event| matches!(event, HealthEvent::BootstrapFailed(_)))
    );
}
