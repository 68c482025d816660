//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use access_config::Config;

use crate::bootstrap::ConfigLoader;
use crate::storage::TenderRecord;

/// Loader that optionally seeds the store from a temporary records file.
pub struct TestConfigLoader {
    records_path: Option<Utf8PathBuf>,
    _records_dir: Option<TempDir>,
}

impl TestConfigLoader {
    /// Loader with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records_path: None,
            _records_dir: None,
        }
    }

    /// Loader whose config points at a seed file holding `records`.
    #[must_use]
    pub fn with_records(records: &[TenderRecord]) -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory for records");
        let path = dir.path().join("records.json");
        let json = serde_json::to_string(records).expect("records encode");
        fs::write(&path, json).expect("failed to write records file");
        Self {
            records_path: Some(Utf8PathBuf::from_path_buf(path).expect("utf-8 records path")),
            _records_dir: Some(dir),
        }
    }

    /// Loader whose config points at a file that is not a record list.
    #[must_use]
    pub fn with_corrupt_records() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory for records");
        let path = dir.path().join("records.json");
        fs::write(&path, "[{\"cpid\": 42}]").expect("failed to write records file");
        Self {
            records_path: Some(Utf8PathBuf::from_path_buf(path).expect("utf-8 records path")),
            _records_dir: Some(dir),
        }
    }
}

impl Default for TestConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            records_path: self.records_path.clone(),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("accessd"),
            OsString::from("--max-request-bytes"),
            OsString::from("plenty"),
        ];
        Config::load_from_iter(args)
    }
}
