//! Entry point for the access service: one JSON request per stdin line, one
//! response per stdout line.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use accessd::{StructuredHealthReporter, SystemConfigLoader, bootstrap_with};

fn main() -> ExitCode {
    let Ok(service) = bootstrap_with(
        &SystemConfigLoader,
        Arc::new(StructuredHealthReporter::new()),
    ) else {
        // The reporter has already logged the cause.
        return ExitCode::FAILURE;
    };

    match service.serve(io::stdin().lock(), io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: "accessd::serve", error = %error, "transport failed");
            ExitCode::FAILURE
        }
    }
}
