//! taptally: summarise Test Anything Protocol output
//!
//! This binary reads TAP from a file or stdin, echoes it to stdout and
//! reports the pass/fail verdict on stderr. The exit status is 0 for a
//! passed or skipped suite, 1 for failures, 2 for broken output and 3 if
//! the input could not be processed at all.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use taptally::config::Config;
use taptally::report;

/// Exit status when the input could not be processed
const EXIT_INFRASTRUCTURE: u8 = 3;

fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return ExitCode::from(EXIT_INFRASTRUCTURE);
    }

    match report::execute(&config) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            error!(error = ?e, "Failed to process TAP output");
            ExitCode::from(EXIT_INFRASTRUCTURE)
        }
    }
}
