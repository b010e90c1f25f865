//! netroutes: routing table snapshot
//!
//! Entry point for the netroutes application.

use netroutes::config::Cli;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    setup_tracing(cli.verbose);
    tracing::debug!("{cli:?}");

    match run::execute(cli.output_format()) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::RUNTIME_ERROR
        }
    }
}
