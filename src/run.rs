//! Application execution logic.
//!
//! Takes one routing table snapshot and prints the rendered result to
//! stdout.

use std::io::Write;

use thiserror::Error;

use netroutes::output::{self, OutputError, OutputFormat};
use netroutes::routes::platform::PlatformSource;
use netroutes::routes::{QueryContext, RouteSource, gen_routes};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to render the rows.
    #[error("Failed to render routes: {0}")]
    Render(#[source] OutputError),

    /// Failed to write to stdout.
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

/// Executes a single snapshot against the platform route source.
///
/// # Errors
///
/// Returns an error if rendering fails or stdout cannot be written.
/// Failed OS reads are not errors: they are logged and yield fewer or
/// degraded rows.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// platform-specific network APIs.
#[cfg(not(tarpaulin_include))]
pub fn execute(format: OutputFormat) -> Result<(), RunError> {
    let source = PlatformSource::default();
    let rendered = render_snapshot(&source, format)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").map_err(RunError::Write)
}

/// Generates and renders the routes table from `source`.
fn render_snapshot<S: RouteSource + ?Sized>(
    source: &S,
    format: OutputFormat,
) -> Result<String, RunError> {
    let rows = gen_routes(source, &QueryContext::new());
    tracing::debug!("Rendering {} route(s) as {format}", rows.len());

    output::render(&rows, format).map_err(RunError::Render)
}
