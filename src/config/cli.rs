//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

/// netroutes: routing table snapshot
///
/// Prints the system routing table joined with interface MTU and metric
/// and adapter addressing.
#[derive(Debug, Parser)]
#[command(name = "netroutes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Table)]
    pub format: FormatArg,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Aligned text table
    Table,
    /// JSON array of rows
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the selected output format.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.format.into()
    }
}
