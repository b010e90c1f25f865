//! Configuration layer for netroutes.
//!
//! The tool takes all of its options from the command line ([`Cli`]);
//! there is no configuration file.

mod cli;


pub use cli::{Cli, FormatArg};
