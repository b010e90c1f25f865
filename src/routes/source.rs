//! Route source trait and error types.

use super::{AdapterMap, ForwardEntry, InterfaceMap, IpVersion};
use thiserror::Error;

/// Error type for routing table reads.
///
/// Describes what went wrong without dictating recovery strategy.
/// [`gen_routes`](super::gen_routes) turns every variant into an empty
/// collection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// The routing table cannot be read on this platform.
    #[error("Routing table snapshot is not supported on {platform}")]
    Unsupported {
        /// Target OS the binary was built for.
        platform: &'static str,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Snapshot reads of the three OS datasets joined into route rows.
///
/// # Design
///
/// - Every call is a fresh OS read; implementations hold no cache
/// - Enables dependency injection for testing with in-memory sources
/// - Platform-specific implementations provided in [`platform`](super::platform)
pub trait RouteSource {
    /// Reads the legacy adapter list, keyed by adapter index.
    ///
    /// The software loopback interface is never part of this list.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the sizing or the query call fails.
    fn adapters(&self) -> Result<AdapterMap, FetchError>;

    /// Reads the per-interface IP configuration table for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the OS table cannot be read.
    fn interfaces(&self, version: IpVersion) -> Result<InterfaceMap, FetchError>;

    /// Reads the merged IPv4 and IPv6 unicast forwarding table.
    ///
    /// Entries are returned in OS order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the OS table cannot be read.
    fn forward_table(&self) -> Result<Vec<ForwardEntry>, FetchError>;
}
