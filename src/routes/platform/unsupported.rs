//! Fallback route source for platforms without an implementation.

use crate::routes::{AdapterMap, FetchError, ForwardEntry, InterfaceMap, IpVersion, RouteSource};

/// [`RouteSource`] whose reads always fail with [`FetchError::Unsupported`].
#[derive(Debug, Clone, Default)]
pub struct UnsupportedRouteSource {
    _private: (),
}

impl UnsupportedRouteSource {
    /// Creates a new unsupported route source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    const fn error() -> FetchError {
        FetchError::Unsupported {
            platform: std::env::consts::OS,
        }
    }
}

impl RouteSource for UnsupportedRouteSource {
    fn adapters(&self) -> Result<AdapterMap, FetchError> {
        Err(Self::error())
    }

    fn interfaces(&self, _version: IpVersion) -> Result<InterfaceMap, FetchError> {
        Err(Self::error())
    }

    fn forward_table(&self) -> Result<Vec<ForwardEntry>, FetchError> {
        Err(Self::error())
    }
}
