//! Platform-specific route source implementations.
//!
//! # Platform Support
//!
//! - **Windows**: Uses the IP Helper API via the `windows` crate.
//! - **Other platforms**: [`UnsupportedRouteSource`], every read fails and
//!   the routes table is empty.

#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
mod unsupported;

#[cfg(windows)]
pub use windows::WindowsRouteSource;

#[cfg(not(windows))]
pub use unsupported::UnsupportedRouteSource;

// Re-export the platform source as PlatformSource for convenience
#[cfg(windows)]
pub use windows::WindowsRouteSource as PlatformSource;

#[cfg(not(windows))]
pub use unsupported::UnsupportedRouteSource as PlatformSource;
