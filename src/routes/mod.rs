//! Routing table layer.
//!
//! This module provides types and traits for:
//! - Representing forwarding entries, interface rows and adapters
//!   ([`ForwardEntry`], [`InterfaceRow`], [`AdapterEntry`])
//! - Reading those snapshots from the OS ([`RouteSource`], [`platform`])
//! - Joining them into output rows ([`gen_routes`], [`RouteRow`])

mod entry;
pub mod platform;
mod row;
mod source;
mod table;


pub use entry::{
    AdapterEntry, AdapterMap, ForwardEntry, InterfaceMap, InterfaceRow, IpVersion,
    LOOPBACK_ADDRESS, LOOPBACK_INTERFACE_INDEX, LOOPBACK_MTU, adapter_map, interface_map,
};
pub use row::{ColumnValue, RouteRow, RouteType, Row, UNIMPLEMENTED_FLAGS, column};
pub use source::{FetchError, RouteSource};
pub use table::{QueryContext, assemble, gen_routes};
