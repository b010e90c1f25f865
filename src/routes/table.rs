//! Routes table generation.
//!
//! Joins the forwarding table with interface rows and adapter records by
//! interface index. Lookup failures degrade the affected row instead of
//! dropping it: every forwarding entry yields exactly one [`RouteRow`].

use std::net::IpAddr;

use super::{
    AdapterMap, ForwardEntry, InterfaceMap, InterfaceRow, IpVersion, LOOPBACK_ADDRESS,
    LOOPBACK_MTU, RouteRow, RouteSource, RouteType, UNIMPLEMENTED_FLAGS,
};

/// Query constraints supplied by the caller.
///
/// The routes table always returns the full snapshot, so the context is
/// accepted but not inspected.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    _private: (),
}

impl QueryContext {
    /// Creates an empty query context.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

/// Generates the routes table from a fresh snapshot of `source`.
///
/// A failed forwarding table read yields an empty result. A failed
/// interface or adapter read is treated as an empty mapping, which then
/// surfaces as per-row lookup failures.
pub fn gen_routes<S>(source: &S, _context: &QueryContext) -> Vec<RouteRow>
where
    S: RouteSource + ?Sized,
{
    let entries = match source.forward_table() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Failed to read forwarding table: {e}");
            return Vec::new();
        }
    };

    let interfaces = source.interfaces(IpVersion::Both).unwrap_or_else(|e| {
        tracing::warn!("Failed to read interface table: {e}");
        InterfaceMap::new()
    });

    let adapters = source.adapters().unwrap_or_else(|e| {
        tracing::warn!("Failed to read adapter list: {e}");
        AdapterMap::new()
    });

    tracing::debug!(
        "Snapshot: {} route(s), {} interface row(s), {} adapter(s)",
        entries.len(),
        interfaces.len(),
        adapters.len()
    );

    assemble(&entries, &interfaces, &adapters)
}

/// Assembles one row per forwarding entry, preserving table order.
#[must_use]
pub fn assemble(
    entries: &[ForwardEntry],
    interfaces: &InterfaceMap,
    adapters: &AdapterMap,
) -> Vec<RouteRow> {
    entries
        .iter()
        .map(|entry| assemble_row(entry, interfaces, adapters))
        .collect()
}

fn assemble_row(
    entry: &ForwardEntry,
    interfaces: &InterfaceMap,
    adapters: &AdapterMap,
) -> RouteRow {
    let interface_row = interfaces.get(&entry.interface_index);
    if interface_row.is_none() {
        tracing::error!(
            "Error looking up interface row for interface {}",
            entry.interface_index
        );
    }

    let mut row = RouteRow {
        family: IpVersion::V4,
        destination: entry.destination.to_string(),
        gateway: None,
        interface: String::new(),
        netmask: entry.prefix_length.to_string(),
        metric: interface_row.map(|i| u64::from(entry.metric) + u64::from(i.metric)),
        mtu: None,
        route_type: RouteType::Remote,
        flags: UNIMPLEMENTED_FLAGS,
    };

    match entry.destination {
        IpAddr::V6(_) => fill_ipv6(&mut row, entry, interface_row),
        IpAddr::V4(_) => fill_ipv4(&mut row, entry, interface_row, adapters),
    }

    row
}

/// IPv6 routes are all reported on-link by the OS.
fn fill_ipv6(row: &mut RouteRow, entry: &ForwardEntry, interface_row: Option<&InterfaceRow>) {
    row.family = IpVersion::V6;
    row.gateway = Some(entry.next_hop.to_string());
    row.mtu = interface_row.map(|i| u64::from(i.mtu));
    row.route_type = RouteType::Local;
}

fn fill_ipv4(
    row: &mut RouteRow,
    entry: &ForwardEntry,
    interface_row: Option<&InterfaceRow>,
    adapters: &AdapterMap,
) {
    row.family = IpVersion::V4;
    row.route_type = if entry.loopback {
        RouteType::Local
    } else {
        RouteType::Remote
    };

    // The legacy adapter list never contains the software loopback.
    if entry.on_loopback_interface() {
        row.interface = LOOPBACK_ADDRESS.to_string();
        row.gateway = Some(entry.next_hop.to_string());
        row.mtu = Some(LOOPBACK_MTU);
        return;
    }

    match adapters.get(&entry.interface_index) {
        Some(adapter) => {
            row.interface.clone_from(&adapter.ip_address);
            row.gateway = Some(adapter.gateway.clone());
            row.mtu = interface_row.map(|i| u64::from(i.mtu));
        }
        None => {
            tracing::error!("Error looking up interface {}", entry.interface_index);
        }
    }
}
