//! Snapshot types read from the OS networking stack.
//!
//! Each type is a plain value copied out of an OS-owned table, so the
//! native buffers can be released before any row is assembled.

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

/// Interface index reserved for the software loopback interface.
///
/// The legacy adapter enumeration never reports this interface.
pub const LOOPBACK_INTERFACE_INDEX: u32 = 1;

/// Local address reported for routes owned by the loopback interface.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// MTU reported for loopback routes (no meaningful limit).
pub const LOOPBACK_MTU: u64 = 0xFFFF_FFFF;

/// Address family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
    /// Both IPv4 and IPv6.
    Both,
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// Legacy IPv4 addressing of one network adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterEntry {
    /// Adapter index (same numbering as interface indices).
    pub index: u32,
    /// First address of the adapter's IP address list, in dotted form.
    pub ip_address: String,
    /// First address of the adapter's gateway list, in dotted form.
    pub gateway: String,
}

impl AdapterEntry {
    /// Creates a new adapter entry.
    #[must_use]
    pub fn new(index: u32, ip_address: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self {
            index,
            ip_address: ip_address.into(),
            gateway: gateway.into(),
        }
    }
}

/// Per-interface IP configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceRow {
    /// Interface index.
    pub index: u32,
    /// Network layer MTU.
    pub mtu: u32,
    /// Interface metric, added to the route metric.
    pub metric: u32,
}

impl InterfaceRow {
    /// Creates a new interface row.
    #[must_use]
    pub const fn new(index: u32, mtu: u32, metric: u32) -> Self {
        Self { index, mtu, metric }
    }
}

/// One unicast forwarding table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardEntry {
    /// Destination prefix address.
    pub destination: IpAddr,
    /// Destination prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub prefix_length: u8,
    /// Next-hop address; unspecified for on-link routes.
    pub next_hop: IpAddr,
    /// Index of the interface that owns the route.
    pub interface_index: u32,
    /// Route metric, before the interface metric is added.
    pub metric: u32,
    /// Whether the OS marks the route as a loopback route.
    pub loopback: bool,
}

impl ForwardEntry {
    /// Creates a non-loopback forwarding entry.
    #[must_use]
    pub const fn new(
        destination: IpAddr,
        prefix_length: u8,
        next_hop: IpAddr,
        interface_index: u32,
        metric: u32,
    ) -> Self {
        Self {
            destination,
            prefix_length,
            next_hop,
            interface_index,
            metric,
            loopback: false,
        }
    }

    /// Sets the loopback flag.
    #[must_use]
    pub const fn with_loopback(mut self, loopback: bool) -> Self {
        self.loopback = loopback;
        self
    }

    /// Returns true if the destination is an IPv4 prefix.
    #[must_use]
    pub const fn is_ipv4(&self) -> bool {
        self.destination.is_ipv4()
    }

    /// Returns true if the destination is an IPv6 prefix.
    #[must_use]
    pub const fn is_ipv6(&self) -> bool {
        self.destination.is_ipv6()
    }

    /// Returns true if the route is owned by the software loopback interface.
    #[must_use]
    pub const fn on_loopback_interface(&self) -> bool {
        self.interface_index == LOOPBACK_INTERFACE_INDEX
    }
}

/// Adapters keyed by adapter index.
pub type AdapterMap = HashMap<u32, AdapterEntry>;

/// Interface rows keyed by interface index.
pub type InterfaceMap = HashMap<u32, InterfaceRow>;

/// Builds an [`AdapterMap`]; a repeated index keeps the first entry.
pub fn adapter_map(adapters: impl IntoIterator<Item = AdapterEntry>) -> AdapterMap {
    let mut map = AdapterMap::new();
    for adapter in adapters {
        map.entry(adapter.index).or_insert(adapter);
    }
    map
}

/// Builds an [`InterfaceMap`]; a repeated index keeps the first row.
///
/// An unspecified-family interface table lists every IPv4 row before the
/// IPv6 rows, so a dual-stack index resolves to its IPv4 configuration.
pub fn interface_map(rows: impl IntoIterator<Item = InterfaceRow>) -> InterfaceMap {
    let mut map = InterfaceMap::new();
    for row in rows {
        map.entry(row.index).or_insert(row);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ip_version {
        use super::*;

        #[test]
        fn display_formats_correctly() {
            assert_eq!(format!("{}", IpVersion::V4), "IPv4");
            assert_eq!(format!("{}", IpVersion::V6), "IPv6");
            assert_eq!(format!("{}", IpVersion::Both), "Both");
        }
    }

    mod forward_entry {
        use super::*;

        #[test]
        fn family_follows_destination() {
            let v4 = ForwardEntry::new(
                "10.0.0.0".parse().unwrap(),
                8,
                "0.0.0.0".parse().unwrap(),
                4,
                10,
            );
            let v6 = ForwardEntry::new(
                "fe80::".parse().unwrap(),
                64,
                "::".parse().unwrap(),
                4,
                10,
            );

            assert!(v4.is_ipv4() && !v4.is_ipv6());
            assert!(v6.is_ipv6() && !v6.is_ipv4());
        }

        #[test]
        fn new_is_not_loopback() {
            let entry = ForwardEntry::new(
                "10.0.0.0".parse().unwrap(),
                8,
                "0.0.0.0".parse().unwrap(),
                4,
                10,
            );
            assert!(!entry.loopback);
            assert!(entry.with_loopback(true).loopback);
        }

        #[test]
        fn loopback_interface_is_index_one() {
            let entry = ForwardEntry::new(
                "127.0.0.0".parse().unwrap(),
                8,
                "0.0.0.0".parse().unwrap(),
                LOOPBACK_INTERFACE_INDEX,
                256,
            );
            assert!(entry.on_loopback_interface());
        }
    }

    mod maps {
        use super::*;

        #[test]
        fn adapter_map_keys_by_index() {
            let map = adapter_map([
                AdapterEntry::new(3, "192.168.1.10", "192.168.1.1"),
                AdapterEntry::new(7, "10.0.0.5", "10.0.0.1"),
            ]);

            assert_eq!(map.len(), 2);
            assert_eq!(map[&7].ip_address, "10.0.0.5");
        }

        #[test]
        fn repeated_interface_index_keeps_first() {
            let map = interface_map([
                InterfaceRow::new(3, 1500, 25),
                InterfaceRow::new(3, 1280, 5),
            ]);

            assert_eq!(map.len(), 1);
            assert_eq!(map[&3].mtu, 1500);
            assert_eq!(map[&3].metric, 25);
        }

        #[test]
        fn repeated_adapter_index_keeps_first() {
            let map = adapter_map([
                AdapterEntry::new(3, "192.168.1.10", "192.168.1.1"),
                AdapterEntry::new(3, "10.0.0.5", "10.0.0.1"),
            ]);

            assert_eq!(map.len(), 1);
            assert_eq!(map[&3].gateway, "192.168.1.1");
        }
    }
}
