//! Output row of the routes table.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::IpVersion;

/// Flags placeholder; route flag decoding is not implemented.
pub const UNIMPLEMENTED_FLAGS: &str = "-1";

/// Column names of the routes table.
pub mod column {
    /// Destination prefix address.
    pub const DESTINATION: &str = "destination";
    /// Gateway (next hop) address.
    pub const GATEWAY: &str = "gateway";
    /// Local IPv4 address of the egress interface.
    pub const INTERFACE: &str = "interface";
    /// Prefix length as a decimal string.
    pub const NETMASK: &str = "netmask";
    /// Route metric plus interface metric.
    pub const METRIC: &str = "metric";
    /// Interface MTU.
    pub const MTU: &str = "mtu";
    /// `local` or `remote`.
    pub const TYPE: &str = "type";
    /// Route flags.
    pub const FLAGS: &str = "flags";

    /// All columns in display order.
    pub const ALL: [&str; 8] = [
        DESTINATION,
        GATEWAY,
        INTERFACE,
        NETMASK,
        METRIC,
        MTU,
        TYPE,
        FLAGS,
    ];
}

/// Whether a destination is reachable on-link or through a next hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    /// Directly reachable.
    Local,
    /// Reached through a gateway.
    Remote,
}

impl RouteType {
    /// Column text for this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    /// Text column.
    Text(String),
    /// Integer column.
    Integer(u64),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A row as handed to the query engine: column name to value.
///
/// Columns whose value is unknown are absent.
pub type Row = BTreeMap<&'static str, ColumnValue>;

/// One assembled route.
///
/// `gateway`, `metric` and `mtu` are `None` when the adapter or interface
/// lookup for the route failed. `interface` is empty in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow {
    /// Address family of the destination.
    pub family: IpVersion,
    /// Destination address in canonical text form.
    pub destination: String,
    /// Gateway address in text form.
    pub gateway: Option<String>,
    /// Local IPv4 address of the egress interface, empty if unknown.
    pub interface: String,
    /// Prefix length as a decimal string.
    pub netmask: String,
    /// Route metric plus interface metric.
    pub metric: Option<u64>,
    /// Interface MTU, or [`LOOPBACK_MTU`](super::LOOPBACK_MTU) for loopback routes.
    pub mtu: Option<u64>,
    /// Local or remote.
    pub route_type: RouteType,
    /// Always [`UNIMPLEMENTED_FLAGS`].
    pub flags: &'static str,
}

impl RouteRow {
    /// Renders the row into the fixed column schema.
    #[must_use]
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert(column::DESTINATION, ColumnValue::Text(self.destination.clone()));
        if let Some(gateway) = &self.gateway {
            row.insert(column::GATEWAY, ColumnValue::Text(gateway.clone()));
        }
        row.insert(column::INTERFACE, ColumnValue::Text(self.interface.clone()));
        row.insert(column::NETMASK, ColumnValue::Text(self.netmask.clone()));
        if let Some(metric) = self.metric {
            row.insert(column::METRIC, ColumnValue::Integer(metric));
        }
        if let Some(mtu) = self.mtu {
            row.insert(column::MTU, ColumnValue::Integer(mtu));
        }
        row.insert(
            column::TYPE,
            ColumnValue::Text(self.route_type.as_str().to_string()),
        );
        row.insert(column::FLAGS, ColumnValue::Text(self.flags.to_string()));
        row
    }
}
