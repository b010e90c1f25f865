//! Windows routing table snapshot using the IP Helper API.
//!
//! - Adapters: `GetAdaptersInfo` (legacy IPv4 addressing, no loopback)
//! - Interface rows: `GetIpInterfaceTable`
//! - Forwarding table: `GetIpForwardTable2`

use std::ffi::{CStr, c_void};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ptr;

use windows::Win32::Foundation::{
    ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR, WIN32_ERROR,
};
use windows::Win32::NetworkManagement::IpHelper::{
    FreeMibTable, GetAdaptersInfo, GetIpForwardTable2, GetIpInterfaceTable, IP_ADAPTER_INFO,
    IP_ADDR_STRING, MIB_IPFORWARD_ROW2, MIB_IPFORWARD_TABLE2, MIB_IPINTERFACE_ROW,
    MIB_IPINTERFACE_TABLE,
};
use windows::Win32::Networking::WinSock::{
    ADDRESS_FAMILY, AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_INET,
};

use crate::routes::{
    AdapterEntry, AdapterMap, FetchError, ForwardEntry, InterfaceMap, InterfaceRow, IpVersion,
    RouteSource, adapter_map, interface_map,
};

/// Windows implementation of [`RouteSource`].
///
/// Every call performs a fresh OS read; nothing is cached between calls.
///
/// # Example
///
/// ```no_run
/// use netroutes::routes::{QueryContext, gen_routes, platform::WindowsRouteSource};
///
/// let rows = gen_routes(&WindowsRouteSource::new(), &QueryContext::new());
///
/// for row in rows {
///     println!("{} via {:?}", row.destination, row.gateway);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsRouteSource {
    _private: (),
}

impl WindowsRouteSource {
    /// Creates a new Windows route source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl RouteSource for WindowsRouteSource {
    fn adapters(&self) -> Result<AdapterMap, FetchError> {
        let buffer = get_adapters_info()?;
        Ok(parse_adapter_list(&buffer))
    }

    fn interfaces(&self, version: IpVersion) -> Result<InterfaceMap, FetchError> {
        let mut table = MibTable::<MIB_IPINTERFACE_TABLE>::null();

        // SAFETY: The out pointer is valid; the guard frees whatever the OS allocates.
        let result = unsafe { GetIpInterfaceTable(address_family(version), table.as_out_ptr()) };
        if result != NO_ERROR {
            return Err(win32_error(result.0));
        }

        let rows = table
            .rows()
            .iter()
            .map(|row: &MIB_IPINTERFACE_ROW| {
                InterfaceRow::new(row.InterfaceIndex, row.NlMtu, row.Metric)
            });

        Ok(interface_map(rows))
    }

    fn forward_table(&self) -> Result<Vec<ForwardEntry>, FetchError> {
        let mut table = MibTable::<MIB_IPFORWARD_TABLE2>::null();

        // SAFETY: The out pointer is valid; the guard frees whatever the OS allocates,
        // including a partial table left behind by a failed call.
        let result = unsafe { GetIpForwardTable2(AF_UNSPEC, table.as_out_ptr()) };
        if result != NO_ERROR {
            return Err(win32_error(result.0));
        }

        let mut entries = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            match parse_forward_row(row) {
                Some(entry) => entries.push(entry),
                None => tracing::debug!(
                    "Skipping route on interface {} with unknown address family",
                    row.InterfaceIndex
                ),
            }
        }

        Ok(entries)
    }
}

/// Owned `MIB_*_TABLE` allocated by the IP Helper API.
///
/// Released with `FreeMibTable` exactly once, on drop.
struct MibTable<T: MibRows> {
    ptr: *mut T,
}

impl<T: MibRows> MibTable<T> {
    const fn null() -> Self {
        Self {
            ptr: ptr::null_mut(),
        }
    }

    fn as_out_ptr(&mut self) -> *mut *mut T {
        &raw mut self.ptr
    }

    fn rows(&self) -> &[T::Row] {
        if self.ptr.is_null() {
            return &[];
        }

        // SAFETY: A non-null table was filled by the OS: `NumEntries` rows are laid out
        // contiguously from the first element of `Table`, and live until `drop`.
        unsafe {
            let len = T::num_entries(self.ptr) as usize;
            std::slice::from_raw_parts(T::first_row(self.ptr), len)
        }
    }
}

impl<T: MibRows> Drop for MibTable<T> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: The pointer came from a `GetIp*Table*` call and is freed only here.
            unsafe { FreeMibTable(self.ptr.cast::<c_void>()) };
        }
    }
}

/// Variable-length IP Helper table: a count followed by a row array.
trait MibRows {
    type Row;

    /// # Safety
    ///
    /// `table` must point to a table filled by the OS.
    unsafe fn num_entries(table: *const Self) -> u32;

    /// # Safety
    ///
    /// `table` must point to a table filled by the OS.
    unsafe fn first_row(table: *const Self) -> *const Self::Row;
}

impl MibRows for MIB_IPINTERFACE_TABLE {
    type Row = MIB_IPINTERFACE_ROW;

    unsafe fn num_entries(table: *const Self) -> u32 {
        unsafe { (*table).NumEntries }
    }

    unsafe fn first_row(table: *const Self) -> *const Self::Row {
        unsafe { (&raw const (*table).Table).cast() }
    }
}

impl MibRows for MIB_IPFORWARD_TABLE2 {
    type Row = MIB_IPFORWARD_ROW2;

    unsafe fn num_entries(table: *const Self) -> u32 {
        unsafe { (*table).NumEntries }
    }

    unsafe fn first_row(table: *const Self) -> *const Self::Row {
        unsafe { (&raw const (*table).Table).cast() }
    }
}

/// Calls `GetAdaptersInfo` with the sizing/query two-call pattern.
///
/// Returns an empty buffer when the system has no adapters.
///
/// # Coverage Note
///
/// Error paths require actual Windows API failures which cannot be mocked.
#[cfg(not(tarpaulin_include))]
fn get_adapters_info() -> Result<Vec<u8>, FetchError> {
    let mut size = 0u32;

    // SAFETY: A null buffer asks only for the required size.
    let result = unsafe { GetAdaptersInfo(None, &raw mut size) };
    if result == ERROR_NO_DATA.0 {
        return Ok(Vec::new());
    }
    if result != ERROR_BUFFER_OVERFLOW.0 {
        return Err(win32_error(result));
    }

    let mut buffer = vec![0u8; size as usize];

    // SAFETY: The buffer is exactly the size the sizing call reported.
    let result = unsafe { GetAdaptersInfo(Some(buffer.as_mut_ptr().cast()), &raw mut size) };
    if result != NO_ERROR.0 {
        return Err(win32_error(result));
    }

    Ok(buffer)
}

/// Walks the adapter linked list stored in `buffer`.
fn parse_adapter_list(buffer: &[u8]) -> AdapterMap {
    if buffer.is_empty() {
        return AdapterMap::new();
    }

    let mut adapters = Vec::new();

    // SAFETY: GetAdaptersInfo returns a properly aligned buffer for IP_ADAPTER_INFO.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_INFO>();

    // SAFETY: Every `Next` link points into `buffer`, which outlives the loop.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        adapters.push(AdapterEntry::new(
            adapter.Index,
            addr_string(&adapter.IpAddressList),
            addr_string(&adapter.GatewayList),
        ));

        current = adapter.Next;
    }

    adapter_map(adapters)
}

/// Reads the NUL-terminated dotted address of an `IP_ADDR_STRING`.
fn addr_string(entry: &IP_ADDR_STRING) -> String {
    // SAFETY: IP_ADDRESS_STRING is a 16-byte ANSI buffer.
    let bytes = unsafe { &*ptr::from_ref(&entry.IpAddress.String).cast::<[u8; 16]>() };

    CStr::from_bytes_until_nul(bytes).map_or_else(
        |_| String::from_utf8_lossy(bytes).into_owned(),
        |s| s.to_string_lossy().into_owned(),
    )
}

/// Converts one forwarding row; `None` for destinations that are neither IPv4 nor IPv6.
fn parse_forward_row(row: &MIB_IPFORWARD_ROW2) -> Option<ForwardEntry> {
    let destination = sockaddr_to_ip(&row.DestinationPrefix.Prefix)?;
    let next_hop = sockaddr_to_ip(&row.NextHop).unwrap_or(match destination {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    });

    #[allow(clippy::useless_conversion)]
    let loopback = bool::from(row.Loopback);

    Some(
        ForwardEntry::new(
            destination,
            row.DestinationPrefix.PrefixLength,
            next_hop,
            row.InterfaceIndex,
            row.Metric,
        )
        .with_loopback(loopback),
    )
}

fn sockaddr_to_ip(addr: &SOCKADDR_INET) -> Option<IpAddr> {
    // SAFETY: `si_family` overlays the family field of every union variant.
    let family = unsafe { addr.si_family };

    match family {
        f if f == AF_INET => {
            // SAFETY: We verified the family is AF_INET.
            let octets = unsafe { addr.Ipv4.sin_addr.S_un.S_un_b };
            Some(IpAddr::V4(Ipv4Addr::new(
                octets.s_b1,
                octets.s_b2,
                octets.s_b3,
                octets.s_b4,
            )))
        }
        f if f == AF_INET6 => {
            // SAFETY: We verified the family is AF_INET6.
            let bytes = unsafe { addr.Ipv6.sin6_addr.u.Byte };
            Some(IpAddr::V6(Ipv6Addr::from(bytes)))
        }
        _ => None,
    }
}

const fn address_family(version: IpVersion) -> ADDRESS_FAMILY {
    match version {
        IpVersion::V4 => AF_INET,
        IpVersion::V6 => AF_INET6,
        IpVersion::Both => AF_UNSPEC,
    }
}

fn win32_error(code: u32) -> FetchError {
    windows::core::Error::from(WIN32_ERROR(code)).into()
}
