//! Tests for the run module.

use std::net::IpAddr;

use netroutes::routes::{
    AdapterEntry, AdapterMap, FetchError, ForwardEntry, InterfaceMap, InterfaceRow, IpVersion,
    adapter_map, interface_map,
};

use super::*;

/// Source returning a fixed two-route snapshot.
struct FixedSource;

impl RouteSource for FixedSource {
    fn adapters(&self) -> Result<AdapterMap, FetchError> {
        Ok(adapter_map([AdapterEntry::new(
            12,
            "192.168.1.20",
            "192.168.1.1",
        )]))
    }

    fn interfaces(&self, _version: IpVersion) -> Result<InterfaceMap, FetchError> {
        Ok(interface_map([InterfaceRow::new(12, 1500, 25)]))
    }

    fn forward_table(&self) -> Result<Vec<ForwardEntry>, FetchError> {
        let ip = |s: &str| s.parse::<IpAddr>().unwrap();
        Ok(vec![
            ForwardEntry::new(ip("0.0.0.0"), 0, ip("192.168.1.1"), 12, 10),
            ForwardEntry::new(ip("fe80::"), 64, ip("::"), 12, 256),
        ])
    }
}

/// Source whose reads all fail.
struct BrokenSource;

impl RouteSource for BrokenSource {
    fn adapters(&self) -> Result<AdapterMap, FetchError> {
        Err(FetchError::Platform {
            message: "adapters".to_string(),
        })
    }

    fn interfaces(&self, _version: IpVersion) -> Result<InterfaceMap, FetchError> {
        Err(FetchError::Platform {
            message: "interfaces".to_string(),
        })
    }

    fn forward_table(&self) -> Result<Vec<ForwardEntry>, FetchError> {
        Err(FetchError::Platform {
            message: "forward table".to_string(),
        })
    }
}

mod render_snapshot {
    use super::*;

    #[test]
    fn renders_every_route_as_json() {
        let output = render_snapshot(&FixedSource, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["interface"], "192.168.1.20");
        assert_eq!(rows[0]["metric"], 35);
        assert_eq!(rows[1]["mtu"], 1500);
    }

    #[test]
    fn renders_table_with_one_line_per_route() {
        let output = render_snapshot(&FixedSource, OutputFormat::Table).unwrap();

        let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("192.168.1.20"));
        assert!(lines[2].contains("fe80::"));
    }

    #[test]
    fn failed_reads_render_empty_table() {
        let output = render_snapshot(&BrokenSource, OutputFormat::Json).unwrap();

        assert_eq!(output, "[]");
    }
}

mod run_error {
    use super::*;

    #[test]
    fn render_displays_source() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = RunError::Render(OutputError::Json(json_error));
        assert!(error.to_string().contains("Failed to render routes"));
        assert!(error.to_string().contains("Failed to serialize rows"));
    }

    #[test]
    fn write_displays_source() {
        let error = RunError::Write(std::io::Error::other("closed"));
        assert!(error.to_string().contains("Failed to write output"));
    }
}
