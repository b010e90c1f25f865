//! Rendering of assembled route rows.
//!
//! Rows are rendered through their column map ([`Row`]), so every format
//! sees the same schema: unknown columns are blank cells in a table and
//! absent keys in JSON.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use thiserror::Error;

use crate::routes::{RouteRow, Row, column};

/// Output format for the routes table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table.
    Table,
    /// Pretty-printed JSON array of rows.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Error type for rendering.
#[derive(Debug, Error)]
pub enum OutputError {
    /// JSON serialization failed.
    #[error("Failed to serialize rows: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "DESTINATION")]
    destination: String,
    #[tabled(rename = "GATEWAY")]
    gateway: String,
    #[tabled(rename = "INTERFACE")]
    interface: String,
    #[tabled(rename = "NETMASK")]
    netmask: String,
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "MTU")]
    mtu: String,
    #[tabled(rename = "TYPE")]
    route_type: String,
    #[tabled(rename = "FLAGS")]
    flags: String,
}

impl From<&Row> for TableRow {
    fn from(row: &Row) -> Self {
        let cell = |name: &str| row.get(name).map(ToString::to_string).unwrap_or_default();
        Self {
            destination: cell(column::DESTINATION),
            gateway: cell(column::GATEWAY),
            interface: cell(column::INTERFACE),
            netmask: cell(column::NETMASK),
            metric: cell(column::METRIC),
            mtu: cell(column::MTU),
            route_type: cell(column::TYPE),
            flags: cell(column::FLAGS),
        }
    }
}

/// Renders `rows` in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(rows: &[RouteRow], format: OutputFormat) -> Result<String, OutputError> {
    let rows: Vec<Row> = rows.iter().map(RouteRow::to_row).collect();

    match format {
        OutputFormat::Table => Ok(render_table(&rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

fn render_table(rows: &[Row]) -> String {
    let mut table = Table::new(rows.iter().map(TableRow::from));
    table.with(Style::blank());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{IpVersion, RouteType, UNIMPLEMENTED_FLAGS};

    fn rows() -> Vec<RouteRow> {
        vec![
            RouteRow {
                family: IpVersion::V4,
                destination: "0.0.0.0".to_string(),
                gateway: Some("192.168.1.1".to_string()),
                interface: "192.168.1.20".to_string(),
                netmask: "0".to_string(),
                metric: Some(35),
                mtu: Some(1500),
                route_type: RouteType::Remote,
                flags: UNIMPLEMENTED_FLAGS,
            },
            RouteRow {
                family: IpVersion::V4,
                destination: "10.0.0.0".to_string(),
                gateway: None,
                interface: String::new(),
                netmask: "8".to_string(),
                metric: Some(30),
                mtu: None,
                route_type: RouteType::Remote,
                flags: UNIMPLEMENTED_FLAGS,
            },
        ]
    }

    mod table {
        use super::*;

        #[test]
        fn has_header_and_one_line_per_row() {
            let output = render(&rows(), OutputFormat::Table).unwrap();

            let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].contains("DESTINATION"));
            assert!(lines[0].contains("FLAGS"));
            assert!(lines[1].contains("192.168.1.20"));
            assert!(lines[2].contains("10.0.0.0"));
        }

        #[test]
        fn empty_rows_render_header_only() {
            let output = render(&[], OutputFormat::Table).unwrap();
            assert!(output.contains("DESTINATION"));
            assert!(!output.contains("remote"));
        }
    }

    mod json {
        use super::*;

        #[test]
        fn renders_array_with_numeric_metric() {
            let output = render(&rows(), OutputFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();

            let array = value.as_array().unwrap();
            assert_eq!(array.len(), 2);
            assert_eq!(array[0]["metric"], 35);
            assert_eq!(array[0]["type"], "remote");
            assert_eq!(array[0]["flags"], "-1");
        }

        #[test]
        fn unknown_columns_are_absent() {
            let output = render(&rows(), OutputFormat::Json).unwrap();
            let value: serde_json::Value = serde_json::from_str(&output).unwrap();

            let partial = value[1].as_object().unwrap();
            assert!(!partial.contains_key("gateway"));
            assert!(!partial.contains_key("mtu"));
            assert_eq!(partial["interface"], "");
        }

        #[test]
        fn empty_rows_render_empty_array() {
            assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
        }
    }

    #[test]
    fn format_displays_name() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
