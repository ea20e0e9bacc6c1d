//! Parsing of `show servers state` output into typed records.
//!
//! # Responsibilities
//! - Split the raw response into preamble, header, and data rows
//! - Map data columns to header field names positionally
//! - Convert numeric fields to integers at the parse boundary
//! - Filter rows to the requested backend
//!
//! # Wire Format
//! ```text
//! line 0: format version preamble (ignored)
//! line 1: "# be_name srv_name srv_addr srv_op_state srv_admin_state ..."
//! line 2+: "<marker> <value> <value> ..." (marker column ignored, values map
//!          positionally to the header fields)
//! ```

use crate::error::{Error, Result};

/// Header field carrying the backend name.
const FIELD_BACKEND: &str = "be_name";
/// Header field carrying the slot's symbolic name.
const FIELD_SERVER: &str = "srv_name";
/// Header field carrying the currently assigned address.
const FIELD_ADDR: &str = "srv_addr";
/// Header field carrying the health-check-derived state (0 = down).
const FIELD_OP_STATE: &str = "srv_op_state";
/// Header field carrying the administrative flag bitmask.
const FIELD_ADMIN_STATE: &str = "srv_admin_state";
/// Header field carrying the age of the current state in seconds.
const FIELD_TIME_SINCE_CHANGE: &str = "srv_time_since_last_change";

/// One row of backend state as reported by the load balancer.
///
/// Records are views of load-balancer-owned state, built fresh from each
/// `show servers state` response and discarded once a decision is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    /// Backend this slot belongs to.
    pub backend_name: String,
    /// Symbolic slot name, stable within a backend.
    pub server_name: String,
    /// Currently assigned address, or `0.0.0.0` when unassigned.
    pub address: String,
    /// Health-check-derived operational state; 0 means down.
    pub operational_state: u32,
    /// Administrative flag bitmask; bit 0 set means maintenance.
    pub admin_state: u32,
    /// Seconds since the current state was entered.
    pub seconds_since_change: u64,
}

/// Positions of the fields we consume within the header row.
struct FieldIndices {
    backend: usize,
    server: usize,
    addr: usize,
    op_state: usize,
    admin_state: usize,
    time_since_change: usize,
}

impl FieldIndices {
    fn locate(field_names: &[&str]) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            field_names
                .iter()
                .position(|f| *f == name)
                .ok_or_else(|| Error::Parse(format!("header is missing field '{name}'")))
        };
        Ok(Self {
            backend: find(FIELD_BACKEND)?,
            server: find(FIELD_SERVER)?,
            addr: find(FIELD_ADDR)?,
            op_state: find(FIELD_OP_STATE)?,
            admin_state: find(FIELD_ADMIN_STATE)?,
            time_since_change: find(FIELD_TIME_SINCE_CHANGE)?,
        })
    }
}

/// Parse a `show servers state` response, keeping only rows for `backend`.
///
/// Fails with [`Error::Parse`] when the header row is missing, a data row is
/// shorter than the header, or a numeric field does not parse. Fails with
/// [`Error::BackendNotFound`] when no row survives the backend filter.
pub fn parse_backend_state(response: &str, backend: &str) -> Result<Vec<ServerRecord>> {
    let lines: Vec<&str> = response
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let lines: &[&str] = match lines.iter().rposition(|l| !l.is_empty()) {
        Some(last) => &lines[..=last],
        None => &[],
    };

    // Line 0 is the format-version preamble, line 1 the header.
    if lines.len() < 2 {
        return Err(Error::Parse("missing header row".to_string()));
    }
    let mut header: Vec<&str> = lines[1].split(' ').filter(|t| !t.is_empty()).collect();
    if header.len() < 2 {
        return Err(Error::Parse("header row has no fields".to_string()));
    }
    // The leading marker column ("#") is not a field name.
    header.remove(0);
    let indices = FieldIndices::locate(&header)?;

    let mut records = Vec::new();
    for (line_no, line) in lines.iter().enumerate().skip(2) {
        if line.is_empty() {
            continue;
        }
        let columns: Vec<&str> = line.split(' ').collect();
        // Column 0 mirrors the header's marker column.
        let values = &columns[1..];
        if values.len() < header.len() {
            return Err(Error::Parse(format!(
                "row {} has {} fields, header has {}",
                line_no,
                values.len(),
                header.len()
            )));
        }

        let record = ServerRecord {
            backend_name: values[indices.backend].to_string(),
            server_name: values[indices.server].to_string(),
            address: values[indices.addr].to_string(),
            operational_state: parse_int(values[indices.op_state], FIELD_OP_STATE)?,
            admin_state: parse_int(values[indices.admin_state], FIELD_ADMIN_STATE)?,
            seconds_since_change: parse_int(
                values[indices.time_since_change],
                FIELD_TIME_SINCE_CHANGE,
            )?,
        };

        // Filtering is mandatory before any decision is taken on the rows.
        if record.backend_name == backend {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(Error::BackendNotFound(backend.to_string()));
    }
    Ok(records)
}

fn parse_int<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Parse(format!("field '{field}' is not numeric: '{raw}'")))
}
