//! Decode the fixed-field header at the start of a SWMM output file.
//!
//! The header occupies the first 68 bytes: leading magic, version, flow
//! unit, element counts, routing codes, record geometry, and time
//! parameters. The trailing magic at the end of the file is checked later by
//! [`RecordStore`](crate::RecordStore) once the time-series region length is
//! known.

use time::{Date, Month, PrimitiveDateTime, Time};

use crate::cursor::ByteCursor;
use crate::types::FlowUnit;
use crate::{OutError, Result};

/// Magic number at both ends of every SWMM output file.
pub const MAGIC: i32 = 516114522;

/// Decoded fixed-field header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Packed SWMM version, e.g. 52001 for 5.20.01.
    pub version: i32,
    pub flow_unit: FlowUnit,
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_pollutants: usize,
    /// Pollutant interaction code (informational).
    pub pollutant_code: i32,
    /// Flow routing method code (informational).
    pub flow_routing_code: i32,
    /// Street sweeping flag (informational).
    pub sweep_flag: i32,
    /// Number of reported values per element slot in each record.
    pub vars_per_element: usize,
    /// First reporting instant.
    pub start: PrimitiveDateTime,
    /// Reporting interval in seconds.
    pub report_interval: f64,
    /// Declared end instant, if the stored fields decode to a valid date.
    /// Informational only; period enumeration uses start + interval.
    pub end: Option<PrimitiveDateTime>,
    pub n_periods: usize,
}

impl Header {
    /// Total element slots per record: subcatchments + nodes + links.
    pub fn n_elements(&self) -> usize {
        self.n_subcatch + self.n_nodes + self.n_links
    }

    /// Render the packed version integer as `major.minor.patch`.
    pub fn version_string(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version / 10000,
            (self.version / 100) % 100,
            self.version % 100
        )
    }
}

/// Decode the header from the cursor, which must sit at offset 0.
pub fn decode_header(cur: &mut ByteCursor<'_>) -> Result<Header> {
    let magic = cur.read_i32()?;
    if magic != MAGIC {
        return Err(OutError::InvalidFormat(format!(
            "leading marker {magic:#010X}, expected {MAGIC:#010X}"
        )));
    }

    let version = cur.read_i32()?;
    let flow_unit = FlowUnit::from_code(cur.read_i32()?)?;
    let n_subcatch = read_count(cur, "subcatchment count")?;
    let n_nodes = read_count(cur, "node count")?;
    let n_links = read_count(cur, "link count")?;
    let n_pollutants = read_count(cur, "pollutant count")?;
    let pollutant_code = cur.read_i32()?;
    let flow_routing_code = cur.read_i32()?;
    let sweep_flag = cur.read_i32()?;
    let vars_per_element = read_count(cur, "variables-per-element count")?;

    let start_date = cur.read_i32()?;
    let start_time = cur.read_i32()?;
    let start = decode_instant(start_date, start_time).ok_or_else(|| {
        OutError::InvalidFormat(format!(
            "start date/time fields {start_date}/{start_time} do not decode"
        ))
    })?;

    let report_interval = cur.read_f32()? as f64;

    // End fields are informational; a writer that never finished the run may
    // leave them zeroed.
    let end_date = cur.read_i32()?;
    let end_time = cur.read_i32()?;
    let end = decode_instant(end_date, end_time);

    let n_periods = read_count(cur, "period count")?;

    Ok(Header {
        version,
        flow_unit,
        n_subcatch,
        n_nodes,
        n_links,
        n_pollutants,
        pollutant_code,
        flow_routing_code,
        sweep_flag,
        vars_per_element,
        start,
        report_interval,
        end,
        n_periods,
    })
}

fn read_count(cur: &mut ByteCursor<'_>, what: &str) -> Result<usize> {
    let raw = cur.read_i32()?;
    usize::try_from(raw)
        .map_err(|_| OutError::InvalidFormat(format!("negative {what}: {raw}")))
}

/// Decode the packed date `(year-1900)*10000 + month*100 + day` and seconds
/// time `hour*3600 + minute*60 + second` into a calendar instant.
fn decode_instant(date_raw: i32, time_raw: i32) -> Option<PrimitiveDateTime> {
    if date_raw < 0 || !(0..86400).contains(&time_raw) {
        return None;
    }
    let year = date_raw / 10000 + 1900;
    let month = Month::try_from(((date_raw / 100) % 100) as u8).ok()?;
    let day = (date_raw % 100) as u8;
    let date = Date::from_calendar_date(year, month, day).ok()?;

    let hour = (time_raw / 3600) as u8;
    let minute = ((time_raw / 60) % 60) as u8;
    let second = (time_raw % 60) as u8;
    let time = Time::from_hms(hour, minute, second).ok()?;

    Some(PrimitiveDateTime::new(date, time))
}
