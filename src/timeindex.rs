//! Derive the reporting timestamps from the header's time parameters.

use time::{Duration, PrimitiveDateTime};

use crate::{OutError, Result};

/// Build the ordered timestamp sequence: `start + k * interval` for
/// `k = 0..n_periods`.
///
/// Pure; no I/O. Fails with `InvalidFormat` when the interval cannot produce
/// a strictly increasing sequence (zero or negative with more than one
/// period) or the last timestamp overflows the calendar range.
pub fn build_time_index(
    start: PrimitiveDateTime,
    interval_seconds: f64,
    n_periods: usize,
) -> Result<Vec<PrimitiveDateTime>> {
    if n_periods > 1 && interval_seconds <= 0.0 {
        return Err(OutError::InvalidFormat(format!(
            "report interval {interval_seconds}s cannot space {n_periods} periods"
        )));
    }

    let mut index = Vec::with_capacity(n_periods);
    for k in 0..n_periods {
        let offset = Duration::seconds_f64(interval_seconds * k as f64);
        let instant = start.checked_add(offset).ok_or_else(|| {
            OutError::InvalidFormat(format!("period {k} overflows the calendar range"))
        })?;
        index.push(instant);
    }
    Ok(index)
}
