//! Random access into the time-series region of the output file.
//!
//! Every reporting period is one fixed-size record holding a 4-byte float
//! for each (element slot, property) pair, slots in catalog order. The
//! [`RecordStore`] answers point queries either by seeking into the raw
//! buffer per query (lazy) or from a grid materialized once at construction
//! (eager); the two modes are bit-identical.

use crate::header::{Header, MAGIC};
use crate::types::{ElementKind, LoadMode};
use crate::{OutError, Result};

/// Shape of the time-series region, derived from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordGeometry {
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub vars_per_element: usize,
    pub n_periods: usize,
}

impl RecordGeometry {
    pub fn from_header(h: &Header) -> Self {
        Self {
            n_subcatch: h.n_subcatch,
            n_nodes: h.n_nodes,
            n_links: h.n_links,
            vars_per_element: h.vars_per_element,
            n_periods: h.n_periods,
        }
    }

    /// Total element slots per record.
    pub fn n_elements(&self) -> usize {
        self.n_subcatch + self.n_nodes + self.n_links
    }

    /// Bytes per record: one 4-byte value per (slot, property) pair.
    pub fn record_size(&self) -> usize {
        self.n_elements() * self.vars_per_element * 4
    }

    /// `record_size` with overflow detection, for validating untrusted
    /// dimensions before any unchecked arithmetic runs.
    fn checked_record_size(&self) -> Option<usize> {
        self.n_subcatch
            .checked_add(self.n_nodes)?
            .checked_add(self.n_links)?
            .checked_mul(self.vars_per_element)?
            .checked_mul(4)
    }

    fn kind_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Subcatchment => self.n_subcatch,
            ElementKind::Node => self.n_nodes,
            ElementKind::Link => self.n_links,
        }
    }

    fn kind_axis(kind: ElementKind) -> &'static str {
        match kind {
            ElementKind::Subcatchment => "subcatchment",
            ElementKind::Node => "node",
            ElementKind::Link => "link",
        }
    }

    /// Global slot of an element, with bounds checks on every axis except
    /// the period.
    fn slot(&self, kind: ElementKind, index: usize) -> Result<usize> {
        let limit = self.kind_count(kind);
        if index >= limit {
            return Err(OutError::IndexOutOfRange {
                axis: Self::kind_axis(kind),
                index,
                limit,
            });
        }
        Ok(match kind {
            ElementKind::Subcatchment => index,
            ElementKind::Node => self.n_subcatch + index,
            ElementKind::Link => self.n_subcatch + self.n_nodes + index,
        })
    }

    fn check_property(&self, property: usize) -> Result<()> {
        if property >= self.vars_per_element {
            return Err(OutError::IndexOutOfRange {
                axis: "property",
                index: property,
                limit: self.vars_per_element,
            });
        }
        Ok(())
    }

    fn check_period(&self, period: usize) -> Result<()> {
        if period >= self.n_periods {
            return Err(OutError::IndexOutOfRange {
                axis: "period",
                index: period,
                limit: self.n_periods,
            });
        }
        Ok(())
    }
}

enum Backing {
    /// Raw file buffer plus the offset where the time-series region begins.
    Lazy { buf: Vec<u8>, region_start: usize },
    /// Dense grid indexed `(period * n_elements + slot) * vars + property`.
    Eager { grid: Vec<f32> },
}

/// Owner of the time-series values, queried by
/// (element kind, element index, property index, period index).
pub struct RecordStore {
    geom: RecordGeometry,
    backing: Backing,
}

impl RecordStore {
    /// Take ownership of the file buffer and validate the region geometry:
    /// the buffer must hold `n_periods` full records starting at
    /// `region_start`, immediately followed by the trailing magic. A
    /// shortfall or marker mismatch means the file was cut off.
    pub fn new(
        buf: Vec<u8>,
        region_start: usize,
        geom: RecordGeometry,
        mode: LoadMode,
    ) -> Result<Self> {
        let overflow = || OutError::InvalidFormat("record geometry overflows".into());
        let record_size = geom.checked_record_size().ok_or_else(overflow)?;
        let region_len = geom.n_periods.checked_mul(record_size).ok_or_else(overflow)?;
        let region_end = region_start.checked_add(region_len).ok_or_else(overflow)?;
        let needed = region_end.checked_add(4).ok_or_else(overflow)?;
        if buf.len() < needed {
            return Err(OutError::Truncated {
                expected: needed,
                actual: buf.len(),
            });
        }
        let trailer = read_4_at(&buf, region_end);
        if i32::from_le_bytes(trailer) != MAGIC {
            // Wrong bytes where the trailing marker belongs: the region is
            // shorter than the header geometry implies.
            return Err(OutError::Truncated {
                expected: needed,
                actual: region_end,
            });
        }

        let backing = match mode {
            LoadMode::Lazy => Backing::Lazy { buf, region_start },
            LoadMode::Eager => {
                let n_values = region_len / 4;
                let mut grid = Vec::with_capacity(n_values);
                for i in 0..n_values {
                    grid.push(f32::from_le_bytes(read_4_at(
                        &buf,
                        region_start + i * 4,
                    )));
                }
                Backing::Eager { grid }
            }
        };

        Ok(Self { geom, backing })
    }

    pub fn geometry(&self) -> &RecordGeometry {
        &self.geom
    }

    pub fn mode(&self) -> LoadMode {
        match self.backing {
            Backing::Lazy { .. } => LoadMode::Lazy,
            Backing::Eager { .. } => LoadMode::Eager,
        }
    }

    /// Value for one element, property, and period.
    pub fn value(
        &self,
        kind: ElementKind,
        element: usize,
        property: usize,
        period: usize,
    ) -> Result<f32> {
        let slot = self.geom.slot(kind, element)?;
        self.geom.check_property(property)?;
        self.geom.check_period(period)?;
        Ok(self.value_at(slot, property, period))
    }

    /// Full time series for one element and property, one value per period.
    pub fn series(&self, kind: ElementKind, element: usize, property: usize) -> Result<Vec<f32>> {
        let slot = self.geom.slot(kind, element)?;
        self.geom.check_property(property)?;
        Ok((0..self.geom.n_periods)
            .map(|period| self.value_at(slot, property, period))
            .collect())
    }

    fn value_at(&self, slot: usize, property: usize, period: usize) -> f32 {
        match &self.backing {
            Backing::Lazy { buf, region_start } => {
                let offset = region_start
                    + period * self.geom.record_size()
                    + slot * self.geom.vars_per_element * 4
                    + property * 4;
                f32::from_le_bytes(read_4_at(buf, offset))
            }
            Backing::Eager { grid } => {
                let i = (period * self.geom.n_elements() + slot) * self.geom.vars_per_element
                    + property;
                grid[i]
            }
        }
    }

    /// Per-(element, property) min/max/mean over all periods, computed in a
    /// single forward scan. Returns `None` when the file holds zero periods.
    pub fn summaries(&self) -> Option<SummaryTable> {
        if self.geom.n_periods == 0 {
            return None;
        }
        let n_cells = self.geom.n_elements() * self.geom.vars_per_element;
        let mut acc = vec![
            Accumulator {
                min: f32::INFINITY,
                max: f32::NEG_INFINITY,
                sum: 0.0,
            };
            n_cells
        ];
        for period in 0..self.geom.n_periods {
            for slot in 0..self.geom.n_elements() {
                for property in 0..self.geom.vars_per_element {
                    let v = self.value_at(slot, property, period);
                    let a = &mut acc[slot * self.geom.vars_per_element + property];
                    a.min = a.min.min(v);
                    a.max = a.max.max(v);
                    a.sum += v as f64;
                }
            }
        }
        let n = self.geom.n_periods as f64;
        let stats = acc
            .into_iter()
            .map(|a| SummaryStats {
                min: a.min,
                max: a.max,
                mean: a.sum / n,
            })
            .collect();
        Some(SummaryTable {
            geom: self.geom,
            stats,
        })
    }
}

#[derive(Clone, Copy)]
struct Accumulator {
    min: f32,
    max: f32,
    sum: f64,
}

/// Minimum, maximum, and arithmetic mean of one element property across all
/// periods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
}

/// Summary statistics for every (element, property) pair.
pub struct SummaryTable {
    geom: RecordGeometry,
    stats: Vec<SummaryStats>,
}

impl SummaryTable {
    pub fn get(&self, kind: ElementKind, element: usize, property: usize) -> Result<&SummaryStats> {
        let slot = self.geom.slot(kind, element)?;
        self.geom.check_property(property)?;
        Ok(&self.stats[slot * self.geom.vars_per_element + property])
    }
}

fn read_4_at(buf: &[u8], offset: usize) -> [u8; 4] {
    [
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]
}
