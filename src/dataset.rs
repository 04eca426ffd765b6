//! High-level handle over a fully decoded output file.
//!
//! [`OutputDataset`] runs the whole decode pipeline once (header, catalog,
//! time index, record store) and then answers queries against the immutable
//! result. Construction is all-or-nothing: any decode failure aborts it; a
//! failed query afterwards leaves the dataset reusable.

use std::path::Path;

use time::{Duration, PrimitiveDateTime};

use crate::catalog::{self, ElementCatalog};
use crate::cursor::ByteCursor;
use crate::header::{self, Header};
use crate::records::{RecordGeometry, RecordStore, SummaryTable};
use crate::timeindex::build_time_index;
use crate::types::{ElementKind, LoadMode};
use crate::{OutError, Result};

/// Decoded SWMM output file: header, catalog, time index, and record store.
///
/// Immutable after construction; every query takes `&self`, so a dataset can
/// be shared across threads without locking.
pub struct OutputDataset {
    header: Header,
    catalog: ElementCatalog,
    time_index: Vec<PrimitiveDateTime>,
    records: RecordStore,
}

impl OutputDataset {
    /// Decode a complete output file held in memory.
    pub fn from_bytes(data: Vec<u8>, mode: LoadMode) -> Result<Self> {
        let (header, catalog, region_start) = {
            let mut cur = ByteCursor::new(&data);
            let header = header::decode_header(&mut cur)?;
            let catalog = catalog::decode_catalog(&mut cur, &header)?;
            // The catalog's variable length fixes where the records begin.
            (header, catalog, cur.position())
        };

        let time_index = build_time_index(header.start, header.report_interval, header.n_periods)?;
        let geom = RecordGeometry::from_header(&header);
        let records = RecordStore::new(data, region_start, geom, mode)?;

        Ok(Self {
            header,
            catalog,
            time_index,
            records,
        })
    }

    /// Read the file into memory in one atomic load, then decode it.
    pub fn from_file<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, mode)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    /// One timestamp per reporting period.
    pub fn time_index(&self) -> &[PrimitiveDateTime] {
        &self.time_index
    }

    pub fn n_periods(&self) -> usize {
        self.header.n_periods
    }

    /// Last reporting instant: the stored end fields if they decoded, else
    /// derived from start + interval.
    pub fn end(&self) -> PrimitiveDateTime {
        self.header.end.unwrap_or_else(|| {
            if self.header.n_periods > 1 {
                self.header.start
                    + Duration::seconds_f64(
                        self.header.report_interval * (self.header.n_periods - 1) as f64,
                    )
            } else {
                self.header.start
            }
        })
    }

    /// Per-kind index of a named element. Case-sensitive exact match.
    pub fn element_index(&self, kind: ElementKind, name: &str) -> Result<usize> {
        match self.catalog.lookup(name) {
            Some((k, i)) if k == kind => Ok(i),
            _ => Err(OutError::NotFound(name.to_string())),
        }
    }

    /// Global slot of a named element of any kind.
    pub fn global_index(&self, name: &str) -> Result<usize> {
        let (kind, index) = self
            .catalog
            .lookup(name)
            .ok_or_else(|| OutError::NotFound(name.to_string()))?;
        Ok(self.catalog.global_index(kind, index))
    }

    /// Value for one element, property, and period.
    pub fn value(
        &self,
        kind: ElementKind,
        element: usize,
        property: usize,
        period: usize,
    ) -> Result<f32> {
        self.records.value(kind, element, property, period)
    }

    /// [`value`](Self::value) with the element resolved by name.
    pub fn value_by_name(
        &self,
        kind: ElementKind,
        name: &str,
        property: usize,
        period: usize,
    ) -> Result<f32> {
        let element = self.element_index(kind, name)?;
        self.records.value(kind, element, property, period)
    }

    /// Full time series for one element and property.
    pub fn series(&self, kind: ElementKind, element: usize, property: usize) -> Result<Vec<f32>> {
        self.records.series(kind, element, property)
    }

    /// [`series`](Self::series) with the element resolved by name.
    pub fn series_by_name(
        &self,
        kind: ElementKind,
        name: &str,
        property: usize,
    ) -> Result<Vec<f32>> {
        let element = self.element_index(kind, name)?;
        self.records.series(kind, element, property)
    }

    /// Min/max/mean per (element, property) over all periods; `None` when
    /// the file holds zero periods.
    pub fn summaries(&self) -> Option<SummaryTable> {
        self.records.summaries()
    }

    pub fn mode(&self) -> LoadMode {
        self.records.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::MAGIC;
    use time::macros::datetime;

    fn push_i32(buf: &mut Vec<u8>, v: i32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_f32(buf: &mut Vec<u8>, v: f32) {
        buf.extend_from_slice(&v.to_le_bytes());
    }

    fn push_name(buf: &mut Vec<u8>, name: &str) {
        buf.push(name.len() as u8);
        buf.extend_from_slice(name.as_bytes());
    }

    /// 1 subcatchment, 2 nodes, 1 link; 2 vars; 3 periods; values follow
    /// `100*period + 10*slot + property`.
    fn sample_file() -> Vec<u8> {
        let mut buf = Vec::new();
        push_i32(&mut buf, MAGIC);
        push_i32(&mut buf, 52001);
        push_i32(&mut buf, 3); // CMS
        push_i32(&mut buf, 1); // subcatchments
        push_i32(&mut buf, 2); // nodes
        push_i32(&mut buf, 1); // links
        push_i32(&mut buf, 0); // pollutants
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 2); // vars per element
        push_i32(&mut buf, (2024 - 1900) * 10000 + 6 * 100 + 1); // 2024-06-01
        push_i32(&mut buf, 12 * 3600); // 12:00:00
        push_f32(&mut buf, 600.0); // 10 min
        push_i32(&mut buf, 0); // end date left zeroed
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 3); // periods

        push_name(&mut buf, "S1");
        push_name(&mut buf, "J1");
        push_name(&mut buf, "J2");
        push_name(&mut buf, "C1");
        push_i32(&mut buf, 2); // node properties
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 3);
        push_i32(&mut buf, 4);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 2); // link properties
        push_i32(&mut buf, 0);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 1);
        push_i32(&mut buf, 3);
        push_i32(&mut buf, 0); // pollutant descriptors

        for period in 0..3 {
            for slot in 0..4 {
                for property in 0..2 {
                    push_f32(&mut buf, (100 * period + 10 * slot + property) as f32);
                }
            }
        }
        push_i32(&mut buf, MAGIC);
        buf
    }

    #[test]
    fn decodes_and_queries_by_name() {
        let ds = OutputDataset::from_bytes(sample_file(), LoadMode::Lazy).unwrap();

        assert_eq!(ds.header().version_string(), "5.20.1");
        assert_eq!(ds.catalog().total(), 4);
        assert_eq!(ds.n_periods(), 3);
        assert_eq!(ds.time_index().len(), 3);
        assert_eq!(ds.time_index()[0], datetime!(2024-06-01 12:00:00));
        assert_eq!(ds.time_index()[2], datetime!(2024-06-01 12:20:00));

        // J2 is node 1, global slot 2
        assert_eq!(ds.element_index(ElementKind::Node, "J2").unwrap(), 1);
        assert_eq!(ds.global_index("J2").unwrap(), 2);
        assert_eq!(
            ds.value_by_name(ElementKind::Node, "J2", 1, 2).unwrap(),
            221.0
        );
        assert_eq!(
            ds.value(ElementKind::Node, 1, 1, 2).unwrap(),
            ds.value_by_name(ElementKind::Node, "J2", 1, 2).unwrap()
        );
        assert_eq!(
            ds.series_by_name(ElementKind::Subcatchment, "S1", 0).unwrap(),
            [0.0, 100.0, 200.0]
        );
    }

    #[test]
    fn zeroed_end_fields_fall_back_to_derived_end() {
        let ds = OutputDataset::from_bytes(sample_file(), LoadMode::Lazy).unwrap();
        assert_eq!(ds.header().end, None);
        assert_eq!(ds.end(), datetime!(2024-06-01 12:20:00));
    }

    #[test]
    fn name_misses_are_not_found() {
        let ds = OutputDataset::from_bytes(sample_file(), LoadMode::Eager).unwrap();

        assert!(matches!(
            ds.element_index(ElementKind::Node, "J9"),
            Err(OutError::NotFound(_))
        ));
        // right name, wrong kind
        assert!(matches!(
            ds.element_index(ElementKind::Link, "J1"),
            Err(OutError::NotFound(_))
        ));
        assert!(matches!(
            ds.value_by_name(ElementKind::Node, "j1", 0, 0),
            Err(OutError::NotFound(_))
        ));
    }

    #[test]
    fn query_failure_leaves_dataset_usable() {
        let ds = OutputDataset::from_bytes(sample_file(), LoadMode::Lazy).unwrap();
        assert!(ds.value(ElementKind::Node, 0, 9, 0).is_err());
        assert_eq!(ds.value(ElementKind::Node, 0, 0, 0).unwrap(), 10.0);
    }

    #[test]
    fn summaries_pass_through() {
        let ds = OutputDataset::from_bytes(sample_file(), LoadMode::Eager).unwrap();
        let table = ds.summaries().unwrap();
        let s = table.get(ElementKind::Link, 0, 0).unwrap();
        // link slot 3, property 0: 30, 130, 230
        assert_eq!(s.min, 30.0);
        assert_eq!(s.max, 230.0);
        assert_eq!(s.mean, 130.0);
    }

    #[test]
    fn truncated_file_fails_construction() {
        let mut buf = sample_file();
        buf.truncate(buf.len() - 4);
        assert!(matches!(
            OutputDataset::from_bytes(buf, LoadMode::Lazy),
            Err(OutError::Truncated { .. })
        ));
    }

    #[test]
    fn corrupted_leading_marker_fails_construction() {
        let mut buf = sample_file();
        buf[2] ^= 0x40;
        assert!(matches!(
            OutputDataset::from_bytes(buf, LoadMode::Lazy),
            Err(OutError::InvalidFormat(_))
        ));
    }
}
