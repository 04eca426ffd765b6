//! Pure Rust reader for SWMM binary output (.out) files.
//!
//! Zero `unsafe`, zero C dependencies. Decodes the fixed-field header, the
//! element catalog (subcatchment/node/link names, property descriptors,
//! pollutants), the reporting time index, and gives random access to every
//! 4-byte value in the time-series region, either by on-demand seeks into
//! the buffer (lazy) or from a grid materialized up front (eager).
//!
//! # Decoding a file and querying values
//!
//! ```
//! use swmm_out_rs::{ElementKind, LoadMode, OutputDataset};
//!
//! // Build a minimal output file in memory: one node reporting one
//! // variable over two hourly periods.
//! fn int(b: &mut Vec<u8>, v: i32) {
//!     b.extend_from_slice(&v.to_le_bytes());
//! }
//!
//! let mut b = Vec::new();
//! int(&mut b, 516114522); // leading magic
//! int(&mut b, 51015); // version 5.10.15
//! int(&mut b, 4); // flow unit LPS
//! for n in [0, 1, 0, 0] {
//!     int(&mut b, n); // subcatchment/node/link/pollutant counts
//! }
//! for n in [0, 0, 0] {
//!     int(&mut b, n); // pollutant/routing/sweep codes
//! }
//! int(&mut b, 1); // one variable per element
//! int(&mut b, (2024 - 1900) * 10000 + 101); // start 2024-01-01
//! int(&mut b, 0); // 00:00:00
//! b.extend_from_slice(&3600.0f32.to_le_bytes()); // hourly reports
//! int(&mut b, 0);
//! int(&mut b, 0); // end fields unused
//! int(&mut b, 2); // two periods
//! b.extend_from_slice(&[2, b'J', b'1']); // node name
//! int(&mut b, 1);
//! int(&mut b, 0);
//! int(&mut b, 4); // node property: flow, LPS
//! int(&mut b, 0); // no link properties
//! int(&mut b, 0); // no pollutants
//! b.extend_from_slice(&1.25f32.to_le_bytes());
//! b.extend_from_slice(&2.5f32.to_le_bytes());
//! int(&mut b, 516114522); // trailing magic
//!
//! let ds = OutputDataset::from_bytes(b, LoadMode::Lazy).unwrap();
//!
//! assert_eq!(ds.header().version_string(), "5.10.15");
//! assert_eq!(ds.n_periods(), 2);
//! assert_eq!(ds.time_index().len(), 2);
//! assert_eq!(ds.value_by_name(ElementKind::Node, "J1", 0, 1).unwrap(), 2.5);
//! assert_eq!(ds.series(ElementKind::Node, 0, 0).unwrap(), [1.25, 2.5]);
//! ```
//!
//! # Lazy vs eager loading
//!
//! [`LoadMode::Lazy`] keeps the raw buffer and computes a byte offset per
//! query; [`LoadMode::Eager`] decodes the whole region into a dense grid at
//! construction. Both answer every query bit-identically, so the choice is
//! purely a memory/latency trade-off. Datasets are immutable after
//! construction and safe to share across threads.

pub mod catalog;
pub mod cursor;
pub mod dataset;
pub mod error;
pub mod header;
pub mod records;
pub mod timeindex;
pub mod types;

pub use error::{OutError, Result};

pub use catalog::{ElementCatalog, PollutantDescriptor, PropertyDescriptor};
pub use cursor::ByteCursor;
pub use dataset::OutputDataset;
pub use header::{decode_header, Header, MAGIC};
pub use records::{RecordGeometry, RecordStore, SummaryStats, SummaryTable};
pub use timeindex::build_time_index;
pub use types::{ConcentrationUnit, ElementKind, FlowUnit, LoadMode};
