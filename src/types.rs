//! Shared types: [`ElementKind`], [`FlowUnit`], [`ConcentrationUnit`], and [`LoadMode`].

use std::fmt;

use crate::{OutError, Result};

/// Kind of model element tracked by the simulation.
///
/// Elements occupy global slots in catalog order: all subcatchments first,
/// then all nodes, then all links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Subcatchment,
    Node,
    Link,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subcatchment => write!(f, "subcatchment"),
            Self::Node => write!(f, "node"),
            Self::Link => write!(f, "link"),
        }
    }
}

/// Flow unit declared in the file header (codes 0-9).
///
/// Codes 0-5 are volumetric flow units; 6-8 are concentration codes that some
/// writers store in this slot; 9 means no flow unit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowUnit {
    /// Cubic feet per second (code 0).
    Cfs,
    /// Gallons per minute (code 1).
    Gpm,
    /// Million gallons per day (code 2).
    Mgd,
    /// Cubic meters per second (code 3).
    Cms,
    /// Liters per second (code 4).
    Lps,
    /// Million liters per day (code 5).
    Mld,
    /// Milligrams per liter (code 6).
    Mg,
    /// Micrograms per liter (code 7).
    Ug,
    /// Counts per liter (code 8).
    Counts,
    /// No flow unit (code 9).
    None,
}

impl FlowUnit {
    /// Convert a raw header code to a `FlowUnit`.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Cfs),
            1 => Ok(Self::Gpm),
            2 => Ok(Self::Mgd),
            3 => Ok(Self::Cms),
            4 => Ok(Self::Lps),
            5 => Ok(Self::Mld),
            6 => Ok(Self::Mg),
            7 => Ok(Self::Ug),
            8 => Ok(Self::Counts),
            9 => Ok(Self::None),
            _ => Err(OutError::InvalidFormat(format!(
                "flow unit code {code} outside 0-9"
            ))),
        }
    }

    /// Convert back to the raw header code.
    pub fn to_code(self) -> i32 {
        match self {
            Self::Cfs => 0,
            Self::Gpm => 1,
            Self::Mgd => 2,
            Self::Cms => 3,
            Self::Lps => 4,
            Self::Mld => 5,
            Self::Mg => 6,
            Self::Ug => 7,
            Self::Counts => 8,
            Self::None => 9,
        }
    }
}

impl fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cfs => write!(f, "CFS"),
            Self::Gpm => write!(f, "GPM"),
            Self::Mgd => write!(f, "MGD"),
            Self::Cms => write!(f, "CMS"),
            Self::Lps => write!(f, "LPS"),
            Self::Mld => write!(f, "MLD"),
            Self::Mg => write!(f, "MG"),
            Self::Ug => write!(f, "UG"),
            Self::Counts => write!(f, "COUNTS"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// Concentration unit for a pollutant (codes 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcentrationUnit {
    /// Milligrams per liter (code 0).
    Mg,
    /// Micrograms per liter (code 1).
    Ug,
    /// Counts per liter (code 2).
    Counts,
}

impl ConcentrationUnit {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Mg),
            1 => Ok(Self::Ug),
            2 => Ok(Self::Counts),
            _ => Err(OutError::InvalidFormat(format!(
                "concentration unit code {code} outside 0-2"
            ))),
        }
    }

    pub fn to_code(self) -> i32 {
        match self {
            Self::Mg => 0,
            Self::Ug => 1,
            Self::Counts => 2,
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mg => write!(f, "MG"),
            Self::Ug => write!(f, "UG"),
            Self::Counts => write!(f, "COUNTS"),
        }
    }
}

/// How the time-series region is held after decoding.
///
/// Both modes answer every query with bit-identical results; eager trades
/// upfront decode time and memory for array-lookup queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Keep the raw buffer and seek per query.
    #[default]
    Lazy,
    /// Materialize the full value grid at construction.
    Eager,
}
