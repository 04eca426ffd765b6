//! Decode the metadata block between the header and the time-series region.
//!
//! The block holds one name per element (subcatchments, then nodes, then
//! links), the reported-property descriptors for nodes and links, and the
//! pollutant definitions. [`ElementCatalog`] indexes all of it by name once
//! at decode time so later lookups never re-scan.

use std::collections::HashMap;

use crate::cursor::ByteCursor;
use crate::header::Header;
use crate::types::{ConcentrationUnit, ElementKind};
use crate::Result;

/// A reported property of an element type: a numeric property code plus the
/// code of the unit it is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub code: i32,
    pub unit_code: i32,
}

/// A pollutant tracked by the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantDescriptor {
    pub name: String,
    pub unit: ConcentrationUnit,
}

/// Name-indexed catalog of every element in the output file.
///
/// Duplicate names resolve first-match-wins in catalog order (subcatchments,
/// nodes, links); later occurrences keep their slot but are not reachable by
/// name.
#[derive(Debug, Clone)]
pub struct ElementCatalog {
    subcatchments: Vec<String>,
    nodes: Vec<String>,
    links: Vec<String>,
    node_properties: Vec<PropertyDescriptor>,
    link_properties: Vec<PropertyDescriptor>,
    pollutants: Vec<PollutantDescriptor>,
    by_name: HashMap<String, (ElementKind, usize)>,
}

impl ElementCatalog {
    /// Number of elements of the given kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.names(kind).len()
    }

    /// Total elements across all three kinds.
    pub fn total(&self) -> usize {
        self.subcatchments.len() + self.nodes.len() + self.links.len()
    }

    /// All names of one kind, in slot order.
    pub fn names(&self, kind: ElementKind) -> &[String] {
        match kind {
            ElementKind::Subcatchment => &self.subcatchments,
            ElementKind::Node => &self.nodes,
            ElementKind::Link => &self.links,
        }
    }

    /// Name of the element at `index` within its kind, if in range.
    pub fn name(&self, kind: ElementKind, index: usize) -> Option<&str> {
        self.names(kind).get(index).map(String::as_str)
    }

    /// Resolve a name to its kind and per-kind index. Case-sensitive exact
    /// match, first match wins.
    pub fn lookup(&self, name: &str) -> Option<(ElementKind, usize)> {
        self.by_name.get(name).copied()
    }

    /// Global slot of an element: subcatchments occupy slots
    /// `0..n_subcatch`, nodes follow, then links.
    pub fn global_index(&self, kind: ElementKind, index: usize) -> usize {
        match kind {
            ElementKind::Subcatchment => index,
            ElementKind::Node => self.subcatchments.len() + index,
            ElementKind::Link => self.subcatchments.len() + self.nodes.len() + index,
        }
    }

    /// Reported-property descriptors for node elements.
    pub fn node_properties(&self) -> &[PropertyDescriptor] {
        &self.node_properties
    }

    /// Reported-property descriptors for link elements.
    pub fn link_properties(&self) -> &[PropertyDescriptor] {
        &self.link_properties
    }

    /// Pollutant definitions, in file order.
    pub fn pollutants(&self) -> &[PollutantDescriptor] {
        &self.pollutants
    }
}

/// Decode the catalog from the cursor, which must sit just past the header.
/// On success the cursor sits at the start of the time-series region.
pub fn decode_catalog(cur: &mut ByteCursor<'_>, header: &Header) -> Result<ElementCatalog> {
    let subcatchments = read_names(cur, header.n_subcatch)?;
    let nodes = read_names(cur, header.n_nodes)?;
    let links = read_names(cur, header.n_links)?;

    let node_properties = read_properties(cur)?;
    let link_properties = read_properties(cur)?;

    let n_pollutants = read_count(cur, "pollutant descriptor count")?;
    let mut pollutants = Vec::with_capacity(n_pollutants);
    for _ in 0..n_pollutants {
        let name = cur.read_str()?;
        let unit = ConcentrationUnit::from_code(cur.read_i32()?)?;
        pollutants.push(PollutantDescriptor { name, unit });
    }

    let mut by_name = HashMap::with_capacity(subcatchments.len() + nodes.len() + links.len());
    let groups = [
        (ElementKind::Subcatchment, &subcatchments),
        (ElementKind::Node, &nodes),
        (ElementKind::Link, &links),
    ];
    for (kind, names) in groups {
        for (i, name) in names.iter().enumerate() {
            // first match wins
            by_name.entry(name.clone()).or_insert((kind, i));
        }
    }

    Ok(ElementCatalog {
        subcatchments,
        nodes,
        links,
        node_properties,
        link_properties,
        pollutants,
        by_name,
    })
}

fn read_names(cur: &mut ByteCursor<'_>, n: usize) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(n);
    for _ in 0..n {
        names.push(cur.read_str()?);
    }
    Ok(names)
}

fn read_count(cur: &mut ByteCursor<'_>, what: &str) -> Result<usize> {
    let raw = cur.read_i32()?;
    usize::try_from(raw)
        .map_err(|_| crate::OutError::InvalidFormat(format!("negative {what}: {raw}")))
}

fn read_properties(cur: &mut ByteCursor<'_>) -> Result<Vec<PropertyDescriptor>> {
    let n = read_count(cur, "property descriptor count")?;
    let mut props = Vec::with_capacity(n);
    for _ in 0..n {
        let code = cur.read_i32()?;
        let unit_code = cur.read_i32()?;
        props.push(PropertyDescriptor { code, unit_code });
    }
    Ok(props)
}
