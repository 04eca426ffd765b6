//! Shared builder for synthetic SWMM output files used by the
//! integration tests and nothing else.

use swmm_out_rs::MAGIC;

pub struct FileSpec {
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub vars_per_element: usize,
    pub n_periods: usize,
    pub interval_seconds: f32,
}

impl Default for FileSpec {
    fn default() -> Self {
        Self {
            n_subcatch: 1,
            n_nodes: 2,
            n_links: 1,
            vars_per_element: 2,
            n_periods: 4,
            interval_seconds: 300.0,
        }
    }
}

impl FileSpec {
    pub fn n_elements(&self) -> usize {
        self.n_subcatch + self.n_nodes + self.n_links
    }

    pub fn record_size(&self) -> usize {
        self.n_elements() * self.vars_per_element * 4
    }

    /// Byte offset where the time-series region starts in the built file.
    pub fn region_start(&self, file: &[u8]) -> usize {
        file.len() - 4 - self.n_periods * self.record_size()
    }
}

pub fn push_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn push_f32(buf: &mut Vec<u8>, v: f32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn push_name(buf: &mut Vec<u8>, name: &str) {
    buf.push(name.len() as u8);
    buf.extend_from_slice(name.as_bytes());
}

/// Build a complete, well-formed output file. Element names are generated
/// (`S0..`, `J0..`, `C0..`) and each value comes from
/// `value(period, global_slot, property)`.
pub fn build_file(spec: &FileSpec, value: impl Fn(usize, usize, usize) -> f32) -> Vec<u8> {
    let mut buf = Vec::new();
    push_i32(&mut buf, MAGIC);
    push_i32(&mut buf, 52001);
    push_i32(&mut buf, 4); // LPS
    push_i32(&mut buf, spec.n_subcatch as i32);
    push_i32(&mut buf, spec.n_nodes as i32);
    push_i32(&mut buf, spec.n_links as i32);
    push_i32(&mut buf, 0); // pollutants
    push_i32(&mut buf, 0);
    push_i32(&mut buf, 1);
    push_i32(&mut buf, 0);
    push_i32(&mut buf, spec.vars_per_element as i32);
    push_i32(&mut buf, (2024 - 1900) * 10000 + 5 * 100 + 20); // 2024-05-20
    push_i32(&mut buf, 8 * 3600); // 08:00:00
    push_f32(&mut buf, spec.interval_seconds);
    push_i32(&mut buf, 0);
    push_i32(&mut buf, 0);
    push_i32(&mut buf, spec.n_periods as i32);

    for i in 0..spec.n_subcatch {
        push_name(&mut buf, &format!("S{i}"));
    }
    for i in 0..spec.n_nodes {
        push_name(&mut buf, &format!("J{i}"));
    }
    for i in 0..spec.n_links {
        push_name(&mut buf, &format!("C{i}"));
    }

    // node and link descriptor lists both report vars_per_element entries
    for _ in 0..2 {
        push_i32(&mut buf, spec.vars_per_element as i32);
        for code in 0..spec.vars_per_element {
            push_i32(&mut buf, code as i32);
            push_i32(&mut buf, 0);
        }
    }
    push_i32(&mut buf, 0); // no pollutant descriptors

    for period in 0..spec.n_periods {
        for slot in 0..spec.n_elements() {
            for property in 0..spec.vars_per_element {
                push_f32(&mut buf, value(period, slot, property));
            }
        }
    }
    push_i32(&mut buf, MAGIC);
    buf
}

/// Deterministic pseudo-random f32 stream (splitmix-style), so the property
/// tests are reproducible without a randomness crate.
pub struct Prng(u64);

impl Prng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let bits = (self.0 >> 40) as u32;
        // map to a modest range, mixing in negatives
        (bits as f32 / 1_000.0) - 8_000.0
    }
}
