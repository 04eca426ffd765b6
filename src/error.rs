//! Error types for SWMM output decoding and queries.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutError {
    #[error("not a SWMM output file: {0}")]
    InvalidFormat(String),

    #[error("file truncated: needed {expected} bytes, only {actual} available")]
    Truncated { expected: usize, actual: usize },

    #[error("{axis} index out of range: {index} >= {limit}")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("no element named {0:?}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutError>;
