//! Bounds-checked little-endian reader over an immutable byte slice.
//!
//! [`ByteCursor`] is the only component that touches raw bytes during
//! decoding. Every read checks the remaining length first and fails with
//! [`OutError::Truncated`] on a shortfall; the cursor position is unspecified
//! after a failed read, so callers abort rather than retry.

use crate::{OutError, Result};

/// Cursor over an immutable byte slice with a mutable read position.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at position 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the slice.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Take `n` raw bytes, advancing the position.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(OutError::Truncated {
                expected: n,
                actual: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 4-byte little-endian signed integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a 4-byte little-endian IEEE-754 float.
    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read a length-prefixed ASCII string: 1-byte length, then that many
    /// bytes, no padding.
    pub fn read_str(&mut self) -> Result<String> {
        let len = self.take(1)?[0] as usize;
        let bytes = self.take(len)?;
        if !bytes.is_ascii() {
            return Err(OutError::InvalidFormat(
                "non-ASCII bytes in name string".into(),
            ));
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Skip `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Seek to an absolute offset within the slice.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(OutError::Truncated {
                expected: offset,
                actual: self.data.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }
}
