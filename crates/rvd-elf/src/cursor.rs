//! Sequential, seekable reader over an in-memory byte buffer.

use crate::{ElfError, Result};

/// Byte cursor with deterministic positioning.
///
/// Owns an immutable buffer and a position in `0..=len`. Reading past the
/// end fails explicitly; multi-byte reads assemble little-endian values
/// from repeated single-byte consumption so endianness handling stays in
/// one place.
#[derive(Debug)]
pub struct ByteCursor {
    data: Vec<u8>,
    pos: usize,
}

impl ByteCursor {
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// True once every byte has been consumed.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Next byte, advancing; `None` past the end.
    pub fn take(&mut self) -> Option<u8> {
        if self.pos < self.data.len() {
            let byte = self.data[self.pos];
            self.pos += 1;
            Some(byte)
        } else {
            None
        }
    }

    fn take_or_truncated(&mut self) -> Result<u8> {
        let pos = self.pos;
        self.take().ok_or(ElfError::Truncated { pos })
    }

    /// Consume two bytes as a little-endian half-word.
    pub fn take_half(&mut self) -> Result<u16> {
        let a = self.take_or_truncated()?;
        let b = self.take_or_truncated()?;
        Ok(u16::from(a) | (u16::from(b) << 8))
    }

    /// Consume four bytes as a little-endian word.
    pub fn take_word(&mut self) -> Result<u32> {
        let a = self.take_or_truncated()?;
        let b = self.take_or_truncated()?;
        let c = self.take_or_truncated()?;
        let d = self.take_or_truncated()?;
        Ok(u32::from(a) | (u32::from(b) << 8) | (u32::from(c) << 16) | (u32::from(d) << 24))
    }

    /// Consume exactly `len` bytes.
    pub fn take_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if self.pos + len > self.data.len() {
            return Err(ElfError::Truncated { pos: self.pos });
        }
        let bytes = self.data[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    /// Absolute reposition; fails unless `position` lies inside the buffer.
    pub fn set_pointer(&mut self, position: usize) -> Result<()> {
        if position >= self.data.len() {
            return Err(ElfError::OutOfBounds { pos: position });
        }
        self.pos = position;
        Ok(())
    }
}
