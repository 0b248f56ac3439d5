//! ELF string table.

use crate::{ElfError, Result};

/// Immutable blob of NUL-terminated strings.
#[derive(Clone, Debug)]
pub struct StringTable {
    data: Vec<u8>,
}

impl StringTable {
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Text starting at `offset`, up to the next NUL byte.
    pub fn get(&self, offset: usize) -> Result<String> {
        if offset > self.data.len() {
            return Err(ElfError::OutOfBounds { pos: offset });
        }
        let tail = &self.data[offset..];
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        Ok(tail[..end].iter().map(|&b| char::from(b)).collect())
    }
}
