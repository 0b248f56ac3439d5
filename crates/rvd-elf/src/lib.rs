//! ELF32 structural parser for RISC-V binaries.
//!
//! Wraps an in-memory image in a [`ByteCursor`] and produces typed
//! file-header, section-header, and symbol records with names resolved
//! through the embedded string tables.

mod cursor;
mod header;
mod parser;
mod strtab;

pub use cursor::*;
pub use header::*;
pub use parser::*;
pub use strtab::*;

use thiserror::Error;

/// ELF parsing errors. All carry enough position context to report the
/// faulting byte offset; none are recoverable.
#[derive(Error, Debug)]
pub enum ElfError {
    #[error("not an ELF file (bad magic)")]
    BadMagic,
    #[error("unsupported ELF class {0} (only ELF32 supported)")]
    UnsupportedClass(u8),
    #[error("unsupported endianness {0} (only little-endian supported)")]
    UnsupportedEndianness(u8),
    #[error("unsupported object type {0} (only executables supported)")]
    UnsupportedType(u16),
    #[error("unsupported machine {0:#x} (only RISC-V supported)")]
    UnsupportedMachine(u16),
    #[error("offset out of bounds at position {pos}")]
    OutOfBounds { pos: usize },
    #[error("not enough bytes at position {pos}")]
    Truncated { pos: usize },
    #[error("unknown symbol type {0:#x}")]
    UnknownSymbolType(u8),
    #[error("unknown symbol binding {0:#x}")]
    UnknownSymbolBinding(u8),
}

pub type Result<T> = std::result::Result<T, ElfError>;
