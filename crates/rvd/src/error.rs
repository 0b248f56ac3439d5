use rvd_isa::{Format, Op};
use thiserror::Error;

/// Top-level errors for the reader pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("ELF error: {0}")]
    Elf(#[from] rvd_elf::ElfError),
    #[error("decode error: {0}")]
    Decode(#[from] rvd_isa::DecodeError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(".text section not found")]
    TextNotFound,
    #[error(".symtab section not found")]
    SymtabNotFound,
    #[error("no rendering shape for {format:?}/{op:?} (decoder/renderer table mismatch)")]
    UnmappedShape { format: Format, op: Op },
}

pub type Result<T> = std::result::Result<T, Error>;
