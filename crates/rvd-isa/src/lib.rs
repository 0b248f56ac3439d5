//! RISC-V RV32I/M/C instruction set definitions and decoder.
//!
//! The decoder walks a byte stream half-word by half-word, dispatching
//! between 32-bit and compressed encodings, and produces immutable
//! [`Instruction`] records for the disassembly renderer.

mod decode;
mod encode;
mod types;

pub use decode::*;
pub use encode::*;
pub use types::*;

use thiserror::Error;

/// Instruction decoding errors (strict mode only; quiet mode degrades
/// unknown encodings to placeholder instructions).
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unknown opcode {word:#010x} at address {address:#010x}")]
    UnknownOpcode { address: u32, word: u32 },
    #[error("truncated instruction stream at address {address:#010x}")]
    Truncated { address: u32 },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
