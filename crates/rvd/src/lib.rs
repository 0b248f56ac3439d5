//! RVD - reader and disassembler for 32-bit little-endian RISC-V ELF
//! executables.
//!
//! The library parses the ELF file header, section headers and symbol
//! table through [`rvd_elf`], decodes the code section through
//! [`rvd_isa`], and renders a readelf-style textual report with
//! two-pass label resolution for jump and branch targets.

pub mod error;
pub mod reader;
pub mod render;
pub mod report;

pub use error::{Error, Result};
pub use reader::{Dump, DumpFlags, dump_to_string, read};
pub use render::{LabelMap, discover_labels, render_instruction};
