//! Dump pipeline: parse the requested parts of an ELF image and build
//! the textual report.

use std::fmt::Write as _;

use tracing::debug;

use rvd_elf::{ElfParser, FileHeader, SectionHeader, Symbol};
use rvd_isa::{Instruction, disassemble};

use crate::report;
use crate::{Error, Result};

/// Which parts of the file the report should cover.
#[derive(Clone, Copy, Debug, Default)]
pub struct DumpFlags {
    pub header: bool,
    pub sections: bool,
    pub symbols: bool,
    pub text: bool,
    /// Missing sections and undecodable words become report notices
    /// instead of errors.
    pub quiet: bool,
}

/// Everything `read` extracted from the image.
#[derive(Debug)]
pub struct Dump {
    pub header: FileHeader,
    pub sections: Vec<SectionHeader>,
    pub symbols: Vec<Symbol>,
    pub symtab_found: bool,
    /// Decoded code section plus its load address.
    pub text: Option<(Vec<Instruction>, u32)>,
    pub text_found: bool,
}

/// Parse the parts of `data` the flags ask for.
///
/// The file header is always parsed since everything else hangs off it.
/// Section lookups by name are fatal when the section is missing unless
/// `quiet` is set, in which case the corresponding found flag is
/// cleared and reporting degrades to a notice.
pub fn read(data: Vec<u8>, flags: DumpFlags) -> Result<Dump> {
    let mut parser = ElfParser::new(data);
    let header = parser.parse_header()?;
    debug!(
        shoff = header.shoff,
        shnum = header.shnum,
        "parsed file header"
    );

    let mut dump = Dump {
        header,
        sections: Vec::new(),
        symbols: Vec::new(),
        symtab_found: true,
        text: None,
        text_found: true,
    };
    if !(flags.sections || flags.symbols || flags.text) {
        return Ok(dump);
    }

    dump.sections = parser.parse_section_headers(
        dump.header.shoff,
        dump.header.shnum,
        dump.header.shstrndx,
    )?;
    debug!(count = dump.sections.len(), "parsed section headers");

    if flags.symbols || flags.text {
        match dump.sections.iter().find(|s| s.name == ".symtab") {
            Some(symtab) => {
                let link = usize::try_from(symtab.link).unwrap_or(usize::MAX);
                let strings = dump
                    .sections
                    .get(link)
                    .ok_or(rvd_elf::ElfError::OutOfBounds { pos: link })?;
                dump.symbols = parser.parse_symbol_table(symtab, strings)?;
                debug!(count = dump.symbols.len(), "parsed symbol table");
            }
            None if flags.quiet => dump.symtab_found = false,
            None => return Err(Error::SymtabNotFound),
        }
    }

    if flags.text {
        match dump.sections.iter().find(|s| s.name == ".text") {
            Some(text) => {
                let load_address = text.addr;
                let bytes = parser.read_section_bytes(text)?;
                let instructions = disassemble(&bytes, load_address, flags.quiet)?;
                debug!(count = instructions.len(), "decoded code section");
                dump.text = Some((instructions, load_address));
            }
            None if flags.quiet => dump.text_found = false,
            None => return Err(Error::TextNotFound),
        }
    }

    Ok(dump)
}

/// Render the full report for a dump.
pub fn write(dump: &Dump, source: &str, flags: DumpFlags) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "Reading {source}...\n");
    if flags.header {
        report::write_file_header(&mut out, &dump.header);
    }
    if flags.sections {
        report::write_section_headers(&mut out, &dump.sections);
    }
    if flags.symbols {
        if dump.symtab_found {
            report::write_symbol_table(&mut out, &dump.symbols);
        } else {
            out.push_str("Symbol table not found\n");
        }
    }
    if flags.text {
        if dump.symtab_found && dump.text_found {
            if let Some((instructions, load_address)) = &dump.text {
                report::write_disassembly(&mut out, instructions, *load_address, &dump.symbols)?;
            }
        } else {
            if !dump.symtab_found && !flags.symbols {
                out.push_str("Symbol table not found\n");
            }
            if !dump.text_found {
                out.push_str(".text section not found\n");
            }
        }
    }
    Ok(out)
}

/// Parse and report in one step.
pub fn dump_to_string(data: Vec<u8>, source: &str, flags: DumpFlags) -> Result<String> {
    let dump = read(data, flags)?;
    write(&dump, source, flags)
}
