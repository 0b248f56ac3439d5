//! Textual report writer.
//!
//! Readelf-style column layouts: fixed-width hex for addresses and
//! offsets, decimal immediates, a 12-column label gutter in the
//! disassembly listing.

use std::fmt::Write as _;

use rvd_elf::{FileHeader, SectionHeader, Symbol, SymbolType};
use rvd_isa::Instruction;

use crate::render::{LabelMap, discover_labels, render_instruction};
use crate::Result;

/// Append the ELF header block.
pub fn write_file_header(out: &mut String, header: &FileHeader) {
    out.push_str("ELF Header:\n");
    let _ = writeln!(out, "  {:<38} {}", "Magic:", header.magic_string());
    let _ = writeln!(out, "  {:<38} {}", "Class:", header.class_name());
    let _ = writeln!(out, "  {:<38} {}", "Data:", header.data_name());
    let _ = writeln!(out, "  {:<38} {}", "Type:", header.type_name());
    let _ = writeln!(out, "  {:<38} {}", "Machine:", header.machine_name());
    let _ = writeln!(out, "  {:<38} {}", "Flags:", header.flags_string());
    if header.shoff > 0 {
        let _ = writeln!(
            out,
            "  {:<38} {:06x}",
            "Start of section headers:", header.shoff
        );
        let _ = writeln!(out, "  {:<38} {}", "Size of section headers:", header.shentsize);
        let _ = writeln!(out, "  {:<38} {}", "Number of section headers:", header.shnum);
        let _ = writeln!(
            out,
            "  {:<38} {}",
            "Section header string table index:", header.shstrndx
        );
    } else {
        out.push_str("No section headers\n");
    }
    out.push('\n');
}

/// Append the section header table.
pub fn write_section_headers(out: &mut String, sections: &[SectionHeader]) {
    out.push_str("Section Headers:\n");
    let _ = writeln!(
        out,
        "  [{:>2}] {:<18} {:<10} {:<8} {:<6} {:<6} {:>2}",
        "Nr", "Name", "Type", "Address", "Offset", "Size", "Lk"
    );
    for (i, section) in sections.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{i:>2}] {:<18} {:<10} {:08x} {:06x} {:06x} {:>2}",
            section.name,
            section.sh_type.name(),
            section.addr,
            section.offset,
            section.size,
            section.link
        );
    }
    out.push('\n');
}

/// Append the symbol table.
pub fn write_symbol_table(out: &mut String, symbols: &[Symbol]) {
    let _ = writeln!(
        out,
        "Symbol table '.symtab' contains {} entries:",
        symbols.len()
    );
    let _ = writeln!(
        out,
        "  [{:>3}] {:<9} {:>7} {:<10} {:<8} {:<7} {:>6} {}",
        "Nr", "Value", "Size", "Type", "Bind", "Vis", "Idx", "Name"
    );
    for (i, symbol) in symbols.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{i:>3}] 0x{:<9x} {:>5} {:<10} {:<8} {:<7} {:>6} {}",
            symbol.value,
            symbol.size,
            symbol.sym_type.name(),
            symbol.binding.name(),
            symbol.visibility.name(),
            symbol.shndx_name(),
            symbol.name
        );
    }
    out.push('\n');
}

/// Map FUNC symbols by value for label resolution.
#[must_use]
pub fn function_labels(symbols: &[Symbol]) -> LabelMap {
    symbols
        .iter()
        .filter(|s| s.sym_type == SymbolType::Func)
        .map(|s| (s.value, s.name.clone()))
        .collect()
}

/// Append the annotated disassembly of the code section.
///
/// Emits a function-boundary line before the first instruction at an
/// address carrying a genuine (non-synthetic) symbol label; synthetic
/// labels go in the gutter of their own line.
pub fn write_disassembly(
    out: &mut String,
    instructions: &[Instruction],
    load_address: u32,
    symbols: &[Symbol],
) -> Result<()> {
    let labels = discover_labels(instructions, load_address, &function_labels(symbols));

    out.push_str("Disassembly of section .text:\n");
    let mut address = load_address;
    for instr in instructions {
        let label = labels.get(&address).map(String::as_str).unwrap_or("");
        let synthetic = label.starts_with("LOC_");
        if !label.is_empty() && !synthetic {
            let _ = writeln!(out, "\n{address:08x} <{label}>:");
        }
        let gutter = if synthetic {
            format!(" {:>10}", format!("{label}: "))
        } else {
            " ".repeat(12)
        };
        let text = render_instruction(instr, address, &labels)?;
        let _ = writeln!(out, "   {address:08x} {gutter}{text}");
        address = address.wrapping_add(u32::from(instr.size));
    }
    out.push('\n');
    Ok(())
}
