//! End-to-end tests over synthetic ELF images.

use std::fs;

use rvd::{DumpFlags, Error, dump_to_string, read};

/// Build a 40-byte ELF32 section header.
fn section_header(
    name_offset: u32,
    sh_type: u32,
    addr: u32,
    offset: u32,
    size: u32,
    link: u32,
) -> [u8; 40] {
    let mut header = [0u8; 40];
    header[0..4].copy_from_slice(&name_offset.to_le_bytes());
    header[4..8].copy_from_slice(&sh_type.to_le_bytes());
    header[12..16].copy_from_slice(&addr.to_le_bytes());
    header[16..20].copy_from_slice(&offset.to_le_bytes());
    header[20..24].copy_from_slice(&size.to_le_bytes());
    header[24..28].copy_from_slice(&link.to_le_bytes());
    header
}

const LOAD_ADDRESS: u32 = 0x10074;

/// Synthetic RV32 executable with a `main` FUNC symbol at the start of
/// the code section. `with_text`/`with_symtab` drop the corresponding
/// section from the table to exercise degraded reporting.
fn build_image(text: &[u8], with_text: bool, with_symtab: bool) -> Vec<u8> {
    let mut image = vec![0u8; 0x34];
    image[0..4].copy_from_slice(&[0x7f, 0x45, 0x4c, 0x46]);
    image[4] = 1; // ELFCLASS32
    image[5] = 1; // ELFDATA2LSB
    image[0x10..0x12].copy_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    image[0x12..0x14].copy_from_slice(&0xf3u16.to_le_bytes()); // EM_RISCV
    image[0x24..0x28].copy_from_slice(&0x1u32.to_le_bytes()); // e_flags (RVC)
    image[0x2e..0x30].copy_from_slice(&40u16.to_le_bytes()); // e_shentsize

    let text_offset = image.len() as u32;
    image.extend_from_slice(text);

    // Symbol name string table: "" and "main"
    let strtab_offset = image.len() as u32;
    image.extend_from_slice(b"\0main\0");
    let strtab_size = image.len() as u32 - strtab_offset;

    // One symbol: main, GLOBAL FUNC, section 1
    let symtab_offset = image.len() as u32;
    image.extend_from_slice(&1u32.to_le_bytes()); // name offset
    image.extend_from_slice(&LOAD_ADDRESS.to_le_bytes()); // value
    image.extend_from_slice(&(text.len() as u32).to_le_bytes()); // size
    image.push(0x12); // GLOBAL | FUNC
    image.push(0x0);
    image.extend_from_slice(&1u16.to_le_bytes());

    // Section name string table
    let shstrtab_offset = image.len() as u32;
    image.extend_from_slice(b"\0.text\0.symtab\0.strtab\0.shstrtab\0");
    let shstrtab_size = image.len() as u32 - shstrtab_offset;

    let mut headers: Vec<[u8; 40]> = vec![[0u8; 40]];
    if with_text {
        headers.push(section_header(
            1,
            0x1,
            LOAD_ADDRESS,
            text_offset,
            text.len() as u32,
            0,
        ));
    }
    if with_symtab {
        let strtab_index = headers.len() as u32 + 1;
        headers.push(section_header(7, 0x2, 0, symtab_offset, 16, strtab_index));
        headers.push(section_header(15, 0x3, 0, strtab_offset, strtab_size, 0));
    }
    let shstrndx = headers.len() as u16;
    headers.push(section_header(
        23,
        0x3,
        0,
        shstrtab_offset,
        shstrtab_size,
        0,
    ));

    let shoff = image.len() as u32;
    image[0x20..0x24].copy_from_slice(&shoff.to_le_bytes());
    image[0x30..0x32].copy_from_slice(&(headers.len() as u16).to_le_bytes());
    image[0x32..0x34].copy_from_slice(&shstrndx.to_le_bytes());
    for header in headers {
        image.extend_from_slice(&header);
    }
    image
}

const ALL: DumpFlags = DumpFlags {
    header: true,
    sections: true,
    symbols: true,
    text: true,
    quiet: false,
};

#[test]
fn test_full_report() {
    let image = build_image(&0x0000_0013u32.to_le_bytes(), true, true);
    let report = dump_to_string(image, "test.elf", ALL).unwrap();

    assert!(report.starts_with("Reading test.elf...\n\n"));
    assert!(report.contains("ELF Header:"));
    assert!(report.contains("RISC-V"));
    assert!(report.contains("0x1, RVC"));
    assert!(report.contains("Section Headers:"));
    assert!(report.contains(".shstrtab"));
    assert!(report.contains("Symbol table '.symtab' contains 1 entries:"));
    assert!(report.contains("FUNC"));
    assert!(report.contains("Disassembly of section .text:"));
    assert!(report.contains("\n00010074 <main>:\n"));
    assert!(report.contains("nop"));
}

#[test]
fn test_compressed_instructions_advance_two_bytes() {
    // c.nop at 0x10074, nop at 0x10076
    let mut text = Vec::new();
    text.extend_from_slice(&0x0001u16.to_le_bytes());
    text.extend_from_slice(&0x0000_0013u32.to_le_bytes());
    let image = build_image(&text, true, true);
    let report = dump_to_string(image, "test.elf", ALL).unwrap();

    assert!(report.contains("   00010074             c.nop\n"));
    assert!(report.contains("   00010076             nop\n"));
}

#[test]
fn test_jump_targets_get_synthetic_labels() {
    // jal ra, +8 then two nops; 0x1007c gets the first synthetic label
    let mut text = Vec::new();
    let jal = (4u32 << 21) | (1 << 7) | 0x6f;
    text.extend_from_slice(&jal.to_le_bytes());
    text.extend_from_slice(&0x0000_0013u32.to_le_bytes());
    text.extend_from_slice(&0x0000_0013u32.to_le_bytes());
    let image = build_image(&text, true, true);
    let report = dump_to_string(image, "test.elf", ALL).unwrap();

    assert!(report.contains("jal    ra, LOC_00000"));
    assert!(report.contains("   0001007c  LOC_00000: nop\n"));
}

#[test]
fn test_missing_text_is_fatal_in_strict_mode() {
    let image = build_image(&[], false, true);
    let err = read(image, ALL).unwrap_err();
    assert!(matches!(err, Error::TextNotFound));
}

#[test]
fn test_missing_text_degrades_in_quiet_mode() {
    let image = build_image(&[], false, true);
    let flags = DumpFlags { quiet: true, ..ALL };
    let report = dump_to_string(image, "test.elf", flags).unwrap();
    assert!(report.contains(".text section not found"));
}

#[test]
fn test_missing_symtab_degrades_in_quiet_mode() {
    let image = build_image(&0x0000_0013u32.to_le_bytes(), true, false);
    let flags = DumpFlags {
        header: false,
        sections: false,
        symbols: false,
        text: true,
        quiet: true,
    };
    let report = dump_to_string(image, "test.elf", flags).unwrap();
    assert!(report.contains("Symbol table not found"));
    assert!(!report.contains("Disassembly"));
}

#[test]
fn test_unknown_word_is_fatal_in_strict_mode() {
    let image = build_image(&0x0000_005bu32.to_le_bytes(), true, true);
    let err = read(image, ALL).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_unknown_word_renders_placeholder_in_quiet_mode() {
    let image = build_image(&0x0000_005bu32.to_le_bytes(), true, true);
    let flags = DumpFlags { quiet: true, ..ALL };
    let report = dump_to_string(image, "test.elf", flags).unwrap();
    assert!(report.contains("unknown_command"));
}

#[test]
fn test_report_round_trips_through_file() {
    let image = build_image(&0x0000_0013u32.to_le_bytes(), true, true);
    let report = dump_to_string(image, "test.elf", ALL).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, &report).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), report);
}
