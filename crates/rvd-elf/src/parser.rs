//! ELF structural parser.
//!
//! Field offsets follow the ELF32 layout: the parser seeks to each fixed
//! offset instead of consuming the regions it does not report.

use crate::cursor::ByteCursor;
use crate::header::{
    FileHeader, SECTION_HEADER_SIZE, SYMBOL_ENTRY_SIZE, SectionHeader, SectionType, Symbol,
};
use crate::strtab::StringTable;
use crate::{ElfError, Result};

/// Parser over a single in-memory ELF image.
///
/// Owns the byte cursor exclusively for the duration of parsing; every
/// operation repositions it explicitly before reading.
#[derive(Debug)]
pub struct ElfParser {
    cursor: ByteCursor,
}

impl ElfParser {
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: ByteCursor::new(data),
        }
    }

    /// Parse and validate the file header.
    pub fn parse_header(&mut self) -> Result<FileHeader> {
        self.cursor.set_pointer(0)?;
        let magic_bytes = self.cursor.take_bytes(4)?;
        let magic = [magic_bytes[0], magic_bytes[1], magic_bytes[2], magic_bytes[3]];
        let class = self.cursor.take().ok_or(ElfError::Truncated { pos: 4 })?;
        let data = self.cursor.take().ok_or(ElfError::Truncated { pos: 5 })?;

        self.cursor.set_pointer(0x10)?;
        let e_type = self.cursor.take_half()?;
        let machine = self.cursor.take_half()?;

        self.cursor.set_pointer(0x20)?;
        let shoff = self.cursor.take_word()?;
        let flags = self.cursor.take_word()?;

        self.cursor.set_pointer(0x2e)?;
        let shentsize = self.cursor.take_half()?;
        let shnum = self.cursor.take_half()?;
        let shstrndx = self.cursor.take_half()?;

        FileHeader::new(
            magic, class, data, e_type, machine, shoff, flags, shentsize, shnum, shstrndx,
        )
    }

    /// Parse the section header table and resolve section names.
    ///
    /// Collects every entry first, then reads the section-name string
    /// table (index `shstrndx`) and back-fills the display names.
    pub fn parse_section_headers(
        &mut self,
        offset: u32,
        count: u16,
        shstrndx: u16,
    ) -> Result<Vec<SectionHeader>> {
        let mut sections = Vec::with_capacity(usize::from(count));
        for i in 0..u32::from(count) {
            let base = offset + SECTION_HEADER_SIZE * i;
            self.cursor.set_pointer(base as usize)?;
            let name_offset = self.cursor.take_word()?;
            let sh_type = SectionType::from_raw(self.cursor.take_word()?);
            self.cursor.set_pointer(base as usize + 0xc)?;
            let addr = self.cursor.take_word()?;
            let sh_offset = self.cursor.take_word()?;
            let size = self.cursor.take_word()?;
            let link = self.cursor.take_word()?;
            sections.push(SectionHeader {
                name_offset,
                sh_type,
                addr,
                offset: sh_offset,
                size,
                link,
                name: String::new(),
            });
        }

        let Some(strtab_section) = sections.get(usize::from(shstrndx)) else {
            return Err(ElfError::OutOfBounds {
                pos: usize::from(shstrndx),
            });
        };
        let strtab = self.read_string_table(strtab_section.offset, strtab_section.size)?;
        for section in &mut sections {
            section.name = strtab.get(section.name_offset as usize)?;
        }
        Ok(sections)
    }

    /// Parse the symbol table.
    ///
    /// `strings` must be the string-table section referenced by the
    /// symbol table's `link` field; resolving that link is the caller's
    /// responsibility.
    pub fn parse_symbol_table(
        &mut self,
        symtab: &SectionHeader,
        strings: &SectionHeader,
    ) -> Result<Vec<Symbol>> {
        let names = self.read_string_table(strings.offset, strings.size)?;
        let count = symtab.size / SYMBOL_ENTRY_SIZE;

        self.cursor.set_pointer(symtab.offset as usize)?;
        let mut symbols = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name_offset = self.cursor.take_word()?;
            let name = names.get(name_offset as usize)?;
            let value = self.cursor.take_word()?;
            let size = self.cursor.take_word()?;
            let pos = self.cursor.position();
            let info = self.cursor.take().ok_or(ElfError::Truncated { pos })?;
            let other = self.cursor.take().ok_or(ElfError::Truncated { pos: pos + 1 })?;
            let shndx = self.cursor.take_half()?;
            symbols.push(Symbol::new(name_offset, name, value, size, info, other, shndx)?);
        }
        Ok(symbols)
    }

    /// Read a section's raw bytes (e.g. the code section for the decoder).
    pub fn read_section_bytes(&mut self, section: &SectionHeader) -> Result<Vec<u8>> {
        self.cursor.set_pointer(section.offset as usize)?;
        self.cursor.take_bytes(section.size as usize)
    }

    fn read_string_table(&mut self, offset: u32, size: u32) -> Result<StringTable> {
        self.cursor.set_pointer(offset as usize)?;
        Ok(StringTable::new(self.cursor.take_bytes(size as usize)?))
    }
}
