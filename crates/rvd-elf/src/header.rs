//! ELF structural records: file header, section headers, symbols.

use crate::{ElfError, Result};

/// ELF magic bytes.
pub const ELF_MAGIC: [u8; 4] = [0x7f, 0x45, 0x4c, 0x46];
/// 32-bit class byte (`ELFCLASS32`).
pub const ELF_CLASS_32: u8 = 1;
/// Little-endian data byte (`ELFDATA2LSB`).
pub const ELF_DATA_LSB: u8 = 1;
/// Executable object type (`ET_EXEC`).
pub const ET_EXEC: u16 = 2;
/// RISC-V machine id (`EM_RISCV`).
pub const EM_RISCV: u16 = 0xf3;
/// Section header entry size for ELF32.
pub const SECTION_HEADER_SIZE: u32 = 40;
/// Symbol table entry size for ELF32.
pub const SYMBOL_ENTRY_SIZE: u32 = 16;

/// ELF file header, restricted to the fields this tool reports.
///
/// Constructed through [`FileHeader::new`], which validates every field
/// domain at once; there is no observable partially-valid state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub class: u8,
    pub data: u8,
    pub e_type: u16,
    pub machine: u16,
    pub shoff: u32,
    pub flags: u32,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

impl FileHeader {
    /// Validate and build the header.
    ///
    /// Only 32-bit little-endian RISC-V executables are accepted; any
    /// other class/endianness/type/machine is a fatal configuration
    /// error, not a warning.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        magic: [u8; 4],
        class: u8,
        data: u8,
        e_type: u16,
        machine: u16,
        shoff: u32,
        flags: u32,
        shentsize: u16,
        shnum: u16,
        shstrndx: u16,
    ) -> Result<Self> {
        if magic != ELF_MAGIC {
            return Err(ElfError::BadMagic);
        }
        if class != ELF_CLASS_32 {
            return Err(ElfError::UnsupportedClass(class));
        }
        if data != ELF_DATA_LSB {
            return Err(ElfError::UnsupportedEndianness(data));
        }
        if e_type != ET_EXEC {
            return Err(ElfError::UnsupportedType(e_type));
        }
        if machine != EM_RISCV {
            return Err(ElfError::UnsupportedMachine(machine));
        }
        Ok(Self {
            class,
            data,
            e_type,
            machine,
            shoff,
            flags,
            shentsize,
            shnum,
            shstrndx,
        })
    }

    #[must_use]
    pub const fn magic_string(&self) -> &'static str {
        "7f 45 4c 46"
    }

    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        "ELF32"
    }

    #[must_use]
    pub const fn data_name(&self) -> &'static str {
        "Little endian"
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        "Executable"
    }

    #[must_use]
    pub const fn machine_name(&self) -> &'static str {
        "RISC-V"
    }

    /// Flags rendering; the single RVC flag gets its name spelled out.
    #[must_use]
    pub fn flags_string(&self) -> String {
        match self.flags {
            0x1 => "0x1, RVC".to_string(),
            other => format!("{other:#x}"),
        }
    }
}

/// Section type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionType {
    Null,
    Progbits,
    Symtab,
    Strtab,
    Rela,
    Hash,
    Dynamic,
    Note,
    Nobits,
    Rel,
    Shlib,
    Dynsym,
    InitArray,
    FiniArray,
    PreinitArray,
    Group,
    SymtabShndx,
    Unknown,
}

impl SectionType {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0x0 => Self::Null,
            0x1 => Self::Progbits,
            0x2 => Self::Symtab,
            0x3 => Self::Strtab,
            0x4 => Self::Rela,
            0x5 => Self::Hash,
            0x6 => Self::Dynamic,
            0x7 => Self::Note,
            0x8 => Self::Nobits,
            0x9 => Self::Rel,
            0xa => Self::Shlib,
            0xb => Self::Dynsym,
            0xe => Self::InitArray,
            0xf => Self::FiniArray,
            0x10 => Self::PreinitArray,
            0x11 => Self::Group,
            0x12 => Self::SymtabShndx,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Progbits => "PROGBITS",
            Self::Symtab => "SYMTAB",
            Self::Strtab => "STRTAB",
            Self::Rela => "RELA",
            Self::Hash => "HASH",
            Self::Dynamic => "DYNAMIC",
            Self::Note => "NOTE",
            Self::Nobits => "NOBITS",
            Self::Rel => "REL",
            Self::Shlib => "SHLIB",
            Self::Dynsym => "DYNSYM",
            Self::InitArray => "INIT_ARRAY",
            Self::FiniArray => "FINI_ARRAY",
            Self::PreinitArray => "PREINIT_ARRAY",
            Self::Group => "GROUP",
            Self::SymtabShndx => "SYMTAB_SHNDX",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Section header.
///
/// The display name is back-filled from the section-name string table
/// once the whole table has been parsed.
#[derive(Clone, Debug)]
pub struct SectionHeader {
    pub name_offset: u32,
    pub sh_type: SectionType,
    pub addr: u32,
    pub offset: u32,
    pub size: u32,
    pub link: u32,
    pub name: String,
}

/// Symbol type, from the low nibble of the info byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolType {
    NoType,
    Object,
    Func,
    Section,
    File,
    Common,
    Tls,
    LoOs,
    HiOs,
    LoProc,
    HiProc,
}

impl SymbolType {
    pub const fn from_info(info: u8) -> Result<Self> {
        Ok(match info & 0xf {
            0x0 => Self::NoType,
            0x1 => Self::Object,
            0x2 => Self::Func,
            0x3 => Self::Section,
            0x4 => Self::File,
            0x5 => Self::Common,
            0x6 => Self::Tls,
            0xa => Self::LoOs,
            0xc => Self::HiOs,
            0xd => Self::LoProc,
            0xf => Self::HiProc,
            other => return Err(ElfError::UnknownSymbolType(other)),
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoType => "NOTYPE",
            Self::Object => "OBJECT",
            Self::Func => "FUNC",
            Self::Section => "SECTION",
            Self::File => "FILE",
            Self::Common => "COMMON",
            Self::Tls => "TLS",
            Self::LoOs => "LOOS",
            Self::HiOs => "HIOS",
            Self::LoProc => "LOPROC",
            Self::HiProc => "HIPROC",
        }
    }
}

/// Symbol binding, from the high nibble of the info byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolBinding {
    Local,
    Global,
    Weak,
    LoOs,
    HiOs,
    LoProc,
    HiProc,
}

impl SymbolBinding {
    pub const fn from_info(info: u8) -> Result<Self> {
        Ok(match info >> 4 {
            0x0 => Self::Local,
            0x1 => Self::Global,
            0x2 => Self::Weak,
            0xa => Self::LoOs,
            0xc => Self::HiOs,
            0xd => Self::LoProc,
            0xf => Self::HiProc,
            other => return Err(ElfError::UnknownSymbolBinding(other)),
        })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Global => "GLOBAL",
            Self::Weak => "WEAK",
            Self::LoOs => "LOOS",
            Self::HiOs => "HIOS",
            Self::LoProc => "LOPROC",
            Self::HiProc => "HIPROC",
        }
    }
}

/// Symbol visibility, from the low bits of the other byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolVisibility {
    Default,
    Internal,
    Hidden,
    Protected,
    Exported,
    Singleton,
    Eliminate,
}

impl SymbolVisibility {
    #[must_use]
    pub const fn from_other(other: u8) -> Self {
        match other & 0x3 {
            0x0 => Self::Default,
            0x1 => Self::Internal,
            0x2 => Self::Hidden,
            _ => Self::Protected,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Internal => "INTERNAL",
            Self::Hidden => "HIDDEN",
            Self::Protected => "PROTECTED",
            Self::Exported => "EXPORTED",
            Self::Singleton => "SINGLETON",
            Self::Eliminate => "ELIMINATE",
        }
    }
}

/// Symbol table entry with the name already resolved.
#[derive(Clone, Debug)]
pub struct Symbol {
    pub name_offset: u32,
    pub name: String,
    pub value: u32,
    pub size: u32,
    pub sym_type: SymbolType,
    pub binding: SymbolBinding,
    pub visibility: SymbolVisibility,
    pub shndx: u16,
}

impl Symbol {
    /// Decompose the packed info/other bytes and build the entry.
    pub fn new(
        name_offset: u32,
        name: String,
        value: u32,
        size: u32,
        info: u8,
        other: u8,
        shndx: u16,
    ) -> Result<Self> {
        Ok(Self {
            name_offset,
            name,
            value,
            size,
            sym_type: SymbolType::from_info(info)?,
            binding: SymbolBinding::from_info(info)?,
            visibility: SymbolVisibility::from_other(other),
            shndx,
        })
    }

    /// Section index rendered with the reserved-value tokens.
    #[must_use]
    pub fn shndx_name(&self) -> String {
        match self.shndx {
            0x0 => "UND".to_string(),
            0xff20 => "LOOS".to_string(),
            0xff3f => "HIOS".to_string(),
            0xfff1 => "ABS".to_string(),
            0xfff2 => "COMMON".to_string(),
            other => other.to_string(),
        }
    }
}
