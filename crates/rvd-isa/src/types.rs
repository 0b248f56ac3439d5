//! Core types for the RV32 decoder.

/// General-purpose register in ABI order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    Zero,
    Ra,
    Sp,
    Gp,
    Tp,
    T0,
    T1,
    T2,
    S0,
    S1,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    S2,
    S3,
    S4,
    S5,
    S6,
    S7,
    S8,
    S9,
    S10,
    S11,
    T3,
    T4,
    T5,
    T6,
}

impl Register {
    /// Register for a 5-bit encoding field (masked to `0..32`).
    #[must_use]
    pub const fn from_index(idx: u8) -> Self {
        match idx & 0x1f {
            0 => Self::Zero,
            1 => Self::Ra,
            2 => Self::Sp,
            3 => Self::Gp,
            4 => Self::Tp,
            5 => Self::T0,
            6 => Self::T1,
            7 => Self::T2,
            8 => Self::S0,
            9 => Self::S1,
            10 => Self::A0,
            11 => Self::A1,
            12 => Self::A2,
            13 => Self::A3,
            14 => Self::A4,
            15 => Self::A5,
            16 => Self::A6,
            17 => Self::A7,
            18 => Self::S2,
            19 => Self::S3,
            20 => Self::S4,
            21 => Self::S5,
            22 => Self::S6,
            23 => Self::S7,
            24 => Self::S8,
            25 => Self::S9,
            26 => Self::S10,
            27 => Self::S11,
            28 => Self::T3,
            29 => Self::T4,
            30 => Self::T5,
            _ => Self::T6,
        }
    }

    /// ABI name, lower-case.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Ra => "ra",
            Self::Sp => "sp",
            Self::Gp => "gp",
            Self::Tp => "tp",
            Self::T0 => "t0",
            Self::T1 => "t1",
            Self::T2 => "t2",
            Self::S0 => "s0",
            Self::S1 => "s1",
            Self::A0 => "a0",
            Self::A1 => "a1",
            Self::A2 => "a2",
            Self::A3 => "a3",
            Self::A4 => "a4",
            Self::A5 => "a5",
            Self::A6 => "a6",
            Self::A7 => "a7",
            Self::S2 => "s2",
            Self::S3 => "s3",
            Self::S4 => "s4",
            Self::S5 => "s5",
            Self::S6 => "s6",
            Self::S7 => "s7",
            Self::S8 => "s8",
            Self::S9 => "s9",
            Self::S10 => "s10",
            Self::S11 => "s11",
            Self::T3 => "t3",
            Self::T4 => "t4",
            Self::T5 => "t5",
            Self::T6 => "t6",
        }
    }
}

/// Instruction encoding format.
///
/// The `C*` variants are the compressed (16-bit) formats; `Sh` is the
/// shift-immediate subset of I, `Csh` the compressed shift/andi subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
    Sh,
    System,
    Cr,
    Ci,
    Css,
    Ciw,
    Cl,
    Cs,
    Ca,
    Cb,
    Cj,
    Csh,
    Csys,
    Unknown,
}

/// Decoded operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Ecall,
    Ebreak,
    Nop,
    CAddi4spn,
    CLw,
    CSw,
    CNop,
    CAddi,
    CJal,
    CLi,
    CAddi16sp,
    CLui,
    CSrli,
    CSrai,
    CAndi,
    CSub,
    CXor,
    COr,
    CAnd,
    CJ,
    CBeqz,
    CBnez,
    CSlli,
    CLwsp,
    CJr,
    CMv,
    CEbreak,
    CJalr,
    CAdd,
    CSwsp,
    Unknown,
}

impl Op {
    /// Lower-case assembly mnemonic (`c.` prefix for compressed ops).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lui => "lui",
            Self::Auipc => "auipc",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Xori => "xori",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Mul => "mul",
            Self::Mulh => "mulh",
            Self::Mulhsu => "mulhsu",
            Self::Mulhu => "mulhu",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Rem => "rem",
            Self::Remu => "remu",
            Self::Ecall => "ecall",
            Self::Ebreak => "ebreak",
            Self::Nop => "nop",
            Self::CAddi4spn => "c.addi4spn",
            Self::CLw => "c.lw",
            Self::CSw => "c.sw",
            Self::CNop => "c.nop",
            Self::CAddi => "c.addi",
            Self::CJal => "c.jal",
            Self::CLi => "c.li",
            Self::CAddi16sp => "c.addi16sp",
            Self::CLui => "c.lui",
            Self::CSrli => "c.srli",
            Self::CSrai => "c.srai",
            Self::CAndi => "c.andi",
            Self::CSub => "c.sub",
            Self::CXor => "c.xor",
            Self::COr => "c.or",
            Self::CAnd => "c.and",
            Self::CJ => "c.j",
            Self::CBeqz => "c.beqz",
            Self::CBnez => "c.bnez",
            Self::CSlli => "c.slli",
            Self::CLwsp => "c.lwsp",
            Self::CJr => "c.jr",
            Self::CMv => "c.mv",
            Self::CEbreak => "c.ebreak",
            Self::CJalr => "c.jalr",
            Self::CAdd => "c.add",
            Self::CSwsp => "c.swsp",
            Self::Unknown => "unknown_command",
        }
    }

    /// True for control-flow ops whose target is `pc + imm` and therefore
    /// resolvable to a label at disassembly time. Register-indirect jumps
    /// (`jalr`, `c.jr`, `c.jalr`) are excluded.
    #[must_use]
    pub const fn is_pc_relative_jump(self) -> bool {
        matches!(
            self,
            Self::Jal
                | Self::CJal
                | Self::CJ
                | Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bge
                | Self::Bltu
                | Self::Bgeu
                | Self::CBeqz
                | Self::CBnez
        )
    }
}

/// Decoded instruction.
///
/// Immutable value record produced once by the decoder; unused register
/// slots hold `Register::Zero`.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Encoding format.
    pub format: Format,
    /// Decoded operation.
    pub op: Op,
    /// Raw encoded word (zero-extended for compressed).
    pub word: u32,
    /// Decoded immediate, sign-extended where the format requires it.
    pub imm: i32,
    /// First source register.
    pub rs1: Register,
    /// Second source register.
    pub rs2: Register,
    /// Destination register.
    pub rd: Register,
    /// Size in bytes (2 for compressed, 4 otherwise).
    pub size: u8,
    /// Precomputed lower-case mnemonic.
    pub mnemonic: &'static str,
}

impl Instruction {
    #[must_use]
    pub const fn new(
        format: Format,
        op: Op,
        word: u32,
        imm: i32,
        rs1: Register,
        rs2: Register,
        rd: Register,
        size: u8,
    ) -> Self {
        Self {
            format,
            op,
            word,
            imm,
            rs1,
            rs2,
            rd,
            size,
            mnemonic: op.mnemonic(),
        }
    }

    /// Placeholder for an unrecognized encoding (quiet decode mode).
    #[must_use]
    pub const fn unknown(word: u32, size: u8) -> Self {
        Self::new(
            Format::Unknown,
            Op::Unknown,
            word,
            0,
            Register::Zero,
            Register::Zero,
            Register::Zero,
            size,
        )
    }
}
