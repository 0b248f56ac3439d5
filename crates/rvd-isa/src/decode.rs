//! RV32I/M/C instruction decoder.
//!
//! The stream decoder reads one 16-bit half-word at a time: low bits `11`
//! mark the low half of a 32-bit instruction, anything else is a complete
//! compressed instruction. The decoder itself is stateless per instruction;
//! addresses only feed error reporting and the caller's label math.

use crate::encode::{
    decode_b_imm, decode_funct3, decode_funct7, decode_i_imm, decode_j_imm, decode_opcode,
    decode_rd, decode_rs1, decode_rs2, decode_s_imm, decode_sh_imm, decode_system_imm,
    decode_u_imm, sign_extend,
};
use crate::{DecodeError, Format, Instruction, Op, Register, Result};

/// Disassemble a code section into an instruction sequence.
///
/// `load_address` is the virtual address of `bytes[0]`; it is only used to
/// report fault positions. In quiet mode unrecognized encodings degrade to
/// placeholder instructions, in strict mode they are fatal. A truncated
/// tail is fatal in both modes.
pub fn disassemble(bytes: &[u8], load_address: u32, quiet: bool) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();
    let mut pos = 0usize;

    while pos < bytes.len() {
        let address = load_address.wrapping_add(pos as u32);
        let half = take_half(bytes, &mut pos, address)?;
        let instr = if half & 0x3 == 0x3 {
            let high = take_half(bytes, &mut pos, address)?;
            let word = u32::from(half) | (u32::from(high) << 16);
            decode_rv32(word, address, quiet)?
        } else {
            decode_rvc(half, address, quiet)?
        };
        instructions.push(instr);
    }

    Ok(instructions)
}

fn take_half(bytes: &[u8], pos: &mut usize, address: u32) -> Result<u16> {
    if *pos + 2 > bytes.len() {
        return Err(DecodeError::Truncated { address });
    }
    let half = u16::from_le_bytes([bytes[*pos], bytes[*pos + 1]]);
    *pos += 2;
    Ok(half)
}

/// Decode a 32-bit instruction.
pub fn decode_rv32(word: u32, address: u32, quiet: bool) -> Result<Instruction> {
    let rd = Register::from_index(decode_rd(word));
    let rs1 = Register::from_index(decode_rs1(word));
    let rs2 = Register::from_index(decode_rs2(word));
    let funct3 = decode_funct3(word);
    let funct7 = decode_funct7(word);
    let zero = Register::Zero;

    let instr = match decode_opcode(word) {
        0x37 => Instruction::new(Format::U, Op::Lui, word, decode_u_imm(word), zero, zero, rd, 4),
        0x17 => {
            Instruction::new(Format::U, Op::Auipc, word, decode_u_imm(word), zero, zero, rd, 4)
        }
        0x6f => Instruction::new(Format::J, Op::Jal, word, decode_j_imm(word), zero, zero, rd, 4),
        0x67 => {
            Instruction::new(Format::I, Op::Jalr, word, decode_i_imm(word), rs1, zero, rd, 4)
        }
        0x63 => {
            let op = match funct3 {
                0x0 => Op::Beq,
                0x1 => Op::Bne,
                0x4 => Op::Blt,
                0x5 => Op::Bge,
                0x6 => Op::Bltu,
                0x7 => Op::Bgeu,
                _ => return unknown(word, 4, address, quiet),
            };
            Instruction::new(Format::B, op, word, decode_b_imm(word), rs1, rs2, zero, 4)
        }
        0x03 => {
            let op = match funct3 {
                0x0 => Op::Lb,
                0x1 => Op::Lh,
                0x2 => Op::Lw,
                0x4 => Op::Lbu,
                0x5 => Op::Lhu,
                _ => return unknown(word, 4, address, quiet),
            };
            Instruction::new(Format::I, op, word, decode_i_imm(word), rs1, zero, rd, 4)
        }
        0x23 => {
            let op = match funct3 {
                0x0 => Op::Sb,
                0x1 => Op::Sh,
                0x2 => Op::Sw,
                _ => return unknown(word, 4, address, quiet),
            };
            Instruction::new(Format::S, op, word, decode_s_imm(word), rs1, rs2, zero, 4)
        }
        0x13 => match funct3 {
            0x1 | 0x5 => {
                let op = match funct3 {
                    0x1 => Op::Slli,
                    _ => match funct7 {
                        0x00 => Op::Srli,
                        0x20 => Op::Srai,
                        _ => return unknown(word, 4, address, quiet),
                    },
                };
                Instruction::new(Format::Sh, op, word, decode_sh_imm(word), rs1, zero, rd, 4)
            }
            _ => {
                let imm = decode_i_imm(word);
                let op = match funct3 {
                    // ADDI x0, x0, 0 is the canonical NOP
                    0x0 if imm == 0 && rs1 == zero && rd == zero => Op::Nop,
                    0x0 => Op::Addi,
                    0x2 => Op::Slti,
                    0x3 => Op::Sltiu,
                    0x4 => Op::Xori,
                    0x6 => Op::Ori,
                    0x7 => Op::Andi,
                    _ => return unknown(word, 4, address, quiet),
                };
                Instruction::new(Format::I, op, word, imm, rs1, zero, rd, 4)
            }
        },
        0x33 => {
            let op = match (funct7, funct3) {
                (0x00, 0x0) => Op::Add,
                (0x20, 0x0) => Op::Sub,
                (0x00, 0x1) => Op::Sll,
                (0x00, 0x2) => Op::Slt,
                (0x00, 0x3) => Op::Sltu,
                (0x00, 0x4) => Op::Xor,
                (0x00, 0x5) => Op::Srl,
                (0x20, 0x5) => Op::Sra,
                (0x00, 0x6) => Op::Or,
                (0x00, 0x7) => Op::And,
                // M extension is gated by funct7 == 1
                (0x01, 0x0) => Op::Mul,
                (0x01, 0x1) => Op::Mulh,
                (0x01, 0x2) => Op::Mulhsu,
                (0x01, 0x3) => Op::Mulhu,
                (0x01, 0x4) => Op::Div,
                (0x01, 0x5) => Op::Divu,
                (0x01, 0x6) => Op::Rem,
                (0x01, 0x7) => Op::Remu,
                _ => return unknown(word, 4, address, quiet),
            };
            Instruction::new(Format::R, op, word, 0, rs1, rs2, rd, 4)
        }
        0x73 => {
            let op = match (word >> 20) & 0xfff {
                0x0 => Op::Ecall,
                0x1 => Op::Ebreak,
                _ => return unknown(word, 4, address, quiet),
            };
            Instruction::new(
                Format::System,
                op,
                word,
                decode_system_imm(word),
                zero,
                zero,
                zero,
                4,
            )
        }
        _ => return unknown(word, 4, address, quiet),
    };

    Ok(instr)
}

/// Decode a 16-bit compressed instruction.
pub fn decode_rvc(half: u16, address: u32, quiet: bool) -> Result<Instruction> {
    let funct3 = ((half >> 13) & 0x7) as u8;
    match half & 0x3 {
        0b00 => decode_rvc_q0(half, funct3, address, quiet),
        0b01 => decode_rvc_q1(half, funct3, address, quiet),
        0b10 => decode_rvc_q2(half, funct3, address, quiet),
        _ => unknown(u32::from(half), 2, address, quiet),
    }
}

/// Quadrant 0: stack-pointer immediates and register-relative load/store.
fn decode_rvc_q0(half: u16, funct3: u8, address: u32, quiet: bool) -> Result<Instruction> {
    let word = u32::from(half);
    let zero = Register::Zero;
    match funct3 {
        0x0 => {
            // All-zero half-word is the defined illegal instruction
            if half == 0 {
                return unknown(word, 2, address, quiet);
            }
            Ok(Instruction::new(
                Format::Ciw,
                Op::CAddi4spn,
                word,
                decode_ciw_imm(half),
                Register::Sp,
                zero,
                c_reg(half >> 2),
                2,
            ))
        }
        0x2 => Ok(Instruction::new(
            Format::Cl,
            Op::CLw,
            word,
            decode_cls_imm(half),
            c_reg(half >> 7),
            zero,
            c_reg(half >> 2),
            2,
        )),
        0x6 => Ok(Instruction::new(
            Format::Cs,
            Op::CSw,
            word,
            decode_cls_imm(half),
            c_reg(half >> 7),
            c_reg(half >> 2),
            zero,
            2,
        )),
        _ => unknown(word, 2, address, quiet),
    }
}

/// Quadrant 1: immediates, control flow, and the misc-ALU group.
fn decode_rvc_q1(half: u16, funct3: u8, address: u32, quiet: bool) -> Result<Instruction> {
    let word = u32::from(half);
    let zero = Register::Zero;
    let full_rd = Register::from_index(((half >> 7) & 0x1f) as u8);
    match funct3 {
        0x0 => {
            let imm = decode_ci_imm(half);
            if imm == 0 {
                Ok(Instruction::new(Format::Ci, Op::CNop, word, 0, zero, zero, zero, 2))
            } else {
                Ok(Instruction::new(Format::Ci, Op::CAddi, word, imm, full_rd, zero, full_rd, 2))
            }
        }
        0x1 => Ok(Instruction::new(
            Format::Cj,
            Op::CJal,
            word,
            decode_cj_imm(half),
            zero,
            zero,
            zero,
            2,
        )),
        0x2 => Ok(Instruction::new(
            Format::Ci,
            Op::CLi,
            word,
            decode_ci_imm(half),
            zero,
            zero,
            full_rd,
            2,
        )),
        0x3 => {
            // rd = sp selects ADDI16SP, everything else is LUI
            if (half >> 7) & 0x1f == 0x2 {
                Ok(Instruction::new(
                    Format::Ci,
                    Op::CAddi16sp,
                    word,
                    decode_ci16sp_imm(half),
                    zero,
                    zero,
                    full_rd,
                    2,
                ))
            } else {
                Ok(Instruction::new(
                    Format::Ci,
                    Op::CLui,
                    word,
                    decode_ci_lui_imm(half),
                    zero,
                    zero,
                    full_rd,
                    2,
                ))
            }
        }
        0x4 => decode_rvc_misc_alu(half, address, quiet),
        0x5 => Ok(Instruction::new(
            Format::Cj,
            Op::CJ,
            word,
            decode_cj_imm(half),
            zero,
            zero,
            zero,
            2,
        )),
        0x6 | 0x7 => {
            let op = if funct3 == 0x6 { Op::CBeqz } else { Op::CBnez };
            Ok(Instruction::new(
                Format::Cb,
                op,
                word,
                decode_cb_imm(half),
                c_reg(half >> 7),
                zero,
                zero,
                2,
            ))
        }
        _ => unknown(word, 2, address, quiet),
    }
}

/// Quadrant 1 misc-ALU group (shifts, andi, register-register ops).
fn decode_rvc_misc_alu(half: u16, address: u32, quiet: bool) -> Result<Instruction> {
    let word = u32::from(half);
    let zero = Register::Zero;
    let rd = c_reg(half >> 7);
    match (half >> 10) & 0x3 {
        0x0 | 0x1 | 0x2 => {
            let op = match (half >> 10) & 0x3 {
                0x0 => Op::CSrli,
                0x1 => Op::CSrai,
                _ => Op::CAndi,
            };
            Ok(Instruction::new(Format::Csh, op, word, decode_csh_imm(half), rd, zero, rd, 2))
        }
        _ => {
            if (half >> 12) & 0x1 != 0 {
                return unknown(word, 2, address, quiet);
            }
            let op = match (half >> 5) & 0x3 {
                0x0 => Op::CSub,
                0x1 => Op::CXor,
                0x2 => Op::COr,
                _ => Op::CAnd,
            };
            Ok(Instruction::new(Format::Ca, op, word, 0, rd, c_reg(half >> 2), rd, 2))
        }
    }
}

/// Quadrant 2: full-register forms and stack-pointer load/store.
fn decode_rvc_q2(half: u16, funct3: u8, address: u32, quiet: bool) -> Result<Instruction> {
    let word = u32::from(half);
    let zero = Register::Zero;
    let full_rd = Register::from_index(((half >> 7) & 0x1f) as u8);
    let full_rs2 = Register::from_index(((half >> 2) & 0x1f) as u8);
    match funct3 {
        0x0 => Ok(Instruction::new(
            Format::Csh,
            Op::CSlli,
            word,
            decode_csh_imm(half),
            full_rd,
            zero,
            full_rd,
            2,
        )),
        0x2 => Ok(Instruction::new(
            Format::Ci,
            Op::CLwsp,
            word,
            decode_ci_lwsp_imm(half),
            zero,
            zero,
            full_rd,
            2,
        )),
        0x4 => {
            if (half >> 12) & 0x1 == 0 {
                if (half >> 2) & 0x1f == 0 {
                    Ok(Instruction::new(Format::Cr, Op::CJr, word, 0, full_rd, zero, zero, 2))
                } else {
                    Ok(Instruction::new(Format::Cr, Op::CMv, word, 0, zero, full_rs2, full_rd, 2))
                }
            } else if (half >> 7) & 0x1f == 0 {
                Ok(Instruction::new(Format::Csys, Op::CEbreak, word, 0, zero, zero, zero, 2))
            } else if (half >> 2) & 0x1f == 0 {
                Ok(Instruction::new(Format::Cr, Op::CJalr, word, 0, full_rd, zero, zero, 2))
            } else {
                Ok(Instruction::new(Format::Cr, Op::CAdd, word, 0, full_rd, full_rs2, full_rd, 2))
            }
        }
        0x6 => Ok(Instruction::new(
            Format::Css,
            Op::CSwsp,
            word,
            decode_css_imm(half),
            zero,
            full_rs2,
            zero,
            2,
        )),
        _ => unknown(word, 2, address, quiet),
    }
}

fn unknown(word: u32, size: u8, address: u32, quiet: bool) -> Result<Instruction> {
    if quiet {
        Ok(Instruction::unknown(word, size))
    } else {
        Err(DecodeError::UnknownOpcode { address, word })
    }
}

/// Compressed register field: 3 bits biased by 8 (x8-x15).
#[inline]
fn c_reg(field: u16) -> Register {
    Register::from_index(0x8 | (field & 0x7) as u8)
}

// Compressed immediate layouts, bit-for-bit per format.

/// CI immediate for c.li/c.addi/c.nop: imm[5] at bit 12, imm[4:0] at bits 6:2,
/// sign-extended from bit 5.
#[inline]
fn decode_ci_imm(half: u16) -> i32 {
    let w = i32::from(half);
    sign_extend(((w >> 2) & 0x1f) | (((w >> 12) & 0x1) << 5), 5)
}

/// c.lwsp offset: uimm[5] at bit 12, uimm[4:2] at bits 6:4, uimm[7:6] at bits 3:2.
#[inline]
fn decode_ci_lwsp_imm(half: u16) -> i32 {
    let w = i32::from(half);
    (((w >> 12) & 0x1) << 5) | (((w >> 4) & 0x7) << 2) | (((w >> 2) & 0x3) << 6)
}

/// c.lui immediate: sign-extend imm[17:12] from bit 17, then drop the low 12
/// bits with a logical shift so the printed value matches the raw U field.
#[inline]
fn decode_ci_lui_imm(half: u16) -> i32 {
    let w = i32::from(half);
    let imm = sign_extend((((w >> 12) & 0x1) << 17) | (((w >> 2) & 0x1f) << 12), 17);
    ((imm as u32) >> 12) as i32
}

/// c.addi16sp immediate: nzimm[9|4|6|8:7|5], sign-extended from bit 9.
#[inline]
fn decode_ci16sp_imm(half: u16) -> i32 {
    let w = i32::from(half);
    sign_extend(
        (((w >> 12) & 0x1) << 9)
            | (((w >> 2) & 0x1) << 5)
            | (((w >> 3) & 0x3) << 7)
            | (((w >> 5) & 0x1) << 6)
            | (((w >> 6) & 0x1) << 4),
        9,
    )
}

/// CSS (c.swsp) offset: uimm[5:2] at bits 12:9, uimm[7:6] at bits 8:7.
#[inline]
fn decode_css_imm(half: u16) -> i32 {
    let w = i32::from(half);
    (((w >> 7) & 0x3) << 6) | (((w >> 9) & 0xf) << 2)
}

/// CL/CS (c.lw/c.sw) offset: uimm[5:3] at bits 12:10, uimm[2] at bit 6,
/// uimm[6] at bit 5.
#[inline]
fn decode_cls_imm(half: u16) -> i32 {
    let w = i32::from(half);
    (((w >> 10) & 0x7) << 3) | (((w >> 5) & 0x1) << 6) | (((w >> 6) & 0x1) << 2)
}

/// CJ offset: imm[11|4|9:8|10|6|7|3:1|5], sign-extended from bit 11.
#[inline]
fn decode_cj_imm(half: u16) -> i32 {
    let w = i32::from(half);
    sign_extend(
        (((w >> 2) & 0x1) << 5)
            | (((w >> 3) & 0x7) << 1)
            | (((w >> 6) & 0x1) << 7)
            | (((w >> 7) & 0x1) << 6)
            | (((w >> 8) & 0x1) << 10)
            | (((w >> 9) & 0x3) << 8)
            | (((w >> 11) & 0x1) << 4)
            | (((w >> 12) & 0x1) << 11),
        11,
    )
}

/// CB offset: imm[8|4:3|7:6|2:1|5], sign-extended from bit 8.
#[inline]
fn decode_cb_imm(half: u16) -> i32 {
    let w = i32::from(half);
    sign_extend(
        (((w >> 10) & 0x3) << 3)
            | (((w >> 2) & 0x1) << 5)
            | (((w >> 3) & 0x3) << 1)
            | (((w >> 5) & 0x3) << 6)
            | (((w >> 12) & 0x1) << 8),
        8,
    )
}

/// CSH shift/andi immediate: imm[5] at bit 12, imm[4:0] at bits 6:2,
/// sign-extended from bit 5.
#[inline]
fn decode_csh_imm(half: u16) -> i32 {
    let w = i32::from(half);
    sign_extend((((w >> 12) & 0x1) << 5) | ((w >> 2) & 0x1f), 5)
}

/// CIW (c.addi4spn) immediate: uimm[5:4|9:6|2|3].
#[inline]
fn decode_ciw_imm(half: u16) -> i32 {
    let w = i32::from(half);
    (((w >> 5) & 0x1) << 3)
        | (((w >> 6) & 0x1) << 2)
        | (((w >> 7) & 0xf) << 6)
        | (((w >> 11) & 0x3) << 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_addi() {
        // ADDI x1, x0, 1 (0x00100093)
        let instr = decode_rv32(0x0010_0093, 0, false).unwrap();
        assert_eq!(instr.op, Op::Addi);
        assert_eq!(instr.format, Format::I);
        assert_eq!(instr.rd, Register::Ra);
        assert_eq!(instr.rs1, Register::Zero);
        assert_eq!(instr.imm, 1);
        assert_eq!(instr.size, 4);
    }

    #[test]
    fn test_decode_nop() {
        // ADDI x0, x0, 0 (0x00000013)
        let instr = decode_rv32(0x0000_0013, 0, false).unwrap();
        assert_eq!(instr.op, Op::Nop);
        assert_eq!(instr.mnemonic, "nop");
    }

    #[test]
    fn test_decode_add_roundtrip() {
        // R-type word with known fields: ADD x1, x2, x3 (0x003100b3)
        let instr = decode_rv32(0x0031_00b3, 0, false).unwrap();
        assert_eq!(instr.op, Op::Add);
        assert_eq!(instr.rd, Register::Ra);
        assert_eq!(instr.rs1, Register::Sp);
        assert_eq!(instr.rs2, Register::Gp);
        assert_eq!(instr.imm, 0);
    }

    #[test]
    fn test_decode_sub_vs_add() {
        // SUB x1, x2, x3 (funct7 = 0x20)
        let instr = decode_rv32(0x4031_00b3, 0, false).unwrap();
        assert_eq!(instr.op, Op::Sub);
    }

    #[test]
    fn test_decode_mul() {
        // MUL x5, x6, x7 (funct7 = 0x01)
        let instr = decode_rv32(0x0273_02b3, 0, false).unwrap();
        assert_eq!(instr.op, Op::Mul);
        assert_eq!(instr.rd, Register::T0);
        assert_eq!(instr.rs1, Register::T1);
        assert_eq!(instr.rs2, Register::T2);
    }

    #[test]
    fn test_decode_srai_shamt() {
        // SRAI x1, x1, 3 (0x4030d093)
        let instr = decode_rv32(0x4030_d093, 0, false).unwrap();
        assert_eq!(instr.op, Op::Srai);
        assert_eq!(instr.format, Format::Sh);
        assert_eq!(instr.imm, 3);
    }

    #[test]
    fn test_decode_ecall_ebreak() {
        assert_eq!(decode_rv32(0x0000_0073, 0, false).unwrap().op, Op::Ecall);
        assert_eq!(decode_rv32(0x0010_0073, 0, false).unwrap().op, Op::Ebreak);
    }

    #[test]
    fn test_decode_c_nop() {
        // C.NOP (0x0001)
        let instr = decode_rvc(0x0001, 0, false).unwrap();
        assert_eq!(instr.op, Op::CNop);
        assert_eq!(instr.size, 2);
        assert_eq!(instr.mnemonic, "c.nop");
    }

    #[test]
    fn test_decode_c_addi() {
        // C.ADDI x10, 1 (0x0505)
        let instr = decode_rvc(0x0505, 0, false).unwrap();
        assert_eq!(instr.op, Op::CAddi);
        assert_eq!(instr.rd, Register::A0);
        assert_eq!(instr.rs1, Register::A0);
        assert_eq!(instr.imm, 1);
    }

    #[test]
    fn test_decode_c_li_negative() {
        // C.LI x10, -1: 010 1 01010 11111 01 = 0x557d
        let instr = decode_rvc(0x557d, 0, false).unwrap();
        assert_eq!(instr.op, Op::CLi);
        assert_eq!(instr.rd, Register::A0);
        assert_eq!(instr.imm, -1);
    }

    #[test]
    fn test_decode_c_lui_field() {
        // C.LUI x10, 0x1f: 011 0 01010 11111 01 = 0x657d
        let instr = decode_rvc(0x657d, 0, false).unwrap();
        assert_eq!(instr.op, Op::CLui);
        assert_eq!(instr.imm, 0x1f);
    }

    #[test]
    fn test_decode_c_lui_negative_field() {
        // C.LUI x10, imm with bit 17 set: sign bits survive the final
        // logical shift as 0xfffff - style upper-field values.
        // 011 1 01010 11111 01 = 0x757d
        let instr = decode_rvc(0x757d, 0, false).unwrap();
        assert_eq!(instr.op, Op::CLui);
        assert_eq!(instr.imm, 0xf_ffff);
    }

    #[test]
    fn test_decode_c_addi16sp() {
        // rd = sp selects ADDI16SP: 011 0 00010 00001 01 -> nzimm = 32
        let instr = decode_rvc(0x6105, 0, false).unwrap();
        assert_eq!(instr.op, Op::CAddi16sp);
        assert_eq!(instr.rd, Register::Sp);
        assert_eq!(instr.imm, 32);
    }

    #[test]
    fn test_decode_c_addi4spn() {
        // C.ADDI4SPN x8, sp, 4: 000 00000100 000 00 = 0x0040
        let instr = decode_rvc(0x0040, 0, false).unwrap();
        assert_eq!(instr.op, Op::CAddi4spn);
        assert_eq!(instr.rd, Register::S0);
        assert_eq!(instr.rs1, Register::Sp);
        assert_eq!(instr.imm, 4);
    }

    #[test]
    fn test_decode_c_lw_sw_offsets() {
        // C.LW x9, 4(x8): 010 000 000 1 0 001 00 = 0x4044
        let lw = decode_rvc(0x4044, 0, false).unwrap();
        assert_eq!(lw.op, Op::CLw);
        assert_eq!(lw.rd, Register::S1);
        assert_eq!(lw.rs1, Register::S0);
        assert_eq!(lw.imm, 4);

        // C.SW x9, 4(x8): 110 000 000 1 0 001 00 = 0xc044
        let sw = decode_rvc(0xc044, 0, false).unwrap();
        assert_eq!(sw.op, Op::CSw);
        assert_eq!(sw.rs2, Register::S1);
        assert_eq!(sw.rs1, Register::S0);
        assert_eq!(sw.imm, 4);
    }

    #[test]
    fn test_decode_c_mv_add_jr() {
        // C.MV x10, x11: 100 0 01010 01011 10 = 0x852e
        let mv = decode_rvc(0x852e, 0, false).unwrap();
        assert_eq!(mv.op, Op::CMv);
        assert_eq!(mv.rd, Register::A0);
        assert_eq!(mv.rs2, Register::A1);

        // C.ADD x10, x11: 100 1 01010 01011 10 = 0x952e
        let add = decode_rvc(0x952e, 0, false).unwrap();
        assert_eq!(add.op, Op::CAdd);
        assert_eq!(add.rs1, Register::A0);
        assert_eq!(add.rs2, Register::A1);

        // C.JR x1: 100 0 00001 00000 10 = 0x8082
        let jr = decode_rvc(0x8082, 0, false).unwrap();
        assert_eq!(jr.op, Op::CJr);
        assert_eq!(jr.rs1, Register::Ra);

        // C.EBREAK: 100 1 00000 00000 10 = 0x9002
        let eb = decode_rvc(0x9002, 0, false).unwrap();
        assert_eq!(eb.op, Op::CEbreak);
    }

    #[test]
    fn test_decode_c_j_backward() {
        // C.J -2: 101 11111111111 01... imm = -2
        // imm bits: [11]=1 [4]=1 [9:8]=11 [10]=1 [6]=1 [7]=1 [3:1]=111 [5]=1
        let instr = decode_rvc(0xbffd, 0, false).unwrap();
        assert_eq!(instr.op, Op::CJ);
        assert_eq!(instr.imm, -2);
    }

    #[test]
    fn test_decode_c_beqz() {
        // C.BEQZ x8, +4: 110 0 00 000 0 10 00 01
        // imm[4:3]=00 (bits 11:10), imm[2:1]=10 (bits 4:3) -> imm = 4
        let instr = decode_rvc(0xc011, 0, false).unwrap();
        assert_eq!(instr.op, Op::CBeqz);
        assert_eq!(instr.rs1, Register::S0);
        assert_eq!(instr.imm, 4);
    }

    #[test]
    fn test_decode_c_lwsp_swsp() {
        // C.LWSP x10, 8(sp): 010 0 01010 010 00 10 = 0x4522 -> uimm = 8
        let lwsp = decode_rvc(0x4522, 0, false).unwrap();
        assert_eq!(lwsp.op, Op::CLwsp);
        assert_eq!(lwsp.rd, Register::A0);
        assert_eq!(lwsp.imm, 8);

        // C.SWSP x10, 8(sp): 110 000100 01010 10 = 0xc42a
        let swsp = decode_rvc(0xc42a, 0, false).unwrap();
        assert_eq!(swsp.op, Op::CSwsp);
        assert_eq!(swsp.rs2, Register::A0);
        assert_eq!(swsp.imm, 8);
    }

    #[test]
    fn test_unknown_quiet_vs_strict() {
        // Opcode 0x5b is unassigned in RV32I/M
        let word = 0x0000_005b;
        let quiet = decode_rv32(word, 0x100, true).unwrap();
        assert_eq!(quiet.op, Op::Unknown);
        assert_eq!(quiet.format, Format::Unknown);
        assert_eq!(quiet.imm, 0);
        assert_eq!(quiet.rd, Register::Zero);
        assert_eq!(quiet.size, 4);

        let err = decode_rv32(word, 0x100, false).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownOpcode { address: 0x100, word: 0x0000_005b }));
    }

    #[test]
    fn test_disassemble_mixed_sizes() {
        // ADDI x0,x0,0 then C.NOP
        let bytes = [0x13, 0x00, 0x00, 0x00, 0x01, 0x00];
        let instrs = disassemble(&bytes, 0x1000, false).unwrap();
        assert_eq!(instrs.len(), 2);
        assert_eq!(instrs[0].op, Op::Nop);
        assert_eq!(instrs[0].size, 4);
        assert_eq!(instrs[1].op, Op::CNop);
        assert_eq!(instrs[1].size, 2);
    }

    #[test]
    fn test_disassemble_truncated_tail() {
        // 32-bit low half with nothing after it
        let bytes = [0x13, 0x00];
        let err = disassemble(&bytes, 0x2000, true).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { address: 0x2000 }));
    }
}
