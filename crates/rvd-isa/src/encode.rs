//! Bitfield and immediate extraction helpers for 32-bit encodings.

/// Extract opcode field (bits [6:0]).
#[inline]
#[must_use]
pub const fn decode_opcode(word: u32) -> u8 {
    (word & 0x7f) as u8
}

/// Extract funct3 field (bits [14:12]).
#[inline]
#[must_use]
pub const fn decode_funct3(word: u32) -> u8 {
    ((word >> 12) & 0x7) as u8
}

/// Extract funct7 field (bits [31:25]).
#[inline]
#[must_use]
pub const fn decode_funct7(word: u32) -> u8 {
    ((word >> 25) & 0x7f) as u8
}

/// Extract rd field (bits [11:7]).
#[inline]
#[must_use]
pub const fn decode_rd(word: u32) -> u8 {
    ((word >> 7) & 0x1f) as u8
}

/// Extract rs1 field (bits [19:15]).
#[inline]
#[must_use]
pub const fn decode_rs1(word: u32) -> u8 {
    ((word >> 15) & 0x1f) as u8
}

/// Extract rs2 field (bits [24:20]).
#[inline]
#[must_use]
pub const fn decode_rs2(word: u32) -> u8 {
    ((word >> 20) & 0x1f) as u8
}

/// Decode I-type immediate (bits [31:20], arithmetic shift keeps the sign).
#[inline]
#[must_use]
pub const fn decode_i_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// Decode S-type immediate (bits [31:25] | [11:7]).
#[inline]
#[must_use]
pub const fn decode_s_imm(word: u32) -> i32 {
    let low = ((word >> 7) & 0x1f) as i32;
    low | (((word as i32) >> 25) << 5)
}

/// Decode B-type immediate (bits [8:11]->1-4 | [25:30]->5-10 | [7]->11 | [31]->12).
#[inline]
#[must_use]
pub const fn decode_b_imm(word: u32) -> i32 {
    let imm4_1 = ((word >> 8) & 0xf) << 1;
    let imm10_5 = ((word >> 25) & 0x3f) << 5;
    let imm11 = ((word >> 7) & 0x1) << 11;
    let imm = (imm4_1 | imm10_5 | imm11) as i32;
    imm | (((word as i32) >> 31) << 12)
}

/// Decode U-type immediate (bits [31:12], kept unshifted).
#[inline]
#[must_use]
pub const fn decode_u_imm(word: u32) -> i32 {
    ((word >> 12) & 0xfffff) as i32
}

/// Decode J-type immediate (bits [21:30]->1-10 | [20]->11 | [12:19]->12-19 | [31]->20).
#[inline]
#[must_use]
pub const fn decode_j_imm(word: u32) -> i32 {
    let imm10_1 = ((word >> 21) & 0x3ff) << 1;
    let imm11 = ((word >> 20) & 0x1) << 11;
    let imm19_12 = ((word >> 12) & 0xff) << 12;
    let imm = (imm10_1 | imm11 | imm19_12) as i32;
    imm | (((word as i32) >> 31) << 20)
}

/// Decode shift-immediate amount (bits [24:20], unsigned).
#[inline]
#[must_use]
pub const fn decode_sh_imm(word: u32) -> i32 {
    ((word >> 20) & 0x1f) as i32
}

/// Decode the SYSTEM selector bit (bit 20: ECALL=0, EBREAK=1).
#[inline]
#[must_use]
pub const fn decode_system_imm(word: u32) -> i32 {
    ((word >> 20) & 0x1) as i32
}

/// Sign-extend `value` from `sign_pos` (the bit index holding the sign).
#[inline]
#[must_use]
pub const fn sign_extend(value: i32, sign_pos: u32) -> i32 {
    if (value >> sign_pos) & 0x1 == 0x1 {
        value | (!0 ^ ((1 << sign_pos) - 1))
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i_imm_negative() {
        // ADDI x1, x0, -1 (0xfff00093)
        assert_eq!(decode_i_imm(0xfff0_0093), -1);
    }

    #[test]
    fn test_s_imm() {
        // SW x5, -4(x2): imm = -4
        // imm[11:5]=1111111, imm[4:0]=11100
        let word = 0b1111111_00101_00010_010_11100_0100011;
        assert_eq!(decode_s_imm(word), -4);
    }

    #[test]
    fn test_b_imm_forward() {
        // BEQ x0, x0, +8: imm4_1 = 0100
        let word = 0b0000000_00000_00000_000_0100_0_1100011;
        assert_eq!(decode_b_imm(word), 8);
    }

    #[test]
    fn test_b_imm_backward() {
        // Bit 31 set, all other immediate groups set -> -2
        let word = 0b1111111_00000_00000_000_1111_1_1100011;
        assert_eq!(decode_b_imm(word), -2);
    }

    #[test]
    fn test_u_imm_unshifted() {
        // LUI x1, 0xfffff keeps the raw 20-bit field
        assert_eq!(decode_u_imm(0xffff_f0b7), 0xf_ffff);
    }

    #[test]
    fn test_j_imm() {
        // JAL x1, +8: imm10_1 = 0000000100
        let word = 0b0_0000000100_0_00000000_00001_1101111;
        assert_eq!(decode_j_imm(word), 8);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b11_1110, 5), -2);
        assert_eq!(sign_extend(0b01_1110, 5), 30);
    }
}
