//! Instruction rendering and label resolution.
//!
//! Two passes over the decoded sequence: the first discovers branch/jump
//! targets and hands out synthetic `LOC_xxxxx` labels in discovery order,
//! the second renders each instruction with labels substituted for raw
//! targets.

use rustc_hash::FxHashMap;

use rvd_isa::{Format, Instruction, Op};

use crate::{Error, Result};

/// Address-to-label mapping (function symbols plus synthetic labels).
pub type LabelMap = FxHashMap<u32, String>;

/// Discover branch/jump target labels.
///
/// `function_labels` seeds the map with FUNC-symbol names keyed by value.
/// Targets without a known label get `LOC_` + a 5-digit hex sequence
/// number; the counter is threaded through this single forward pass, so
/// label assignment depends only on discovery order and is stable.
#[must_use]
pub fn discover_labels(
    instructions: &[Instruction],
    load_address: u32,
    function_labels: &LabelMap,
) -> LabelMap {
    let mut labels = function_labels.clone();
    let mut counter = 0u32;
    let mut address = load_address;
    for instr in instructions {
        if instr.op.is_pc_relative_jump() {
            let target = address.wrapping_add(instr.imm as u32);
            labels.entry(target).or_insert_with(|| {
                let label = format!("LOC_{counter:05x}");
                counter += 1;
                label
            });
        }
        address = address.wrapping_add(u32::from(instr.size));
    }
    labels
}

/// How an operation's operands print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    /// Mnemonic alone (nop, placeholder).
    Bare,
    /// Mnemonic alone, padded to the operand column (system ops).
    BareWide,
    /// `rd, rs1, rs2`
    RdRs1Rs2,
    /// `rd, rs1, imm`
    RdRs1Imm,
    /// `rd, imm`
    RdImm,
    /// `rd, imm(rs1)` / `rd, imm(sp)`
    Load { sp: bool },
    /// `rs2, imm(rs1)` / `rs2, imm(sp)`
    Store { sp: bool },
    /// `rd, label`
    JumpRd,
    /// `label`
    Jump,
    /// `rs1` (register-indirect, no label)
    JumpReg,
    /// `rs1, rs2, label`
    Branch,
    /// `rs1, label`
    BranchZero,
    /// `rd, rs2`
    Move,
    /// `rs1, rs2`
    Rs1Rs2,
}

/// Resolve the print shape for a (format, op) pairing.
///
/// Every pairing the decoder can emit maps to exactly one shape; anything
/// else is an internal table mismatch, not malformed input.
fn shape(instr: &Instruction) -> Result<Shape> {
    use Format as F;
    use Op as O;

    let shape = match (instr.format, instr.op) {
        (F::Unknown, _) | (_, O::Unknown) => Shape::Bare,
        (F::I, O::Nop) | (F::Ci, O::CNop) => Shape::Bare,
        (F::System, O::Ecall | O::Ebreak) | (F::Csys, O::CEbreak) => Shape::BareWide,
        (F::I, O::Lb | O::Lh | O::Lw | O::Lbu | O::Lhu | O::Jalr) | (F::Cl, O::CLw) => {
            Shape::Load { sp: false }
        }
        (F::Ci, O::CLwsp) => Shape::Load { sp: true },
        (F::S, O::Sb | O::Sh | O::Sw) | (F::Cs, O::CSw) => Shape::Store { sp: false },
        (F::Css, O::CSwsp) => Shape::Store { sp: true },
        (F::J, O::Jal) => Shape::JumpRd,
        (F::Cj, O::CJal | O::CJ) => Shape::Jump,
        (F::Cr, O::CJr | O::CJalr) => Shape::JumpReg,
        (F::B, O::Beq | O::Bne | O::Blt | O::Bge | O::Bltu | O::Bgeu) => Shape::Branch,
        (F::Cb, O::CBeqz | O::CBnez) => Shape::BranchZero,
        (F::Cr, O::CMv) => Shape::Move,
        (F::R, _) => Shape::RdRs1Rs2,
        (F::I | F::Sh | F::Csh | F::Ciw, _) => Shape::RdRs1Imm,
        (F::U, _) | (F::Ci, O::CLi | O::CLui | O::CAddi16sp) => Shape::RdImm,
        (F::Ci, O::CAddi) => Shape::RdRs1Imm,
        (F::Cr | F::Ca, _) => Shape::Rs1Rs2,
        (format, op) => return Err(Error::UnmappedShape { format, op }),
    };
    Ok(shape)
}

fn label_text(labels: &LabelMap, target: u32) -> String {
    labels
        .get(&target)
        .map_or_else(|| format!("{target:#x}"), Clone::clone)
}

/// Render one instruction (no address column, no trailing newline).
pub fn render_instruction(
    instr: &Instruction,
    address: u32,
    labels: &LabelMap,
) -> Result<String> {
    let m = instr.mnemonic;
    let imm = instr.imm;
    let rd = instr.rd.name();
    let rs1 = instr.rs1.name();
    let rs2 = instr.rs2.name();
    let target = address.wrapping_add(imm as u32);

    let text = match shape(instr)? {
        Shape::Bare => m.to_string(),
        Shape::BareWide => format!("{m:<6}"),
        Shape::RdRs1Rs2 => format!("{m:<6} {rd}, {rs1}, {rs2}"),
        Shape::RdRs1Imm => format!("{m:<6} {rd}, {rs1}, {imm}"),
        Shape::RdImm => format!("{m:<6} {rd}, {imm}"),
        Shape::Load { sp } => {
            let base = if sp { "sp" } else { rs1 };
            format!("{m:<6} {rd}, {imm}({base})")
        }
        Shape::Store { sp } => {
            let base = if sp { "sp" } else { rs1 };
            format!("{m:<6} {rs2}, {imm}({base})")
        }
        Shape::JumpRd => format!("{m:<6} {rd}, {}", label_text(labels, target)),
        Shape::Jump => format!("{m:<6} {}", label_text(labels, target)),
        Shape::JumpReg => format!("{m:<6} {rs1}"),
        Shape::Branch => format!("{m:<6} {rs1}, {rs2}, {}", label_text(labels, target)),
        Shape::BranchZero => format!("{m:<6} {rs1}, {}", label_text(labels, target)),
        Shape::Move => format!("{m:<6} {rd}, {rs2}"),
        Shape::Rs1Rs2 => format!("{m:<6} {rs1}, {rs2}"),
    };
    Ok(text)
}
