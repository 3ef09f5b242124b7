//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the raw 16-bit encoding, the decoded
//! [`Instruction`] type, and packing helpers that build canonical encodings.

use crate::common::Word;
use crate::common::constants::{
    IMM7_MASK, IMM7_SIGN, IMM10_MASK, OPCODE_MASK, OPCODE_SHIFT, REG_A_SHIFT, REG_B_SHIFT,
    REG_C_SHIFT, REG_MASK,
};
use crate::isa::decode::{decode, layout};
use crate::isa::opcodes::{Format, Opcode};

/// Trait for extracting instruction fields from a raw encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 15-13).
    fn opcode_bits(&self) -> u16;

    /// Extracts register field A (bits 12-10).
    fn reg_a(&self) -> usize;

    /// Extracts register field B (bits 9-7).
    fn reg_b(&self) -> usize;

    /// Extracts register field C (bits 2-0).
    fn reg_c(&self) -> usize;

    /// Extracts the 7-bit immediate (bits 6-0) sign-extended to a full word.
    fn imm7(&self) -> Word;

    /// Extracts the 10-bit immediate (bits 9-0) zero-extended to a full word.
    fn imm10(&self) -> Word;
}

impl InstructionBits for Word {
    #[inline(always)]
    fn opcode_bits(&self) -> u16 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn reg_a(&self) -> usize {
        ((self >> REG_A_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn reg_b(&self) -> usize {
        ((self >> REG_B_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn reg_c(&self) -> usize {
        ((self >> REG_C_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm7(&self) -> Word {
        let raw = self & IMM7_MASK;
        if raw & IMM7_SIGN == 0 {
            raw
        } else {
            raw | !IMM7_MASK
        }
    }

    #[inline(always)]
    fn imm10(&self) -> Word {
        self & IMM10_MASK
    }
}

/// Packs a three-register encoding. Bits 6-3 are left zero.
pub const fn pack_rrr(op: Opcode, a: usize, b: usize, c: usize) -> Word {
    (op.bits() << OPCODE_SHIFT)
        | (((a as u16) & REG_MASK) << REG_A_SHIFT)
        | (((b as u16) & REG_MASK) << REG_B_SHIFT)
        | (((c as u16) & REG_MASK) << REG_C_SHIFT)
}

/// Packs a two-register-plus-immediate encoding, keeping the low seven bits of `imm`.
pub const fn pack_rri(op: Opcode, a: usize, b: usize, imm: Word) -> Word {
    (op.bits() << OPCODE_SHIFT)
        | (((a as u16) & REG_MASK) << REG_A_SHIFT)
        | (((b as u16) & REG_MASK) << REG_B_SHIFT)
        | (imm & IMM7_MASK)
}

/// Packs a single-register-plus-immediate encoding, keeping the low ten bits of `imm`.
pub const fn pack_ri(op: Opcode, a: usize, imm: Word) -> Word {
    (op.bits() << OPCODE_SHIFT) | (((a as u16) & REG_MASK) << REG_A_SHIFT) | (imm & IMM10_MASK)
}

/// A decoded instruction.
///
/// Absent register operands are reported as `r0`, which always reads zero, so
/// hazard logic can compare register indices without consulting the format.
/// Stores and branches have target `r0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Register written (link register for `jalr`).
    pub target: usize,
    /// First source: ALU operand A, load/store base, jump target, branch operand.
    pub src1: usize,
    /// Second source: ALU operand B, store value, branch operand.
    pub src2: usize,
    /// Immediate, sign- or zero-extended per format; zero for `RRR`.
    pub imm: Word,
    /// The word this instruction was decoded from.
    pub word: Word,
}

impl Instruction {
    /// Builds a three-register instruction from its A, B and C fields.
    pub fn rrr(op: Opcode, a: usize, b: usize, c: usize) -> Self {
        decode(pack_rrr(op, a, b, c))
    }

    /// Builds a two-register-plus-immediate instruction from its A and B fields.
    pub fn rri(op: Opcode, a: usize, b: usize, imm: i16) -> Self {
        decode(pack_rri(op, a, b, imm as Word))
    }

    /// Builds a single-register-plus-immediate instruction.
    pub fn ri(op: Opcode, a: usize, imm: Word) -> Self {
        decode(pack_ri(op, a, imm))
    }

    /// The canonical no-op, `add r0, r0, r0` (encoding `0x0000`).
    pub fn nop() -> Self {
        decode(0)
    }

    /// Returns the instruction's field layout.
    pub const fn format(&self) -> Format {
        self.opcode.format()
    }

    /// Returns the immediate reinterpreted as a signed value.
    pub const fn imm_signed(&self) -> i16 {
        self.imm as i16
    }

    /// Re-encodes the decoded fields.
    ///
    /// For every canonical word, `decode(word).encode() == word`. A `RRR` word
    /// with nonzero bits 6-3 re-encodes with those bits cleared.
    pub fn encode(&self) -> Word {
        let map = layout(self.opcode);
        let mut fields = [0_usize; 3];
        for (field, reg) in [
            (map.target, self.target),
            (map.src1, self.src1),
            (map.src2, self.src2),
        ] {
            if let Some(slot) = field.position() {
                fields[slot] = reg;
            }
        }
        let [a, b, c] = fields;
        match self.format() {
            Format::Rrr => pack_rrr(self.opcode, a, b, c),
            Format::Rri => pack_rri(self.opcode, a, b, self.imm),
            Format::Ri => pack_ri(self.opcode, a, self.imm),
        }
    }
}
