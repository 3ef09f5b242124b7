//! Instruction decoding.
//!
//! Decoding is a fixed table lookup: the opcode selects which of the three
//! register fields (A, B, C) feeds the target and each source, and which
//! immediate extraction applies. There is no default arm; the 3-bit opcode is
//! fully enumerated.

use crate::common::Word;
use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::opcodes::{Format, Opcode};

/// Which encoded register field feeds a decoded operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Bits 12-10.
    A,
    /// Bits 9-7.
    B,
    /// Bits 2-0.
    C,
    /// Operand unused; decodes as `r0`.
    None,
}

impl Field {
    /// Index of the field in `[A, B, C]` order, `None` for an unused operand.
    pub const fn position(self) -> Option<usize> {
        match self {
            Self::A => Some(0),
            Self::B => Some(1),
            Self::C => Some(2),
            Self::None => None,
        }
    }

    const fn extract(self, fields: [usize; 3]) -> usize {
        match self.position() {
            Some(i) => fields[i],
            None => 0,
        }
    }
}

/// Operand mapping for one opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Field written.
    pub target: Field,
    /// Field read as source1.
    pub src1: Field,
    /// Field read as source2.
    pub src2: Field,
}

const fn map(target: Field, src1: Field, src2: Field) -> Layout {
    Layout { target, src1, src2 }
}

/// Operand mapping indexed by opcode encoding.
///
/// Stores and branches read field A as their second source and write nothing.
/// `jalr` links into field A and jumps through field B.
pub const LAYOUT: [Layout; 8] = [
    map(Field::A, Field::B, Field::C),       // add
    map(Field::A, Field::B, Field::None),    // addi
    map(Field::A, Field::B, Field::C),       // nand
    map(Field::A, Field::None, Field::None), // lui
    map(Field::None, Field::B, Field::A),    // sw
    map(Field::A, Field::B, Field::None),    // lw
    map(Field::None, Field::B, Field::A),    // beq
    map(Field::A, Field::B, Field::None),    // jalr
];

/// Returns the operand mapping for `op`.
pub const fn layout(op: Opcode) -> Layout {
    LAYOUT[op as usize]
}

/// Decodes a 16-bit word.
///
/// # Examples
///
/// ```
/// use r16sim_core::isa::{Opcode, decode};
///
/// // addi r1, r2, -1
/// let inst = decode(0b001_001_010_1111111);
/// assert_eq!(inst.opcode, Opcode::Addi);
/// assert_eq!((inst.target, inst.src1), (1, 2));
/// assert_eq!(inst.imm_signed(), -1);
/// ```
pub fn decode(word: Word) -> Instruction {
    let opcode = Opcode::from_bits(word.opcode_bits());
    let fields = [word.reg_a(), word.reg_b(), word.reg_c()];
    let map = layout(opcode);
    let imm = match opcode.format() {
        Format::Rrr => 0,
        Format::Rri => word.imm7(),
        Format::Ri => word.imm10(),
    };
    Instruction {
        opcode,
        target: map.target.extract(fields),
        src1: map.src1.extract(fields),
        src2: map.src2.extract(fields),
        imm,
        word,
    }
}
