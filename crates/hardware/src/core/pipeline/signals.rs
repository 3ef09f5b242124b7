//! Pipeline control signals and operation types.
//!
//! This module defines the signals decode derives from an opcode. It performs:
//! 1. **Operation Selection:** Chooses the ALU function.
//! 2. **Operand Selection:** Chooses ALU inputs (registers, PC, immediates, constants).
//! 3. **Memory and Register Control:** Flags loads, stores and register writes.
//! 4. **Control Flow:** Flags the branch and the jump.

use crate::isa::opcodes::Opcode;

/// ALU operation, encoded as the unit's 1-bit selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition (selector 0).
    #[default]
    Add,
    /// Bitwise `!(a & b)` (selector 1).
    Nand,
}

impl AluOp {
    /// The 1-bit selector value.
    pub const fn selector(self) -> u8 {
        match self {
            Self::Add => 0,
            Self::Nand => 1,
        }
    }

    /// Decodes a selector; only the low bit is significant.
    pub const fn from_selector(bit: u8) -> Self {
        if bit & 1 == 0 { Self::Add } else { Self::Nand }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Forwarded source1 value.
    #[default]
    Reg1,
    /// The instruction's own address (link computation).
    Pc,
    /// The immediate shifted into the upper ten bits.
    UpperImm,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Forwarded source2 value.
    #[default]
    Reg2,
    /// The decoded immediate.
    Imm,
    /// The constant one.
    One,
    /// The constant zero.
    Zero,
}

/// Control signals carried alongside an instruction from decode onward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Writes the target register (still gated by target != `r0`).
    pub reg_write: bool,
    /// Reads data memory.
    pub mem_read: bool,
    /// Writes data memory.
    pub mem_write: bool,
    /// Conditional branch, resolved from the execute slot.
    pub branch: bool,
    /// Register-indirect jump, resolved from the decode slot.
    pub jump: bool,
    /// ALU function.
    pub alu: AluOp,
    /// ALU operand A source.
    pub a_src: OpASrc,
    /// ALU operand B source.
    pub b_src: OpBSrc,
}

impl ControlSignals {
    /// Derives the control signals for `op`.
    pub const fn for_opcode(op: Opcode) -> Self {
        let base = Self {
            reg_write: op.writes_register(),
            mem_read: op.is_load(),
            mem_write: op.is_store(),
            branch: op.is_branch(),
            jump: op.is_jump(),
            alu: AluOp::Add,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Reg2,
        };
        match op {
            Opcode::Add | Opcode::Beq => base,
            Opcode::Nand => Self {
                alu: AluOp::Nand,
                ..base
            },
            Opcode::Addi | Opcode::Sw | Opcode::Lw => Self {
                b_src: OpBSrc::Imm,
                ..base
            },
            Opcode::Lui => Self {
                a_src: OpASrc::UpperImm,
                b_src: OpBSrc::Zero,
                ..base
            },
            Opcode::Jalr => Self {
                a_src: OpASrc::Pc,
                b_src: OpBSrc::One,
                ..base
            },
        }
    }
}
