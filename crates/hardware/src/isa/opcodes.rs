//! Opcode and format enumerations.
//!
//! The 3-bit opcode field enumerates exactly eight operations, so conversion
//! from bits is total.

use crate::common::constants::OPCODE_MASK;

/// Instruction field layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Three registers: target, source1, source2.
    Rrr,
    /// Two registers and a 7-bit signed immediate.
    Rri,
    /// One register and a 10-bit unsigned immediate.
    Ri,
}

/// The eight operations, in encoding order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    /// `A <- B + C`.
    #[default]
    Add = 0,
    /// `A <- B + imm`.
    Addi = 1,
    /// `A <- !(B & C)`.
    Nand = 2,
    /// `A <- imm << 6`.
    Lui = 3,
    /// `mem[B + imm] <- A`.
    Sw = 4,
    /// `A <- mem[B + imm]`.
    Lw = 5,
    /// `if A == B { pc <- pc + 1 + imm }`.
    Beq = 6,
    /// `A <- pc + 1; pc <- B`.
    Jalr = 7,
}

impl Opcode {
    /// All opcodes in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Addi,
        Self::Nand,
        Self::Lui,
        Self::Sw,
        Self::Lw,
        Self::Beq,
        Self::Jalr,
    ];

    /// Converts the low three bits of `bits` to an opcode.
    pub const fn from_bits(bits: u16) -> Self {
        Self::ALL[(bits & OPCODE_MASK) as usize]
    }

    /// Returns the 3-bit encoding.
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// Returns the field layout used by this opcode.
    pub const fn format(self) -> Format {
        match self {
            Self::Add | Self::Nand => Format::Rrr,
            Self::Lui => Format::Ri,
            Self::Addi | Self::Sw | Self::Lw | Self::Beq | Self::Jalr => Format::Rri,
        }
    }

    /// Lower-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addi => "addi",
            Self::Nand => "nand",
            Self::Lui => "lui",
            Self::Sw => "sw",
            Self::Lw => "lw",
            Self::Beq => "beq",
            Self::Jalr => "jalr",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring case.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// Whether the opcode reads data memory.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Lw)
    }

    /// Whether the opcode writes data memory.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sw)
    }

    /// Whether the opcode is the conditional branch.
    pub const fn is_branch(self) -> bool {
        matches!(self, Self::Beq)
    }

    /// Whether the opcode is the register-indirect jump.
    pub const fn is_jump(self) -> bool {
        matches!(self, Self::Jalr)
    }

    /// Whether the opcode changes the fetch address.
    pub const fn is_control(self) -> bool {
        self.is_branch() || self.is_jump()
    }

    /// Whether the opcode writes its target register.
    pub const fn writes_register(self) -> bool {
        !matches!(self, Self::Sw | Self::Beq)
    }
}
