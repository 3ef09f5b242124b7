//! Retirement records.
//!
//! A [`Retirement`] is the unit of comparison between the pipelined core and
//! the oracle: the program counter of a completed instruction, its encoding,
//! and the single architectural effect it had.

use std::fmt;

use super::Word;
use crate::isa::decode::decode;

/// The architectural side effect of one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effect {
    /// No visible state changed (branches, jumps linking to `r0`, writes to `r0`).
    #[default]
    None,
    /// A register other than `r0` was written.
    Register {
        /// Target register index.
        index: usize,
        /// Value written.
        value: Word,
    },
    /// A store was issued. Recorded even when the address is out of range and
    /// the write is dropped.
    Memory {
        /// Word address.
        address: Word,
        /// Value stored.
        value: Word,
    },
}

/// One retired instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Retirement {
    /// Fetch address of the instruction.
    pub pc: Word,
    /// The 16-bit encoding.
    pub word: Word,
    /// What the instruction changed.
    pub effect: Effect,
}

impl Retirement {
    /// Target register of the retirement, `0` when no register was written.
    pub const fn target(&self) -> usize {
        match self.effect {
            Effect::Register { index, .. } => index,
            Effect::None | Effect::Memory { .. } => 0,
        }
    }

    /// Retired value: the register value written, the stored word, or `0`.
    pub const fn value(&self) -> Word {
        match self.effect {
            Effect::Register { value, .. } | Effect::Memory { value, .. } => value,
            Effect::None => 0,
        }
    }
}

impl fmt::Display for Retirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = decode(self.word).to_string();
        write!(f, "{:#06x}: {text:<20}", self.pc)?;
        match self.effect {
            Effect::None => Ok(()),
            Effect::Register { index, value } => write!(f, " r{index} <- {value:#06x}"),
            Effect::Memory { address, value } => {
                write!(f, " mem[{address:#06x}] <- {value:#06x}")
            }
        }
    }
}
