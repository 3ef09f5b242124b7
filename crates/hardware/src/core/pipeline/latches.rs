//! Pipeline slot structures for inter-stage communication.
//!
//! Each stage writes one slot at the end of a tick; the next stage reads it
//! during the following tick:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Bubble Representation:** [`Slot`] tags a slot as empty or populated, so no
//!    opcode value doubles as "no instruction".
//! 2. **Instruction Flow:** One entry type per slot, carrying what that stage computed.
//! 3. **Register Set:** [`PipelineState`] bundles the fetch address and all five slots.

use crate::common::Word;
use crate::common::retire::{Effect, Retirement};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;

/// One stage slot: a bubble or an instruction with stage-local fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slot<T> {
    /// No instruction. Gates every side effect downstream.
    #[default]
    Bubble,
    /// An instruction in flight.
    Busy(T),
}

impl<T> Slot<T> {
    /// Whether the slot is empty.
    pub const fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble)
    }

    /// Whether the slot holds an instruction.
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }

    /// Borrows the entry, if any.
    pub const fn entry(&self) -> Option<&T> {
        match self {
            Self::Busy(entry) => Some(entry),
            Self::Bubble => None,
        }
    }

    /// Transforms the entry, keeping bubbles as bubbles.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Slot<U> {
        match self {
            Self::Busy(entry) => Slot::Busy(f(entry)),
            Self::Bubble => Slot::Bubble,
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Bubble, Self::Busy)
    }
}

/// Fetch slot: the raw word read from the instruction source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchEntry {
    /// Fetch address.
    pub pc: Word,
    /// 16-bit encoding, not yet decoded.
    pub word: Word,
}

impl FetchEntry {
    /// Opcode bits of the undecoded word.
    pub const fn opcode(&self) -> Opcode {
        Opcode::from_bits(self.word >> crate::common::constants::OPCODE_SHIFT)
    }
}

/// Decode slot: decoded fields, control signals and latched operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeEntry {
    /// Fetch address.
    pub pc: Word,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Control signals for the instruction.
    pub ctrl: ControlSignals,
    /// Source1 value latched at decode (refreshed while frozen).
    pub rv1: Word,
    /// Source2 value latched at decode (refreshed while frozen).
    pub rv2: Word,
}

/// Execute slot: ALU output and the forwarded store value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteEntry {
    /// Fetch address.
    pub pc: Word,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Control signals for the instruction.
    pub ctrl: ControlSignals,
    /// ALU result: sum, NAND, address, upper immediate or link value.
    pub alu: Word,
    /// ALU equality flag; the branch-taken condition for `beq`.
    pub equal: bool,
    /// Forwarded source2 value, written to memory by a store.
    pub store_data: Word,
}

/// Memory slot: post-memory value and the architectural effect committed with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryEntry {
    /// Fetch address.
    pub pc: Word,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Control signals for the instruction.
    pub ctrl: ControlSignals,
    /// Loaded word for a load, the ALU result otherwise.
    pub value: Word,
    /// Register or memory write applied when this slot was committed.
    pub effect: Effect,
}

impl MemoryEntry {
    /// Fills in the word delivered by a registered read port.
    pub const fn complete_load(&mut self, value: Word) {
        self.value = value;
        if let Effect::Register { index, .. } = self.effect {
            self.effect = Effect::Register { index, value };
        }
    }
}

/// Writeback slot: bookkeeping for the instruction retiring this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackEntry {
    /// Fetch address.
    pub pc: Word,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Retiring value, already committed to storage one tick earlier.
    pub value: Word,
    /// The retired effect.
    pub effect: Effect,
}

impl WritebackEntry {
    /// The retirement record for this entry.
    pub const fn retirement(&self) -> Retirement {
        Retirement {
            pc: self.pc,
            word: self.inst.word,
            effect: self.effect,
        }
    }
}

/// Fetch slot.
pub type FetchSlot = Slot<FetchEntry>;
/// Decode slot.
pub type DecodeSlot = Slot<DecodeEntry>;
/// Execute slot.
pub type ExecuteSlot = Slot<ExecuteEntry>;
/// Memory slot.
pub type MemorySlot = Slot<MemoryEntry>;
/// Writeback slot.
pub type WritebackSlot = Slot<WritebackEntry>;

/// The complete pipeline register set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Next sequential fetch address.
    pub pc: Word,
    /// Output of fetch.
    pub fetch: FetchSlot,
    /// Output of decode.
    pub decode: DecodeSlot,
    /// Output of execute.
    pub execute: ExecuteSlot,
    /// Output of memory.
    pub memory: MemorySlot,
    /// Output of writeback.
    pub writeback: WritebackSlot,
}

impl PipelineState {
    /// An empty pipeline that will fetch from `pc` first.
    pub fn new(pc: Word) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    /// Whether fetch through memory hold no instruction.
    ///
    /// The writeback slot is excluded; its instruction has already retired.
    pub const fn in_flight_empty(&self) -> bool {
        self.fetch.is_bubble()
            && self.decode.is_bubble()
            && self.execute.is_bubble()
            && self.memory.is_bubble()
    }

    /// Number of populated slots.
    pub const fn occupancy(&self) -> usize {
        self.fetch.is_busy() as usize
            + self.decode.is_busy() as usize
            + self.execute.is_busy() as usize
            + self.memory.is_busy() as usize
            + self.writeback.is_busy() as usize
    }
}
