//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It performs:
//! 1. **Data Access:** Loads from or stores to data memory at the ALU address.
//! 2. **Result Selection:** Chooses the loaded word or the ALU result as the slot value.
//! 3. **Architectural Write:** Stages the single register or memory write that the
//!    core commits at the end of this tick.
//!
//! Storage writes happen here, one tick before the writeback slot records the
//! retirement.

use crate::common::Word;
use crate::common::retire::Effect;
use crate::config::ReadTiming;
use crate::core::arch::dmem::DataMemory;
use crate::core::pipeline::latches::{ExecuteEntry, ExecuteSlot, MemoryEntry, MemorySlot, Slot};

/// A storage write produced by the memory stage, applied at commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StagedWrite {
    /// Nothing to write.
    #[default]
    None,
    /// Register write with a known value.
    Register {
        /// Target register; never `0`.
        index: usize,
        /// Value written.
        value: Word,
    },
    /// Registered-read load: the word is sampled from data memory at commit.
    Load {
        /// Target register (`0` discards the word).
        index: usize,
        /// Word address.
        address: Word,
    },
    /// Data memory write.
    Memory {
        /// Word address.
        address: Word,
        /// Value stored.
        value: Word,
    },
}

/// Output of the memory stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryOutcome {
    /// New memory slot.
    pub slot: MemorySlot,
    /// Write to apply at commit.
    pub write: StagedWrite,
}

/// Executes the memory stage on the execute slot.
///
/// # Arguments
///
/// * `execute` - The execute slot.
/// * `dmem` - Data memory as it stands before this tick's commit.
/// * `timing` - Read timing; with [`ReadTiming::NextTick`] a load's value is
///   left for the commit to fill in.
pub fn mem_stage(execute: &ExecuteSlot, dmem: &DataMemory, timing: ReadTiming) -> MemoryOutcome {
    match execute {
        Slot::Busy(entry) => access(entry, dmem, timing),
        Slot::Bubble => MemoryOutcome::default(),
    }
}

fn access(entry: &ExecuteEntry, dmem: &DataMemory, timing: ReadTiming) -> MemoryOutcome {
    let ctrl = entry.ctrl;
    let target = entry.inst.target;
    let address = entry.alu;

    let (value, write) = if ctrl.mem_read {
        match timing {
            ReadTiming::SameTick => {
                let value = dmem.read(address);
                (value, register_write(target, value))
            }
            ReadTiming::NextTick => (
                0,
                StagedWrite::Load {
                    index: target,
                    address,
                },
            ),
        }
    } else if ctrl.mem_write {
        (
            entry.alu,
            StagedWrite::Memory {
                address,
                value: entry.store_data,
            },
        )
    } else if ctrl.reg_write {
        (entry.alu, register_write(target, entry.alu))
    } else {
        (entry.alu, StagedWrite::None)
    };

    let effect = match write {
        StagedWrite::Register { index, value } => Effect::Register { index, value },
        StagedWrite::Load { index, .. } if index != 0 => Effect::Register { index, value },
        StagedWrite::Memory { address, value } => Effect::Memory { address, value },
        StagedWrite::Load { .. } | StagedWrite::None => Effect::None,
    };

    MemoryOutcome {
        slot: Slot::Busy(MemoryEntry {
            pc: entry.pc,
            inst: entry.inst,
            ctrl,
            value,
            effect,
        }),
        write,
    }
}

const fn register_write(index: usize, value: Word) -> StagedWrite {
    if index == 0 {
        StagedWrite::None
    } else {
        StagedWrite::Register { index, value }
    }
}
