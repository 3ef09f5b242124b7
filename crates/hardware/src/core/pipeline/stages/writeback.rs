//! Writeback (WB) Stage.
//!
//! Bookkeeping only: the storage write for the instruction already happened
//! when it left the memory stage. The writeback slot records the retiring
//! instruction so the forwarding network can still see its value and so the
//! core can report the retirement.

use crate::core::pipeline::latches::{MemorySlot, WritebackEntry, WritebackSlot};

/// Executes the writeback stage on the memory slot.
pub fn wb_stage(memory: &MemorySlot) -> WritebackSlot {
    memory.map(|entry| WritebackEntry {
        pc: entry.pc,
        inst: entry.inst,
        value: entry.value,
        effect: entry.effect,
    })
}
