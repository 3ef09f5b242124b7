//! Pipeline Slot Interfaces.
//!
//! This module defines the common trait for result-carrying pipeline slots. It provides:
//! 1. **Producer Interface:** Exposes the register a slot will write and, when known, its value.
//! 2. **Bubble Handling:** A blanket implementation for [`Slot`] that reports nothing for bubbles.

use crate::core::pipeline::forwarding::Producer;
use crate::core::pipeline::latches::{ExecuteEntry, MemoryEntry, Slot, WritebackEntry};

/// A pipeline slot that can feed the forwarding network.
///
/// Implementors report the register they will write, together with the value
/// when it has already been computed. Entries that do not write a register
/// (or that target `r0`) report `None`.
pub trait ForwardSource {
    /// Returns the pending register write carried by this slot, if any.
    fn producer(&self) -> Option<Producer>;
}

impl<T: ForwardSource> ForwardSource for Slot<T> {
    fn producer(&self) -> Option<Producer> {
        self.entry().and_then(ForwardSource::producer)
    }
}

impl ForwardSource for ExecuteEntry {
    /// A load in execute has an address but no data yet.
    fn producer(&self) -> Option<Producer> {
        (self.ctrl.reg_write && self.inst.target != 0).then(|| Producer {
            target: self.inst.target,
            value: (!self.ctrl.mem_read).then_some(self.alu),
        })
    }
}

impl ForwardSource for MemoryEntry {
    fn producer(&self) -> Option<Producer> {
        (self.ctrl.reg_write && self.inst.target != 0).then(|| Producer {
            target: self.inst.target,
            value: Some(self.value),
        })
    }
}

impl ForwardSource for WritebackEntry {
    fn producer(&self) -> Option<Producer> {
        (self.inst.opcode.writes_register() && self.inst.target != 0).then(|| Producer {
            target: self.inst.target,
            value: Some(self.value),
        })
    }
}
