//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It performs:
//! 1. **Decoding:** Splits the fetched word into opcode, registers and immediate.
//! 2. **Control Generation:** Derives the control signals for the opcode.
//! 3. **Register Read:** Latches both source operands from the register file.
//! 4. **Operand Refresh:** Re-resolves the operands of a frozen slot through forwarding.

use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::forwarding::ForwardingNetwork;
use crate::core::pipeline::latches::{DecodeEntry, DecodeSlot, FetchSlot};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::decode::decode;

/// Executes the instruction decode stage on the fetch slot.
///
/// Register values are read from the register file as it stands before this
/// tick's commit; results still in flight are picked up by forwarding later.
pub fn decode_stage(fetch: &FetchSlot, regs: &Gpr) -> DecodeSlot {
    fetch.map(|entry| {
        let inst = decode(entry.word);
        DecodeEntry {
            pc: entry.pc,
            inst,
            ctrl: ControlSignals::for_opcode(inst.opcode),
            rv1: regs.read(inst.src1),
            rv2: regs.read(inst.src2),
        }
    })
}

/// Refreshes the latched operands of a frozen decode slot.
///
/// A producer that is still a load in execute leaves the latched value in
/// place; it is re-resolved on a later tick once the load has data.
pub fn refresh_operands(entry: &DecodeEntry, network: &ForwardingNetwork) -> DecodeEntry {
    DecodeEntry {
        rv1: network.resolve(entry.inst.src1, entry.rv1).value,
        rv2: network.resolve(entry.inst.src2, entry.rv2).value,
        ..*entry
    }
}
