//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Operand Forwarding:** Resolves both sources against in-flight results.
//! 2. **Operand Selection:** Picks ALU inputs per the control signals.
//! 3. **ALU Evaluation:** Produces the result and the equality (branch-taken) flag.
//! 4. **Store Data:** Carries the forwarded second source for stores.

use crate::common::Word;
use crate::common::constants::LUI_SHIFT;
use crate::core::pipeline::forwarding::{Bypass, ForwardingNetwork, Operand};
use crate::core::pipeline::latches::{DecodeEntry, DecodeSlot, ExecuteEntry, ExecuteSlot, Slot};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;

/// Executes the execute stage on the decode slot.
///
/// # Returns
///
/// The new execute slot and the origin of each source operand, for statistics.
pub fn execute_stage(
    decode: &DecodeSlot,
    network: &ForwardingNetwork,
) -> (ExecuteSlot, [Bypass; 2]) {
    match decode.entry() {
        Some(entry) => {
            let op1 = network.resolve(entry.inst.src1, entry.rv1);
            let op2 = network.resolve(entry.inst.src2, entry.rv2);
            (Slot::Busy(execute(entry, op1, op2)), [op1.from, op2.from])
        }
        None => (ExecuteSlot::Bubble, [Bypass::Latched; 2]),
    }
}

fn execute(entry: &DecodeEntry, op1: Operand, op2: Operand) -> ExecuteEntry {
    let ctrl = entry.ctrl;
    let a: Word = match ctrl.a_src {
        OpASrc::Reg1 => op1.value,
        OpASrc::Pc => entry.pc,
        OpASrc::UpperImm => entry.inst.imm << LUI_SHIFT,
    };
    let b: Word = match ctrl.b_src {
        OpBSrc::Reg2 => op2.value,
        OpBSrc::Imm => entry.inst.imm,
        OpBSrc::One => 1,
        OpBSrc::Zero => 0,
    };
    let out = Alu::compute(ctrl.alu, a, b);

    ExecuteEntry {
        pc: entry.pc,
        inst: entry.inst,
        ctrl,
        alu: out.result,
        equal: out.equal,
        store_data: op2.value,
    }
}
