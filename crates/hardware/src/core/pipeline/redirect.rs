//! Program Counter Redirect.
//!
//! Two resolution points override sequential fetch: a branch in the execute
//! slot and a jump in the decode slot. Both feed the fetch of the same tick.
//! When both are present the branch wins, being the older instruction.

use crate::common::Word;
use crate::core::pipeline::forwarding::ForwardingNetwork;
use crate::core::pipeline::latches::{DecodeSlot, ExecuteSlot};

/// A resolved control transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Branch resolved in execute; `target` is `pc + 1` when not taken.
    Branch {
        /// Next fetch address.
        target: Word,
        /// Equality flag from the ALU.
        taken: bool,
    },
    /// Jump resolved in decode.
    Jump {
        /// Forwarded value of the jump's source register.
        target: Word,
    },
}

impl Redirect {
    /// Next fetch address.
    pub const fn target(&self) -> Word {
        match *self {
            Self::Branch { target, .. } | Self::Jump { target } => target,
        }
    }
}

/// Resolves the branch held in the execute slot.
///
/// # Examples
///
/// ```
/// use r16sim_core::core::pipeline::latches::{ExecuteEntry, Slot};
/// use r16sim_core::core::pipeline::redirect::{Redirect, resolve_branch};
/// use r16sim_core::core::pipeline::signals::ControlSignals;
/// use r16sim_core::isa::{Instruction, Opcode};
///
/// let beq = Instruction::rri(Opcode::Beq, 0, 0, 3);
/// let slot = Slot::Busy(ExecuteEntry {
///     pc: 10,
///     inst: beq,
///     ctrl: ControlSignals::for_opcode(beq.opcode),
///     equal: true,
///     ..ExecuteEntry::default()
/// });
/// assert_eq!(resolve_branch(&slot), Some(Redirect::Branch { target: 14, taken: true }));
/// ```
pub fn resolve_branch(execute: &ExecuteSlot) -> Option<Redirect> {
    let entry = execute.entry().filter(|e| e.ctrl.branch)?;
    let next = entry.pc.wrapping_add(1);
    let target = if entry.equal {
        next.wrapping_add(entry.inst.imm)
    } else {
        next
    };
    Some(Redirect::Branch {
        target,
        taken: entry.equal,
    })
}

/// Resolves the jump held in the decode slot using forwarded operands.
///
/// Callers only resolve when the jump moves into execute this tick; a frozen
/// decode slot does not redirect.
pub fn resolve_jump(decode: &DecodeSlot, network: &ForwardingNetwork) -> Option<Redirect> {
    let entry = decode.entry().filter(|e| e.ctrl.jump)?;
    let target = network.resolve(entry.inst.src1, entry.rv1).value;
    Some(Redirect::Jump { target })
}

/// Picks the redirect applied to fetch, branch first.
pub const fn select(branch: Option<Redirect>, jump: Option<Redirect>) -> Option<Redirect> {
    match branch {
        Some(_) => branch,
        None => jump,
    }
}
