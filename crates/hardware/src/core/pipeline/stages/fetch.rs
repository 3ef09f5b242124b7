//! Instruction Fetch (IF) Stage.
//!
//! Reads one word from the instruction source at the selected fetch address.
//! The word is not decoded here; fetch-local hazard detection inspects only
//! its opcode bits.

use tracing::trace;

use crate::common::Word;
use crate::core::arch::imem::InstructionSource;
use crate::core::pipeline::latches::{FetchEntry, FetchSlot, Slot};

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `addr` - Fetch address: the redirect target if one resolved this tick, else the sequential PC.
/// * `source` - Instruction source queried at `addr`.
///
/// # Returns
///
/// A populated slot, or a bubble if the source has no instruction at `addr`.
pub fn fetch_stage<S: InstructionSource + ?Sized>(addr: Word, source: &S) -> FetchSlot {
    let Some(word) = source.fetch(addr) else {
        trace!(pc = addr, "fetch past end of program");
        return Slot::Bubble;
    };
    trace!(pc = addr, word, "IF");
    Slot::Busy(FetchEntry { pc: addr, word })
}
