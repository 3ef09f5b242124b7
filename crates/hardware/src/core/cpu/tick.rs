//! Clock Tick.
//!
//! A tick has two phases:
//! 1. **Compute:** [`Cpu::next_state`] derives every next slot, the stall and
//!    redirect decisions and the staged storage write from the current state
//!    alone. Nothing is mutated.
//! 2. **Commit:** [`Cpu::commit`] applies the storage write, installs the new
//!    slots and program counter, then updates statistics.

use tracing::{debug, info, warn};

use crate::common::retire::Retirement;
use crate::core::Cpu;
use crate::core::arch::imem::InstructionSource;
use crate::core::pipeline::forwarding::{Bypass, ForwardingNetwork};
use crate::core::pipeline::hazards::{LocalStalls, Stage, StageAction, StallVector};
use crate::core::pipeline::latches::{PipelineState, Slot};
use crate::core::pipeline::redirect::{self, Redirect};
use crate::core::pipeline::stages::{
    MemoryOutcome, StagedWrite, decode_stage, execute_stage, fetch_stage, mem_stage,
    refresh_operands, wb_stage,
};
use crate::isa::decode::decode;

/// Everything one tick decided, before it is committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NextState {
    /// Slots and program counter after the tick.
    pub state: PipelineState,
    /// Storage write performed by the memory stage.
    pub write: StagedWrite,
    /// Instruction entering the writeback slot.
    pub retired: Option<Retirement>,
    /// Local and effective stalls.
    pub stalls: StallVector,
    /// Redirect applied to this tick's fetch.
    pub redirect: Option<Redirect>,
    /// Whether fetch read an instruction.
    pub fetched: bool,
    /// Origin of each execute operand.
    pub bypasses: [Bypass; 2],
}

impl Cpu {
    /// Advances the core by one clock tick.
    ///
    /// # Returns
    ///
    /// The instruction that retired this tick, if any.
    pub fn tick<S: InstructionSource + ?Sized>(&mut self, source: &S) -> Option<Retirement> {
        let next = self.next_state(source);
        self.commit(next)
    }

    /// Computes the next pipeline state from the current one.
    ///
    /// Stages are evaluated from writeback back to fetch, but every stage reads
    /// only the current slots, so the order has no effect on the result.
    pub fn next_state<S: InstructionSource + ?Sized>(&self, source: &S) -> NextState {
        let cur = &self.state;
        let stalls = StallVector::cascade(LocalStalls::detect(cur));
        let network = ForwardingNetwork::from_state(cur);

        let writeback = wb_stage(&cur.memory);
        let retired = writeback.entry().map(|e| e.retirement());

        let MemoryOutcome {
            slot: memory,
            write,
        } = mem_stage(&cur.execute, &self.dmem, self.read_timing);

        let execute_action = stalls.action(Stage::Execute);
        let (execute, bypasses) = match execute_action {
            StageAction::Advance => execute_stage(&cur.decode, &network),
            StageAction::Bubble => (Slot::Bubble, [Bypass::Latched; 2]),
            StageAction::Freeze => (cur.execute, [Bypass::Latched; 2]),
        };

        let decode = match stalls.action(Stage::Decode) {
            StageAction::Advance => decode_stage(&cur.fetch, &self.regs),
            StageAction::Bubble => Slot::Bubble,
            StageAction::Freeze => cur.decode.map(|e| refresh_operands(e, &network)),
        };

        let branch = redirect::resolve_branch(&cur.execute);
        let jump = if execute_action == StageAction::Advance {
            redirect::resolve_jump(&cur.decode, &network)
        } else {
            None
        };
        let redirect = redirect::select(branch, jump);
        let resume = redirect.map_or(cur.pc, |r| r.target());

        let (fetch, pc) = match stalls.action(Stage::Fetch) {
            StageAction::Advance => {
                let slot = fetch_stage(resume, source);
                let pc = if slot.is_busy() {
                    resume.wrapping_add(1)
                } else {
                    resume
                };
                (slot, pc)
            }
            StageAction::Bubble => (Slot::Bubble, resume),
            StageAction::Freeze => (cur.fetch, resume),
        };
        let fetched = stalls.action(Stage::Fetch) == StageAction::Advance && fetch.is_busy();

        NextState {
            state: PipelineState {
                pc,
                fetch,
                decode,
                execute,
                memory,
                writeback,
            },
            write,
            retired,
            stalls,
            redirect,
            fetched,
            bypasses,
        }
    }

    /// Applies a computed next state.
    ///
    /// The staged register or memory write lands first. A registered-read load
    /// then samples data memory and fills in its memory slot. Slots, program
    /// counter and statistics follow.
    pub fn commit(&mut self, next: NextState) -> Option<Retirement> {
        let NextState {
            mut state,
            write,
            retired,
            stalls,
            redirect,
            fetched,
            bypasses,
        } = next;

        match write {
            StagedWrite::None => {}
            StagedWrite::Register { index, value } => self.regs.write(index, value),
            StagedWrite::Memory { address, value } => {
                if !self.dmem.contains(address) {
                    warn!(address, value, "store outside data memory dropped");
                    self.stats.dropped_stores += 1;
                }
                self.dmem.write(address, value);
            }
            StagedWrite::Load { index, address } => {
                let value = self.dmem.read(address);
                if let Slot::Busy(entry) = &mut state.memory {
                    entry.complete_load(value);
                }
                self.regs.write(index, value);
            }
        }

        self.state = state;
        self.record(&stalls, redirect, fetched, bypasses, retired.as_ref());

        if let Some(r) = retired.filter(|_| self.trace || cfg!(feature = "commit-log")) {
            info!(target: "r16sim::commit", "{r}");
        }
        retired
    }

    /// Whether the core has nothing left to do.
    ///
    /// Fetch through memory must be empty and the source must have no
    /// instruction at the fetch address. The slots are checked first so that
    /// the source is not queried while instructions are still in flight.
    pub fn is_drained<S: InstructionSource + ?Sized>(&self, source: &S) -> bool {
        self.state.in_flight_empty() && source.fetch(self.state.pc).is_none()
    }

    fn record(
        &mut self,
        stalls: &StallVector,
        redirect: Option<Redirect>,
        fetched: bool,
        bypasses: [Bypass; 2],
        retired: Option<&Retirement>,
    ) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if fetched {
            stats.instructions_fetched += 1;
        }

        match stalls.action(Stage::Fetch) {
            StageAction::Bubble => stats.bubbles_fetch += 1,
            StageAction::Freeze => stats.freeze_cycles += 1,
            StageAction::Advance => {}
        }
        if stalls.action(Stage::Decode) == StageAction::Bubble {
            stats.bubbles_decode += 1;
        }
        if stalls.action(Stage::Execute) == StageAction::Bubble {
            stats.bubbles_load_use += 1;
        }
        if stalls.any() {
            debug!(
                cycle = stats.cycles,
                fetch = ?stalls.action(Stage::Fetch),
                decode = ?stalls.action(Stage::Decode),
                execute = ?stalls.action(Stage::Execute),
                "stall"
            );
        }

        match redirect {
            Some(Redirect::Branch { target, taken }) => {
                if taken {
                    stats.branches_taken += 1;
                } else {
                    stats.branches_not_taken += 1;
                }
                debug!(cycle = stats.cycles, target, taken, "branch resolved");
            }
            Some(Redirect::Jump { target }) => {
                debug!(cycle = stats.cycles, target, "jump resolved");
            }
            None => {}
        }

        for from in bypasses {
            stats.record_forward(from);
        }
        if let Some(r) = retired {
            stats.record_retirement(decode(r.word).opcode);
        }
    }
}
