//! Hazard Detection and Stall Cascade.
//!
//! This module decides, once per tick and before anything is committed, what
//! every stage does. It provides:
//! 1. **Local Stalls:** Control hazards at fetch and decode, the load-use hazard at execute.
//! 2. **Cascade:** A backward recurrence from writeback to fetch so that any
//!    downstream stall holds every stage upstream of it.
//! 3. **Stage Actions:** Advance, bubble or freeze, derived from the two.

use std::fmt;

use crate::common::constants::PIPELINE_DEPTH;
use crate::core::pipeline::latches::{DecodeSlot, ExecuteSlot, FetchSlot, PipelineState};

/// Pipeline stages, ordered from fetch to writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and register read.
    Decode,
    /// ALU.
    Execute,
    /// Data memory access and storage write.
    Memory,
    /// Retirement bookkeeping.
    Writeback,
}

impl Stage {
    /// All stages, fetch first.
    pub const ALL: [Self; PIPELINE_DEPTH] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// Position in [`Stage::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
        };
        f.write_str(name)
    }
}

/// What a stage does this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StageAction {
    /// Consume the upstream slot and produce a new output slot.
    #[default]
    Advance,
    /// Let the upstream slot move on but produce an empty output slot.
    Bubble,
    /// Hold the output slot unchanged.
    Freeze,
}

/// Returns `true` if the fetch slot holds a jump or a branch.
///
/// The opcode is read from the undecoded word so that fetch stops before the
/// instruction reaches decode.
pub fn fetch_local_stall(fetch: &FetchSlot) -> bool {
    fetch.entry().is_some_and(|e| e.opcode().is_control())
}

/// Returns `true` if the decode slot holds a branch.
///
/// Holds fetch until the branch reaches the execute slot and resolves.
pub fn decode_local_stall(decode: &DecodeSlot) -> bool {
    decode.entry().is_some_and(|e| e.ctrl.branch)
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the execute slot holds a load whose target is
/// not `r0`, and the instruction in the decode slot reads that register as
/// either source. The load's data only exists after the memory access, one
/// tick too late for forwarding into execute.
///
/// # Examples
///
/// ```
/// use r16sim_core::core::pipeline::hazards::need_stall_load_use;
/// use r16sim_core::core::pipeline::latches::{DecodeEntry, ExecuteEntry, Slot};
/// use r16sim_core::core::pipeline::signals::ControlSignals;
/// use r16sim_core::isa::{Instruction, Opcode};
///
/// let lw = Instruction::rri(Opcode::Lw, 1, 0, 0);
/// let add = Instruction::rrr(Opcode::Add, 2, 1, 1);
/// let execute = Slot::Busy(ExecuteEntry {
///     inst: lw,
///     ctrl: ControlSignals::for_opcode(lw.opcode),
///     ..ExecuteEntry::default()
/// });
/// let decode = Slot::Busy(DecodeEntry {
///     inst: add,
///     ctrl: ControlSignals::for_opcode(add.opcode),
///     ..DecodeEntry::default()
/// });
/// assert!(need_stall_load_use(&execute, &decode));
/// ```
pub fn need_stall_load_use(execute: &ExecuteSlot, decode: &DecodeSlot) -> bool {
    let (Some(ex), Some(id)) = (execute.entry(), decode.entry()) else {
        return false;
    };
    if !ex.ctrl.mem_read || ex.inst.target == 0 {
        return false;
    }
    id.inst.src1 == ex.inst.target || id.inst.src2 == ex.inst.target
}

/// Local stall conditions sampled from one pipeline state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalStalls {
    /// Jump or branch in the fetch slot.
    pub fetch: bool,
    /// Branch in the decode slot.
    pub decode: bool,
    /// Load-use hazard between the execute and decode slots.
    pub execute: bool,
}

impl LocalStalls {
    /// Evaluates all local stall conditions.
    pub fn detect(state: &PipelineState) -> Self {
        Self {
            fetch: fetch_local_stall(&state.fetch),
            decode: decode_local_stall(&state.decode),
            execute: need_stall_load_use(&state.execute, &state.decode),
        }
    }

    /// Local stall for `stage`; memory and writeback never stall locally.
    pub const fn get(&self, stage: Stage) -> bool {
        match stage {
            Stage::Fetch => self.fetch,
            Stage::Decode => self.decode,
            Stage::Execute => self.execute,
            Stage::Memory | Stage::Writeback => false,
        }
    }
}

/// Local and effective stall signals for every stage.
///
/// `effective[s] = local[s] || effective[s + 1]`, computed from writeback
/// back to fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallVector {
    local: [bool; PIPELINE_DEPTH],
    effective: [bool; PIPELINE_DEPTH],
}

impl StallVector {
    /// Runs the cascade over `local`.
    pub fn cascade(local: LocalStalls) -> Self {
        let mut vector = Self::default();
        let mut downstream = false;
        for stage in Stage::ALL.into_iter().rev() {
            let i = stage.index();
            vector.local[i] = local.get(stage);
            vector.effective[i] = vector.local[i] || downstream;
            downstream = vector.effective[i];
        }
        vector
    }

    /// Local stall of `stage`.
    pub const fn local(&self, stage: Stage) -> bool {
        self.local[stage.index()]
    }

    /// Effective stall of `stage`.
    pub const fn effective(&self, stage: Stage) -> bool {
        self.effective[stage.index()]
    }

    /// Whether any stage stalls.
    pub fn any(&self) -> bool {
        self.effective.iter().any(|&s| s)
    }

    /// Action for `stage`: freeze under a downstream stall, bubble under a
    /// local stall alone, advance otherwise.
    pub fn action(&self, stage: Stage) -> StageAction {
        let downstream = Stage::ALL
            .get(stage.index() + 1)
            .is_some_and(|&next| self.effective(next));
        if downstream {
            StageAction::Freeze
        } else if self.local(stage) {
            StageAction::Bubble
        } else {
            StageAction::Advance
        }
    }
}
