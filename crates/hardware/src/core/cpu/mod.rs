//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register file, data memory and fetch address.
//! 2. **Pipeline Control:** Holds the five stage slots and advances them once per tick.
//! 3. **Observability:** Collects statistics and emits the commit log.
//!
//! The instruction source is not owned by the core; it is passed to every tick.

/// Two-phase tick: next-state computation and commit.
pub mod tick;

use std::fmt::Write;

use crate::common::Word;
use crate::config::{Config, ReadTiming};
use crate::core::arch::dmem::DataMemory;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::hazards::Stage;
use crate::core::pipeline::latches::PipelineState;
use crate::stats::SimStats;

pub use self::tick::NextState;

/// Main CPU structure containing all processor state.
///
/// The CPU drives instructions through the five-stage pipeline, owns the
/// register file and data memory, and tracks performance statistics.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Data memory.
    pub dmem: DataMemory,
    /// Fetch address and stage slots.
    pub state: PipelineState,
    /// Performance statistics.
    pub stats: SimStats,
    /// Data memory read timing.
    pub read_timing: ReadTiming,
    /// Emit a commit-log event for every retirement.
    pub trace: bool,
}

impl Cpu {
    /// Creates a reset core: empty pipeline, zeroed registers and memory.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            dmem: DataMemory::from_config(&config.memory),
            state: PipelineState::new(config.general.start_pc),
            stats: SimStats::default(),
            read_timing: config.memory.read_timing,
            trace: config.general.trace_instructions,
        }
    }

    /// Next sequential fetch address.
    pub const fn pc(&self) -> Word {
        self.state.pc
    }

    /// One-line view of the stage slots, fetch first.
    pub fn pipeline_diagram(&self) -> String {
        let s = &self.state;
        let mut line = format!("pc={:#06x}", s.pc);
        let pcs = [
            s.fetch.entry().map(|e| e.pc),
            s.decode.entry().map(|e| e.pc),
            s.execute.entry().map(|e| e.pc),
            s.memory.entry().map(|e| e.pc),
            s.writeback.entry().map(|e| e.pc),
        ];
        for (stage, pc) in Stage::ALL.into_iter().zip(pcs) {
            let _ = match pc {
                Some(pc) => write!(line, " | {stage} {pc:#06x}"),
                None => write!(line, " | {stage} ------"),
            };
        }
        line
    }
}
