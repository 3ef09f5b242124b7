//! Simulator: owns the CPU and its instruction source side-by-side.
//!
//! The core borrows the source for each tick, so programs can be swapped or
//! mocked without touching the core. The simulator also keeps the retirement
//! log that verification compares against the oracle.

use tracing::{debug, trace};

use crate::common::Word;
use crate::common::error::SimError;
use crate::common::retire::Retirement;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::imem::{InstructionSource, Program};
use crate::stats::SimStats;

/// Top-level simulator: CPU state plus the program it runs.
#[derive(Debug)]
pub struct Simulator<S = Program> {
    /// Pipelined core.
    pub cpu: Cpu,
    source: S,
    retirements: Vec<Retirement>,
    max_ticks: u64,
}

impl<S: InstructionSource> Simulator<S> {
    /// Creates a reset simulator running `source`.
    pub fn new(config: &Config, source: S) -> Self {
        Self {
            cpu: Cpu::new(config),
            source,
            retirements: Vec::new(),
            max_ticks: config.general.max_ticks,
        }
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) {
        trace!("{}", self.cpu.pipeline_diagram());
        if let Some(r) = self.cpu.tick(&self.source) {
            self.retirements.push(r);
        }
    }

    /// Runs exactly `ticks` clock cycles.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Ticks until the pipeline drains.
    ///
    /// # Returns
    ///
    /// The number of ticks executed by this call.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TickLimit`] if the core is still busy after
    /// `general.max_ticks` ticks.
    pub fn run_until_drained(&mut self) -> Result<u64, SimError> {
        let mut ticks = 0;
        while !self.is_drained() {
            if ticks >= self.max_ticks {
                return Err(SimError::TickLimit {
                    limit: self.max_ticks,
                });
            }
            self.tick();
            ticks += 1;
        }
        debug!(
            ticks,
            retired = self.cpu.stats.instructions_retired,
            bubbles = self.cpu.stats.stall_bubbles(),
            "drained"
        );
        Ok(ticks)
    }

    /// Whether no instruction is in flight and none remains to fetch.
    pub fn is_drained(&self) -> bool {
        self.cpu.is_drained(&self.source)
    }

    /// Every retirement so far, oldest first.
    pub fn retirements(&self) -> &[Retirement] {
        &self.retirements
    }

    /// The instruction source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The core.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Reads register `idx`.
    pub fn reg(&self, idx: usize) -> Word {
        self.cpu.regs.read(idx)
    }

    /// Writes register `idx`; writes to `r0` are ignored.
    pub fn set_reg(&mut self, idx: usize, value: Word) {
        self.cpu.regs.write(idx, value);
    }

    /// Reads data memory at `addr`.
    pub fn mem(&self, addr: Word) -> Word {
        self.cpu.dmem.read(addr)
    }

    /// Copies `data` into data memory starting at `base`.
    pub fn load_data(&mut self, base: Word, data: &[Word]) {
        self.cpu.dmem.load(base, data);
    }
}
