//! Differential Verification.
//!
//! Runs the pipelined core and the oracle over the same program from the same
//! preloaded state, then compares:
//! 1. **Retirements:** The full sequence of (pc, word, effect) records.
//! 2. **Registers:** All eight registers after the run.
//! 3. **Memory:** Every data-memory word after the run.

use tracing::info;

use crate::common::Word;
use crate::common::constants::NUM_REGS;
use crate::common::error::VerifyError;
use crate::common::retire::Retirement;
use crate::config::Config;
use crate::core::arch::imem::{InstructionSource, Program};
use crate::sim::oracle::Oracle;
use crate::sim::simulator::Simulator;
use crate::stats::SimStats;

/// Initial register and memory contents applied to both models.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preload {
    regs: Vec<(usize, Word)>,
    mem: Vec<(Word, Vec<Word>)>,
}

impl Preload {
    /// An empty preload: all registers and memory zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets register `idx` to `value`.
    #[must_use]
    pub fn reg(mut self, idx: usize, value: Word) -> Self {
        self.regs.push((idx, value));
        self
    }

    /// Places `data` in memory starting at `base`.
    #[must_use]
    pub fn mem(mut self, base: Word, data: &[Word]) -> Self {
        self.mem.push((base, data.to_vec()));
        self
    }

    /// Applies the preload to a simulator.
    pub fn apply_to_sim<S: InstructionSource>(&self, sim: &mut Simulator<S>) {
        for &(idx, value) in &self.regs {
            sim.set_reg(idx, value);
        }
        for (base, data) in &self.mem {
            sim.load_data(*base, data);
        }
    }

    /// Applies the preload to an oracle.
    pub fn apply_to_oracle(&self, oracle: &mut Oracle) {
        for &(idx, value) in &self.regs {
            oracle.set_reg(idx, value);
        }
        for (base, data) in &self.mem {
            oracle.load_data(*base, data);
        }
    }
}

/// Outcome of a successful verification.
#[derive(Clone, Debug)]
pub struct VerifyReport {
    /// Ticks the pipeline took to drain.
    pub ticks: u64,
    /// The matching retirement sequence.
    pub retirements: Vec<Retirement>,
    /// Pipeline statistics.
    pub stats: SimStats,
    /// Final register file.
    pub regs: [Word; NUM_REGS],
}

/// Runs `program` on both models and compares them.
///
/// # Errors
///
/// Returns [`VerifyError::Sim`] if the pipeline does not drain within the tick
/// budget, and the other [`VerifyError`] variants at the first divergence.
pub fn verify(
    program: &Program,
    preload: &Preload,
    config: &Config,
) -> Result<VerifyReport, VerifyError> {
    let mut sim = Simulator::new(config, program);
    preload.apply_to_sim(&mut sim);
    let ticks = sim.run_until_drained()?;

    let mut oracle = Oracle::new(config);
    preload.apply_to_oracle(&mut oracle);
    let expected = oracle.run(program, config.general.max_ticks);

    let actual = sim.retirements();
    if let Some((index, (pipeline, oracle))) = actual
        .iter()
        .zip(&expected)
        .enumerate()
        .find(|(_, (p, o))| p != o)
    {
        return Err(VerifyError::Retirement {
            index,
            pipeline: *pipeline,
            oracle: *oracle,
        });
    }
    if actual.len() != expected.len() {
        return Err(VerifyError::RetireCount {
            pipeline: actual.len(),
            oracle: expected.len(),
        });
    }

    let regs = sim.cpu.regs.snapshot();
    if let Some((index, (&pipeline, &oracle))) = regs
        .iter()
        .zip(oracle.regs().snapshot().iter())
        .enumerate()
        .find(|(_, (p, o))| p != o)
    {
        return Err(VerifyError::Register {
            index,
            pipeline,
            oracle,
        });
    }

    if let Some((address, (&pipeline, &oracle))) = sim
        .cpu
        .dmem
        .words()
        .iter()
        .zip(oracle.dmem().words())
        .enumerate()
        .find(|(_, (p, o))| p != o)
    {
        return Err(VerifyError::Memory {
            address,
            pipeline,
            oracle,
        });
    }

    info!(
        ticks,
        retired = actual.len(),
        bubbles = sim.stats().stall_bubbles(),
        "pipeline matches oracle"
    );
    Ok(VerifyReport {
        ticks,
        retirements: actual.to_vec(),
        stats: sim.stats().clone(),
        regs,
    })
}
