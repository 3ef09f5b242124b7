//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipelined core. It provides:
//! 1. **Cycle and IPC:** Total ticks, fetched and retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Retirement counts by category (ALU, LUI, load, store, branch, jump).
//! 3. **Stalls:** Bubbles by cause (fetch-local, decode-local, load-use) and freeze cycles.
//! 4. **Branches:** Taken and not-taken resolutions.
//! 5. **Forwarding:** Operands supplied by the execute, memory and writeback slots.
//! 6. **Memory:** Stores dropped for being out of range.

use std::fmt::{self, Write};
use std::time::Instant;

use crate::core::pipeline::forwarding::Bypass;
use crate::isa::opcodes::Opcode;

/// Simulation statistics structure tracking all performance metrics.
///
/// Collects statistics about instruction flow, stalls, branch resolution,
/// forwarding and execution time for performance analysis.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks elapsed.
    pub cycles: u64,
    /// Number of instructions read from the instruction source.
    pub instructions_fetched: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Count of `add`, `addi` and `nand` instructions retired.
    pub inst_alu: u64,
    /// Count of `lui` instructions retired.
    pub inst_lui: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch instructions retired.
    pub inst_branch: u64,
    /// Count of jump instructions retired.
    pub inst_jump: u64,

    /// Bubbles inserted by fetch because a jump or branch occupied the fetch slot.
    pub bubbles_fetch: u64,
    /// Bubbles inserted by decode because a branch occupied the decode slot.
    pub bubbles_decode: u64,
    /// Bubbles inserted by execute for a load-use hazard.
    pub bubbles_load_use: u64,
    /// Ticks in which fetch was frozen by a downstream stall.
    pub freeze_cycles: u64,

    /// Branches resolved taken.
    pub branches_taken: u64,
    /// Branches resolved not taken.
    pub branches_not_taken: u64,

    /// Operands forwarded from the execute slot.
    pub forwards_execute: u64,
    /// Operands forwarded from the memory slot.
    pub forwards_memory: u64,
    /// Operands forwarded from the writeback slot.
    pub forwards_writeback: u64,

    /// Stores whose address was outside data memory.
    pub dropped_stores: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_lui: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            bubbles_fetch: 0,
            bubbles_decode: 0,
            bubbles_load_use: 0,
            freeze_cycles: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            forwards_execute: 0,
            forwards_memory: 0,
            forwards_writeback: 0,
            dropped_stores: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"instruction_mix"`,
/// `"branch"`, `"forwarding"`, `"memory"`. Pass an empty slice to
/// `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &[
    "summary",
    "stalls",
    "instruction_mix",
    "branch",
    "forwarding",
    "memory",
];

impl SimStats {
    /// Counts a retirement in the instruction mix.
    pub const fn record_retirement(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        match op {
            Opcode::Add | Opcode::Addi | Opcode::Nand => self.inst_alu += 1,
            Opcode::Lui => self.inst_lui += 1,
            Opcode::Lw => self.inst_load += 1,
            Opcode::Sw => self.inst_store += 1,
            Opcode::Beq => self.inst_branch += 1,
            Opcode::Jalr => self.inst_jump += 1,
        }
    }

    /// Counts an operand that did not come from the latched register read.
    pub const fn record_forward(&mut self, from: Bypass) {
        match from {
            Bypass::Execute => self.forwards_execute += 1,
            Bypass::Memory => self.forwards_memory += 1,
            Bypass::Writeback => self.forwards_writeback += 1,
            Bypass::Zero | Bypass::Latched | Bypass::Pending => {}
        }
    }

    /// Total stall-induced bubbles.
    pub const fn stall_bubbles(&self) -> u64 {
        self.bubbles_fetch + self.bubbles_decode + self.bubbles_load_use
    }

    /// Retired instructions per tick.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Ticks per retired instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Renders the requested sections; an empty slice selects all of them.
    ///
    /// # Arguments
    ///
    /// * `out` - Destination for the report.
    /// * `sections` - Section names from [`STATS_SECTIONS`], or empty for all.
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    pub fn write_sections(&self, out: &mut impl Write, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        writeln!(out, "==========================================================")?;
        writeln!(out, "R16 PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_fetched              {}", self.instructions_fetched)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
            writeln!(out, "sim_cpi                  {:.4}", self.cpi())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("stalls") {
            writeln!(out, "STALLS")?;
            for (name, n) in [
                ("bubbles.fetch_local", self.bubbles_fetch),
                ("bubbles.decode_local", self.bubbles_decode),
                ("bubbles.load_use", self.bubbles_load_use),
                ("bubbles.total", self.stall_bubbles()),
                ("freeze_cycles", self.freeze_cycles),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, cyc))?;
            }
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.lui", self.inst_lui),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr))?;
            }
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("branch") {
            let total = self.branches_taken + self.branches_not_taken;
            let rate = if total > 0 {
                pct(self.branches_taken, total as f64)
            } else {
                0.0
            };
            writeln!(out, "BRANCHES")?;
            writeln!(out, "  branch.resolved        {total}")?;
            writeln!(out, "  branch.taken           {}", self.branches_taken)?;
            writeln!(out, "  branch.not_taken       {}", self.branches_not_taken)?;
            writeln!(out, "  branch.taken_rate      {rate:.2}%")?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("forwarding") {
            writeln!(out, "FORWARDING")?;
            writeln!(out, "  fwd.execute            {}", self.forwards_execute)?;
            writeln!(out, "  fwd.memory             {}", self.forwards_memory)?;
            writeln!(out, "  fwd.writeback          {}", self.forwards_writeback)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("memory") {
            writeln!(out, "MEMORY")?;
            writeln!(out, "  stores.dropped         {}", self.dropped_stores)?;
        }
        writeln!(out, "==========================================================")
    }

    /// Returns the requested sections as a string.
    pub fn report(&self, sections: &[String]) -> String {
        let mut text = String::new();
        let _ = self.write_sections(&mut text, sections);
        text
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
