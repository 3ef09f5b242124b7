//! Cycle-accurate simulator for a 16-bit, eight-register RISC core.
//!
//! This crate implements a five-stage in-order pipeline with the following:
//! 1. **ISA:** Eight opcodes in three formats, with encoder, decoder, assembler and disassembler.
//! 2. **Core:** Fetch, decode, execute, memory and writeback slots advanced by a two-phase tick.
//! 3. **Hazards:** Operand forwarding, a cascaded stall controller and branch/jump redirect.
//! 4. **Storage:** Register file with a hardwired zero and word-addressed data memory.
//! 5. **Simulation:** Loader, configuration, statistics, an architectural oracle and
//!    differential verification against it.

/// Common types and constants (word type, errors, retirement records).
pub mod common;
/// Simulator configuration (defaults, read timing, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, arch state, functional units, tick).
pub mod core;
/// Instruction set (opcodes, decode, instruction, assembler, disassembler).
pub mod isa;
/// Program loader, simulator, oracle and verification.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse from JSON.
pub use crate::config::Config;
/// Main CPU type; holds register file, data memory, pipeline slots and stats.
pub use crate::core::Cpu;
/// Program image fetched by the core.
pub use crate::core::arch::imem::Program;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
