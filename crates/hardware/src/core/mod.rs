//! Core processor implementation.
//!
//! This module contains the pipelined core: architectural storage, the
//! arithmetic unit, the five-stage pipeline, and the orchestrator that ticks
//! them as one synchronous state machine.

/// Architectural storage (register file, data memory, instruction source).
pub mod arch;

/// CPU core and its two-phase tick.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, forwarding, redirect).
pub mod pipeline;

/// Execution units (ALU).
pub mod units;

pub use self::cpu::Cpu;
