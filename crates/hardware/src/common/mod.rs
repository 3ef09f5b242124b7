//! Common types and constants shared by the ISA, the core and the simulator.
//!
//! This module provides the building blocks every other module leans on:
//! 1. **Word type:** The 16-bit machine word used for data, addresses and instructions.
//! 2. **Constants:** Field shifts and masks, register count, pipeline geometry.
//! 3. **Error Handling:** Error enums for assembly, loading, configuration and verification.
//! 4. **Retirement Records:** The architectural effect of one completed instruction.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for the fallible, harness-level operations.
pub mod error;

/// Retirement records shared by the pipeline and the oracle.
pub mod retire;

/// A 16-bit machine word.
///
/// Registers, data memory cells, instruction encodings and addresses are all
/// one word wide. Address arithmetic wraps at 16 bits.
pub type Word = u16;

pub use constants::NUM_REGS;
pub use error::{AsmError, ConfigError, LoadError, SimError, VerifyError};
pub use retire::{Effect, Retirement};
