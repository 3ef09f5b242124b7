//! Architectural storage.
//!
//! This module contains the storage the core reads and writes. It includes:
//! 1. **GPRs:** The eight-entry register file with `r0` hardwired to zero.
//! 2. **Data Memory:** Word-addressed data storage with a drop/default out-of-range policy.
//! 3. **Instruction Memory:** The instruction source contract and the program image.

/// Word-addressed data memory.
pub mod dmem;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Instruction source trait and program image.
pub mod imem;
