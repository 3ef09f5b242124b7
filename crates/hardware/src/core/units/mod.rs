//! Execution units.
//!
//! The core has a single functional unit, the [`alu::Alu`], shared by
//! arithmetic, address generation, link-value computation and the branch
//! equality check.

/// Arithmetic Logic Unit (ALU).
pub mod alu;
