//! Simulation harness around the core.
//!
//! Provides program loading, the top-level simulator, the architectural
//! oracle and differential verification between the two.

/// Program image loading.
pub mod loader;

/// Architectural single-step reference model.
pub mod oracle;

/// Top-level simulator: core plus instruction source.
pub mod simulator;

/// Differential verification against the oracle.
pub mod verify;

pub use loader::load_program;
pub use oracle::Oracle;
pub use simulator::Simulator;
pub use verify::{Preload, VerifyReport, verify};
