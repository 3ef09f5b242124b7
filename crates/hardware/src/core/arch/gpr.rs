//! General-Purpose Register File.
//!
//! This module implements the eight-entry register file. It performs the following:
//! 1. **Storage:** Maintains registers `r0`-`r7`.
//! 2. **Invariant Enforcement:** Register `r0` always reads zero; writes to it are dropped.
//! 3. **Debugging:** Renders the register state for CLI output and test diagnostics.

use std::fmt;

use crate::common::{NUM_REGS, Word};

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [Word; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with every register zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    ///
    /// # Returns
    ///
    /// The stored value. Register `r0` and out-of-range indices read zero.
    pub fn read(&self, idx: usize) -> Word {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a register.
    ///
    /// Writes to `r0` and to out-of-range indices are no-ops.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    /// * `val` - The value to write.
    pub fn write(&mut self, idx: usize, val: Word) {
        if let Some(slot) = self.regs.get_mut(idx).filter(|_| idx != 0) {
            *slot = val;
        }
    }

    /// Returns a copy of all eight registers, `r0` first.
    pub const fn snapshot(&self) -> [Word; NUM_REGS] {
        self.regs
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.regs.chunks(2).enumerate() {
            writeln!(
                f,
                "r{:<2}={:#06x} r{:<2}={:#06x}",
                2 * i,
                pair[0],
                2 * i + 1,
                pair[1]
            )?;
        }
        Ok(())
    }
}
