//! Arithmetic Logic Unit (ALU).
//!
//! A pure two-operand function with a 1-bit operation selector. Besides the
//! result it reports whether the two operands are equal, which the execute
//! stage records as the branch-taken condition.

use crate::common::Word;
use crate::core::pipeline::signals::AluOp;

/// Result of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Computed value.
    pub result: Word,
    /// Whether the two inputs were equal.
    pub equal: bool,
}

/// Arithmetic Logic Unit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Computes `op(a, b)` and the `a == b` flag.
    ///
    /// # Arguments
    ///
    /// * `op` - Selector: [`AluOp::Add`] (wrapping) or [`AluOp::Nand`].
    /// * `a`  - First operand.
    /// * `b`  - Second operand.
    ///
    /// # Examples
    ///
    /// ```
    /// use r16sim_core::core::units::alu::Alu;
    /// use r16sim_core::core::pipeline::signals::AluOp;
    ///
    /// let out = Alu::compute(AluOp::Add, 0xFFFF, 2);
    /// assert_eq!(out.result, 1);
    /// assert!(!out.equal);
    ///
    /// let out = Alu::compute(AluOp::Nand, 0x00FF, 0x0F0F);
    /// assert_eq!(out.result, 0xFFF0);
    /// ```
    #[inline(always)]
    pub const fn compute(op: AluOp, a: Word, b: Word) -> AluOutput {
        let result = match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Nand => !(a & b),
        };
        AluOutput {
            result,
            equal: a == b,
        }
    }

    /// Computes with a raw selector bit: `0` is addition, `1` is NAND.
    pub const fn compute_sel(selector: u8, a: Word, b: Word) -> AluOutput {
        Self::compute(AluOp::from_selector(selector), a, b)
    }
}
