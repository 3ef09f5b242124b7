//! Global Constants.
//!
//! This module defines the fixed geometry of the machine. It includes:
//! 1. **Machine Constants:** Register count and address-space size.
//! 2. **Instruction Constants:** Field shifts and masks for the three instruction formats.
//! 3. **Pipeline Constants:** Stage count and fill latency.

/// Number of general-purpose registers (`r0`-`r7`).
pub const NUM_REGS: usize = 8;

/// Number of addressable words in a 16-bit address space.
pub const ADDRESS_SPACE: usize = 1 << 16;

/// Bit position of the opcode field (bits 15-13).
pub const OPCODE_SHIFT: u32 = 13;

/// Mask for the 3-bit opcode field after shifting.
pub const OPCODE_MASK: u16 = 0x7;

/// Bit position of register field A (bits 12-10).
pub const REG_A_SHIFT: u32 = 10;

/// Bit position of register field B (bits 9-7).
pub const REG_B_SHIFT: u32 = 7;

/// Bit position of register field C (bits 2-0).
pub const REG_C_SHIFT: u32 = 0;

/// Mask for a 3-bit register field after shifting.
pub const REG_MASK: u16 = 0x7;

/// Bits 6-3 of a three-register instruction; must be zero in a canonical encoding.
pub const RRR_UNUSED_MASK: u16 = 0x0078;

/// Mask for the 7-bit signed immediate (bits 6-0).
pub const IMM7_MASK: u16 = 0x007F;

/// Sign bit of the 7-bit immediate.
pub const IMM7_SIGN: u16 = 0x0040;

/// Smallest value representable by the 7-bit signed immediate.
pub const IMM7_MIN: i32 = -64;

/// Largest value representable by the 7-bit signed immediate.
pub const IMM7_MAX: i32 = 63;

/// Mask for the 10-bit unsigned immediate (bits 9-0).
pub const IMM10_MASK: u16 = 0x03FF;

/// Largest value representable by the 10-bit unsigned immediate.
pub const IMM10_MAX: i32 = 1023;

/// Shift applied by `lui` to place its immediate in the upper ten bits.
pub const LUI_SHIFT: u32 = 6;

/// Number of pipeline stages.
pub const PIPELINE_DEPTH: usize = 5;

/// Ticks between the fetch of the last instruction and its retirement.
pub const FILL_LATENCY: u64 = 4;
