//! Instruction Set Architecture (ISA) Definitions.
//!
//! The machine has eight opcodes in a 3-bit field and three fixed formats.
//! Every 16-bit word decodes to some instruction; there is no illegal encoding.
//!
//! # Formats
//!
//! * `RRR`: `op | A | B | 0000 | C`, register-register-register.
//! * `RRI`: `op | A | B | imm7`, two registers and a signed 7-bit immediate.
//! * `RI`: `op | A | imm10`, one register and an unsigned 10-bit immediate.

/// Two-pass assembler for the textual instruction syntax.
pub mod asm;

/// Field-mapping table and word-to-instruction decoding.
pub mod decode;

/// Instruction disassembler for traces and diagnostics.
pub mod disasm;

/// Decoded instruction type, field extraction and encoding.
pub mod instruction;

/// Opcode and format enumerations.
pub mod opcodes;

pub use decode::decode;
pub use instruction::Instruction;
pub use opcodes::{Format, Opcode};
