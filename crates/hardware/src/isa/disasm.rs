//! Instruction Disassembler.
//!
//! Renders instructions in the syntax accepted by [`crate::isa::asm`], so a
//! disassembly listing reassembles to the same words.
//!
//! # Usage
//!
//! ```
//! use r16sim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x2581), "addi r1, r3, 1");
//! ```

use std::fmt;

use crate::common::Word;
use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;

/// Disassembles a 16-bit word into assembler syntax.
///
/// # Arguments
///
/// * `word` - The raw encoding.
pub fn disassemble(word: Word) -> String {
    decode(word).to_string()
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.opcode.mnemonic();
        match self.opcode {
            Opcode::Add | Opcode::Nand => {
                write!(f, "{m} r{}, r{}, r{}", self.target, self.src1, self.src2)
            }
            Opcode::Addi | Opcode::Lw => {
                write!(f, "{m} r{}, r{}, {}", self.target, self.src1, self.imm_signed())
            }
            Opcode::Sw | Opcode::Beq => {
                write!(f, "{m} r{}, r{}, {}", self.src2, self.src1, self.imm_signed())
            }
            Opcode::Lui => write!(f, "{m} r{}, {:#x}", self.target, self.imm),
            Opcode::Jalr => write!(f, "{m} r{}, r{}", self.target, self.src1),
        }
    }
}
