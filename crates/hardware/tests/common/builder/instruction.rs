//! Instruction constructors taking operands in assembler order.
//!
//! `sw` and `beq` name their data/compare register first, matching
//! `sw rSrc, rBase, imm` and `beq rA, rB, offset`.

use r16sim_core::Program;
use r16sim_core::isa::{Instruction, Opcode};

pub fn add(rt: usize, rs1: usize, rs2: usize) -> Instruction {
    Instruction::rrr(Opcode::Add, rt, rs1, rs2)
}

pub fn nand(rt: usize, rs1: usize, rs2: usize) -> Instruction {
    Instruction::rrr(Opcode::Nand, rt, rs1, rs2)
}

pub fn addi(rt: usize, rs: usize, imm: i16) -> Instruction {
    Instruction::rri(Opcode::Addi, rt, rs, imm)
}

pub fn lui(rt: usize, imm: u16) -> Instruction {
    Instruction::ri(Opcode::Lui, rt, imm)
}

pub fn sw(rsrc: usize, rbase: usize, imm: i16) -> Instruction {
    Instruction::rri(Opcode::Sw, rsrc, rbase, imm)
}

pub fn lw(rt: usize, rbase: usize, imm: i16) -> Instruction {
    Instruction::rri(Opcode::Lw, rt, rbase, imm)
}

pub fn beq(ra: usize, rb: usize, offset: i16) -> Instruction {
    Instruction::rri(Opcode::Beq, ra, rb, offset)
}

pub fn jalr(rt: usize, rs: usize) -> Instruction {
    Instruction::rri(Opcode::Jalr, rt, rs, 0)
}

pub fn nop() -> Instruction {
    Instruction::nop()
}

/// Builds an image with instructions placed at explicit addresses; gaps are
/// filled with `nop`.
#[derive(Default)]
pub struct ProgramBuilder {
    words: Vec<u16>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends instructions at the next free address.
    pub fn push(mut self, insts: &[Instruction]) -> Self {
        self.words.extend(insts.iter().map(Instruction::encode));
        self
    }

    /// Places instructions starting at `addr`, padding up to it.
    pub fn at(mut self, addr: usize, insts: &[Instruction]) -> Self {
        assert!(addr >= self.words.len(), "placement overlaps existing code");
        self.words.resize(addr, nop().encode());
        self.push(insts)
    }

    pub fn build(self) -> Program {
        Program::new(self.words)
    }
}
