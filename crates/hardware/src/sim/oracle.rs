//! Architectural Oracle.
//!
//! A non-pipelined reference model: one instruction per step, with its own
//! registers, data memory and program counter. Each opcode is executed
//! directly from its architectural definition, independent of the pipeline's
//! control signals, so that the two models only agree if the pipeline is right.

use crate::common::Word;
use crate::common::constants::LUI_SHIFT;
use crate::common::retire::{Effect, Retirement};
use crate::config::Config;
use crate::core::arch::dmem::DataMemory;
use crate::core::arch::gpr::Gpr;
use crate::core::arch::imem::InstructionSource;
use crate::core::pipeline::signals::AluOp;
use crate::core::units::alu::Alu;
use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;

/// Single-step architectural simulator.
#[derive(Clone, Debug)]
pub struct Oracle {
    regs: Gpr,
    dmem: DataMemory,
    pc: Word,
    retired: u64,
}

impl Oracle {
    /// Creates an oracle with the same reset state as a core built from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            dmem: DataMemory::from_config(&config.memory),
            pc: config.general.start_pc,
            retired: 0,
        }
    }

    /// Executes `inst` as the instruction at the current program counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use r16sim_core::config::Config;
    /// use r16sim_core::common::Effect;
    /// use r16sim_core::isa::{Instruction, Opcode};
    /// use r16sim_core::sim::Oracle;
    ///
    /// let mut oracle = Oracle::new(&Config::default());
    /// let r = oracle.execute_one(Instruction::ri(Opcode::Lui, 1, 2));
    /// assert_eq!(r.effect, Effect::Register { index: 1, value: 128 });
    /// assert_eq!(oracle.pc(), 1);
    /// ```
    pub fn execute_one(&mut self, inst: Instruction) -> Retirement {
        let pc = self.pc;
        let next = pc.wrapping_add(1);
        let s1 = self.regs.read(inst.src1);
        let s2 = self.regs.read(inst.src2);
        let add = |a, b| Alu::compute(AluOp::Add, a, b).result;

        let (result, next_pc) = match inst.opcode {
            Opcode::Add => (Some(add(s1, s2)), next),
            Opcode::Addi => (Some(add(s1, inst.imm)), next),
            Opcode::Nand => (Some(Alu::compute(AluOp::Nand, s1, s2).result), next),
            Opcode::Lui => (Some(inst.imm << LUI_SHIFT), next),
            Opcode::Lw => (Some(self.dmem.read(add(s1, inst.imm))), next),
            Opcode::Sw => (None, next),
            Opcode::Beq => {
                let taken = Alu::compute(AluOp::Add, s1, s2).equal;
                (None, if taken { add(next, inst.imm) } else { next })
            }
            Opcode::Jalr => (Some(next), s1),
        };

        let effect = if inst.opcode.is_store() {
            let address = add(s1, inst.imm);
            self.dmem.write(address, s2);
            Effect::Memory { address, value: s2 }
        } else {
            match result {
                Some(value) if inst.target != 0 => {
                    self.regs.write(inst.target, value);
                    Effect::Register {
                        index: inst.target,
                        value,
                    }
                }
                _ => Effect::None,
            }
        };

        self.pc = next_pc;
        self.retired += 1;
        Retirement {
            pc,
            word: inst.word,
            effect,
        }
    }

    /// Fetches, decodes and executes one instruction from `source`.
    ///
    /// Returns `None` without changing state when the source has no
    /// instruction at the program counter.
    pub fn step<S: InstructionSource + ?Sized>(&mut self, source: &S) -> Option<Retirement> {
        let word = source.fetch(self.pc)?;
        Some(self.execute_one(decode(word)))
    }

    /// Steps until the program ends or `max_steps` instructions have retired.
    pub fn run<S: InstructionSource + ?Sized>(
        &mut self,
        source: &S,
        max_steps: u64,
    ) -> Vec<Retirement> {
        let mut log = Vec::new();
        for _ in 0..max_steps {
            match self.step(source) {
                Some(r) => log.push(r),
                None => break,
            }
        }
        log
    }

    /// Current program counter.
    pub const fn pc(&self) -> Word {
        self.pc
    }

    /// Instructions executed so far.
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Register file.
    pub const fn regs(&self) -> &Gpr {
        &self.regs
    }

    /// Data memory.
    pub const fn dmem(&self) -> &DataMemory {
        &self.dmem
    }

    /// Reads register `idx`.
    pub fn reg(&self, idx: usize) -> Word {
        self.regs.read(idx)
    }

    /// Writes register `idx`; writes to `r0` are ignored.
    pub fn set_reg(&mut self, idx: usize, value: Word) {
        self.regs.write(idx, value);
    }

    /// Reads data memory at `addr`.
    pub fn mem(&self, addr: Word) -> Word {
        self.dmem.read(addr)
    }

    /// Copies `data` into data memory starting at `base`.
    pub fn load_data(&mut self, base: Word, data: &[Word]) {
        self.dmem.load(base, data);
    }
}
