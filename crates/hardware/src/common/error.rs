//! Error definitions.
//!
//! Ticking the core never fails: out-of-range memory accesses and writes to
//! `r0` are policy outcomes, and every opcode is defined. The errors here belong
//! to the harness around the core:
//! 1. **Assembly:** Malformed source text.
//! 2. **Loading:** Unreadable or malformed program images.
//! 3. **Configuration:** Malformed or inconsistent JSON configuration.
//! 4. **Simulation:** A run that never drains within its tick budget.
//! 5. **Verification:** Divergence between the pipeline and the oracle.

use std::path::PathBuf;

use thiserror::Error;

use super::Word;
use super::retire::Retirement;

/// Errors produced while assembling source text.
///
/// Every variant except [`AsmError::TooLarge`] carries the 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    /// The mnemonic is not an instruction or directive.
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic {
        /// Source line.
        line: usize,
        /// Offending mnemonic.
        mnemonic: String,
    },

    /// Wrong number of comma-separated operands.
    #[error("line {line}: `{mnemonic}` takes {expected} operand(s), found {found}")]
    OperandCount {
        /// Source line.
        line: usize,
        /// Mnemonic being assembled.
        mnemonic: String,
        /// Operands the mnemonic requires.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// A register operand is not `r0`-`r7`.
    #[error("line {line}: invalid register `{token}`")]
    BadRegister {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A numeric operand does not parse.
    #[error("line {line}: invalid number `{token}`")]
    BadNumber {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// An immediate does not fit its field.
    #[error("line {line}: immediate {value} outside {min}..={max}")]
    ImmediateRange {
        /// Source line.
        line: usize,
        /// Resolved immediate.
        value: i32,
        /// Smallest legal value.
        min: i32,
        /// Largest legal value.
        max: i32,
    },

    /// A label operand is never defined.
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel {
        /// Source line.
        line: usize,
        /// Missing label.
        label: String,
    },

    /// A label is defined twice.
    #[error("line {line}: label `{label}` already defined")]
    DuplicateLabel {
        /// Source line of the second definition.
        line: usize,
        /// Duplicated label.
        label: String,
    },

    /// The assembled image does not fit the 16-bit address space.
    #[error("program exceeds the 16-bit instruction address space")]
    TooLarge,
}

/// Errors produced while loading a program image from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read `{}`", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of a text image is not a 16-bit hexadecimal word.
    #[error("line {line}: malformed word `{token}`")]
    BadWord {
        /// Source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// The image contains no words.
    #[error("program image is empty")]
    Empty,

    /// The image holds more words than the address space.
    #[error("program image holds {0} words, more than the 16-bit address space")]
    TooLarge(usize),

    /// Assembly source failed to assemble.
    #[error(transparent)]
    Asm(#[from] AsmError),
}

/// Errors produced while parsing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document is malformed or has the wrong shape.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the core cannot honour.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors produced while running the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The pipeline still held instructions after the tick budget ran out.
    #[error("pipeline did not drain within {limit} ticks")]
    TickLimit {
        /// The exhausted budget.
        limit: u64,
    },
}

/// Divergence between the pipelined core and the architectural oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The pipeline run itself failed.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The two models retired different numbers of instructions.
    #[error("pipeline retired {pipeline} instructions, oracle retired {oracle}")]
    RetireCount {
        /// Retirements observed on the pipeline.
        pipeline: usize,
        /// Retirements observed on the oracle.
        oracle: usize,
    },

    /// The retirement streams diverge.
    #[error("retirement {index} differs: pipeline `{pipeline}`, oracle `{oracle}`")]
    Retirement {
        /// Position of the first mismatch.
        index: usize,
        /// Pipeline record.
        pipeline: Retirement,
        /// Oracle record.
        oracle: Retirement,
    },

    /// Final register state differs.
    #[error("r{index} differs: pipeline {pipeline:#06x}, oracle {oracle:#06x}")]
    Register {
        /// Register index.
        index: usize,
        /// Pipeline value.
        pipeline: Word,
        /// Oracle value.
        oracle: Word,
    },

    /// Final data memory differs.
    #[error("mem[{address:#06x}] differs: pipeline {pipeline:#06x}, oracle {oracle:#06x}")]
    Memory {
        /// Word address.
        address: usize,
        /// Pipeline value.
        pipeline: Word,
        /// Oracle value.
        oracle: Word,
    },
}
