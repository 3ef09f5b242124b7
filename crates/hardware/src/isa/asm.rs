//! Two-pass assembler.
//!
//! Syntax, one statement per line:
//!
//! ```text
//! # comment            ; also a comment
//! start:  lui  r1, 0x1
//!         addi r1, r1, -3
//! loop:   beq  r1, r0, done
//!         addi r1, r1, -1
//!         beq  r0, r0, loop
//! done:   jalr r0, r7
//! value:  .fill 42
//! buffer: .space 4
//! ```
//!
//! The first pass assigns addresses to labels; the second encodes. A label
//! used as a `beq` offset becomes `label - (pc + 1)`; anywhere else it is the
//! label's absolute address (shifted right by six for `lui`).

use std::collections::HashMap;

use crate::common::Word;
use crate::common::constants::{ADDRESS_SPACE, IMM7_MAX, IMM7_MIN, IMM10_MAX, LUI_SHIFT, NUM_REGS};
use crate::common::error::AsmError;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::{Format, Opcode};

/// One non-empty source statement.
#[derive(Debug)]
struct Statement<'a> {
    line: usize,
    mnemonic: &'a str,
    operands: Vec<&'a str>,
}

impl Statement<'_> {
    /// Number of words the statement occupies.
    fn size(&self) -> Result<usize, AsmError> {
        if self.mnemonic.eq_ignore_ascii_case(".space") {
            self.expect_operands(1)?;
            let n = parse_number(self.operands[0]).ok_or_else(|| AsmError::BadNumber {
                line: self.line,
                token: self.operands[0].to_string(),
            })?;
            usize::try_from(n).map_err(|_| AsmError::ImmediateRange {
                line: self.line,
                value: n,
                min: 0,
                max: ADDRESS_SPACE as i32,
            })
        } else {
            Ok(1)
        }
    }

    fn expect_operands(&self, expected: usize) -> Result<(), AsmError> {
        if self.operands.len() == expected {
            Ok(())
        } else {
            Err(AsmError::OperandCount {
                line: self.line,
                mnemonic: self.mnemonic.to_string(),
                expected,
                found: self.operands.len(),
            })
        }
    }
}

/// Assembles source text into a program image.
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered, tagged with its source line.
///
/// # Examples
///
/// ```
/// use r16sim_core::isa::asm::assemble;
///
/// let words = assemble("lw r1, r0, 0\nadd r2, r1, r1").unwrap();
/// assert_eq!(words, vec![0xA400, 0x0881]);
/// ```
pub fn assemble(source: &str) -> Result<Vec<Word>, AsmError> {
    let mut labels: HashMap<&str, usize> = HashMap::new();
    let mut statements = Vec::new();
    let mut address = 0_usize;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let mut text = strip_comment(raw).trim();

        if let Some((head, rest)) = text.split_once(':') {
            let label = head.trim();
            if is_identifier(label) {
                if labels.insert(label, address).is_some() {
                    return Err(AsmError::DuplicateLabel {
                        line,
                        label: label.to_string(),
                    });
                }
                text = rest.trim();
            }
        }
        if text.is_empty() {
            continue;
        }

        let (mnemonic, rest) = text
            .split_once(char::is_whitespace)
            .map_or((text, ""), |(m, r)| (m, r.trim()));
        let operands = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(',').map(str::trim).collect()
        };
        let statement = Statement {
            line,
            mnemonic,
            operands,
        };
        address += statement.size()?;
        statements.push(statement);
    }

    if address > ADDRESS_SPACE {
        return Err(AsmError::TooLarge);
    }

    let mut words = Vec::with_capacity(address);
    for statement in &statements {
        let pc = words.len();
        encode_statement(statement, pc, &labels, &mut words)?;
    }
    Ok(words)
}

fn encode_statement(
    stmt: &Statement<'_>,
    pc: usize,
    labels: &HashMap<&str, usize>,
    out: &mut Vec<Word>,
) -> Result<(), AsmError> {
    let line = stmt.line;
    let mnemonic = stmt.mnemonic.to_ascii_lowercase();

    match mnemonic.as_str() {
        "nop" => {
            stmt.expect_operands(0)?;
            out.push(Instruction::nop().word);
            return Ok(());
        }
        ".fill" => {
            stmt.expect_operands(1)?;
            let value = resolve_value(stmt.operands[0], line, labels)?;
            let value = check_range(value, i32::from(i16::MIN), i32::from(Word::MAX), line)?;
            out.push(value as Word);
            return Ok(());
        }
        ".space" => {
            let n = stmt.size()?;
            out.resize(out.len() + n, 0);
            return Ok(());
        }
        _ => {}
    }

    let op = Opcode::from_mnemonic(&mnemonic).ok_or_else(|| AsmError::UnknownMnemonic {
        line,
        mnemonic: stmt.mnemonic.to_string(),
    })?;

    let inst = match (op, op.format()) {
        (_, Format::Rrr) => {
            stmt.expect_operands(3)?;
            let a = parse_register(stmt.operands[0], line)?;
            let b = parse_register(stmt.operands[1], line)?;
            let c = parse_register(stmt.operands[2], line)?;
            Instruction::rrr(op, a, b, c)
        }
        (Opcode::Jalr, _) => {
            stmt.expect_operands(2)?;
            let a = parse_register(stmt.operands[0], line)?;
            let b = parse_register(stmt.operands[1], line)?;
            Instruction::rri(op, a, b, 0)
        }
        (_, Format::Rri) => {
            stmt.expect_operands(3)?;
            let a = parse_register(stmt.operands[0], line)?;
            let b = parse_register(stmt.operands[1], line)?;
            let token = stmt.operands[2];
            let mut imm = resolve_value(token, line, labels)?;
            if op.is_branch() && is_identifier(token) {
                imm -= pc as i32 + 1;
            }
            let imm = check_range(imm, IMM7_MIN, IMM7_MAX, line)?;
            Instruction::rri(op, a, b, imm as i16)
        }
        (_, Format::Ri) => {
            stmt.expect_operands(2)?;
            let a = parse_register(stmt.operands[0], line)?;
            let token = stmt.operands[1];
            let mut imm = resolve_value(token, line, labels)?;
            if is_identifier(token) {
                imm >>= LUI_SHIFT;
            }
            let imm = check_range(imm, 0, IMM10_MAX, line)?;
            Instruction::ri(op, a, imm as Word)
        }
    };
    out.push(inst.word);
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    line.find(['#', ';']).map_or(line, |i| &line[..i])
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_register(token: &str, line: usize) -> Result<usize, AsmError> {
    token
        .strip_prefix(['r', 'R'])
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|&idx| idx < NUM_REGS)
        .ok_or_else(|| AsmError::BadRegister {
            line,
            token: token.to_string(),
        })
}

/// Parses decimal, `0x` hexadecimal or `0b` binary, with an optional leading `-`.
///
/// Only one sign is accepted; `--5`, `+5` and `0x-5` are not numbers.
fn parse_number(token: &str) -> Option<i32> {
    let (negative, body) = token
        .strip_prefix('-')
        .map_or((false, token), |rest| (true, rest));
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, body)
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i32::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn resolve_value(
    token: &str,
    line: usize,
    labels: &HashMap<&str, usize>,
) -> Result<i32, AsmError> {
    if is_identifier(token) {
        labels
            .get(token)
            .map(|&addr| addr as i32)
            .ok_or_else(|| AsmError::UndefinedLabel {
                line,
                label: token.to_string(),
            })
    } else {
        parse_number(token).ok_or_else(|| AsmError::BadNumber {
            line,
            token: token.to_string(),
        })
    }
}

fn check_range(value: i32, min: i32, max: i32, line: usize) -> Result<i32, AsmError> {
    if value < min || value > max {
        Err(AsmError::ImmediateRange {
            line,
            value,
            min,
            max,
        })
    } else {
        Ok(value)
    }
}
