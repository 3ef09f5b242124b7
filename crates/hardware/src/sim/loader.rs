//! Program Loader.
//!
//! This module reads program images from disk. It handles:
//! 1. **Assembly source:** Files ending in `.s` or `.asm` are assembled.
//! 2. **Hex images:** Anything else is one 16-bit word per line, in hexadecimal
//!    with an optional `0x` prefix. `#` starts a comment; blank lines are skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::Word;
use crate::common::constants::ADDRESS_SPACE;
use crate::common::error::LoadError;
use crate::core::arch::imem::Program;
use crate::isa::asm::assemble;

/// Loads a program image from `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, [`LoadError::Asm`] for
/// assembly errors, and the remaining variants for malformed hex images.
pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_asm = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("s") || e.eq_ignore_ascii_case("asm"));

    let words = if is_asm {
        assemble(&text)?
    } else {
        parse_image(&text)?
    };
    if words.is_empty() {
        return Err(LoadError::Empty);
    }
    debug!(path = %path.display(), words = words.len(), "program loaded");
    Ok(Program::new(words))
}

/// Parses a hex image, one word per line.
///
/// # Errors
///
/// Returns [`LoadError::BadWord`] for a line that is not a 16-bit hex word,
/// [`LoadError::Empty`] if no words are present and [`LoadError::TooLarge`]
/// if the image does not fit the address space.
///
/// # Examples
///
/// ```
/// use r16sim_core::sim::loader::parse_image;
///
/// let words = parse_image("# header\n0x2581\n\nA400 # lw r1, r0, 0\n").unwrap();
/// assert_eq!(words, vec![0x2581, 0xA400]);
/// ```
pub fn parse_image(text: &str) -> Result<Vec<Word>, LoadError> {
    let mut words = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let token = raw.split('#').next().unwrap_or_default().trim();
        if token.is_empty() {
            continue;
        }
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let word = Word::from_str_radix(digits, 16).map_err(|_| LoadError::BadWord {
            line: index + 1,
            token: token.to_string(),
        })?;
        words.push(word);
    }
    if words.is_empty() {
        return Err(LoadError::Empty);
    }
    if words.len() > ADDRESS_SPACE {
        return Err(LoadError::TooLarge(words.len()));
    }
    Ok(words)
}
