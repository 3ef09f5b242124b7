//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! core. It provides:
//! 1. **Defaults:** Baseline values for every field.
//! 2. **Structures:** Hierarchical config for general run control and data memory.
//! 3. **Enums:** The data-memory read timing policy.
//!
//! Configuration is deserialized from JSON; every field is optional and falls
//! back to its default, so `{}` is a valid document.

use serde::Deserialize;

use crate::common::Word;
use crate::common::constants::ADDRESS_SPACE;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::Word;

    /// Address of the first fetch after reset.
    pub const START_PC: Word = 0;

    /// Tick budget for runs that wait for the pipeline to drain.
    ///
    /// Programs that loop forever fail with a tick-limit error instead of hanging.
    pub const MAX_TICKS: u64 = 1_000_000;

    /// Number of data-memory words.
    pub const DATA_WORDS: usize = 1024;

    /// Value returned by reads outside data memory.
    pub const READ_DEFAULT: Word = 0;
}

/// When a data-memory read returns its word.
///
/// The memory stage performs at most one access per tick, so both policies
/// deliver the same architectural value with the same timing; they differ
/// only in where the sample is taken within the tick. `NextTick` exists so a
/// core can be run against a registered-read storage contract and shown to
/// be indistinguishable from a combinational one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReadTiming {
    /// Combinational read: the word is sampled while computing the next state.
    #[default]
    SameTick,
    /// Registered read: the address is latched and the word is sampled at the
    /// tick boundary, after this tick's storage writes are applied.
    NextTick,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use r16sim_core::config::{Config, ReadTiming};
///
/// let config = Config::from_json(r#"{
///     "general": { "trace_instructions": true, "max_ticks": 5000 },
///     "memory": { "data_words": 256, "read_default": 65535, "read_timing": "NextTick" }
/// }"#).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.start_pc, 0);
/// assert_eq!(config.memory.data_words, 256);
/// assert_eq!(config.memory.read_timing, ReadTiming::NextTick);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Data memory configuration.
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize but cannot be honoured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if data memory is empty or larger than
    /// the 16-bit address space, or if the tick budget is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.data_words == 0 || self.memory.data_words > ADDRESS_SPACE {
            return Err(ConfigError::Invalid(format!(
                "memory.data_words must be in 1..={ADDRESS_SPACE}, got {}",
                self.memory.data_words
            )));
        }
        if self.general.max_ticks == 0 {
            return Err(ConfigError::Invalid(
                "general.max_ticks must be nonzero".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    /// Emit an `info!` commit-log event for every retirement.
    pub trace_instructions: bool,
    /// Address of the first fetch.
    pub start_pc: Word,
    /// Tick budget for drain-until-empty runs.
    pub max_ticks: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::START_PC,
            max_ticks: defaults::MAX_TICKS,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    /// Number of addressable words; addresses at or beyond this are out of range.
    pub data_words: usize,
    /// Value returned by out-of-range reads.
    pub read_default: Word,
    /// Read timing policy.
    pub read_timing: ReadTiming,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
            read_default: defaults::READ_DEFAULT,
            read_timing: ReadTiming::default(),
        }
    }
}
