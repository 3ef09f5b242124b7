//! Data Memory.
//!
//! A flat array of 16-bit words, addressed by word. Out-of-range accesses are a
//! policy outcome rather than a fault:
//! 1. **Writes** beyond the configured size are dropped.
//! 2. **Reads** beyond the configured size return the configured default word.

use crate::common::Word;
use crate::config::MemoryConfig;

/// Word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<Word>,
    read_default: Word,
}

impl DataMemory {
    /// Creates a zero-filled memory of `size` words.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of addressable words.
    /// * `read_default` - Value returned by out-of-range reads.
    pub fn new(size: usize, read_default: Word) -> Self {
        Self {
            words: vec![0; size],
            read_default,
        }
    }

    /// Creates a memory sized and configured from `config`.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.data_words, config.read_default)
    }

    /// Number of addressable words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the memory has no addressable words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether `addr` falls inside the memory.
    pub fn contains(&self, addr: Word) -> bool {
        usize::from(addr) < self.words.len()
    }

    /// Reads one word, or the default for an out-of-range address.
    pub fn read(&self, addr: Word) -> Word {
        self.words
            .get(usize::from(addr))
            .copied()
            .unwrap_or(self.read_default)
    }

    /// Writes one word. Out-of-range writes are dropped.
    pub fn write(&mut self, addr: Word, value: Word) {
        if let Some(slot) = self.words.get_mut(usize::from(addr)) {
            *slot = value;
        }
    }

    /// Copies `data` into memory starting at `base`. Words that land out of
    /// range are dropped.
    pub fn load(&mut self, base: Word, data: &[Word]) {
        for (offset, &value) in data.iter().enumerate() {
            let addr = usize::from(base) + offset;
            if let Some(slot) = self.words.get_mut(addr) {
                *slot = value;
            }
        }
    }

    /// The backing words, address 0 first.
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
