//! Instruction Memory.
//!
//! The core fetches through the [`InstructionSource`] trait: given an address,
//! a source answers within the same tick. A source may report that nothing
//! lives at an address, which is how a finite program image ends; fetch then
//! produces a bubble instead of an instruction.

use crate::common::Word;
use crate::isa::instruction::Instruction;

/// Supplies instruction words to the fetch stage.
pub trait InstructionSource {
    /// Returns the word at `addr`, or `None` past the end of the program.
    fn fetch(&self, addr: Word) -> Option<Word>;
}

impl InstructionSource for [Word] {
    fn fetch(&self, addr: Word) -> Option<Word> {
        self.get(usize::from(addr)).copied()
    }
}

impl<T: InstructionSource + ?Sized> InstructionSource for &T {
    fn fetch(&self, addr: Word) -> Option<Word> {
        (**self).fetch(addr)
    }
}

/// A program image: words at consecutive addresses starting from zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    words: Vec<Word>,
}

impl Program {
    /// Wraps raw instruction words.
    pub const fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Encodes a sequence of instructions.
    pub fn from_instructions(insts: &[Instruction]) -> Self {
        Self::new(insts.iter().map(Instruction::encode).collect())
    }

    /// Number of words in the image.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the image is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The raw words.
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl InstructionSource for Program {
    fn fetch(&self, addr: Word) -> Option<Word> {
        self.words.as_slice().fetch(addr)
    }
}

impl From<Vec<Word>> for Program {
    fn from(words: Vec<Word>) -> Self {
        Self::new(words)
    }
}
