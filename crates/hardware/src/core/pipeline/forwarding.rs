//! Operand Forwarding Network.
//!
//! Resolves a source register against the results still travelling down the
//! pipeline. Candidates are consulted youngest first, so the most recent
//! producer of a register wins:
//! 1. **Register zero:** `r0` always resolves to `0` and never forwards.
//! 2. **Execute slot:** The ALU result, or *pending* if the producer is a load.
//! 3. **Memory slot:** The post-memory value (loaded word or ALU result).
//! 4. **Writeback slot:** The value retiring this tick.
//! 5. **Latched:** The value the consumer read from the register file at decode.

use std::fmt;

use tracing::trace;

use crate::common::Word;
use crate::core::pipeline::latches::PipelineState;
use crate::core::pipeline::traits::ForwardSource;

/// A pending register write visible to the forwarding network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Producer {
    /// Register being written; never `0`.
    pub target: usize,
    /// The value, or `None` while a load has not yet accessed memory.
    pub value: Option<Word>,
}

/// Where a resolved operand came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bypass {
    /// Register zero.
    Zero,
    /// Execute slot ALU result.
    Execute,
    /// Memory slot value.
    Memory,
    /// Writeback slot value.
    Writeback,
    /// No in-flight producer; the latched register-file value.
    #[default]
    Latched,
    /// The youngest producer is a load still in execute; the latched value is kept.
    Pending,
}

impl Bypass {
    /// Whether the value was taken from an in-flight producer.
    pub const fn is_forwarded(self) -> bool {
        matches!(self, Self::Execute | Self::Memory | Self::Writeback)
    }
}

impl fmt::Display for Bypass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::Execute => "execute",
            Self::Memory => "memory",
            Self::Writeback => "writeback",
            Self::Latched => "latched",
            Self::Pending => "pending",
        };
        f.write_str(name)
    }
}

/// A resolved source operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operand {
    /// Operand value.
    pub value: Word,
    /// Origin of the value.
    pub from: Bypass,
}

/// The ordered forwarding candidates sampled from one pipeline state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardingNetwork {
    candidates: [(Bypass, Option<Producer>); 3],
}

impl ForwardingNetwork {
    /// Builds a network from the execute, memory and writeback producers.
    pub const fn new(
        execute: Option<Producer>,
        memory: Option<Producer>,
        writeback: Option<Producer>,
    ) -> Self {
        Self {
            candidates: [
                (Bypass::Execute, execute),
                (Bypass::Memory, memory),
                (Bypass::Writeback, writeback),
            ],
        }
    }

    /// Samples the producers held by `state`.
    pub fn from_state(state: &PipelineState) -> Self {
        Self::new(
            state.execute.producer(),
            state.memory.producer(),
            state.writeback.producer(),
        )
    }

    /// Resolves register `reg`, falling back to `latched`.
    ///
    /// # Examples
    ///
    /// ```
    /// use r16sim_core::core::pipeline::forwarding::{Bypass, ForwardingNetwork, Producer};
    ///
    /// let net = ForwardingNetwork::new(
    ///     Some(Producer { target: 1, value: None }),
    ///     Some(Producer { target: 2, value: Some(7) }),
    ///     Some(Producer { target: 2, value: Some(3) }),
    /// );
    /// assert_eq!(net.resolve(0, 9).value, 0);
    /// assert_eq!(net.resolve(1, 9).from, Bypass::Pending);
    /// assert_eq!(net.resolve(2, 9).value, 7);
    /// assert_eq!(net.resolve(3, 9).from, Bypass::Latched);
    /// ```
    pub fn resolve(&self, reg: usize, latched: Word) -> Operand {
        if reg == 0 {
            return Operand {
                value: 0,
                from: Bypass::Zero,
            };
        }

        let hit = self
            .candidates
            .iter()
            .find_map(|&(from, producer)| producer.filter(|p| p.target == reg).map(|p| (from, p)));

        let operand = match hit {
            Some((from, Producer {
                value: Some(value), ..
            })) => Operand { value, from },
            Some((_, Producer { value: None, .. })) => Operand {
                value: latched,
                from: Bypass::Pending,
            },
            None => Operand {
                value: latched,
                from: Bypass::Latched,
            },
        };

        if operand.from.is_forwarded() {
            trace!(reg, value = operand.value, from = %operand.from, "forward");
        }
        operand
    }
}
