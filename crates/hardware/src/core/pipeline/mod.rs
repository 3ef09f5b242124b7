//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. Each stage owns one
//! output slot; a tick computes every next slot from the current ones and the
//! core commits them together. It includes the following components:
//! 1. **Latches:** The five stage slots and the bubble/instruction tagged variant.
//! 2. **Signals:** Control signals generated during instruction decoding.
//! 3. **Forwarding:** Ordered lookup of in-flight results for source operands.
//! 4. **Hazards:** Local stall detection and the backward stall cascade.
//! 5. **Redirect:** Branch and jump resolution into the next fetch address.
//! 6. **Stages:** Fetch, Decode, Execute, Memory and Writeback.
//! 7. **Traits:** The forwarding-producer interface implemented by result-carrying slots.

/// Operand forwarding network.
pub mod forwarding;

/// Local stall detection and stall cascade.
pub mod hazards;

/// Stage slots and the pipeline register set.
pub mod latches;

/// Program counter redirect logic.
pub mod redirect;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline slots.
pub mod traits;
