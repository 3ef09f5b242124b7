//! Pipeline stage implementations.
//!
//! Each stage is a pure function from the current slots to its next output
//! slot; the core decides per tick whether to call it, bubble or freeze. It includes:
//! 1. **Fetch:** Reads the instruction word at the selected address.
//! 2. **Decode:** Decodes the word into fields and control signals and reads operands.
//! 3. **Execute:** Forwards operands and evaluates the ALU.
//! 4. **Memory:** Performs the data access and stages the architectural write.
//! 5. **Writeback:** Records the retiring instruction.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::{decode_stage, refresh_operands};
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::{MemoryOutcome, StagedWrite, mem_stage};
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
