//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the instruction at PC, or at a branch target after a redirect.
//! 2. **Decode:** Detects hazards, reads operands and dispatches to a functional unit.
//! 3. **Execute:** Counts down the units and hands the oldest finished instruction to MEM.
//! 4. **Memory:** Performs loads and stores, holding for the configured latency.
//! 5. **Writeback:** Commits results to the register files and detects `EOP`.
//!
//! The stages are called last-to-first within a cycle, so each one reads its
//! input latch before the upstream stage overwrites it.

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
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
