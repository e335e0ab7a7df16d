//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Detection of data and structural hazards at ID.
//! 2. **Latches:** Inter-stage buffers and the stage and special-purpose register names.
//! 3. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 4. **Traits:** The interface shared by every latch.

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;
