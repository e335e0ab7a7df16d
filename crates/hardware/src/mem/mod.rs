//! Data and instruction stores.
//!
//! This module provides the two memories the pipeline consumes:
//! 1. **Data Store:** A flat byte array accessed by 4-byte little-endian words in MEM.
//! 2. **Instruction Store:** A fixed-capacity table of decoded instructions read by IF.

/// Byte-addressable data memory.
pub mod data;

/// Decoded instruction memory.
pub mod instruction;

pub use data::DataMemory;
pub use instruction::InstructionMemory;
