//! Global Simulator Constants.
//!
//! This module defines the fixed parameters of the modeled machine. It includes:
//! 1. **Architectural Constants:** Register file sizes and word width.
//! 2. **Sentinels:** The value reported for registers and latch fields that hold nothing.
//! 3. **Capacity Constants:** Default instruction store size and the functional unit limit.

/// Value of a register or latch field that has never been written or is unused.
pub const UNDEFINED: u32 = 0xFFFF_FFFF;

/// Number of general-purpose integer registers.
pub const NUM_GP_REGISTERS: usize = 32;

/// Number of floating-point registers.
pub const NUM_FP_REGISTERS: usize = 32;

/// Number of pipeline stages (IF, ID, EX, MEM, WB).
pub const NUM_STAGES: usize = 5;

/// Size of one instruction slot and of one data word, in bytes.
pub const WORD_SIZE: u32 = 4;

/// Default number of instruction slots in the instruction store.
pub const PROGRAM_SIZE: usize = 50;

/// Maximum number of functional units the pool can hold.
pub const MAX_UNITS: usize = 10;

/// Byte value the data store is filled with on reset.
pub const MEMORY_FILL: u8 = 0xFF;
