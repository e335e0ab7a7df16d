//! Core processor implementation.
//!
//! This module contains the CPU state, the five-stage pipeline, the
//! functional units that make up EX, and the clock that drives them.

/// Architectural register files.
pub mod arch;

/// CPU state and per-cycle orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Execution units (ALU, FPU, branch resolution, functional unit pool).
pub mod units;

pub use self::cpu::Cpu;
