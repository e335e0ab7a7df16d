//! Cycle-accurate five-stage pipeline simulator library.
//!
//! This crate models a classic in-order IF/ID/EX/MEM/WB pipeline running a small
//! load/store instruction set. It provides the following:
//! 1. **ISA:** Opcodes, decoded instructions, a two-pass assembler and a listing printer.
//! 2. **Core:** Register files, stage latches, hazard detection, the five stages and
//!    a pool of multi-cycle functional units.
//! 3. **Memory:** A byte-addressed, little-endian data store with a fixed access latency
//!    and the instruction store.
//! 4. **Simulation:** The [`Simulator`] facade, configuration and statistics.

/// Common types and constants (registers, sentinels, errors).
pub mod common;
/// Simulator configuration (defaults and JSON structures).
pub mod config;
/// CPU core (architectural state, pipeline, functional units, execution).
pub mod core;
/// Instruction set (opcodes, instructions, assembler, listing).
pub mod isa;
/// Instruction and data stores.
pub mod mem;
/// Simulator facade, program loading and diagnostics.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, stores, latches, units and stats.
pub use crate::core::Cpu;
/// Top-level simulator facade.
pub use crate::sim::Simulator;
