//! Simulation facade and program loading.
//!
//! Provides the [`Simulator`] used by the CLI and tests, utilities for reading
//! assembly from disk, and the text dumps of memory, registers and units.

/// Text dumps of machine state.
pub mod diag;

/// Assembly source loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

pub use simulator::Simulator;
