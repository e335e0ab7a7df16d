//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every other component.
//! It includes:
//! 1. **Constants:** Register counts, the undefined sentinel, store capacities and word size.
//! 2. **Error Handling:** Load-time, configuration and runtime error enums.
//! 3. **Register References:** A typed handle naming one integer or floating-point register.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for assembly, configuration and simulation.
pub mod error;

/// Typed register references.
pub mod reg;

pub use constants::UNDEFINED;
pub use error::{AsmError, ConfigError, SimError};
pub use reg::{Reg, RegClass};
