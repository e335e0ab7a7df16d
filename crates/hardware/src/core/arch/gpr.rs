//! General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`R0`-`R31`) of 32 bits.
//! 2. **Invariant Enforcement:** Ensures that register `R0` is hardwired to zero.
//! 3. **Undefined State:** Registers read as [`UNDEFINED`] until first written.

use crate::common::constants::{NUM_GP_REGISTERS, UNDEFINED};

/// General-Purpose Register file.
///
/// Register `R0` is hardwired to zero and cannot be modified.
#[derive(Clone, Debug)]
pub struct Gpr {
    regs: [u32; NUM_GP_REGISTERS],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with every register undefined.
    pub const fn new() -> Self {
        Self {
            regs: [UNDEFINED; NUM_GP_REGISTERS],
        }
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the register. Register `R0` always returns 0.
    pub const fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a general-purpose register. Writes to `R0` are ignored.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    pub const fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns every register to [`UNDEFINED`].
    pub fn reset(&mut self) {
        self.regs.fill(UNDEFINED);
    }
}
