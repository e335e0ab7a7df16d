//! Floating-Point Register File.
//!
//! This module implements the floating-point register file. It performs the following:
//! 1. **Storage:** Maintains 32 single-precision registers (`F0`-`F31`).
//! 2. **Raw Bits:** Stores IEEE 754 bit patterns so undefined registers keep the exact sentinel.
//! 3. **Access Control:** Provides both bit-level and `f32` accessors.

use crate::common::constants::{NUM_FP_REGISTERS, UNDEFINED};

/// Floating-Point Register file.
#[derive(Clone, Debug)]
pub struct Fpr {
    fregs: [u32; NUM_FP_REGISTERS],
}

impl Default for Fpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Fpr {
    /// Creates a register file with every register undefined.
    pub const fn new() -> Self {
        Self {
            fregs: [UNDEFINED; NUM_FP_REGISTERS],
        }
    }

    /// Reads a floating-point register as raw bits.
    pub const fn read_bits(&self, idx: usize) -> u32 {
        self.fregs[idx]
    }

    /// Writes raw bits to a floating-point register.
    pub const fn write_bits(&mut self, idx: usize, bits: u32) {
        self.fregs[idx] = bits;
    }

    /// Reads a floating-point register value.
    pub const fn read(&self, idx: usize) -> f32 {
        f32::from_bits(self.fregs[idx])
    }

    /// Writes a floating-point register value.
    pub const fn write(&mut self, idx: usize, val: f32) {
        self.fregs[idx] = val.to_bits();
    }

    /// Returns every register to the undefined bit pattern.
    pub fn reset(&mut self) {
        self.fregs.fill(UNDEFINED);
    }
}
