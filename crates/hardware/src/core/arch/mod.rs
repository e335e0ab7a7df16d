//! Architectural register state.
//!
//! This module contains the register files visible before and after a run.
//! It includes the following modules:
//! 1. **GPRs:** The integer register file with `R0` hardwired to zero.
//! 2. **FPRs:** The single-precision floating-point register file.
//!
//! [`RegisterFile`] joins both files behind one interface addressed by [`Reg`].

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

use crate::common::reg::{Reg, RegClass};

use self::fpr::Fpr;
use self::gpr::Gpr;

/// Unified access to the integer and floating-point register files.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    /// Integer registers.
    pub gpr: Gpr,
    /// Floating-point registers.
    pub fpr: Fpr,
}

impl RegisterFile {
    /// Reads a register as raw 32-bit data.
    pub fn read(&self, reg: Reg) -> u32 {
        match reg.class {
            RegClass::Int => self.gpr.read(reg.idx()),
            RegClass::Fp => self.fpr.read_bits(reg.idx()),
        }
    }

    /// Writes raw 32-bit data to a register.
    pub fn write(&mut self, reg: Reg, value: u32) {
        match reg.class {
            RegClass::Int => self.gpr.write(reg.idx(), value),
            RegClass::Fp => self.fpr.write_bits(reg.idx(), value),
        }
    }

    /// Returns every register to the undefined sentinel.
    pub fn reset(&mut self) {
        self.gpr.reset();
        self.fpr.reset();
    }
}
