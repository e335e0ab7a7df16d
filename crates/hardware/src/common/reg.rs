//! Typed register references.
//!
//! Instructions name registers of two independent files. A [`Reg`] pairs the
//! file ([`RegClass`]) with the index so hazard checks can never confuse `R3`
//! with `F3`.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::{NUM_FP_REGISTERS, NUM_GP_REGISTERS};

/// Register file a reference points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegClass {
    /// General-purpose integer registers (`R0`-`R31`).
    Int,
    /// Floating-point registers (`F0`-`F31`).
    Fp,
}

/// A reference to one architectural register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reg {
    /// Register file.
    pub class: RegClass,
    /// Index within the file (0-31).
    pub index: u8,
}

impl Reg {
    /// Integer register `R<index>`.
    pub const fn int(index: u8) -> Self {
        Self {
            class: RegClass::Int,
            index,
        }
    }

    /// Floating-point register `F<index>`.
    pub const fn fp(index: u8) -> Self {
        Self {
            class: RegClass::Fp,
            index,
        }
    }

    /// Returns `true` for `R0`, which is hardwired to zero.
    pub const fn is_zero(self) -> bool {
        matches!(self.class, RegClass::Int) && self.index == 0
    }

    /// Returns `true` if the index exists in the register's file.
    pub const fn in_range(self) -> bool {
        match self.class {
            RegClass::Int => self.idx() < NUM_GP_REGISTERS,
            RegClass::Fp => self.idx() < NUM_FP_REGISTERS,
        }
    }

    /// Register index as a `usize` for indexing register arrays.
    pub const fn idx(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            RegClass::Int => write!(f, "R{}", self.index),
            RegClass::Fp => write!(f, "F{}", self.index),
        }
    }
}

impl FromStr for Reg {
    type Err = ();

    /// Parses `R<n>` or `F<n>` (either case) with `n < 32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let class = match chars.next() {
            Some('R' | 'r') => RegClass::Int,
            Some('F' | 'f') => RegClass::Fp,
            _ => return Err(()),
        };
        let index: usize = chars.as_str().parse().map_err(|_| ())?;
        if index >= NUM_GP_REGISTERS {
            return Err(());
        }
        Ok(Self {
            class,
            index: index as u8,
        })
    }
}
