//! Execution units and functional components.
//!
//! This module contains the execution resources used by the EX stage:
//! the integer ALU, the single-precision FPU, branch resolution, and the
//! pool of typed multi-cycle functional units that instructions occupy
//! while they execute.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Arithmetic Logic Unit for integer and address arithmetic.
pub mod alu;

/// Branch Resolution Unit computing COND and redirect targets.
pub mod bru;

/// Floating-Point Unit for single-precision arithmetic.
pub mod fpu;

/// Pool of typed functional units with busy countdowns.
pub mod pool;

pub use pool::{FunctionalUnit, FunctionalUnitPool};

/// Functional unit types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum UnitKind {
    /// Integer ALU: integer arithmetic, address generation, branches, `NOP`, `EOP`.
    Integer,
    /// Floating-point adder: `ADDS`, `SUBS`.
    Adder,
    /// Floating-point multiplier: `MULTS`.
    Multiplier,
    /// Floating-point divider: `DIVS`.
    Divider,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Integer => "INTEGER",
            Self::Adder => "ADDER",
            Self::Multiplier => "MULTIPLIER",
            Self::Divider => "DIVIDER",
        })
    }
}

impl FromStr for UnitKind {
    type Err = String;

    /// Parses a unit name, ignoring case (`integer`, `ADDER`, `Multiplier`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integer" | "int" => Ok(Self::Integer),
            "adder" | "add" => Ok(Self::Adder),
            "multiplier" | "mult" | "mul" => Ok(Self::Multiplier),
            "divider" | "div" => Ok(Self::Divider),
            _ => Err(format!("unknown unit type `{s}`")),
        }
    }
}
