//! Instruction Set Definitions.
//!
//! Contains the opcode set, the decoded instruction type and the tooling that
//! produces instructions from program text.
//!
//! # Layout
//!
//! * `opcode`: The closed set of mnemonics.
//! * `instruction`: The [`Instruction`] sum type and its operand accessors.
//! * `asm`: The two-pass assembler producing an immutable [`Program`].
//! * `disasm`: Address-annotated program listings.

/// Two-pass assembler and label resolution.
pub mod asm;

/// Program listing for diagnostics.
pub mod disasm;

/// Decoded instruction representation.
pub mod instruction;

/// Opcode mnemonics.
pub mod opcode;

pub use asm::{Program, assemble};
pub use instruction::{BranchCond, FpOp, Instruction, IntImmOp, IntRegOp};
pub use opcode::Opcode;
