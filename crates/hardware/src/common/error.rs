//! Error definitions for the simulator.
//!
//! This module defines every failure the library can report. It provides:
//! 1. **Assembly Errors:** Problems found while turning program text into instructions.
//! 2. **Configuration Errors:** Invalid functional unit or memory setups, rejected before a run.
//! 3. **Simulation Errors:** Caller contract violations detected while the pipeline runs.
//!
//! Stalls, bubbles and flushes are normal pipeline behavior and never surface here.

use std::path::PathBuf;

use thiserror::Error;

use crate::common::reg::Reg;
use crate::core::units::UnitKind;

/// Errors raised while assembling a program.
///
/// Any of these aborts the whole load; no partial program is ever simulated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first token of a line is not a known mnemonic.
    #[error("line {line}: invalid opcode `{token}`")]
    UnknownOpcode {
        /// 1-based source line.
        line: usize,
        /// Offending token.
        token: String,
    },

    /// A branch or jump names a label that is never defined.
    #[error("line {line}: unresolved label `{label}`")]
    UnresolvedLabel {
        /// 1-based source line of the branch.
        line: usize,
        /// Missing label.
        label: String,
    },

    /// The same label is defined twice.
    #[error("line {line}: label `{label}` already defined")]
    DuplicateLabel {
        /// 1-based source line of the second definition.
        line: usize,
        /// Repeated label.
        label: String,
    },

    /// A register operand is malformed or names the wrong register file.
    #[error("line {line}: expected {expected} register, found `{operand}`")]
    BadRegister {
        /// 1-based source line.
        line: usize,
        /// Offending operand text.
        operand: String,
        /// Which file was expected (`integer` or `floating-point`).
        expected: &'static str,
    },

    /// An immediate or `imm(Rn)` operand cannot be parsed.
    #[error("line {line}: malformed immediate `{operand}`")]
    BadImmediate {
        /// 1-based source line.
        line: usize,
        /// Offending operand text.
        operand: String,
    },

    /// The number of operands does not match the opcode's format.
    #[error("line {line}: `{opcode}` takes {expected} operand(s), found {found}")]
    OperandCount {
        /// 1-based source line.
        line: usize,
        /// Mnemonic being assembled.
        opcode: String,
        /// Operands required by the format.
        expected: usize,
        /// Operands present on the line.
        found: usize,
    },

    /// The program does not fit into the instruction store.
    #[error("program has {count} instructions, instruction store holds {capacity}")]
    ProgramTooLarge {
        /// Number of assembled instructions.
        count: usize,
        /// Instruction store capacity.
        capacity: usize,
    },

    /// A prebuilt instruction names a register outside its file.
    #[error("instruction {index}: register {reg} does not exist")]
    RegisterOutOfRange {
        /// Position of the instruction in the program.
        index: usize,
        /// Offending register.
        reg: Reg,
    },

    /// The program has no `EOP` marker, so it could never terminate.
    #[error("program has no EOP instruction")]
    MissingEop,

    /// The source file could not be read.
    #[error("cannot read `{}`: {message}", path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Operating system error text.
        message: String,
    },
}

/// Errors raised while configuring the simulator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Registering the units would exceed the pool capacity.
    #[error("cannot add {requested} unit(s): pool holds {present} of at most {capacity}")]
    TooManyUnits {
        /// Instances requested by this registration.
        requested: usize,
        /// Units already registered.
        present: usize,
        /// Pool capacity.
        capacity: usize,
    },

    /// A unit was registered with zero latency.
    #[error("{kind} unit latency must be at least one cycle")]
    ZeroLatency {
        /// Unit type being registered.
        kind: UnitKind,
    },

    /// A unit registration asked for zero instances.
    #[error("{kind} unit registration must have at least one instance")]
    ZeroInstances {
        /// Unit type being registered.
        kind: UnitKind,
    },

    /// The loaded program needs a unit type that has no instances.
    #[error("program uses `{opcode}` but no {kind} unit is configured")]
    MissingUnit {
        /// Unit type required.
        kind: UnitKind,
        /// First mnemonic that needs it.
        opcode: String,
    },

    /// The data store was configured with zero bytes.
    #[error("data memory size must be non-zero")]
    EmptyMemory,

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Errors raised while the pipeline runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A load or store touched bytes outside the data store.
    #[error("memory access at {addr:#010x} outside data memory of {size} bytes")]
    MemoryOutOfBounds {
        /// Effective address of the access.
        addr: u32,
        /// Configured data memory size.
        size: usize,
    },

    /// The fetch PC points outside the instruction store.
    #[error("fetch at {pc:#010x} outside instruction memory")]
    FetchOutOfRange {
        /// Offending program counter.
        pc: u32,
    },

    /// A register accessor was given an index past the end of its file.
    #[error("register index {index} out of range")]
    RegisterIndex {
        /// Requested index.
        index: usize,
    },

    /// `run` was called before any program was loaded.
    #[error("no program loaded")]
    NoProgram,

    /// A run to completion exceeded the configured cycle limit.
    #[error("cycle limit of {limit} exceeded before EOP retired")]
    CycleLimit {
        /// Configured limit.
        limit: u64,
    },

    /// The configuration is inconsistent with the loaded program.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
