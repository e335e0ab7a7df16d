//! Decoded instruction representation.
//!
//! An [`Instruction`] is produced once by the assembler and never mutated. Each
//! variant carries exactly the operands its format needs, so stages never have
//! to guess which fields of a flat record are meaningful.

use std::fmt;

use crate::common::reg::Reg;
use crate::core::units::UnitKind;
use crate::isa::opcode::Opcode;

/// Register-register integer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntRegOp {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 ^ rs2`
    Xor,
}

/// Register-immediate integer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntImmOp {
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = rs1 - imm`
    Subi,
}

/// Single-precision floating-point operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpOp {
    /// `fd = fs1 + fs2`
    Adds,
    /// `fd = fs1 - fs2`
    Subs,
    /// `fd = fs1 * fs2`
    Mults,
    /// `fd = fs1 / fs2`
    Divs,
}

/// Condition tested by a conditional branch against its single operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// Taken when the operand is zero.
    Eqz,
    /// Taken when the operand is non-zero.
    Nez,
    /// Taken when the operand is negative.
    Ltz,
    /// Taken when the operand is positive.
    Gtz,
    /// Taken when the operand is negative or zero.
    Lez,
    /// Taken when the operand is positive or zero.
    Gez,
}

impl BranchCond {
    /// Evaluates the condition on a register value interpreted as signed.
    pub const fn taken(self, value: u32) -> bool {
        let v = value as i32;
        match self {
            Self::Eqz => v == 0,
            Self::Nez => v != 0,
            Self::Ltz => v < 0,
            Self::Gtz => v > 0,
            Self::Lez => v <= 0,
            Self::Gez => v >= 0,
        }
    }
}

/// A fully decoded instruction.
///
/// Offsets of branches and jumps are already relative to NPC and scaled to
/// bytes; labels never reach the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `ADD`, `SUB`, `XOR`.
    IntReg {
        /// Operation.
        op: IntRegOp,
        /// Destination.
        rd: Reg,
        /// First source.
        rs1: Reg,
        /// Second source.
        rs2: Reg,
    },
    /// `ADDI`, `SUBI`.
    IntImm {
        /// Operation.
        op: IntImmOp,
        /// Destination.
        rd: Reg,
        /// Source.
        rs1: Reg,
        /// Immediate operand.
        imm: u32,
    },
    /// `LW` (integer destination) or `LWS` (floating-point destination).
    Load {
        /// `true` for `LWS`.
        fp: bool,
        /// Destination.
        rd: Reg,
        /// Base address register.
        base: Reg,
        /// Byte offset added to the base.
        offset: u32,
    },
    /// `SW` (integer data) or `SWS` (floating-point data).
    Store {
        /// `true` for `SWS`.
        fp: bool,
        /// Register holding the data to store.
        src: Reg,
        /// Base address register.
        base: Reg,
        /// Byte offset added to the base.
        offset: u32,
    },
    /// `ADDS`, `SUBS`, `MULTS`, `DIVS`.
    FpReg {
        /// Operation.
        op: FpOp,
        /// Destination.
        fd: Reg,
        /// First source.
        fs1: Reg,
        /// Second source.
        fs2: Reg,
    },
    /// Conditional branch.
    Branch {
        /// Condition tested against `rs1`.
        cond: BranchCond,
        /// Tested register.
        rs1: Reg,
        /// Byte offset from NPC to the target.
        offset: u32,
    },
    /// Unconditional jump.
    Jump {
        /// Byte offset from NPC to the target.
        offset: u32,
    },
    /// No operation.
    Nop,
    /// End of program.
    Eop,
}

impl Instruction {
    /// Mnemonic of this instruction.
    pub const fn opcode(&self) -> Opcode {
        match *self {
            Self::IntReg { op, .. } => match op {
                IntRegOp::Add => Opcode::Add,
                IntRegOp::Sub => Opcode::Sub,
                IntRegOp::Xor => Opcode::Xor,
            },
            Self::IntImm { op, .. } => match op {
                IntImmOp::Addi => Opcode::Addi,
                IntImmOp::Subi => Opcode::Subi,
            },
            Self::Load { fp: false, .. } => Opcode::Lw,
            Self::Load { fp: true, .. } => Opcode::Lws,
            Self::Store { fp: false, .. } => Opcode::Sw,
            Self::Store { fp: true, .. } => Opcode::Sws,
            Self::FpReg { op, .. } => match op {
                FpOp::Adds => Opcode::Adds,
                FpOp::Subs => Opcode::Subs,
                FpOp::Mults => Opcode::Mults,
                FpOp::Divs => Opcode::Divs,
            },
            Self::Branch { cond, .. } => match cond {
                BranchCond::Eqz => Opcode::Beqz,
                BranchCond::Nez => Opcode::Bnez,
                BranchCond::Ltz => Opcode::Bltz,
                BranchCond::Gtz => Opcode::Bgtz,
                BranchCond::Lez => Opcode::Blez,
                BranchCond::Gez => Opcode::Bgez,
            },
            Self::Jump { .. } => Opcode::Jump,
            Self::Nop => Opcode::Nop,
            Self::Eop => Opcode::Eop,
        }
    }

    /// Register written at WB, if any. Writes to `R0` are reported as none.
    pub fn dest(&self) -> Option<Reg> {
        let rd = match *self {
            Self::IntReg { rd, .. } | Self::IntImm { rd, .. } | Self::Load { rd, .. } => rd,
            Self::FpReg { fd, .. } => fd,
            _ => return None,
        };
        (!rd.is_zero()).then_some(rd)
    }

    /// Register feeding the A operand latch.
    pub const fn operand_a(&self) -> Option<Reg> {
        match *self {
            Self::IntReg { rs1, .. } | Self::IntImm { rs1, .. } | Self::Branch { rs1, .. } => {
                Some(rs1)
            }
            Self::Load { base, .. } | Self::Store { base, .. } => Some(base),
            Self::FpReg { fs1, .. } => Some(fs1),
            _ => None,
        }
    }

    /// Register feeding the B operand latch.
    pub const fn operand_b(&self) -> Option<Reg> {
        match *self {
            Self::IntReg { rs2, .. } => Some(rs2),
            Self::Store { src, .. } => Some(src),
            Self::FpReg { fs2, .. } => Some(fs2),
            _ => None,
        }
    }

    /// Every register the instruction names, `R0` included.
    pub fn registers(&self) -> impl Iterator<Item = Reg> {
        let written = match *self {
            Self::IntReg { rd, .. } | Self::IntImm { rd, .. } | Self::Load { rd, .. } => Some(rd),
            Self::FpReg { fd, .. } => Some(fd),
            _ => None,
        };
        [self.operand_a(), self.operand_b(), written]
            .into_iter()
            .flatten()
    }

    /// Registers read in ID that can cause a RAW hazard (`R0` excluded).
    pub fn sources(&self) -> impl Iterator<Item = Reg> {
        [self.operand_a(), self.operand_b()]
            .into_iter()
            .flatten()
            .filter(|r| !r.is_zero())
    }

    /// Immediate carried into the IMM latch, if the format has one.
    pub const fn imm(&self) -> Option<u32> {
        match *self {
            Self::IntImm { imm, .. } => Some(imm),
            Self::Load { offset, .. }
            | Self::Store { offset, .. }
            | Self::Branch { offset, .. }
            | Self::Jump { offset } => Some(offset),
            _ => None,
        }
    }

    /// Functional unit type that executes this instruction.
    pub const fn unit_kind(&self) -> UnitKind {
        match *self {
            Self::FpReg { op, .. } => match op {
                FpOp::Adds | FpOp::Subs => UnitKind::Adder,
                FpOp::Mults => UnitKind::Multiplier,
                FpOp::Divs => UnitKind::Divider,
            },
            _ => UnitKind::Integer,
        }
    }

    /// `true` for loads and stores.
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::Store { .. })
    }

    /// `true` for branches and jumps.
    pub const fn is_control(&self) -> bool {
        matches!(self, Self::Branch { .. } | Self::Jump { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match *self {
            Self::IntReg { rd, rs1, rs2, .. } => write!(f, "{op} {rd} {rs1} {rs2}"),
            Self::IntImm { rd, rs1, imm, .. } => write!(f, "{op} {rd} {rs1} {}", imm as i32),
            Self::Load {
                rd, base, offset, ..
            } => write!(f, "{op} {rd} {}({base})", offset as i32),
            Self::Store {
                src, base, offset, ..
            } => write!(f, "{op} {src} {}({base})", offset as i32),
            Self::FpReg { fd, fs1, fs2, .. } => write!(f, "{op} {fd} {fs1} {fs2}"),
            Self::Branch { rs1, offset, .. } => write!(f, "{op} {rs1} {:+}", offset as i32),
            Self::Jump { offset } => write!(f, "{op} {:+}", offset as i32),
            Self::Nop | Self::Eop => write!(f, "{op}"),
        }
    }
}
