//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried across the four stage
//! boundaries of the pipeline: IF → ID → EX → MEM → WB.
//!
//! 1. **Instruction Flow:** One entry per boundary, holding the special-purpose registers.
//! 2. **Bubbles:** An entry with no instruction; every value field is undefined.
//! 3. **Stage Queries:** The [`Stage`] and [`SpRegister`] names used to read a latch
//!    "at the entrance of" a stage.
//!
//! Value fields are `Option<u32>`: `None` means the field is not used by the
//! occupying instruction and is reported as [`UNDEFINED`](crate::common::UNDEFINED).

use std::fmt;
use std::str::FromStr;

use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::instruction::Instruction;

/// Pipeline stages, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction fetch.
    If,
    /// Instruction decode and register read.
    Id,
    /// Execute.
    Ex,
    /// Memory access.
    Mem,
    /// Writeback.
    Wb,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [Self::If, Self::Id, Self::Ex, Self::Mem, Self::Wb];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::If => "IF",
            Self::Id => "ID",
            Self::Ex => "EX",
            Self::Mem => "MEM",
            Self::Wb => "WB",
        })
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IF" => Ok(Self::If),
            "ID" => Ok(Self::Id),
            "EX" | "EXE" => Ok(Self::Ex),
            "MEM" => Ok(Self::Mem),
            "WB" => Ok(Self::Wb),
            _ => Err(format!("unknown stage `{s}`")),
        }
    }
}

/// Special-purpose registers held in the latches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpRegister {
    /// Program counter (only meaningful at IF).
    Pc,
    /// Address of the next sequential instruction.
    Npc,
    /// Instruction register; use `instruction_at` instead of a value query.
    Ir,
    /// First operand.
    A,
    /// Second operand.
    B,
    /// Immediate.
    Imm,
    /// Branch condition (1 taken, 0 not taken).
    Cond,
    /// Result of EX.
    AluOutput,
    /// Data loaded from memory.
    Lmd,
}

impl SpRegister {
    /// All special-purpose registers in display order.
    pub const ALL: [Self; 9] = [
        Self::Pc,
        Self::Npc,
        Self::Ir,
        Self::A,
        Self::B,
        Self::Imm,
        Self::Cond,
        Self::AluOutput,
        Self::Lmd,
    ];
}

impl fmt::Display for SpRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pc => "PC",
            Self::Npc => "NPC",
            Self::Ir => "IR",
            Self::A => "A",
            Self::B => "B",
            Self::Imm => "IMM",
            Self::Cond => "COND",
            Self::AluOutput => "ALU_OUTPUT",
            Self::Lmd => "LMD",
        })
    }
}

impl FromStr for SpRegister {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown special-purpose register `{s}`"))
    }
}

/// Entry in the IF/ID latch (entrance of ID).
#[derive(Clone, Default, Debug)]
pub struct IfIdEntry {
    /// Fetched instruction; `None` is a bubble.
    pub inst: Option<Instruction>,
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// PC + 4.
    pub npc: Option<u32>,
    /// Fetch order, used to age instructions.
    pub seq: u64,
}

/// Entry in the ID/EX latch (entrance of EX).
#[derive(Clone, Default, Debug)]
pub struct IdExEntry {
    /// Decoded instruction; `None` is a bubble.
    pub inst: Option<Instruction>,
    /// Address of the instruction.
    pub pc: u32,
    /// PC + 4.
    pub npc: Option<u32>,
    /// Value of the first source register.
    pub a: Option<u32>,
    /// Value of the second source register.
    pub b: Option<u32>,
    /// Immediate.
    pub imm: Option<u32>,
    /// Fetch order.
    pub seq: u64,
}

/// Entry in the EX/MEM latch (entrance of MEM).
#[derive(Clone, Default, Debug)]
pub struct ExMemEntry {
    /// Executed instruction; `None` is a bubble.
    pub inst: Option<Instruction>,
    /// Address of the instruction.
    pub pc: u32,
    /// Store data.
    pub b: Option<u32>,
    /// Result, effective address or branch target.
    pub alu_output: Option<u32>,
    /// Branch outcome.
    pub cond: Option<bool>,
    /// Fetch order.
    pub seq: u64,
}

/// Entry in the MEM/WB latch (entrance of WB).
#[derive(Clone, Default, Debug)]
pub struct MemWbEntry {
    /// Instruction awaiting commit; `None` is a bubble.
    pub inst: Option<Instruction>,
    /// Address of the instruction.
    pub pc: u32,
    /// Arithmetic result to commit.
    pub alu_output: Option<u32>,
    /// Loaded datum to commit.
    pub lmd: Option<u32>,
    /// Fetch order.
    pub seq: u64,
}

impl PipelineLatch for IfIdEntry {
    fn instruction(&self) -> Option<&Instruction> {
        self.inst.as_ref()
    }

    fn sp_register(&self, reg: SpRegister) -> Option<u32> {
        match reg {
            SpRegister::Npc => self.npc,
            _ => None,
        }
    }

    fn flush(&mut self) {
        *self = Self::default();
    }
}

impl PipelineLatch for IdExEntry {
    fn instruction(&self) -> Option<&Instruction> {
        self.inst.as_ref()
    }

    fn sp_register(&self, reg: SpRegister) -> Option<u32> {
        match reg {
            SpRegister::Npc => self.npc,
            SpRegister::A => self.a,
            SpRegister::B => self.b,
            SpRegister::Imm => self.imm,
            _ => None,
        }
    }

    fn flush(&mut self) {
        *self = Self::default();
    }
}

impl PipelineLatch for ExMemEntry {
    fn instruction(&self) -> Option<&Instruction> {
        self.inst.as_ref()
    }

    fn sp_register(&self, reg: SpRegister) -> Option<u32> {
        match reg {
            SpRegister::B => self.b,
            SpRegister::AluOutput => self.alu_output,
            SpRegister::Cond => self.cond.map(u32::from),
            _ => None,
        }
    }

    fn flush(&mut self) {
        *self = Self::default();
    }
}

impl PipelineLatch for MemWbEntry {
    fn instruction(&self) -> Option<&Instruction> {
        self.inst.as_ref()
    }

    fn sp_register(&self, reg: SpRegister) -> Option<u32> {
        match reg {
            SpRegister::AluOutput => self.alu_output,
            SpRegister::Lmd => self.lmd,
            _ => None,
        }
    }

    fn flush(&mut self) {
        *self = Self::default();
    }
}
