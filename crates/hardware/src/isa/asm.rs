//! Assembler and Label Resolution.
//!
//! This module turns program text into an immutable [`Program`]. It performs:
//! 1. **Tokenizing:** Splits each line into an optional `label:`, a mnemonic and its operands.
//! 2. **Operand Parsing:** Reads registers, `strtoul`-style immediates and `imm(Rn)` addresses.
//! 3. **Label Resolution:** A second pass turns branch and jump labels into NPC-relative byte offsets.
//!
//! Source format, one instruction per line:
//!
//! ```text
//! # comment
//!         ADDI R1 R0 3
//! loop:   SUBI R1 R1 1
//!         BNEZ R1 loop
//!         EOP
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;

use crate::common::error::AsmError;
use crate::common::reg::{Reg, RegClass};
use crate::isa::instruction::{BranchCond, FpOp, Instruction, IntImmOp, IntRegOp};
use crate::isa::opcode::Opcode;

/// An assembled program: the instruction table plus its label map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: BTreeMap<String, usize>,
}

impl Program {
    /// Builds a program from already decoded instructions.
    ///
    /// # Errors
    ///
    /// - [`AsmError::RegisterOutOfRange`] if an instruction names a register index of 32 or above.
    /// - [`AsmError::MissingEop`] if no instruction is `EOP`.
    pub fn from_instructions(instructions: Vec<Instruction>) -> Result<Self, AsmError> {
        for (index, inst) in instructions.iter().enumerate() {
            if let Some(reg) = inst.registers().find(|r| !r.in_range()) {
                return Err(AsmError::RegisterOutOfRange { index, reg });
            }
        }
        if !instructions.contains(&Instruction::Eop) {
            return Err(AsmError::MissingEop);
        }
        Ok(Self {
            instructions,
            labels: BTreeMap::new(),
        })
    }

    /// The instruction table in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Label name to instruction index.
    pub const fn labels(&self) -> &BTreeMap<String, usize> {
        &self.labels
    }

    /// Label bound to the instruction at `index`, if any.
    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels
            .iter()
            .find(|&(_, &i)| i == index)
            .map(|(name, _)| name.as_str())
    }
}

impl FromStr for Program {
    type Err = AsmError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        assemble(source)
    }
}

/// A source line that survived the first pass.
struct PendingLine<'a> {
    line: usize,
    mnemonic: &'a str,
    operands: Vec<&'a str>,
}

/// Assembles program text.
///
/// # Arguments
///
/// * `source` - Program text, one instruction per line.
///
/// # Returns
///
/// The assembled [`Program`].
///
/// # Errors
///
/// Returns the first [`AsmError`] encountered; nothing is assembled on failure.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let mut labels = BTreeMap::new();
    let mut pending = Vec::new();

    for (n, raw) in source.lines().enumerate() {
        let line = n + 1;
        let text = raw.split(['#', ';']).next().unwrap_or_default();
        let mut tokens = text
            .split_whitespace()
            .map(|t| t.trim_end_matches(','))
            .filter(|t| !t.is_empty())
            .peekable();

        if let Some(label) = tokens.peek().and_then(|t| t.strip_suffix(':')) {
            if labels.insert(label.to_string(), pending.len()).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line,
                    label: label.to_string(),
                });
            }
            let _ = tokens.next();
        }

        if let Some(mnemonic) = tokens.next() {
            pending.push(PendingLine {
                line,
                mnemonic,
                operands: tokens.collect(),
            });
        }
    }

    let instructions = pending
        .iter()
        .enumerate()
        .map(|(index, p)| encode(p, index, &labels))
        .collect::<Result<Vec<_>, _>>()?;

    if !instructions.contains(&Instruction::Eop) {
        return Err(AsmError::MissingEop);
    }

    debug!(
        instructions = instructions.len(),
        labels = labels.len(),
        "assembled program"
    );
    Ok(Program {
        instructions,
        labels,
    })
}

/// Builds one instruction from a tokenized line.
fn encode(
    p: &PendingLine<'_>,
    index: usize,
    labels: &BTreeMap<String, usize>,
) -> Result<Instruction, AsmError> {
    let line = p.line;
    let op: Opcode = p.mnemonic.parse().map_err(|()| AsmError::UnknownOpcode {
        line,
        token: p.mnemonic.to_string(),
    })?;

    let expected = match op {
        Opcode::Nop | Opcode::Eop => 0,
        Opcode::Jump => 1,
        Opcode::Lw
        | Opcode::Sw
        | Opcode::Lws
        | Opcode::Sws
        | Opcode::Beqz
        | Opcode::Bnez
        | Opcode::Bltz
        | Opcode::Bgtz
        | Opcode::Blez
        | Opcode::Bgez => 2,
        _ => 3,
    };
    if p.operands.len() != expected {
        return Err(AsmError::OperandCount {
            line,
            opcode: op.to_string(),
            expected,
            found: p.operands.len(),
        });
    }

    let ops = &p.operands;
    let int = |i: usize| register(ops[i], RegClass::Int, line);
    let fp = |i: usize| register(ops[i], RegClass::Fp, line);
    let target = |i: usize| branch_offset(ops[i], index, labels, line);

    let inst = match op {
        Opcode::Add | Opcode::Sub | Opcode::Xor => Instruction::IntReg {
            op: match op {
                Opcode::Add => IntRegOp::Add,
                Opcode::Sub => IntRegOp::Sub,
                _ => IntRegOp::Xor,
            },
            rd: int(0)?,
            rs1: int(1)?,
            rs2: int(2)?,
        },
        Opcode::Addi | Opcode::Subi => Instruction::IntImm {
            op: if op == Opcode::Addi {
                IntImmOp::Addi
            } else {
                IntImmOp::Subi
            },
            rd: int(0)?,
            rs1: int(1)?,
            imm: immediate(ops[2], line)?,
        },
        Opcode::Lw | Opcode::Lws => {
            let (offset, base) = address(ops[1], line)?;
            Instruction::Load {
                fp: op == Opcode::Lws,
                rd: if op == Opcode::Lws { fp(0)? } else { int(0)? },
                base,
                offset,
            }
        }
        Opcode::Sw | Opcode::Sws => {
            let (offset, base) = address(ops[1], line)?;
            Instruction::Store {
                fp: op == Opcode::Sws,
                src: if op == Opcode::Sws { fp(0)? } else { int(0)? },
                base,
                offset,
            }
        }
        Opcode::Adds | Opcode::Subs | Opcode::Mults | Opcode::Divs => Instruction::FpReg {
            op: match op {
                Opcode::Adds => FpOp::Adds,
                Opcode::Subs => FpOp::Subs,
                Opcode::Mults => FpOp::Mults,
                _ => FpOp::Divs,
            },
            fd: fp(0)?,
            fs1: fp(1)?,
            fs2: fp(2)?,
        },
        Opcode::Beqz
        | Opcode::Bnez
        | Opcode::Bltz
        | Opcode::Bgtz
        | Opcode::Blez
        | Opcode::Bgez => Instruction::Branch {
            cond: match op {
                Opcode::Beqz => BranchCond::Eqz,
                Opcode::Bnez => BranchCond::Nez,
                Opcode::Bltz => BranchCond::Ltz,
                Opcode::Bgtz => BranchCond::Gtz,
                Opcode::Blez => BranchCond::Lez,
                _ => BranchCond::Gez,
            },
            rs1: int(0)?,
            offset: target(1)?,
        },
        Opcode::Jump => Instruction::Jump { offset: target(0)? },
        Opcode::Nop => Instruction::Nop,
        Opcode::Eop => Instruction::Eop,
    };
    Ok(inst)
}

/// Parses a register operand of the given file.
fn register(text: &str, class: RegClass, line: usize) -> Result<Reg, AsmError> {
    text.parse::<Reg>()
        .ok()
        .filter(|r| r.class == class)
        .ok_or_else(|| AsmError::BadRegister {
            line,
            operand: text.to_string(),
            expected: match class {
                RegClass::Int => "integer",
                RegClass::Fp => "floating-point",
            },
        })
}

/// Parses an immediate the way `strtoul(text, NULL, 0)` does, plus an optional sign.
///
/// `0x` selects hexadecimal, a leading `0` octal, anything else decimal. A
/// leading `-` yields the two's complement of the magnitude.
pub fn parse_immediate(text: &str) -> Option<u32> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else if body.len() > 1 && body.starts_with('0') {
        u32::from_str_radix(&body[1..], 8).ok()?
    } else {
        body.parse().ok()?
    };
    Some(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn immediate(text: &str, line: usize) -> Result<u32, AsmError> {
    parse_immediate(text).ok_or_else(|| AsmError::BadImmediate {
        line,
        operand: text.to_string(),
    })
}

/// Parses `imm(Rn)`; an empty immediate means zero.
fn address(text: &str, line: usize) -> Result<(u32, Reg), AsmError> {
    let bad = || AsmError::BadImmediate {
        line,
        operand: text.to_string(),
    };
    let (imm, rest) = text.split_once('(').ok_or_else(bad)?;
    let base = rest.strip_suffix(')').ok_or_else(bad)?;
    let offset = if imm.is_empty() {
        0
    } else {
        immediate(imm, line)?
    };
    Ok((offset, register(base, RegClass::Int, line)?))
}

/// Resolves a label to `(label_index - index - 1) << 2`.
fn branch_offset(
    label: &str,
    index: usize,
    labels: &BTreeMap<String, usize>,
    line: usize,
) -> Result<u32, AsmError> {
    let target = labels
        .get(label)
        .ok_or_else(|| AsmError::UnresolvedLabel {
            line,
            label: label.to_string(),
        })?;
    Ok((*target as u32).wrapping_sub(index as u32 + 1) << 2)
}
