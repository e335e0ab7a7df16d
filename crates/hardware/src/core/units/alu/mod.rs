//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer datapath used in the Execute stage.
//! It computes register-register and register-immediate arithmetic, the
//! effective address of loads and stores, and the target of branches and
//! jumps. All arithmetic wraps modulo 2^32.

use crate::core::units::fpu::Fpu;
use crate::isa::instruction::{Instruction, IntImmOp, IntRegOp};

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Computes the `ALU_OUTPUT` of an instruction.
    ///
    /// Floating-point arithmetic is delegated to [`Fpu`] so the caller has one
    /// entry point for every opcode.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instruction being executed
    /// * `a`    - Value latched in A (first source or base register)
    /// * `b`    - Value latched in B (second source)
    /// * `imm`  - Value latched in IMM
    /// * `npc`  - Address of the following instruction
    ///
    /// # Returns
    ///
    /// The result bits, or `None` for `NOP` and `EOP` which produce nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::common::Reg;
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::{Instruction, IntImmOp};
    ///
    /// let subi = Instruction::IntImm { op: IntImmOp::Subi, rd: Reg::int(1), rs1: Reg::int(2), imm: 3 };
    /// assert_eq!(Alu::execute(&subi, 1, 0, 3, 4), Some(0xFFFF_FFFE));
    ///
    /// let jump = Instruction::Jump { offset: (-8_i32) as u32 };
    /// assert_eq!(Alu::execute(&jump, 0, 0, (-8_i32) as u32, 0x20), Some(0x18));
    /// ```
    pub fn execute(inst: &Instruction, a: u32, b: u32, imm: u32, npc: u32) -> Option<u32> {
        let out = match *inst {
            Instruction::IntReg { op, .. } => match op {
                IntRegOp::Add => a.wrapping_add(b),
                IntRegOp::Sub => a.wrapping_sub(b),
                IntRegOp::Xor => a ^ b,
            },
            Instruction::IntImm { op, .. } => match op {
                IntImmOp::Addi => a.wrapping_add(imm),
                IntImmOp::Subi => a.wrapping_sub(imm),
            },
            Instruction::Load { .. } | Instruction::Store { .. } => a.wrapping_add(imm),
            Instruction::Branch { .. } | Instruction::Jump { .. } => npc.wrapping_add(imm),
            Instruction::FpReg { op, .. } => Fpu::execute(op, a, b),
            Instruction::Nop | Instruction::Eop => return None,
        };
        Some(out)
    }
}
