//! Program Listing.
//!
//! Renders an assembled [`Program`] as an address-annotated listing for the
//! CLI and for trace output. Branch and jump offsets are shown together with
//! the absolute address they resolve to.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::asm::assemble;
//! use pipesim_core::isa::disasm::listing;
//!
//! let program = assemble("start: ADDI R1 R0 1\nEOP").unwrap();
//! let text = listing(&program, 0x100);
//! assert!(text.starts_with("0x00000100  start:"));
//! ```

use std::fmt::Write;

use crate::common::constants::WORD_SIZE;
use crate::isa::asm::Program;
use crate::isa::instruction::Instruction;

/// Absolute target of a control instruction located at `pc`.
pub const fn branch_target(inst: &Instruction, pc: u32) -> Option<u32> {
    match *inst {
        Instruction::Branch { offset, .. } | Instruction::Jump { offset } => {
            Some(pc.wrapping_add(WORD_SIZE).wrapping_add(offset))
        }
        _ => None,
    }
}

/// Formats every instruction of `program` with its address when loaded at `base`.
pub fn listing(program: &Program, base: u32) -> String {
    let mut out = String::new();
    for (i, inst) in program.instructions().iter().enumerate() {
        let pc = base.wrapping_add(i as u32 * WORD_SIZE);
        let label = program
            .label_at(i)
            .map(|l| format!("{l}:"))
            .unwrap_or_default();
        let _ = write!(out, "{pc:#010x}  {label:<10} {inst}");
        if let Some(target) = branch_target(inst, pc) {
            let _ = write!(out, "    ; -> {target:#010x}");
        }
        out.push('\n');
    }
    out
}
