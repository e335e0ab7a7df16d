//! Branch Resolution Unit (BRU).
//!
//! Branches and jumps resolve in EX. There is no predictor: fetch always
//! continues sequentially, and a taken outcome triggers a flush.

use crate::isa::instruction::Instruction;

/// Outcome of a resolved control instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Whether control transfers to `target`.
    pub taken: bool,
    /// NPC-relative target computed by the ALU.
    pub target: u32,
}

/// Resolves the COND of a control instruction.
///
/// # Arguments
///
/// * `inst`   - The instruction in EX
/// * `a`      - Value latched in A (the tested register)
/// * `target` - `ALU_OUTPUT`, the branch target
///
/// # Returns
///
/// `None` for non-control instructions.
pub const fn resolve(inst: &Instruction, a: u32, target: u32) -> Option<BranchOutcome> {
    let taken = match *inst {
        Instruction::Branch { cond, .. } => cond.taken(a),
        Instruction::Jump { .. } => true,
        _ => return None,
    };
    Some(BranchOutcome { taken, target })
}
