//! Pipeline Latch Interface.
//!
//! Every stage boundary latch answers the same questions: which instruction
//! it holds, what a special-purpose register reads at that boundary, and how
//! to turn it into a bubble.

use crate::core::pipeline::latches::SpRegister;
use crate::isa::instruction::Instruction;

/// Represents a pipeline latch (inter-stage buffer).
pub trait PipelineLatch {
    /// The instruction held, or `None` for a bubble.
    fn instruction(&self) -> Option<&Instruction>;

    /// Value of `reg` at this boundary, or `None` if the register is not
    /// carried here or not used by the occupying instruction.
    fn sp_register(&self, reg: SpRegister) -> Option<u32>;

    /// Replaces the contents with a bubble.
    fn flush(&mut self);

    /// Checks if the latch holds a bubble.
    fn is_bubble(&self) -> bool {
        self.instruction().is_none()
    }
}
