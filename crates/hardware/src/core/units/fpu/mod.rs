//! Floating-Point Unit (FPU).
//!
//! Single-precision arithmetic for `ADDS`, `SUBS`, `MULTS` and `DIVS`.
//! Operands travel through the latches as raw IEEE 754 bits and are only
//! reinterpreted here.

use crate::isa::instruction::FpOp;

/// Floating-Point Unit (FPU) for single-precision operations.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation on raw `f32` bit patterns.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform
    /// * `a`  - Bits of the first operand
    /// * `b`  - Bits of the second operand
    ///
    /// # Returns
    ///
    /// Bits of the IEEE 754 result. Division by zero follows IEEE rules.
    pub fn execute(op: FpOp, a: u32, b: u32) -> u32 {
        let (x, y) = (f32::from_bits(a), f32::from_bits(b));
        let r = match op {
            FpOp::Adds => x + y,
            FpOp::Subs => x - y,
            FpOp::Mults => x * y,
            FpOp::Divs => x / y,
        };
        r.to_bits()
    }
}
