//! ALU tests.

use pipesim_core::core::units::alu::Alu;
use pipesim_core::core::units::bru::{self, BranchOutcome};
use pipesim_core::isa::{BranchCond, Instruction, IntRegOp};
use proptest::prelude::*;

use crate::common::builder::{add, addi, branch, lw, sw};

#[test]
fn effective_address_is_base_plus_offset() {
    assert_eq!(Alu::execute(&lw(1, 8, 2), 100, 0, 8, 4), Some(108));
    let neg = (-4_i32) as u32;
    assert_eq!(Alu::execute(&sw(1, -4, 2), 100, 9, neg, 4), Some(96));
}

#[test]
fn branch_target_is_npc_plus_offset() {
    let beqz = branch(BranchCond::Eqz, 1, 8);
    let target = Alu::execute(&beqz, 0, 0, 8, 4).unwrap();
    assert_eq!(target, 12);
    assert_eq!(
        bru::resolve(&beqz, 0, target),
        Some(BranchOutcome {
            taken: true,
            target: 12
        })
    );
    assert_eq!(bru::resolve(&beqz, 3, target).map(|o| o.taken), Some(false));
    assert_eq!(bru::resolve(&add(1, 2, 3), 0, 0), None);
}

#[test]
fn jump_is_always_taken() {
    let jump = Instruction::Jump { offset: 16 };
    assert_eq!(bru::resolve(&jump, 0xFFFF_FFFF, 20).map(|o| o.taken), Some(true));
}

#[test]
fn markers_produce_no_result() {
    assert_eq!(Alu::execute(&Instruction::Nop, 1, 2, 3, 4), None);
    assert_eq!(Alu::execute(&Instruction::Eop, 1, 2, 3, 4), None);
}

proptest! {
    #[test]
    fn integer_ops_wrap(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(&add(1, 2, 3), a, b, 0, 0), Some(a.wrapping_add(b)));
        let sub = Instruction::IntReg {
            op: IntRegOp::Sub,
            rd: pipesim_core::common::Reg::int(1),
            rs1: pipesim_core::common::Reg::int(2),
            rs2: pipesim_core::common::Reg::int(3),
        };
        prop_assert_eq!(Alu::execute(&sub, a, b, 0, 0), Some(a.wrapping_sub(b)));
        prop_assert_eq!(Alu::execute(&addi(1, 2, 0), a, 0, b, 0), Some(a.wrapping_add(b)));
    }
}
