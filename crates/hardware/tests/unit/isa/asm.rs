//! Assembler tests.

use pipesim_core::common::{AsmError, Reg};
use pipesim_core::isa::{BranchCond, FpOp, Instruction, IntImmOp, Program, assemble};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::{add, addi, branch, lw, sw};

#[test]
fn assembles_every_format() {
    let program = assemble(
        "ADD R1 R2 R3\n\
         ADDI R4 R0 0x10\n\
         LW R5 8(R1)\n\
         SW R5 -4(R2)\n\
         LWS F1 0(R3)\n\
         MULTS F2 F1 F1\n\
         NOP\n\
         EOP\n",
    )
    .unwrap();
    let insts = program.instructions();
    assert_eq!(insts[0], add(1, 2, 3));
    assert_eq!(insts[1], addi(4, 0, 16));
    assert_eq!(insts[2], lw(5, 8, 1));
    assert_eq!(insts[3], sw(5, -4, 2));
    assert_eq!(
        insts[4],
        Instruction::Load {
            fp: true,
            rd: Reg::fp(1),
            base: Reg::int(3),
            offset: 0
        }
    );
    assert_eq!(insts[6], Instruction::Nop);
    assert_eq!(insts[7], Instruction::Eop);
}

#[test]
fn branch_offsets_are_relative_to_npc() {
    let program = assemble(
        "      BEQZ R1 skip\n\
               ADDI R2 R0 1\n\
         skip: ADDI R3 R0 3\n\
               JUMP skip\n\
               EOP\n",
    )
    .unwrap();
    // (label - index - 1) << 2
    assert_eq!(program.instructions()[0], branch(BranchCond::Eqz, 1, 4));
    assert_eq!(
        program.instructions()[3],
        Instruction::Jump {
            offset: (-8_i32) as u32
        }
    );
    assert_eq!(program.labels().get("skip"), Some(&2));
    assert_eq!(program.label_at(2), Some("skip"));
}

#[test]
fn comments_blank_lines_and_commas_are_ignored() {
    let program = assemble(
        "# header comment\n\
         \n\
         loop:\n\
         SUBI R1, R1, 1   ; decrement\n\
         BNEZ R1, loop\n\
         EOP\n",
    )
    .unwrap();
    assert_eq!(program.len(), 3);
    assert_eq!(
        program.instructions()[0],
        Instruction::IntImm {
            op: IntImmOp::Subi,
            rd: Reg::int(1),
            rs1: Reg::int(1),
            imm: 1
        }
    );
    assert_eq!(program.instructions()[1], branch(BranchCond::Nez, 1, -8));
}

#[test]
fn program_parses_via_from_str() {
    let program: Program = "EOP".parse().unwrap();
    assert_eq!(program.instructions(), &[Instruction::Eop]);
}

#[rstest]
#[case("MUL R1 R2 R3\nEOP", AsmError::UnknownOpcode { line: 1, token: "MUL".into() })]
#[case("add R1 R2 R3\nEOP", AsmError::UnknownOpcode { line: 1, token: "add".into() })]
#[case("NOP\nBEQZ R1 nowhere\nEOP", AsmError::UnresolvedLabel { line: 2, label: "nowhere".into() })]
#[case("a: NOP\na: EOP", AsmError::DuplicateLabel { line: 2, label: "a".into() })]
#[case("ADD R1 F2 R3\nEOP", AsmError::BadRegister { line: 1, operand: "F2".into(), expected: "integer" })]
#[case("ADDS F1 R2 F3\nEOP", AsmError::BadRegister { line: 1, operand: "R2".into(), expected: "floating-point" })]
#[case("ADDI R1 R0 ten\nEOP", AsmError::BadImmediate { line: 1, operand: "ten".into() })]
#[case("LW R1 R2\nEOP", AsmError::BadImmediate { line: 1, operand: "R2".into() })]
#[case("ADD R1 R2\nEOP", AsmError::OperandCount { line: 1, opcode: "ADD".into(), expected: 3, found: 2 })]
#[case("ADDI R1 R0 1", AsmError::MissingEop)]
fn rejects_malformed_programs(#[case] source: &str, #[case] expected: AsmError) {
    assert_eq!(assemble(source).unwrap_err(), expected);
}

#[test]
fn prebuilt_program_rejects_registers_past_the_file() {
    let err = Program::from_instructions(vec![
        addi(1, 0, 1),
        Instruction::IntImm {
            op: IntImmOp::Addi,
            rd: Reg::int(40),
            rs1: Reg::int(0),
            imm: 1,
        },
        Instruction::Eop,
    ])
    .unwrap_err();
    assert_eq!(
        err,
        AsmError::RegisterOutOfRange {
            index: 1,
            reg: Reg::int(40),
        }
    );

    let fp = Instruction::FpReg {
        op: FpOp::Adds,
        fd: Reg::fp(1),
        fs1: Reg::fp(32),
        fs2: Reg::fp(2),
    };
    assert!(matches!(
        Program::from_instructions(vec![fp, Instruction::Eop]),
        Err(AsmError::RegisterOutOfRange { index: 0, .. })
    ));
    assert!(Program::from_instructions(vec![addi(31, 0, 1), Instruction::Eop]).is_ok());
}
