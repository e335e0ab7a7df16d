//! Fetch Stage Unit Tests.
//!
//! Verifies sequential fetch, redirects, freezing on a decode stall and the
//! parking of the fetch stream on `EOP`.

use pipesim_core::common::SimError;
use pipesim_core::core::pipeline::stages::fetch_stage;
use pipesim_core::core::pipeline::traits::PipelineLatch;
use pipesim_core::isa::{Instruction, assemble};

use super::cpu;
use crate::common::builder::addi;

fn loaded_cpu(source: &str) -> pipesim_core::core::Cpu {
    let mut cpu = cpu();
    cpu.imem.load(assemble(source).unwrap(), 0).unwrap();
    cpu
}

#[test]
fn fetches_sequentially() {
    let mut cpu = loaded_cpu("ADDI R1 R0 1\nADDI R2 R0 2\nEOP");
    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(addi(1, 0, 1)));
    assert_eq!(cpu.if_id.pc, 0);
    assert_eq!(cpu.if_id.npc, Some(4));
    assert_eq!(cpu.pc, 4);

    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(addi(2, 0, 2)));
    assert_eq!(cpu.if_id.seq, 1);
    assert_eq!(cpu.pc, 8);
}

#[test]
fn stall_freezes_pc_and_latch() {
    let mut cpu = loaded_cpu("ADDI R1 R0 1\nEOP");
    fetch_stage(&mut cpu).unwrap();
    cpu.if_stall = true;
    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(addi(1, 0, 1)));
    assert_eq!(cpu.pc, 4);
}

#[test]
fn redirect_overrides_pc() {
    let mut cpu = loaded_cpu("NOP\nNOP\nADDI R3 R0 3\nEOP");
    cpu.redirect = Some(8);
    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(addi(3, 0, 3)));
    assert_eq!(cpu.if_id.pc, 8);
    assert_eq!(cpu.pc, 12);
    assert_eq!(cpu.redirect, None);
}

#[test]
fn eop_parks_the_fetch_stream() {
    let mut cpu = loaded_cpu("EOP");
    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(Instruction::Eop));
    assert_eq!(cpu.pc, 0);
    assert!(cpu.fetch_parked);

    fetch_stage(&mut cpu).unwrap();
    assert!(cpu.if_id.is_bubble());
    assert_eq!(cpu.pc, 0);
}

#[test]
fn redirect_resumes_a_parked_stream() {
    let mut cpu = loaded_cpu("NOP\nEOP");
    cpu.pc = 4;
    fetch_stage(&mut cpu).unwrap();
    assert!(cpu.fetch_parked);
    cpu.redirect = Some(0);
    fetch_stage(&mut cpu).unwrap();
    assert_eq!(cpu.if_id.inst, Some(Instruction::Nop));
    assert!(!cpu.fetch_parked);
}

#[test]
fn fetch_outside_the_store_fails() {
    let mut cpu = loaded_cpu("EOP");
    cpu.pc = 50 * 4;
    assert_eq!(
        fetch_stage(&mut cpu),
        Err(SimError::FetchOutOfRange { pc: 200 })
    );
}
