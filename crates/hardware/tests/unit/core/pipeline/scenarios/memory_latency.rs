//! Data memory latency scenarios.

use pipesim_core::core::pipeline::latches::Stage;
use pipesim_core::isa::Opcode;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;

#[test]
fn load_holds_mem_for_latency_cycles() {
    let mut ctx = TestContext::builder()
        .mem_latency(2)
        .build()
        .load("LW R1 0(R0)\nADDI R2 R0 1\nEOP");
    ctx.write_word(0, 77);
    ctx.run();
    assert_eq!(ctx.get_reg(1), 77);
    assert_eq!(ctx.get_reg(2), 1);
    assert_eq!(ctx.stats().stalls_mem, 2);
    assert_eq!(ctx.stalls(), 2);
    assert_eq!(ctx.cycles(), 8);
}

#[test]
fn store_pays_latency_too() {
    let mut ctx = TestContext::builder()
        .mem_latency(3)
        .build()
        .load("SW R1 0(R0)\nEOP");
    ctx.set_reg(1, 5);
    ctx.run();
    assert_eq!(ctx.read_word(0), 5);
    assert_eq!(ctx.stalls(), 3);
    assert_eq!(ctx.cycles(), 8);
}

#[test]
fn each_access_waits_independently() {
    let mut ctx = TestContext::builder()
        .mem_latency(1)
        .build()
        .load("LW R1 0(R0)\nLW R2 4(R0)\nEOP");
    ctx.write_word(0, 1);
    ctx.write_word(4, 2);
    ctx.run();
    assert_eq!((ctx.get_reg(1), ctx.get_reg(2)), (1, 2));
    assert_eq!(ctx.stats().stalls_mem, 2);
    assert_eq!(ctx.stalls(), 2);
    assert_eq!(ctx.cycles(), 8);
}

#[test]
fn memory_stall_takes_precedence_within_a_cycle() {
    let mut ctx = TestContext::builder()
        .mem_latency(1)
        .build()
        .load("LW R1 0(R0)\nADD R2 R1 R1\nEOP");
    ctx.write_word(0, 21);
    ctx.run();
    assert_eq!(ctx.get_reg(2), 42);
    assert_eq!(ctx.stats().stalls_mem, 1);
    assert_eq!(ctx.stats().stalls_data, 2);
    assert_eq!(ctx.stalls(), 3);
    assert_eq!(ctx.cycles(), 9);
}

#[test]
fn ex_mem_is_held_while_memory_is_busy() {
    let mut ctx = TestContext::builder()
        .mem_latency(2)
        .build()
        .load("LW R1 0(R0)\nEOP");
    ctx.run_cycles(4);
    assert_eq!(
        ctx.sim.instruction_at(Stage::Mem).map(|i| i.opcode()),
        Some(Opcode::Lw)
    );
    assert!(ctx.sim.instruction_at(Stage::Wb).is_none());
    ctx.run_cycles(2);
    assert!(ctx.sim.instruction_at(Stage::Wb).is_some());
}

#[test]
fn single_precision_loads_and_stores_move_raw_bits() {
    let mut ctx = TestContext::new().load("LWS F1 0(R0)\nSWS F1 8(R0)\nEOP");
    ctx.write_word(0, 2.5f32.to_bits());
    ctx.run();
    assert_eq!(ctx.get_freg(1), 2.5);
    assert_eq!(ctx.read_word(8), 2.5f32.to_bits());
}
