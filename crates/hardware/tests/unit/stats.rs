//! Statistics tests.

use pipesim_core::isa::Instruction;
use pipesim_core::stats::{SimStats, StallKind};

use crate::common::builder::{addi, lw};

#[test]
fn ipc_is_zero_before_any_cycle() {
    let stats = SimStats::default();
    assert!(stats.ipc().abs() < f64::EPSILON);
}

#[test]
fn ipc_divides_instructions_by_cycles() {
    let mut stats = SimStats::default();
    stats.cycles = 8;
    stats.instructions_executed = 2;
    assert!((stats.ipc() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn stalls_feed_total_and_breakdown() {
    let mut stats = SimStats::default();
    stats.record_stall(StallKind::Data);
    stats.record_stall(StallKind::Data);
    stats.record_stall(StallKind::Memory);
    stats.record_stall(StallKind::Control);
    stats.record_stall(StallKind::Structural);
    assert_eq!(stats.stalls, 5);
    assert_eq!(stats.stalls_data, 2);
    assert_eq!(stats.stalls_mem, 1);
    assert_eq!(stats.stalls_control, 1);
    assert_eq!(stats.stalls_structural, 1);
}

#[test]
fn commits_update_the_instruction_mix() {
    let mut stats = SimStats::default();
    stats.record_commit(&addi(1, 0, 1));
    stats.record_commit(&lw(2, 0, 0));
    stats.record_commit(&Instruction::Jump { offset: 0 });
    assert_eq!(stats.instructions_executed, 3);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_store, 0);
}

#[test]
fn sections_can_be_selected() {
    let stats = SimStats::default();
    let all = stats.format_sections(&[]);
    assert!(all.contains("sim_cycles"));
    assert!(all.contains("HAZARD BREAKDOWN"));
    assert!(all.contains("INSTRUCTION MIX"));

    let hazards = stats.format_sections(&["hazards".to_string()]);
    assert!(hazards.contains("stalls.memory"));
    assert!(!hazards.contains("sim_cycles"));
    assert!(!hazards.contains("INSTRUCTION MIX"));
}
