//! Hazard Detection Tests.
//!
//! Verifies that `need_stall_raw` sees every uncommitted producer (functional
//! unit occupants, EX/MEM and MEM/WB) and that `free_unit_for` reports
//! structural hazards.

use pipesim_core::Config;
use pipesim_core::common::Reg;
use pipesim_core::core::Cpu;
use pipesim_core::core::pipeline::hazards::{free_unit_for, need_stall_raw, raw_conflict};
use pipesim_core::core::units::UnitKind;
use pipesim_core::isa::{FpOp, Instruction};

use crate::common::builder::{add, addi, ex_mem, fp, id_ex, lw, mem_wb, sw};

fn cpu() -> Cpu {
    let mut cpu = Cpu::new(&Config::default()).unwrap();
    cpu.units.ensure_integer_unit();
    cpu
}

#[test]
fn conflict_on_either_source() {
    assert_eq!(raw_conflict(&add(3, 1, 2), &addi(1, 0, 5)), Some(Reg::int(1)));
    assert_eq!(raw_conflict(&add(3, 1, 2), &addi(2, 0, 5)), Some(Reg::int(2)));
    assert_eq!(raw_conflict(&add(3, 1, 2), &addi(4, 0, 5)), None);
}

#[test]
fn store_data_register_is_a_source() {
    assert_eq!(raw_conflict(&sw(5, 0, 0), &lw(5, 0, 0)), Some(Reg::int(5)));
}

#[test]
fn r0_never_conflicts() {
    assert_eq!(raw_conflict(&add(3, 0, 0), &addi(0, 1, 5)), None);
}

#[test]
fn register_classes_do_not_alias() {
    let fadd = fp(FpOp::Adds, 3, 1, 2);
    assert_eq!(raw_conflict(&add(4, 3, 3), &fadd), None);
    assert_eq!(
        raw_conflict(&fp(FpOp::Mults, 4, 3, 3), &fadd),
        Some(Reg::fp(3))
    );
}

#[test]
fn empty_pipeline_never_stalls() {
    let cpu = cpu();
    assert_eq!(need_stall_raw(&cpu, &add(3, 1, 2)), None);
}

#[test]
fn producer_in_functional_unit_stalls() {
    let mut cpu = cpu();
    cpu.units.dispatch(0, id_ex(addi(1, 0, 5), 0, Some(0), None, 0));
    assert_eq!(need_stall_raw(&cpu, &add(3, 1, 1)), Some(Reg::int(1)));
}

#[test]
fn producer_in_ex_mem_stalls() {
    let mut cpu = cpu();
    cpu.ex_mem = ex_mem(addi(1, 0, 5), 5, None, 0);
    assert_eq!(need_stall_raw(&cpu, &add(3, 1, 1)), Some(Reg::int(1)));
}

#[test]
fn producer_in_mem_wb_stalls() {
    let mut cpu = cpu();
    cpu.mem_wb = mem_wb(lw(2, 0, 0), None, Some(9));
    assert_eq!(need_stall_raw(&cpu, &add(3, 1, 2)), Some(Reg::int(2)));
}

#[test]
fn non_writing_producers_are_ignored() {
    let mut cpu = cpu();
    cpu.ex_mem = ex_mem(sw(1, 0, 0), 0, Some(1), 0);
    cpu.mem_wb = mem_wb(Instruction::Nop, None, None);
    assert_eq!(need_stall_raw(&cpu, &add(3, 1, 1)), None);
}

#[test]
fn busy_units_cause_structural_hazard() {
    let mut cpu = Cpu::new(&Config::default()).unwrap();
    cpu.units.add(UnitKind::Multiplier, 4, 1).unwrap();
    let mult = fp(FpOp::Mults, 3, 1, 2);
    assert_eq!(free_unit_for(&cpu, &mult), Some(0));
    cpu.units.dispatch(0, id_ex(mult, 0, Some(0), Some(0), 0));
    assert_eq!(free_unit_for(&cpu, &fp(FpOp::Mults, 4, 1, 2)), None);
    assert_eq!(free_unit_for(&cpu, &fp(FpOp::Adds, 4, 1, 2)), None);
}
