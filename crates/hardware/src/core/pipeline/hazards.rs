//! Hazard Detection.
//!
//! This module decides whether the instruction in ID may leave for EX. It provides:
//! 1. **RAW Detection:** A source register still awaiting commit by an older instruction.
//! 2. **Structural Detection:** No idle functional unit of the required type.
//!
//! No forwarding paths exist: every RAW hazard is resolved by stalling until the
//! producer commits at WB. WB runs earlier in the same cycle than ID, so a
//! value committed this cycle is already visible.

use crate::common::reg::Reg;
use crate::core::Cpu;
use crate::isa::instruction::Instruction;

/// Returns the first register `consumer` reads that `producer` writes.
///
/// # Arguments
///
/// * `consumer` - Instruction in ID.
/// * `producer` - Older, uncommitted instruction.
///
/// # Examples
///
/// ```
/// use pipesim_core::common::Reg;
/// use pipesim_core::core::pipeline::hazards::raw_conflict;
/// use pipesim_core::isa::{Instruction, IntImmOp, IntRegOp};
///
/// // ADDI R1 R0 5   <- producer, still in flight
/// // ADD  R2 R1 R1  <- consumer in ID
/// let addi = Instruction::IntImm { op: IntImmOp::Addi, rd: Reg::int(1), rs1: Reg::int(0), imm: 5 };
/// let add = Instruction::IntReg { op: IntRegOp::Add, rd: Reg::int(2), rs1: Reg::int(1), rs2: Reg::int(1) };
/// assert_eq!(raw_conflict(&add, &addi), Some(Reg::int(1)));
/// ```
pub fn raw_conflict(consumer: &Instruction, producer: &Instruction) -> Option<Reg> {
    let dest = producer.dest()?;
    consumer.sources().find(|&src| src == dest)
}

/// Checks if the instruction in ID must stall on a RAW dependency.
///
/// # Arguments
///
/// * `cpu` - CPU state after WB, MEM and EX have run this cycle.
/// * `consumer` - Instruction in ID.
///
/// # Returns
///
/// The conflicting register, or `None` if all sources are committed.
pub fn need_stall_raw(cpu: &Cpu, consumer: &Instruction) -> Option<Reg> {
    cpu.uncommitted()
        .find_map(|producer| raw_conflict(consumer, producer))
}

/// Checks if the instruction in ID must stall for a functional unit.
///
/// # Returns
///
/// The index of the unit it can be dispatched to, or `None` if every unit of
/// its type is occupied.
pub fn free_unit_for(cpu: &Cpu, inst: &Instruction) -> Option<usize> {
    cpu.units.find_free(inst.unit_kind())
}
