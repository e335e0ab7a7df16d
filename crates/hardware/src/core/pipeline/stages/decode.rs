//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs:
//! 1. **Flush:** Discards the wrong-path instruction after a taken branch.
//! 2. **Hazard Detection:** Stalls on RAW dependencies, then on a missing free unit.
//! 3. **Operand Read:** Latches A, B and IMM from the committed register state.
//! 4. **Dispatch:** Places the instruction into its functional unit.

use tracing::trace;

use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::traits::PipelineLatch;
use crate::stats::StallKind;

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// On a stall ID/EX receives a bubble and `cpu.if_stall` tells IF to keep both
/// IF/ID and PC, so the same instruction is decoded again next cycle.
pub fn decode_stage(cpu: &mut Cpu) {
    cpu.if_stall = false;

    if std::mem::take(&mut cpu.flush_if_id) {
        if !cpu.if_id.is_bubble() {
            cpu.stats.flushes += 1;
        }
        cpu.if_id.flush();
        cpu.id_ex.flush();
        return;
    }

    let Some(inst) = cpu.if_id.inst else {
        cpu.id_ex.flush();
        return;
    };

    if let Some(reg) = hazards::need_stall_raw(cpu, &inst) {
        trace!(pc = cpu.if_id.pc, %inst, %reg, "ID stall: RAW");
        stall(cpu, StallKind::Data);
        return;
    }
    let Some(idx) = hazards::free_unit_for(cpu, &inst) else {
        trace!(pc = cpu.if_id.pc, %inst, kind = %inst.unit_kind(), "ID stall: no free unit");
        stall(cpu, StallKind::Structural);
        return;
    };

    let entry = IdExEntry {
        inst: Some(inst),
        pc: cpu.if_id.pc,
        npc: cpu.if_id.npc,
        a: inst.operand_a().map(|r| cpu.read_reg(r)),
        b: inst.operand_b().map(|r| cpu.read_reg(r)),
        imm: inst.imm(),
        seq: cpu.if_id.seq,
    };
    trace!(pc = entry.pc, %inst, unit = idx, "ID dispatch");
    cpu.units.dispatch(idx, entry.clone());
    cpu.id_ex = entry;
}

/// Holds the instruction in ID for another cycle.
fn stall(cpu: &mut Cpu, kind: StallKind) {
    cpu.id_ex.flush();
    cpu.if_stall = true;
    cpu.note_stall(kind);
}
