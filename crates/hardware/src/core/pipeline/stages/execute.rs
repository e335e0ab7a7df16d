//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. EX is the pool of
//! functional units rather than a single ALU. Each cycle it:
//! 1. **Counts Down:** Advances the busy counter of every occupied unit.
//! 2. **Completes:** Hands the oldest occupant to MEM once its counter is zero.
//! 3. **Resolves Control:** Computes COND and redirects fetch for taken branches and jumps.

use tracing::{debug, trace};

use crate::common::constants::UNDEFINED;
use crate::core::Cpu;
use crate::core::pipeline::latches::ExMemEntry;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::Alu;
use crate::core::units::bru;
use crate::isa::instruction::Instruction;
use crate::stats::StallKind;

/// Executes the execute stage.
///
/// Completion is in order: a younger instruction that finished early waits in
/// its unit until every older one has left. An instruction also waits when MEM
/// did not consume the EX/MEM latch this cycle.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    cpu.units.tick();
    if !cpu.mem_accepts {
        return;
    }

    let Some(entry) = cpu
        .units
        .oldest()
        .filter(|&idx| cpu.units.is_done(idx))
        .and_then(|idx| cpu.units.retire(idx))
    else {
        cpu.ex_mem.flush();
        return;
    };
    let Some(inst) = entry.inst else {
        cpu.ex_mem.flush();
        return;
    };

    let alu_output = Alu::execute(
        &inst,
        entry.a.unwrap_or(UNDEFINED),
        entry.b.unwrap_or(UNDEFINED),
        entry.imm.unwrap_or(UNDEFINED),
        entry.npc.unwrap_or(UNDEFINED),
    );
    let outcome = alu_output.and_then(|target| {
        bru::resolve(&inst, entry.a.unwrap_or(UNDEFINED), target)
    });

    trace!(pc = entry.pc, %inst, ?alu_output, "EX");
    cpu.ex_mem = ExMemEntry {
        inst: Some(inst),
        pc: entry.pc,
        b: if matches!(inst, Instruction::Store { .. }) {
            entry.b
        } else {
            None
        },
        alu_output,
        cond: outcome.map(|o| o.taken),
        seq: entry.seq,
    };

    if let Some(outcome) = outcome {
        cpu.stats.branches += 1;
        if outcome.taken {
            let squashed = cpu.units.squash_younger(entry.seq);
            cpu.stats.flushes += squashed as u64;
            cpu.stats.branches_taken += 1;
            cpu.redirect = Some(outcome.target);
            cpu.flush_if_id = true;
            cpu.note_stall(StallKind::Control);
            debug!(pc = entry.pc, target = outcome.target, squashed, "branch taken");
        }
    }
}
