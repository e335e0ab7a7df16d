//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It reads the
//! instruction at PC from the instruction store into the IF/ID latch and
//! computes NPC. There is no prediction: fetch is sequential until EX
//! resolves a taken branch and supplies a redirect target.

use tracing::trace;

use crate::common::constants::WORD_SIZE;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::instruction::Instruction;

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// - Does nothing while ID is stalled
/// - A pending redirect overrides PC and resumes a parked fetch stream
/// - `EOP` leaves PC on itself and parks fetch; bubbles follow it
///
/// # Errors
///
/// Returns [`SimError::FetchOutOfRange`] if PC lies outside the instruction store.
pub fn fetch_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    if cpu.if_stall {
        return Ok(());
    }

    let pc = match cpu.redirect.take() {
        Some(target) => {
            cpu.fetch_parked = false;
            target
        }
        None if cpu.fetch_parked => {
            cpu.if_id.flush();
            return Ok(());
        }
        None => cpu.pc,
    };

    let inst = cpu.imem.fetch(pc)?;
    trace!(pc, %inst, "IF");
    cpu.if_id = IfIdEntry {
        inst: Some(inst),
        pc,
        npc: Some(pc.wrapping_add(WORD_SIZE)),
        seq: cpu.next_seq,
    };
    cpu.next_seq += 1;

    if inst == Instruction::Eop {
        cpu.fetch_parked = true;
        cpu.pc = pc;
    } else {
        cpu.pc = pc.wrapping_add(WORD_SIZE);
    }
    Ok(())
}
