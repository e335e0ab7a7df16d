//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the integer or floating-point register file and
//! updates the completion statistics. An `EOP` reaching WB ends the run.

use tracing::{debug, trace};

use crate::core::Cpu;
use crate::isa::instruction::Instruction;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state
///
/// # Behavior
///
/// - Loads commit LMD; arithmetic instructions commit `ALU_OUTPUT`
/// - Bubbles and `NOP` commit nothing and are not counted
/// - `EOP` sets `cpu.halted`; the cycle it is seen in is not counted
pub fn wb_stage(cpu: &mut Cpu) {
    let Some(inst) = cpu.mem_wb.inst else {
        return;
    };

    match inst {
        Instruction::Eop => {
            cpu.halted = true;
            debug!(cycles = cpu.stats.cycles, "EOP retired");
            return;
        }
        Instruction::Nop => return,
        _ => {}
    }

    if let Some(rd) = inst.dest() {
        let value = if matches!(inst, Instruction::Load { .. }) {
            cpu.mem_wb.lmd
        } else {
            cpu.mem_wb.alu_output
        };
        if let Some(v) = value {
            cpu.write_reg(rd, v);
            trace!(pc = cpu.mem_wb.pc, %inst, %rd, value = v, "WB commit");
        }
    }
    cpu.stats.record_commit(&inst);
}
