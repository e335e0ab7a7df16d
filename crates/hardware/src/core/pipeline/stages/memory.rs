//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It performs:
//! 1. **Latency Modeling:** A load or store occupies MEM for `1 + latency` cycles, with
//!    bubbles sent to WB while it waits.
//! 2. **Data Access:** Little-endian word reads and writes at `ALU_OUTPUT`.
//! 3. **Forwarding:** Non-memory instructions pass their result straight to WB.

use tracing::trace;

use crate::common::constants::UNDEFINED;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::instruction::Instruction;
use crate::stats::StallKind;

/// Executes the memory access stage.
///
/// Sets `cpu.mem_accepts` to tell EX whether the EX/MEM latch was consumed.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Errors
///
/// Returns [`SimError::MemoryOutOfBounds`] if the access falls outside the data store.
pub fn mem_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let entry = cpu.ex_mem.clone();
    let Some(inst) = entry.inst else {
        cpu.mem_wb.flush();
        cpu.mem_accepts = true;
        return Ok(());
    };

    if inst.is_memory() {
        let remaining = *cpu.mem_wait.get_or_insert(cpu.data.latency());
        if remaining > 0 {
            cpu.mem_wait = Some(remaining - 1);
            cpu.mem_wb.flush();
            cpu.mem_accepts = false;
            cpu.note_stall(StallKind::Memory);
            trace!(pc = entry.pc, %inst, remaining, "MEM wait");
            return Ok(());
        }
        cpu.mem_wait = None;
    }

    let addr = entry.alu_output.unwrap_or(UNDEFINED);
    let (alu_output, lmd) = match inst {
        Instruction::Load { .. } => (None, Some(cpu.data.read_word(addr)?)),
        Instruction::Store { .. } => {
            cpu.data.write_word(addr, entry.b.unwrap_or(UNDEFINED))?;
            (None, None)
        }
        Instruction::IntReg { .. } | Instruction::IntImm { .. } | Instruction::FpReg { .. } => {
            (entry.alu_output, None)
        }
        _ => (None, None),
    };

    trace!(pc = entry.pc, %inst, addr, "MEM");
    cpu.mem_wb = MemWbEntry {
        inst: Some(inst),
        pc: entry.pc,
        alu_output,
        lmd,
        seq: entry.seq,
    };
    cpu.mem_accepts = true;
    Ok(())
}
