//! Main Execution Loop.
//!
//! This module implements the clock of the CPU. It performs the following:
//! 1. **Run Preparation:** Checks that a program is loaded and every unit type it needs exists.
//! 2. **Pipeline Coordination:** Calls the five stages downstream-first, once per cycle.
//! 3. **Timing Management:** Counts cycles and records at most one stall per cycle.

use tracing::{debug, trace};

use super::Cpu;
use crate::common::error::{ConfigError, SimError};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::units::UnitKind;

impl Cpu {
    /// Validates the machine before the first cycle of a run.
    ///
    /// Provisions the implicit integer unit when none was configured.
    ///
    /// # Errors
    ///
    /// - [`SimError::NoProgram`] if nothing has been loaded.
    /// - [`ConfigError::MissingUnit`] if an instruction needs a floating-point unit
    ///   type with no registered instance.
    pub fn prepare_run(&mut self) -> Result<(), SimError> {
        if !self.imem.is_loaded() {
            return Err(SimError::NoProgram);
        }
        self.units.ensure_integer_unit();
        if let Some(inst) = self
            .imem
            .program()
            .instructions()
            .iter()
            .find(|i| i.unit_kind() != UnitKind::Integer && !self.units.has_kind(i.unit_kind()))
        {
            return Err(ConfigError::MissingUnit {
                kind: inst.unit_kind(),
                opcode: inst.opcode().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Does nothing once `EOP` has retired. The cycle in which `EOP` reaches WB
    /// sets the halt flag and is not counted.
    ///
    /// # Errors
    ///
    /// Propagates out-of-bounds data accesses from MEM and fetches outside the
    /// instruction store from IF.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.halted {
            return Ok(());
        }
        self.cycle_stall = None;
        self.mem_accepts = true;

        wb_stage(self);
        if self.halted {
            debug!(
                cycles = self.stats.cycles,
                instructions = self.stats.instructions_executed,
                stalls = self.stats.stalls,
                "pipeline drained"
            );
            return Ok(());
        }
        mem_stage(self)?;
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self)?;

        self.stats.cycles += 1;
        if let Some(kind) = self.cycle_stall {
            self.stats.record_stall(kind);
            trace!(cycle = self.stats.cycles, ?kind, "stall");
        }
        Ok(())
    }
}
