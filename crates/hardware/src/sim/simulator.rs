//! Simulator: the public face of the pipeline model.
//!
//! [`Simulator`] owns the [`Cpu`] and exposes setup, execution and inspection in
//! the vocabulary of the machine: registers by index, special-purpose registers
//! by stage, memory by address range, and run-for-N-cycles or run-to-completion.

use std::path::Path;

use tracing::{debug, info};

use crate::common::constants::{NUM_FP_REGISTERS, NUM_GP_REGISTERS};
use crate::common::error::{AsmError, ConfigError, SimError};
use crate::common::reg::Reg;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::latches::{SpRegister, Stage};
use crate::core::units::UnitKind;
use crate::isa::asm::Program;
use crate::isa::instruction::Instruction;
use crate::sim::{diag, loader};
use crate::stats::SimStats;

/// Top-level simulator.
///
/// # Examples
///
/// ```
/// use pipesim_core::{Config, Simulator};
/// use pipesim_core::isa::assemble;
///
/// let program = assemble("ADDI R1 R0 5\nADD R2 R1 R1\nEOP\n").unwrap();
/// let mut sim = Simulator::new(&Config::default()).unwrap();
/// sim.load_program(&program, 0).unwrap();
/// sim.run(0).unwrap();
///
/// assert!(sim.is_halted());
/// assert_eq!(sim.get_int_register(2).unwrap(), 10);
/// assert_eq!(sim.get_instructions_executed(), 2);
/// ```
#[derive(Debug)]
pub struct Simulator {
    /// CPU state: registers, stores, latches, units and statistics.
    pub cpu: Cpu,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty data store or an invalid unit list.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let cpu = Cpu::new(config)?;
        debug!(
            memory = cpu.data.len(),
            latency = cpu.data.latency(),
            units = cpu.units.len(),
            "simulator created"
        );
        Ok(Self { cpu })
    }

    /// Registers `instances` functional units of `kind` with the given latency.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for zero latency, zero instances, or a pool
    /// that would exceed its capacity.
    pub fn init_exec_unit(
        &mut self,
        kind: UnitKind,
        latency: u32,
        instances: usize,
    ) -> Result<(), ConfigError> {
        self.cpu.units.add(kind, latency, instances)
    }

    /// Places a program in the instruction store at `base` and points PC at it.
    ///
    /// Whatever is still in the pipeline is discarded. Registers, data memory
    /// and statistics carry over, so a program can be loaded after another one
    /// has run to completion.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::ProgramTooLarge`] if the program does not fit.
    pub fn load_program(&mut self, program: &Program, base: u32) -> Result<(), AsmError> {
        self.cpu.imem.load(program.clone(), base)?;
        self.cpu.clear_pipeline();
        self.cpu.pc = base;
        debug!(base, instructions = program.len(), "program loaded");
        Ok(())
    }

    /// Reads, assembles and loads a program file.
    ///
    /// # Errors
    ///
    /// Returns the I/O or assembly error; nothing is loaded on failure.
    pub fn load_program_file(&mut self, path: &Path, base: u32) -> Result<(), AsmError> {
        let program = loader::load_program_file(path)?;
        self.load_program(&program, base)
    }

    /// Runs the pipeline.
    ///
    /// With `cycles == 0` the run continues until `EOP` retires; otherwise it
    /// stops after exactly `cycles` cycles or at `EOP`, whichever comes first.
    /// Further calls continue where the previous one stopped.
    ///
    /// # Errors
    ///
    /// - [`SimError::NoProgram`] or a missing functional unit type before the first cycle.
    /// - [`SimError::CycleLimit`] if a run to completion exceeds `general.max_cycles`.
    /// - Out-of-bounds memory accesses and fetches.
    pub fn run(&mut self, cycles: u64) -> Result<(), SimError> {
        self.cpu.prepare_run()?;
        if cycles == 0 {
            while !self.cpu.halted {
                if let Some(limit) = self.cpu.max_cycles
                    && self.cpu.stats.cycles >= limit
                {
                    return Err(SimError::CycleLimit { limit });
                }
                self.cpu.tick()?;
            }
        } else {
            for _ in 0..cycles {
                if self.cpu.halted {
                    break;
                }
                self.cpu.tick()?;
            }
        }
        if self.cpu.halted {
            info!(
                cycles = self.cpu.stats.cycles,
                instructions = self.cpu.stats.instructions_executed,
                stalls = self.cpu.stats.stalls,
                "program completed"
            );
        }
        Ok(())
    }

    /// Advances exactly one cycle.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::run`].
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.run(1)
    }

    /// Restores registers, data memory, latches, units and statistics.
    ///
    /// The program and the unit configuration are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        debug!("simulator reset");
    }

    /// Value of a special-purpose register at the entrance of `stage`.
    pub fn get_sp_register(&self, reg: SpRegister, stage: Stage) -> u32 {
        self.cpu.sp_register(reg, stage)
    }

    /// Instruction at the entrance of `stage`, or `None` for a bubble.
    pub fn instruction_at(&self, stage: Stage) -> Option<Instruction> {
        self.cpu.instruction_at(stage)
    }

    /// Reads integer register `R<index>`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RegisterIndex`] for `index >= 32`.
    pub fn get_int_register(&self, index: usize) -> Result<i32, SimError> {
        Ok(self.cpu.read_reg(int_reg(index)?) as i32)
    }

    /// Writes integer register `R<index>`. Writes to `R0` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RegisterIndex`] for `index >= 32`.
    pub fn set_int_register(&mut self, index: usize, value: i32) -> Result<(), SimError> {
        self.cpu.write_reg(int_reg(index)?, value as u32);
        Ok(())
    }

    /// Reads floating-point register `F<index>`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RegisterIndex`] for `index >= 32`.
    pub fn get_fp_register(&self, index: usize) -> Result<f32, SimError> {
        Ok(f32::from_bits(self.cpu.read_reg(fp_reg(index)?)))
    }

    /// Writes floating-point register `F<index>`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RegisterIndex`] for `index >= 32`.
    pub fn set_fp_register(&mut self, index: usize, value: f32) -> Result<(), SimError> {
        self.cpu.write_reg(fp_reg(index)?, value.to_bits());
        Ok(())
    }

    /// Bytes of data memory in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if the range is not inside the store.
    pub fn read_memory(&self, start: u32, end: u32) -> Result<&[u8], SimError> {
        self.cpu.data.read_bytes(start, end)
    }

    /// Writes a little-endian word to data memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if the word is not inside the store.
    pub fn write_memory(&mut self, addr: u32, value: u32) -> Result<(), SimError> {
        self.cpu.data.write_word(addr, value)
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Instructions per cycle, or 0.0 before the first cycle.
    pub fn get_ipc(&self) -> f64 {
        self.cpu.stats.ipc()
    }

    /// Committed instructions, excluding `NOP` and `EOP`.
    pub const fn get_instructions_executed(&self) -> u64 {
        self.cpu.stats.instructions_executed
    }

    /// Elapsed clock cycles.
    pub const fn get_clock_cycles(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Stall cycles.
    pub const fn get_stalls(&self) -> u64 {
        self.cpu.stats.stalls
    }

    /// Returns `true` once `EOP` has retired.
    pub const fn is_halted(&self) -> bool {
        self.cpu.halted
    }

    /// Data memory dump of `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if the range is not inside the store.
    pub fn format_memory(&self, start: u32, end: u32) -> Result<String, SimError> {
        diag::format_memory(&self.cpu, start, end)
    }

    /// Register dump.
    pub fn format_registers(&self) -> String {
        diag::format_registers(&self.cpu)
    }

    /// Functional unit dump.
    pub fn format_units(&self) -> String {
        diag::format_units(&self.cpu)
    }

    /// Prints the data memory dump of `[start, end)` to stdout.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if the range is not inside the store.
    pub fn print_memory(&self, start: u32, end: u32) -> Result<(), SimError> {
        print!("{}", self.format_memory(start, end)?);
        Ok(())
    }

    /// Prints the register dump to stdout.
    pub fn print_registers(&self) {
        println!("{}", self.format_registers());
    }

    /// Prints the functional unit dump to stdout.
    pub fn print_units(&self) {
        print!("{}", self.format_units());
    }
}

fn int_reg(index: usize) -> Result<Reg, SimError> {
    if index < NUM_GP_REGISTERS {
        Ok(Reg::int(index as u8))
    } else {
        Err(SimError::RegisterIndex { index })
    }
}

fn fp_reg(index: usize) -> Result<Reg, SimError> {
    if index < NUM_FP_REGISTERS {
        Ok(Reg::fp(index as u8))
    } else {
        Err(SimError::RegisterIndex { index })
    }
}
