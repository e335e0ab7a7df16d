//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains register files, the program counter, and both stores.
//! 2. **Pipeline Control:** Holds the four stage-boundary latches and the per-cycle control signals.
//! 3. **Execution Resources:** Owns the functional unit pool used by EX.
//! 4. **Observability:** Answers special-purpose register queries "at the entrance of" a stage.

/// Per-cycle orchestration of the five stages.
pub mod execution;

use crate::common::constants::UNDEFINED;
use crate::common::error::ConfigError;
use crate::common::reg::Reg;
use crate::config::Config;
use crate::core::arch::RegisterFile;
use crate::core::pipeline::latches::{
    ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry, SpRegister, Stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::FunctionalUnitPool;
use crate::isa::instruction::Instruction;
use crate::mem::{DataMemory, InstructionMemory};
use crate::stats::{SimStats, StallKind};

/// Main CPU structure containing all processor state.
///
/// Every field is mutated only by the stage functions of one cycle, or by the
/// setup and inspection methods between cycles.
#[derive(Debug)]
pub struct Cpu {
    /// Integer and floating-point registers.
    pub regs: RegisterFile,
    /// Program counter: the address IF fetches next.
    pub pc: u32,
    /// Data store.
    pub data: DataMemory,
    /// Instruction store.
    pub imem: InstructionMemory,
    /// Functional units making up EX.
    pub units: FunctionalUnitPool,

    /// IF/ID Latch.
    pub if_id: IfIdEntry,
    /// ID/EX Latch.
    pub id_ex: IdExEntry,
    /// EX/MEM Latch.
    pub ex_mem: ExMemEntry,
    /// MEM/WB Latch.
    pub mem_wb: MemWbEntry,

    /// Remaining latency cycles of the access held in MEM.
    pub mem_wait: Option<u32>,
    /// Set by MEM when EX/MEM was consumed this cycle.
    pub mem_accepts: bool,
    /// Target for the next fetch after a taken branch.
    pub redirect: Option<u32>,
    /// Set by EX when ID must discard the instruction in IF/ID.
    pub flush_if_id: bool,
    /// Set by ID when it stalled; IF keeps IF/ID and PC.
    pub if_stall: bool,
    /// First stall cause observed this cycle.
    pub cycle_stall: Option<StallKind>,
    /// Set once IF has fetched `EOP`; fetch resumes only after a redirect.
    pub fetch_parked: bool,
    /// Sequence number of the next fetched instruction.
    pub next_seq: u64,
    /// Set once `EOP` has reached WB.
    pub halted: bool,
    /// Run-to-completion cycle bound.
    pub max_cycles: Option<u64>,

    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU from a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    ///
    /// # Returns
    ///
    /// A new `Cpu` with undefined registers, a `0xFF`-filled data store and an
    /// empty instruction store.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty data store or an invalid unit list.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.memory.size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        let mut units = FunctionalUnitPool::new();
        for u in &config.units {
            units.add(u.kind, u.latency, u.instances as usize)?;
        }
        Ok(Self {
            regs: RegisterFile::default(),
            pc: config.program.base_address,
            data: DataMemory::new(config.memory.size, config.memory.latency),
            imem: InstructionMemory::new(config.program.capacity),
            units,
            if_id: IfIdEntry::default(),
            id_ex: IdExEntry::default(),
            ex_mem: ExMemEntry::default(),
            mem_wb: MemWbEntry::default(),
            mem_wait: None,
            mem_accepts: true,
            redirect: None,
            flush_if_id: false,
            if_stall: false,
            cycle_stall: None,
            fetch_parked: false,
            next_seq: 0,
            halted: false,
            max_cycles: config.general.max_cycles,
            stats: SimStats::default(),
        })
    }

    /// Returns registers, memory, latches, units and statistics to their initial state.
    ///
    /// The loaded program and the unit configuration are kept; PC returns to the
    /// program base.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.data.reset();
        self.clear_pipeline();
        self.pc = self.imem.base();
        self.stats = SimStats::default();
    }

    /// Empties every latch and functional unit and clears the control signals.
    ///
    /// Registers, memory, PC and statistics are left alone.
    pub fn clear_pipeline(&mut self) {
        self.units.reset();
        self.if_id.flush();
        self.id_ex.flush();
        self.ex_mem.flush();
        self.mem_wb.flush();
        self.mem_wait = None;
        self.mem_accepts = true;
        self.redirect = None;
        self.flush_if_id = false;
        self.if_stall = false;
        self.cycle_stall = None;
        self.fetch_parked = false;
        self.next_seq = 0;
        self.halted = false;
    }

    /// Reads a register as raw bits.
    pub fn read_reg(&self, reg: Reg) -> u32 {
        self.regs.read(reg)
    }

    /// Writes raw bits to a register.
    pub fn write_reg(&mut self, reg: Reg, value: u32) {
        self.regs.write(reg, value);
    }

    /// Records the stall cause for this cycle unless one is already recorded.
    pub fn note_stall(&mut self, kind: StallKind) {
        let _ = self.cycle_stall.get_or_insert(kind);
    }

    /// Instructions issued but not yet committed, as seen by ID.
    ///
    /// WB runs before ID, so the MEM/WB latch here already holds the
    /// instruction MEM produced this cycle.
    pub fn uncommitted(&self) -> impl Iterator<Item = &Instruction> {
        self.units
            .occupants()
            .filter_map(|e| e.inst.as_ref())
            .chain(self.ex_mem.instruction())
            .chain(self.mem_wb.instruction())
    }

    /// Value of a special-purpose register at the entrance of `stage`.
    ///
    /// # Returns
    ///
    /// [`UNDEFINED`] if the register is not carried into that stage, is unused by
    /// the occupying instruction, or the stage holds a bubble. `IR` always reads
    /// as undefined; see [`Cpu::instruction_at`].
    pub fn sp_register(&self, reg: SpRegister, stage: Stage) -> u32 {
        let value = match stage {
            Stage::If => (reg == SpRegister::Pc).then_some(self.pc),
            Stage::Id => self.if_id.sp_register(reg),
            Stage::Ex => self.id_ex.sp_register(reg),
            Stage::Mem => self.ex_mem.sp_register(reg),
            Stage::Wb => self.mem_wb.sp_register(reg),
        };
        value.unwrap_or(UNDEFINED)
    }

    /// Instruction at the entrance of `stage`, or `None` for a bubble.
    ///
    /// For IF this is the instruction the next fetch will read.
    pub fn instruction_at(&self, stage: Stage) -> Option<Instruction> {
        match stage {
            Stage::If => self.imem.fetch(self.pc).ok(),
            Stage::Id => self.if_id.inst,
            Stage::Ex => self.id_ex.inst,
            Stage::Mem => self.ex_mem.inst,
            Stage::Wb => self.mem_wb.inst,
        }
    }
}
