//! Instruction Memory.
//!
//! Holds the decoded program at a base address. Slot `i` lives at
//! `base + 4 * i`; slots past the loaded program read as `NOP`.

use crate::common::constants::WORD_SIZE;
use crate::common::error::{AsmError, SimError};
use crate::isa::asm::Program;
use crate::isa::instruction::Instruction;

/// Fixed-capacity store of decoded instructions.
#[derive(Clone, Debug)]
pub struct InstructionMemory {
    base: u32,
    capacity: usize,
    program: Program,
}

impl InstructionMemory {
    /// Creates an empty store with room for `capacity` instructions.
    pub fn new(capacity: usize) -> Self {
        Self {
            base: 0,
            capacity,
            program: Program::default(),
        }
    }

    /// Installs `program` at `base`, replacing any previous program.
    ///
    /// # Errors
    ///
    /// Returns [`AsmError::ProgramTooLarge`] if the program exceeds the capacity;
    /// the previous contents are kept in that case.
    pub fn load(&mut self, program: Program, base: u32) -> Result<(), AsmError> {
        if program.len() > self.capacity {
            return Err(AsmError::ProgramTooLarge {
                count: program.len(),
                capacity: self.capacity,
            });
        }
        self.program = program;
        self.base = base;
        Ok(())
    }

    /// Base address of slot 0.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Number of instruction slots.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The loaded program.
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Returns `true` once a program has been loaded.
    pub fn is_loaded(&self) -> bool {
        !self.program.is_empty()
    }

    /// Reads the instruction at `pc`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::FetchOutOfRange`] if `pc` is below the base or past the capacity.
    pub fn fetch(&self, pc: u32) -> Result<Instruction, SimError> {
        let index = pc
            .checked_sub(self.base)
            .map(|off| (off / WORD_SIZE) as usize)
            .filter(|&i| i < self.capacity)
            .ok_or(SimError::FetchOutOfRange { pc })?;
        Ok(self
            .program
            .instructions()
            .get(index)
            .copied()
            .unwrap_or(Instruction::Nop))
    }
}
