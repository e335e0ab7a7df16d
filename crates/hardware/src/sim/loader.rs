//! Program Loader.
//!
//! This module reads assembly programs from disk. It performs:
//! 1. **Source loading:** Reads a program file into a string.
//! 2. **Assembly:** Turns the source into a [`Program`] ready for the instruction store.
//!
//! I/O failures are reported as [`AsmError::Io`] so callers see one error type
//! for everything that can go wrong before a program is accepted.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::AsmError;
use crate::isa::asm::{Program, assemble};

/// Reads an assembly source file.
///
/// # Arguments
///
/// * `path` - Path to the program file.
///
/// # Errors
///
/// Returns [`AsmError::Io`] if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String, AsmError> {
    fs::read_to_string(path).map_err(|e| AsmError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads and assembles a program file.
///
/// # Errors
///
/// Returns [`AsmError::Io`] for unreadable files, or the first assembly error.
pub fn load_program_file(path: &Path) -> Result<Program, AsmError> {
    let source = read_source(path)?;
    let program = assemble(&source)?;
    debug!(path = %path.display(), instructions = program.len(), "assembled program file");
    Ok(program)
}
