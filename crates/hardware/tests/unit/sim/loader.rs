//! Program file loading tests.

use std::io::Write;
use std::path::Path;

use pipesim_core::common::error::AsmError;
use pipesim_core::sim::loader::load_program_file;
use tempfile::NamedTempFile;

use crate::common::harness::TestContext;

#[test]
fn loads_a_program_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# doubles R1\nADD R2 R1 R1\nEOP").unwrap();

    let program = load_program_file(file.path()).unwrap();
    assert_eq!(program.len(), 2);

    let mut ctx = TestContext::new();
    ctx.sim.load_program_file(file.path(), 0).unwrap();
    ctx.set_reg(1, 4);
    ctx.run();
    assert_eq!(ctx.get_reg(2), 8);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_program_file(Path::new("/nonexistent/prog.asm")).unwrap_err();
    assert!(matches!(err, AsmError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/prog.asm"));
}

#[test]
fn assembly_errors_surface_with_line_numbers() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ADDI R1 R0 1\nFROB R1\nEOP").unwrap();
    let err = load_program_file(file.path()).unwrap_err();
    assert!(matches!(err, AsmError::UnknownOpcode { line: 2, .. }));
}
