/// Assembler tests: syntax, label resolution and load-time errors.
pub mod asm;
