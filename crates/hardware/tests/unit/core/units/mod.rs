/// Integer datapath tests.
pub mod alu;
