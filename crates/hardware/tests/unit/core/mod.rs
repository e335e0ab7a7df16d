

/// ALU, FPU and functional unit pool tests.
pub mod units;
