//! Stage tests drive one stage function at a time on a CPU whose latches are
//! filled by hand.

use pipesim_core::Config;
use pipesim_core::core::Cpu;



/// Fetch stage tests.
pub mod fetch;



/// CPU with default memory and the implicit integer unit.
pub fn cpu() -> Cpu {
    cpu_with(&Config::default())
}

pub fn cpu_with(config: &Config) -> Cpu {
    let mut cpu = Cpu::new(config).unwrap();
    cpu.units.ensure_integer_unit();
    cpu
}
