use pipesim_core::Simulator;
use pipesim_core::config::{Config, UnitConfig};
use pipesim_core::core::Cpu;
use pipesim_core::core::units::UnitKind;
use pipesim_core::isa::assemble;
use pipesim_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; `RUST_LOG=trace` shows every stage.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds the configuration for a context before the simulator exists.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    config: Config,
}

impl ContextBuilder {
    /// Data memory latency in extra MEM cycles.
    pub fn mem_latency(mut self, latency: u32) -> Self {
        self.config.memory.latency = latency;
        self
    }

    /// Data memory size in bytes.
    pub fn mem_size(mut self, size: usize) -> Self {
        self.config.memory.size = size;
        self
    }

    /// Adds `instances` units of `kind`.
    pub fn unit(mut self, kind: UnitKind, latency: u32, instances: u32) -> Self {
        self.config.units.push(UnitConfig {
            kind,
            latency,
            instances,
        });
        self
    }

    /// Bounds runs to completion.
    pub fn max_cycles(mut self, limit: u64) -> Self {
        self.config.general.max_cycles = Some(limit);
        self
    }

    pub fn build(self) -> TestContext {
        TestContext::with_config(&self.config)
    }
}

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Context with the default machine: 1 KiB of zero-latency memory and the
    /// implicit single-cycle integer unit.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let sim = Simulator::new(config).unwrap();
        Self { sim }
    }

    /// Assembles `source` and loads it at address 0.
    pub fn load(mut self, source: &str) -> Self {
        let program = assemble(source).unwrap();
        self.sim.load_program(&program, 0).unwrap();
        self
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    pub fn set_reg(&mut self, reg: usize, val: i32) {
        self.sim.set_int_register(reg, val).unwrap();
    }

    pub fn get_reg(&self, reg: usize) -> i32 {
        self.sim.get_int_register(reg).unwrap()
    }

    pub fn set_freg(&mut self, reg: usize, val: f32) {
        self.sim.set_fp_register(reg, val).unwrap();
    }

    pub fn get_freg(&self, reg: usize) -> f32 {
        self.sim.get_fp_register(reg).unwrap()
    }

    pub fn write_word(&mut self, addr: u32, value: u32) {
        self.sim.write_memory(addr, value).unwrap();
    }

    pub fn read_word(&self, addr: u32) -> u32 {
        let bytes = self.sim.read_memory(addr, addr + 4).unwrap();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Runs until `EOP` retires.
    pub fn run(&mut self) {
        self.sim.run(0).unwrap();
    }

    /// Runs exactly `cycles` cycles (or until `EOP` retires).
    pub fn run_cycles(&mut self, cycles: u64) {
        self.sim.run(cycles).unwrap();
    }

    pub fn stats(&self) -> &SimStats {
        self.sim.stats()
    }

    pub fn cycles(&self) -> u64 {
        self.sim.get_clock_cycles()
    }

    pub fn stalls(&self) -> u64 {
        self.sim.get_stalls()
    }

    pub fn executed(&self) -> u64 {
        self.sim.get_instructions_executed()
    }
}
