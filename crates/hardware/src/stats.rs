//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, completed instructions, and derived metrics (IPC, CPI).
//! 2. **Stalls:** Total stall cycles and their breakdown by hazard type.
//! 3. **Control flow:** Branches resolved, branches taken, and instructions flushed.
//! 4. **Instruction mix:** Counts by category (ALU, load, store, branch, FP arithmetic).

use std::time::Instant;

use crate::isa::instruction::Instruction;

/// Reason a cycle was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallKind {
    /// RAW dependency on an uncommitted register.
    Data,
    /// No free functional unit of the required type.
    Structural,
    /// MEM waiting on data memory latency.
    Memory,
    /// Redirect after a taken branch or jump.
    Control,
}

/// Simulation statistics structure tracking all performance metrics.
///
/// Counters only grow during a run and return to zero on reset.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total clock cycles elapsed.
    pub cycles: u64,
    /// Cycles in which a bubble replaced useful work.
    pub stalls: u64,
    /// Instructions committed at WB (`NOP` and `EOP` excluded).
    pub instructions_executed: u64,

    /// Stall cycles due to data hazards (RAW dependencies).
    pub stalls_data: u64,
    /// Stall cycles due to functional unit contention.
    pub stalls_structural: u64,
    /// Stall cycles due to data memory latency.
    pub stalls_mem: u64,
    /// Stall cycles due to control hazards (taken branch redirect).
    pub stalls_control: u64,

    /// Control instructions resolved in EX.
    pub branches: u64,
    /// Control instructions resolved as taken.
    pub branches_taken: u64,
    /// Wrong-path instructions discarded by taken branches.
    pub flushes: u64,

    /// Count of integer ALU instructions completed.
    pub inst_alu: u64,
    /// Count of load instructions completed.
    pub inst_load: u64,
    /// Count of store instructions completed.
    pub inst_store: u64,
    /// Count of branch/jump instructions completed.
    pub inst_branch: u64,
    /// Count of FP arithmetic instructions completed.
    pub inst_fp_arith: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            stalls: 0,
            instructions_executed: 0,
            stalls_data: 0,
            stalls_structural: 0,
            stalls_mem: 0,
            stalls_control: 0,
            branches: 0,
            branches_taken: 0,
            flushes: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_fp_arith: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"hazards"`, `"instruction_mix"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "hazards", "instruction_mix"];

impl SimStats {
    /// Instructions per cycle, or 0.0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_executed as f64 / self.cycles as f64
        }
    }

    /// Records one lost cycle.
    pub const fn record_stall(&mut self, kind: StallKind) {
        self.stalls += 1;
        match kind {
            StallKind::Data => self.stalls_data += 1,
            StallKind::Structural => self.stalls_structural += 1,
            StallKind::Memory => self.stalls_mem += 1,
            StallKind::Control => self.stalls_control += 1,
        }
    }

    /// Records a committed instruction in the counters and the mix.
    pub const fn record_commit(&mut self, inst: &Instruction) {
        self.instructions_executed += 1;
        match inst {
            Instruction::IntReg { .. } | Instruction::IntImm { .. } => self.inst_alu += 1,
            Instruction::Load { .. } => self.inst_load += 1,
            Instruction::Store { .. } => self.inst_store += 1,
            Instruction::Branch { .. } | Instruction::Jump { .. } => self.inst_branch += 1,
            Instruction::FpReg { .. } => self.inst_fp_arith += 1,
            Instruction::Nop | Instruction::Eop => {}
        }
    }

    /// Renders the requested sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. An empty
    /// slice selects every section. Divisions use a floor of one cycle and one
    /// instruction so an empty run prints zeros.
    pub fn format_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_executed.max(1) as f64;
        let pct = |n: u64, d: f64| (n as f64 / d) * 100.0;
        let mut out = Vec::new();

        out.push("==========================================================".to_string());
        out.push("PIPELINE SIMULATION STATISTICS".to_string());
        out.push("==========================================================".to_string());
        if want("summary") {
            let cpi = if self.instructions_executed == 0 {
                0.0
            } else {
                self.cycles as f64 / instr
            };
            out.push(format!("host_seconds             {seconds:.4} s"));
            out.push(format!("sim_cycles               {}", self.cycles));
            out.push(format!("sim_insts                {}", self.instructions_executed));
            out.push(format!("sim_stalls               {}", self.stalls));
            out.push(format!("sim_ipc                  {:.4}", self.ipc()));
            out.push(format!("sim_cpi                  {cpi:.4}"));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("hazards") {
            out.push("HAZARD BREAKDOWN".to_string());
            for (name, n) in [
                ("stalls.data", self.stalls_data),
                ("stalls.structural", self.stalls_structural),
                ("stalls.memory", self.stalls_mem),
                ("stalls.control", self.stalls_control),
            ] {
                out.push(format!("  {name:<22} {n} ({:.2}%)", pct(n, cyc)));
            }
            out.push(format!("  {:<22} {}", "branches", self.branches));
            out.push(format!("  {:<22} {}", "branches.taken", self.branches_taken));
            out.push(format!("  {:<22} {}", "flushed", self.flushes));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("instruction_mix") {
            out.push("INSTRUCTION MIX".to_string());
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.fp_arith", self.inst_fp_arith),
            ] {
                out.push(format!("  {name:<22} {n} ({:.2}%)", pct(n, instr)));
            }
        }
        out.push("==========================================================".to_string());
        out.join("\n")
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        println!("{}", self.format_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
