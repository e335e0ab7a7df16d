//! Five-stage pipeline simulator CLI.
//!
//! This binary drives the simulator from the command line. It performs:
//! 1. **Run:** Assemble a program, apply configuration and initial register values,
//!    run it, then print statistics and optional register and memory dumps.
//! 2. **Check:** Assemble a program and print its address-annotated listing.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pipesim_core::common::{Reg, RegClass};
use pipesim_core::config::{Config, UnitConfig};
use pipesim_core::core::units::UnitKind;
use pipesim_core::isa::asm::parse_immediate;
use pipesim_core::isa::disasm;
use pipesim_core::sim::loader;
use pipesim_core::stats::STATS_SECTIONS;
use pipesim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Assemble and run programs on an in-order IF/ID/EX/MEM/WB pipeline with \
                  multi-cycle functional units and data memory latency.\n\nExamples:\n  \
                  pipesim run prog.asm --set R1=5 --registers\n  \
                  pipesim run fp.asm --unit Multiplier:4 --unit Adder:2:2 --stats hazards\n  \
                  pipesim check prog.asm"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and run a program.
    Run(RunArgs),

    /// Assemble a program and print its listing without running it.
    Check {
        /// Assembly source file.
        program: PathBuf,

        /// Address of the first instruction.
        #[arg(long, value_parser = parse_address)]
        base: Option<u32>,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Assembly source file.
    program: PathBuf,

    /// JSON configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data memory size in bytes.
    #[arg(long)]
    mem_size: Option<usize>,

    /// Extra cycles per load or store.
    #[arg(long)]
    mem_latency: Option<u32>,

    /// Address of the first instruction.
    #[arg(long, value_parser = parse_address)]
    base: Option<u32>,

    /// Functional units as KIND:LATENCY[:INSTANCES], e.g. Multiplier:4 or adder:2:2.
    #[arg(long = "unit", value_parser = parse_unit)]
    units: Vec<UnitConfig>,

    /// Cycles to run; 0 runs until EOP retires.
    #[arg(long, default_value_t = 0)]
    cycles: u64,

    /// Initial register value, e.g. R1=5, R2=0x10 or F1=1.5.
    #[arg(long = "set", value_parser = parse_assignment)]
    assignments: Vec<(Reg, String)>,

    /// Data memory range to dump after the run, as START:END.
    #[arg(long, value_parser = parse_range)]
    dump_mem: Option<(u32, u32)>,

    /// Statistics sections to print (summary, hazards, instruction_mix); default all.
    #[arg(long = "stats", value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS))]
    stats: Vec<String>,

    /// Print special-purpose and architectural registers after the run.
    #[arg(long)]
    registers: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Check { program, base } => cmd_check(&program, base.unwrap_or(0)),
    }
}

/// Installs the stderr subscriber. `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs a program and prints the requested reports.
fn cmd_run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("could not load config `{}`", path.display()))?,
        None => Config::default(),
    };
    if let Some(size) = args.mem_size {
        config.memory.size = size;
    }
    if let Some(latency) = args.mem_latency {
        config.memory.latency = latency;
    }
    if let Some(base) = args.base {
        config.program.base_address = base;
    }
    config.units.extend(args.units);

    let mut sim = Simulator::new(&config).context("invalid configuration")?;
    sim.load_program_file(&args.program, config.program.base_address)
        .with_context(|| format!("could not load program `{}`", args.program.display()))?;

    for (reg, value) in &args.assignments {
        match reg.class {
            RegClass::Int => {
                let v = parse_immediate(value)
                    .ok_or_else(|| anyhow!("invalid integer `{value}` for {reg}"))?;
                sim.set_int_register(reg.idx(), v as i32)?;
            }
            RegClass::Fp => {
                let v: f32 = value
                    .parse()
                    .with_context(|| format!("invalid float `{value}` for {reg}"))?;
                sim.set_fp_register(reg.idx(), v)?;
            }
        }
    }

    info!(program = %args.program.display(), cycles = args.cycles, "starting run");
    sim.run(args.cycles).context("simulation failed")?;

    sim.stats().print_sections(&args.stats);
    if args.registers {
        sim.print_registers();
    }
    if let Some((start, end)) = args.dump_mem {
        sim.print_memory(start, end)?;
    }
    Ok(())
}

/// Assembles a program and prints its listing.
fn cmd_check(path: &std::path::Path, base: u32) -> Result<()> {
    let program = loader::load_program_file(path)
        .with_context(|| format!("could not load program `{}`", path.display()))?;
    print!("{}", disasm::listing(&program, base));
    println!("{} instructions, {} labels", program.len(), program.labels().len());
    Ok(())
}

fn parse_address(s: &str) -> Result<u32> {
    parse_immediate(s).ok_or_else(|| anyhow!("invalid address `{s}`"))
}

fn parse_unit(s: &str) -> Result<UnitConfig> {
    let mut parts = s.split(':');
    let kind: UnitKind = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let latency = parts
        .next()
        .ok_or_else(|| anyhow!("missing latency in `{s}`"))?
        .parse()
        .with_context(|| format!("invalid latency in `{s}`"))?;
    let instances = match parts.next() {
        Some(n) => n
            .parse()
            .with_context(|| format!("invalid instance count in `{s}`"))?,
        None => 1,
    };
    if parts.next().is_some() {
        bail!("expected KIND:LATENCY[:INSTANCES], got `{s}`");
    }
    Ok(UnitConfig {
        kind,
        latency,
        instances,
    })
}

fn parse_assignment(s: &str) -> Result<(Reg, String)> {
    let (reg, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected REG=VALUE, got `{s}`"))?;
    let reg: Reg = reg
        .trim()
        .parse()
        .map_err(|()| anyhow!("invalid register `{reg}`"))?;
    Ok((reg, value.trim().to_string()))
}

fn parse_range(s: &str) -> Result<(u32, u32)> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("expected START:END, got `{s}`"))?;
    let start = parse_address(start.trim())?;
    let end = parse_address(end.trim())?;
    if end < start {
        bail!("range end {end:#x} precedes start {start:#x}");
    }
    Ok((start, end))
}
