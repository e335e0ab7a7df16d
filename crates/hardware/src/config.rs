//! Configuration system for the pipeline simulator.
//!
//! This module defines the structures used to parameterize a simulation. It provides:
//! 1. **Defaults:** Baseline machine constants (data memory size, latency, instruction store size).
//! 2. **Structures:** Hierarchical config for general, memory, program, and functional unit settings.
//! 3. **Loading:** JSON parsing from strings or files, with every field optional.
//!
//! Functional units are configured once, before a run; validation happens when the
//! configuration is applied to a [`Cpu`](crate::core::Cpu).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::core::units::UnitKind;

/// Default configuration constants for the simulator.
///
/// These values define the baseline machine when not explicitly overridden
/// in a JSON configuration file or on the command line.
mod defaults {
    /// Size of the data store in bytes (1 KiB).
    pub const MEMORY_SIZE: usize = 1024;

    /// Extra cycles each load or store spends in MEM.
    ///
    /// Zero models an ideal single-cycle data memory.
    pub const MEMORY_LATENCY: u32 = 0;

    /// Address of the first instruction slot.
    pub const BASE_ADDRESS: u32 = 0;

    /// Number of instruction slots in the instruction store.
    pub const PROGRAM_CAPACITY: usize = crate::common::constants::PROGRAM_SIZE;

    /// Instances created by a unit entry that does not say otherwise.
    pub const UNIT_INSTANCES: u32 = 1;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.size, 1024);
/// assert_eq!(config.memory.latency, 0);
/// assert!(config.units.is_empty());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use pipesim_core::config::Config;
/// use pipesim_core::core::units::UnitKind;
///
/// let json = r#"{
///     "memory": { "size": 4096, "latency": 2 },
///     "program": { "base_address": 256 },
///     "units": [
///         { "kind": "Integer", "latency": 1 },
///         { "kind": "Multiplier", "latency": 4, "instances": 2 }
///     ]
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.memory.latency, 2);
/// assert_eq!(config.program.base_address, 0x100);
/// assert_eq!(config.program.capacity, 50);
/// assert_eq!(config.units[1].kind, UnitKind::Multiplier);
/// assert_eq!(config.units[0].instances, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Data memory configuration
    pub memory: MemoryConfig,
    /// Instruction store configuration
    pub program: ProgramConfig,
    /// Functional unit pool, in allocation order
    pub units: Vec<UnitConfig>,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Upper bound on cycles for a run to completion; `None` runs until `EOP` retires.
    pub max_cycles: Option<u64>,
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
    /// Extra MEM cycles per load or store
    #[serde(default)]
    pub latency: u32,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            latency: defaults::MEMORY_LATENCY,
        }
    }
}

/// Instruction store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    /// Address of instruction slot 0
    #[serde(default)]
    pub base_address: u32,
    /// Number of instruction slots
    #[serde(default = "ProgramConfig::default_capacity")]
    pub capacity: usize,
}

impl ProgramConfig {
    fn default_capacity() -> usize {
        defaults::PROGRAM_CAPACITY
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            base_address: defaults::BASE_ADDRESS,
            capacity: defaults::PROGRAM_CAPACITY,
        }
    }
}

/// One functional unit registration.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitConfig {
    /// Unit type (`"Integer"`, `"Adder"`, `"Multiplier"` or `"Divider"`)
    pub kind: UnitKind,
    /// Cycles an instruction occupies the unit
    pub latency: u32,
    /// Number of identical units
    #[serde(default = "UnitConfig::default_instances")]
    pub instances: u32,
}

impl UnitConfig {
    fn default_instances() -> u32 {
        defaults::UNIT_INSTANCES
    }
}
