//! Functional Unit Pool.
//!
//! The EX stage of the machine is a set of typed units rather than a single
//! ALU. This module tracks them. It provides:
//! 1. **Registration:** N instances of a unit type with a latency, bounded by [`MAX_UNITS`].
//! 2. **Allocation:** The first idle unit of a type, in registration order.
//! 3. **Countdown:** Every busy counter drops by one per cycle, never below zero.
//! 4. **Completion:** The oldest occupant leaves once its counter reaches zero.
//!
//! A unit stays owned by its instruction until that instruction is handed to
//! MEM. Normally that happens the cycle the counter reaches zero; it is later
//! only when MEM is still busy or an older instruction has not completed.

use std::fmt;

use tracing::debug;

use crate::common::constants::MAX_UNITS;
use crate::common::error::ConfigError;
use crate::core::pipeline::latches::IdExEntry;
use crate::core::units::UnitKind;

/// One execution unit.
#[derive(Clone, Debug)]
pub struct FunctionalUnit {
    /// Unit type.
    pub kind: UnitKind,
    /// Cycles an instruction spends in this unit.
    pub latency: u32,
    /// Cycles remaining for the occupant; zero once it has completed.
    pub busy: u32,
    /// Instruction executing in this unit.
    pub occupant: Option<IdExEntry>,
}

impl FunctionalUnit {
    const fn new(kind: UnitKind, latency: u32) -> Self {
        Self {
            kind,
            latency,
            busy: 0,
            occupant: None,
        }
    }

    /// Returns `true` if the unit can accept an instruction.
    pub const fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Returns `true` if the occupant has finished executing.
    pub const fn is_done(&self) -> bool {
        self.occupant.is_some() && self.busy == 0
    }
}

/// The set of functional units available to EX.
#[derive(Clone, Debug, Default)]
pub struct FunctionalUnitPool {
    units: Vec<FunctionalUnit>,
}

impl FunctionalUnitPool {
    /// Creates an empty pool.
    pub const fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Registers `instances` units of `kind` with the given latency.
    ///
    /// # Errors
    ///
    /// Rejects a zero latency, zero instances, or a registration that would
    /// take the pool past [`MAX_UNITS`]. Nothing is registered on error.
    pub fn add(&mut self, kind: UnitKind, latency: u32, instances: usize) -> Result<(), ConfigError> {
        if latency == 0 {
            return Err(ConfigError::ZeroLatency { kind });
        }
        if instances == 0 {
            return Err(ConfigError::ZeroInstances { kind });
        }
        if self.units.len() + instances > MAX_UNITS {
            return Err(ConfigError::TooManyUnits {
                requested: instances,
                present: self.units.len(),
                capacity: MAX_UNITS,
            });
        }
        self.units
            .extend((0..instances).map(|_| FunctionalUnit::new(kind, latency)));
        debug!(%kind, latency, instances, "registered functional units");
        Ok(())
    }

    /// Adds a single-cycle integer unit if none is registered.
    ///
    /// Without it the pool reproduces the classic integer pipeline, where EX
    /// always takes one cycle.
    pub fn ensure_integer_unit(&mut self) {
        if !self.has_kind(UnitKind::Integer) {
            self.units.push(FunctionalUnit::new(UnitKind::Integer, 1));
            debug!("provisioned implicit integer unit");
        }
    }

    /// All units in registration order.
    pub fn units(&self) -> &[FunctionalUnit] {
        &self.units
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if no unit is registered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns `true` if at least one unit of `kind` is registered.
    pub fn has_kind(&self, kind: UnitKind) -> bool {
        self.units.iter().any(|u| u.kind == kind)
    }

    /// Advances every busy counter by one cycle.
    pub fn tick(&mut self) {
        for unit in &mut self.units {
            unit.busy = unit.busy.saturating_sub(1);
        }
    }

    /// Index of the first idle unit of `kind`.
    pub fn find_free(&self, kind: UnitKind) -> Option<usize> {
        self.units.iter().position(|u| u.kind == kind && u.is_free())
    }

    /// Places `entry` into unit `idx` and starts its countdown.
    pub fn dispatch(&mut self, idx: usize, entry: IdExEntry) {
        let unit = &mut self.units[idx];
        unit.busy = unit.latency;
        unit.occupant = Some(entry);
    }

    /// Index of the unit holding the oldest instruction.
    pub fn oldest(&self) -> Option<usize> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(i, u)| u.occupant.as_ref().map(|e| (i, e.seq)))
            .min_by_key(|&(_, seq)| seq)
            .map(|(i, _)| i)
    }

    /// Returns `true` if unit `idx` holds a completed instruction.
    pub fn is_done(&self, idx: usize) -> bool {
        self.units.get(idx).is_some_and(FunctionalUnit::is_done)
    }

    /// Removes the occupant of unit `idx`, freeing the unit.
    pub fn retire(&mut self, idx: usize) -> Option<IdExEntry> {
        let unit = self.units.get_mut(idx)?;
        unit.busy = 0;
        unit.occupant.take()
    }

    /// Frees every unit whose occupant is younger than `seq`.
    ///
    /// # Returns
    ///
    /// The number of instructions discarded.
    pub fn squash_younger(&mut self, seq: u64) -> usize {
        let mut squashed = 0;
        for unit in &mut self.units {
            if unit.occupant.as_ref().is_some_and(|e| e.seq > seq) {
                unit.occupant = None;
                unit.busy = 0;
                squashed += 1;
            }
        }
        squashed
    }

    /// Instructions currently executing.
    pub fn occupants(&self) -> impl Iterator<Item = &IdExEntry> {
        self.units.iter().filter_map(|u| u.occupant.as_ref())
    }

    /// Returns every unit to idle, keeping the configuration.
    pub fn reset(&mut self) {
        for unit in &mut self.units {
            unit.busy = 0;
            unit.occupant = None;
        }
    }
}

impl fmt::Display for FunctionalUnitPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, u) in self.units.iter().enumerate() {
            write!(f, "{i:>2}: {:<10} latency={} busy={}", u.kind, u.latency, u.busy)?;
            match u.occupant.as_ref().and_then(|e| e.inst) {
                Some(inst) => writeln!(f, " [{inst}]")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}
