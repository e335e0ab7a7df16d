//! Data Memory.
//!
//! A flat byte buffer of configurable size. Words are stored little-endian and
//! may start at any byte address. Every byte reads as `0xFF` until written.

use crate::common::constants::{MEMORY_FILL, WORD_SIZE};
use crate::common::error::SimError;

/// Byte-addressable data store with a fixed access latency.
#[derive(Clone, Debug)]
pub struct DataMemory {
    bytes: Vec<u8>,
    latency: u32,
}

impl DataMemory {
    /// Creates a data store of `size` bytes filled with `0xFF`.
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the store in bytes.
    /// * `latency` - Extra cycles a load or store spends in MEM.
    pub fn new(size: usize, latency: u32) -> Self {
        Self {
            bytes: vec![MEMORY_FILL; size],
            latency,
        }
    }

    /// Size of the store in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the store has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Extra MEM cycles per access.
    pub const fn latency(&self) -> u32 {
        self.latency
    }

    /// Refills every byte with `0xFF`.
    pub fn reset(&mut self) {
        self.bytes.fill(MEMORY_FILL);
    }

    fn range(&self, addr: u32, len: u32) -> Result<std::ops::Range<usize>, SimError> {
        let start = addr as usize;
        let end = start + len as usize;
        if end > self.bytes.len() {
            return Err(SimError::MemoryOutOfBounds {
                addr,
                size: self.bytes.len(),
            });
        }
        Ok(start..end)
    }

    /// Reads the little-endian word at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if any of the four bytes lies outside the store.
    pub fn read_word(&self, addr: u32) -> Result<u32, SimError> {
        let r = self.range(addr, WORD_SIZE)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.bytes[r]);
        Ok(u32::from_le_bytes(word))
    }

    /// Writes `value` little-endian at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if any of the four bytes lies outside the store.
    pub fn write_word(&mut self, addr: u32, value: u32) -> Result<(), SimError> {
        let r = self.range(addr, WORD_SIZE)?;
        self.bytes[r].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Returns the bytes in `start..end`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfBounds`] if the range extends past the store.
    pub fn read_bytes(&self, start: u32, end: u32) -> Result<&[u8], SimError> {
        let r = self.range(start, end.saturating_sub(start))?;
        Ok(&self.bytes[r])
    }
}
