//! CRC-64/ECMA-182 table engine
//!
//! Branch-free per-byte update: one table lookup, one shift, one XOR.

use crate::hash::tables;

/// Streaming CRC-64/ECMA-182 hasher
///
/// Initial value `0`, MSB-first, no final transform.
pub struct Crc64 {
    value: u64,
    table: &'static [u64; 256],
}

impl Crc64 {
    /// Create a new hasher
    pub fn new() -> Self {
        Crc64 {
            value: 0,
            table: &tables::shared().crc64,
        }
    }

    /// Fold one byte into the checksum
    #[inline]
    pub fn update_byte(&mut self, byte: u8) {
        self.value = (self.value << 8) ^ self.table[usize::from((self.value >> 56) as u8 ^ byte)];
    }

    /// Fold a slice into the checksum
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.update_byte(byte);
        }
    }

    /// Finalized checksum
    pub fn finalize(&self) -> u64 {
        self.value
    }

    /// One-shot checksum of a slice
    pub fn checksum(data: &[u8]) -> u64 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new()
    }
}
