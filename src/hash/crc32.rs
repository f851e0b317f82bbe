//! Accelerated CRC-32 engine
//!
//! Computes the CRC-32 of the x86 `crc32` instruction (reflected Castagnoli
//! polynomial) with the IEEE-style framing: initial value `0xFFFFFFFF`,
//! finalized by XOR with `0xFFFFFFFF`. When the instruction is available the
//! input is consumed in 8-byte words with a byte-wide drain for the tail;
//! otherwise a bit-identical reflected-table fallback is used. The backend is
//! selected once per process and only ever changes speed, never output.

use std::sync::OnceLock;
use tracing::debug;

/// Reflected form of the polynomial computed by the hardware instruction
const CRC32_POLY_REFLECTED: u32 = 0x82F6_3B78;

/// Software fallback table, bit-identical to the instruction
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u32;
        let mut step = 0;
        while step < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ CRC32_POLY_REFLECTED
            } else {
                crc >> 1
            };
            step += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// CRC-32 update backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The native `crc32` instruction (SSE4.2)
    Hardware,
    /// Table-driven fallback with identical output
    Software,
}

impl Backend {
    /// The backend for this process, detected on first call and cached
    pub fn get() -> Backend {
        static BACKEND: OnceLock<Backend> = OnceLock::new();
        *BACKEND.get_or_init(|| {
            let backend = Self::detect();
            debug!(?backend, "selected CRC-32 backend");
            backend
        })
    }

    fn detect() -> Backend {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("sse4.2") {
                return Backend::Hardware;
            }
        }
        Backend::Software
    }

    /// Whether the hardware instruction is in use
    pub fn is_hardware(&self) -> bool {
        matches!(self, Backend::Hardware)
    }
}

/// Streaming CRC-32 hasher
pub struct Crc32 {
    value: u32,
    backend: Backend,
}

impl Crc32 {
    /// Create a hasher using the process-wide backend
    pub fn new() -> Self {
        Self::with_backend(Backend::get())
    }

    /// Create a hasher pinned to a specific backend
    pub fn with_backend(backend: Backend) -> Self {
        Crc32 {
            value: !0,
            backend,
        }
    }

    /// Fold a slice into the checksum
    pub fn update(&mut self, data: &[u8]) {
        #[cfg(target_arch = "x86_64")]
        {
            if self.backend == Backend::Hardware {
                // SAFETY: Hardware is only selected after SSE4.2 was detected
                self.value = unsafe { update_hardware(self.value, data) };
                return;
            }
        }
        self.value = update_software(self.value, data);
    }

    /// Fold one byte into the checksum
    #[inline]
    pub fn update_byte(&mut self, byte: u8) {
        #[cfg(target_arch = "x86_64")]
        {
            if self.backend == Backend::Hardware {
                // SAFETY: Hardware is only selected after SSE4.2 was detected
                self.value = unsafe { hardware_byte(self.value, byte) };
                return;
            }
        }
        self.value = software_byte(self.value, byte);
    }

    /// Finalized checksum
    pub fn finalize(&self) -> u32 {
        !self.value
    }

    /// One-shot checksum of a slice
    pub fn checksum(data: &[u8]) -> u32 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn software_byte(value: u32, byte: u8) -> u32 {
    CRC32_TABLE[usize::from(value as u8 ^ byte)] ^ (value >> 8)
}

fn update_software(mut value: u32, data: &[u8]) -> u32 {
    for &byte in data {
        value = software_byte(value, byte);
    }
    value
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.2")]
unsafe fn update_hardware(mut value: u32, data: &[u8]) -> u32 {
    use std::arch::x86_64::{_mm_crc32_u64, _mm_crc32_u8};

    let mut chunks = data.chunks_exact(8);
    for chunk in &mut chunks {
        value = _mm_crc32_u64(u64::from(value), read_u64_le(chunk)) as u32;
    }
    for &byte in chunks.remainder() {
        value = _mm_crc32_u8(value, byte);
    }
    value
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.2")]
unsafe fn hardware_byte(value: u32, byte: u8) -> u32 {
    use std::arch::x86_64::_mm_crc32_u8;
    _mm_crc32_u8(value, byte)
}

#[cfg(target_arch = "x86_64")]
#[inline]
fn read_u64_le(data: &[u8]) -> u64 {
    u64::from_le_bytes([
        data[0], data[1], data[2], data[3], data[4], data[5], data[6], data[7],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn software_checksum(data: &[u8]) -> u32 {
        let mut hasher = Crc32::with_backend(Backend::Software);
        hasher.update(data);
        hasher.finalize()
    }

    /// Test vectors from RFC 3720 Appendix B.4
    #[test]
    fn test_rfc3720_vectors() {
        assert_eq!(Crc32::checksum(&[0x00; 32]), 0x8A91_36AA);
        assert_eq!(Crc32::checksum(&[0xFF; 32]), 0x62A8_AB43);
        let ascending: Vec<u8> = (0x00..0x20).collect();
        assert_eq!(Crc32::checksum(&ascending), 0x46DD_794E);
    }

    #[test]
    fn test_standard_check_value() {
        assert_eq!(Crc32::checksum(b"123456789"), 0xE306_9283);
        assert_eq!(software_checksum(b"123456789"), 0xE306_9283);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Crc32::checksum(&[]), 0);
    }

    #[test]
    fn test_backend_is_stable() {
        assert_eq!(Backend::get(), Backend::get());
    }

    #[test]
    fn test_backends_agree_on_patterned_data() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        assert_eq!(Crc32::checksum(&data), software_checksum(&data));
    }

    #[test]
    fn test_bytewise_matches_slice() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut bytewise = Crc32::new();
        for &b in data.iter() {
            bytewise.update_byte(b);
        }
        assert_eq!(bytewise.finalize(), Crc32::checksum(data));
    }

    proptest! {
        #[test]
        fn prop_backends_agree(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(Crc32::checksum(&data), software_checksum(&data));
        }

        #[test]
        fn prop_split_updates_match_one_shot(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            split in any::<prop::sample::Index>(),
        ) {
            let mid = split.index(data.len());
            let mut split_hasher = Crc32::new();
            split_hasher.update(&data[..mid]);
            split_hasher.update(&data[mid..]);
            prop_assert_eq!(split_hasher.finalize(), Crc32::checksum(&data));
        }
    }
}
