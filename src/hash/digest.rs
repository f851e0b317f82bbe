//! Digest values and result containers
//!
//! Digests are abstract unsigned integers rendered as fixed-width uppercase
//! hex, big-endian, independent of host byte order.

use crate::config::Algorithm;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// A single finalized digest value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digest {
    /// Algorithm that produced the value
    pub algorithm: Algorithm,
    /// Digest value, zero-extended to 128 bits
    pub value: u128,
}

impl Digest {
    /// Create a digest value
    pub fn new(algorithm: Algorithm, value: u128) -> Self {
        Digest { algorithm, value }
    }

    /// Render as fixed-width uppercase hex
    pub fn to_hex(&self) -> String {
        format!("{:0width$X}", self.value, width = self.algorithm.hex_width())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Outcome of one fused hashing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    /// CRC-16 value, if requested
    pub crc16: Option<u16>,
    /// CRC-32 value, if requested
    pub crc32: Option<u32>,
    /// CRC-64 value, if requested
    pub crc64: Option<u64>,
    /// xxHash64 value, if requested
    pub xxh64: Option<u64>,
    /// xxHash128 value, if requested
    pub xxh128: Option<u128>,
    /// Number of bytes hashed
    pub bytes: u64,
    /// Wall time spent scanning
    pub elapsed: Duration,
}

impl DigestResult {
    /// Digest value for one algorithm, zero-extended to 128 bits
    pub fn value_of(&self, algorithm: Algorithm) -> Option<u128> {
        match algorithm {
            Algorithm::Crc16 => self.crc16.map(u128::from),
            Algorithm::Crc32 => self.crc32.map(u128::from),
            Algorithm::Crc64 => self.crc64.map(u128::from),
            Algorithm::Xxh64 => self.xxh64.map(u128::from),
            Algorithm::Xxh128 => self.xxh128,
        }
    }

    /// Produced digests in the fixed report order
    pub fn digests(&self) -> Vec<Digest> {
        Algorithm::ALL
            .into_iter()
            .filter_map(|a| self.value_of(a).map(|v| Digest::new(a, v)))
            .collect()
    }

    /// Build the serializable report for this result
    pub fn to_report(&self, file: impl Into<String>) -> DigestReport {
        DigestReport {
            file: file.into(),
            size_bytes: self.bytes,
            elapsed: self.elapsed,
            digests: self
                .digests()
                .into_iter()
                .map(|d| DigestEntry {
                    algorithm: d.algorithm,
                    digest: d.to_hex(),
                })
                .collect(),
        }
    }
}

/// One rendered digest inside a report
#[derive(Debug, Clone, Serialize)]
pub struct DigestEntry {
    /// Algorithm identifier
    pub algorithm: Algorithm,
    /// Fixed-width uppercase hex value
    pub digest: String,
}

/// Serializable digest report for one file
#[derive(Debug, Clone, Serialize)]
pub struct DigestReport {
    /// Hashed file
    pub file: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Wall time spent scanning, in seconds
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Digests in the fixed report order
    pub digests: Vec<DigestEntry>,
}

/// Serialize a [`Duration`] as fractional seconds
pub(crate) fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rendering_is_fixed_width_uppercase() {
        assert_eq!(Digest::new(Algorithm::Crc16, 0x2A).to_hex(), "002A");
        assert_eq!(Digest::new(Algorithm::Crc32, 0xE3069283).to_hex(), "E3069283");
        assert_eq!(
            Digest::new(Algorithm::Crc64, 0x1B).to_hex(),
            "000000000000001B"
        );
        assert_eq!(
            Digest::new(Algorithm::Xxh128, 1).to_hex(),
            "00000000000000000000000000000001"
        );
    }

    #[test]
    fn test_xxh128_rendering_is_hi_then_lo() {
        let value = (0xDEADBEEFu128 << 64) | 0x1234_5678_9ABC_DEF0;
        assert_eq!(
            Digest::new(Algorithm::Xxh128, value).to_hex(),
            "00000000DEADBEEF123456789ABCDEF0"
        );
    }

    #[test]
    fn test_digests_follow_report_order() {
        let result = DigestResult {
            crc16: Some(1),
            crc32: None,
            crc64: Some(2),
            xxh64: Some(3),
            xxh128: None,
            bytes: 9,
            elapsed: Duration::from_millis(5),
        };
        let order: Vec<Algorithm> = result.digests().iter().map(|d| d.algorithm).collect();
        assert_eq!(
            order,
            vec![Algorithm::Crc16, Algorithm::Crc64, Algorithm::Xxh64]
        );
    }

    #[test]
    fn test_report_renders_requested_digests_only() {
        let result = DigestResult {
            crc16: None,
            crc32: Some(0xE3069283),
            crc64: None,
            xxh64: None,
            xxh128: None,
            bytes: 9,
            elapsed: Duration::from_millis(5),
        };
        let report = result.to_report("file.bin");
        assert_eq!(report.digests.len(), 1);
        assert_eq!(report.digests[0].digest, "E3069283");
    }
}
