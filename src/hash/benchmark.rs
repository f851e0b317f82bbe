//! Per-algorithm throughput benchmarking
//!
//! Runs each algorithm in isolation over the same buffer, one full linear
//! scan per algorithm, so the measured cost is not blurred by fusion. Five
//! sequential passes in the fixed report order, timed with a monotonic
//! clock that holds up from microseconds to multi-hour runs.

use crate::config::Algorithm;
use crate::error::{Result, SumScanError};
use crate::hash::crc16::Crc16;
use crate::hash::crc32::Crc32;
use crate::hash::crc64::Crc64;
use crate::hash::digest::{serialize_secs, Digest};
use crate::hash::single_pass::ByteSource;
use crate::hash::tables;
use crate::hash::xxhash::Xxh64;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Timing and digest for one isolated pass
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkEntry {
    /// Measured algorithm
    pub algorithm: Algorithm,
    /// Fixed-width uppercase hex digest, so results stay verifiable
    pub digest: String,
    /// Wall time for this pass
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Throughput in MB/s (buffer size in MiB over elapsed seconds)
    pub throughput_mbps: f64,
}

impl BenchmarkEntry {
    /// Elapsed wall time in fractional seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Full benchmark report over one buffer
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Buffer size in bytes
    pub size_bytes: u64,
    /// One entry per algorithm, in the fixed report order
    pub entries: Vec<BenchmarkEntry>,
    /// Wall time across all five passes
    #[serde(rename = "total_elapsed_seconds", serialize_with = "serialize_secs")]
    pub total_elapsed: Duration,
}

/// Benchmark every algorithm with its own pass over the buffer
///
/// Rereading the buffer per algorithm is the point: it isolates true
/// per-algorithm cost instead of reusing a fused single-pass result.
pub fn benchmark_stream(source: ByteSource<'_>) -> Result<BenchmarkReport> {
    if source.is_empty() {
        return Err(SumScanError::EmptySource);
    }

    // Warm the lookup tables so the first pass is not charged for them.
    tables::shared();

    let data = source.as_slice();
    let mib = data.len() as f64 / (1024.0 * 1024.0);

    let total_started = Instant::now();
    let mut entries = Vec::with_capacity(Algorithm::ALL.len());
    for algorithm in Algorithm::ALL {
        let started = Instant::now();
        let value = isolated_scan(algorithm, data);
        let elapsed = started.elapsed();

        let secs = elapsed.as_secs_f64();
        let throughput_mbps = if secs > 0.0 { mib / secs } else { 0.0 };
        entries.push(BenchmarkEntry {
            algorithm,
            digest: Digest::new(algorithm, value).to_hex(),
            elapsed,
            throughput_mbps,
        });
    }

    Ok(BenchmarkReport {
        size_bytes: data.len() as u64,
        entries,
        total_elapsed: total_started.elapsed(),
    })
}

/// One full scan with a single engine
fn isolated_scan(algorithm: Algorithm, data: &[u8]) -> u128 {
    match algorithm {
        Algorithm::Crc16 => u128::from(Crc16::checksum(data)),
        Algorithm::Crc32 => u128::from(Crc32::checksum(data)),
        Algorithm::Crc64 => u128::from(Crc64::checksum(data)),
        Algorithm::Xxh64 => u128::from(Xxh64::checksum(data)),
        Algorithm::Xxh128 => Xxh64::checksum128(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlgorithmSet;
    use crate::hash::single_pass::hash_stream;

    fn sample_data() -> Vec<u8> {
        (0..4096u32).map(|i| (i % 256) as u8).collect()
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let err = benchmark_stream(ByteSource::new(&[])).unwrap_err();
        assert!(matches!(err, SumScanError::EmptySource));
    }

    #[test]
    fn test_fixed_order_and_all_algorithms() {
        let data = sample_data();
        let report = benchmark_stream(ByteSource::new(&data)).unwrap();
        let order: Vec<Algorithm> = report.entries.iter().map(|e| e.algorithm).collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
        assert_eq!(report.size_bytes, data.len() as u64);
    }

    #[test]
    fn test_digests_match_fused_pass() {
        let data = sample_data();
        let report = benchmark_stream(ByteSource::new(&data)).unwrap();
        let fused = hash_stream(ByteSource::new(&data), AlgorithmSet::all(), None).unwrap();
        for (entry, digest) in report.entries.iter().zip(fused.digests()) {
            assert_eq!(entry.algorithm, digest.algorithm);
            assert_eq!(entry.digest, digest.to_hex());
        }
    }

    #[test]
    fn test_throughput_matches_reported_elapsed() {
        let data = sample_data();
        let report = benchmark_stream(ByteSource::new(&data)).unwrap();
        let mib = data.len() as f64 / (1024.0 * 1024.0);
        for entry in &report.entries {
            let secs = entry.elapsed_seconds();
            if secs > 0.0 {
                let expected = mib / secs;
                assert!((entry.throughput_mbps - expected).abs() <= expected * 1e-9);
            }
        }
    }

    #[test]
    fn test_digest_widths() {
        let data = sample_data();
        let report = benchmark_stream(ByteSource::new(&data)).unwrap();
        for entry in &report.entries {
            assert_eq!(entry.digest.len(), entry.algorithm.hex_width());
        }
    }
}
