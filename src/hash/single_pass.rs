//! Single-pass fused hashing
//!
//! Selects one combined-update routine for the requested algorithm set
//! before the scan starts, so the per-byte loop carries no enabled-algorithm
//! tests. Each combination is a separate monomorphized routine; the request
//! is mapped to a routine pointer exactly once per call. Misprediction cost
//! of per-byte flag checks dominates at the target throughputs, which is why
//! the combination is resolved up front rather than inside the loop.

use crate::config::AlgorithmSet;
use crate::error::{Result, SumScanError};
use crate::hash::crc16::Crc16;
use crate::hash::crc32::Crc32;
use crate::hash::crc64::Crc64;
use crate::hash::digest::DigestResult;
use crate::hash::tables;
use crate::hash::xxhash::Xxh64;
use std::time::Instant;
use tracing::debug;

/// Read-only, bounds-checked view over caller-owned bytes
///
/// The hashing core never allocates, resizes, or frees the underlying
/// buffer; it must stay unmodified for the duration of a scan.
#[derive(Debug, Clone, Copy)]
pub struct ByteSource<'a> {
    data: &'a [u8],
}

impl<'a> ByteSource<'a> {
    /// Wrap a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        ByteSource { data }
    }

    /// Length of the view in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view is zero-length
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying bytes
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(data: &'a [u8]) -> Self {
        ByteSource::new(data)
    }
}

/// Progress observer invoked with (bytes_processed, total_bytes)
///
/// Purely observational: it cannot touch accumulator state and its presence
/// does not change any digest.
pub type ProgressObserver<'a> = &'a mut dyn FnMut(u64, u64);

/// Per-request accumulators, created fresh per call
struct ScanState {
    crc16: Crc16,
    crc32: Crc32,
    crc64: Crc64,
    xxh: Xxh64,
}

impl ScanState {
    fn new() -> Self {
        ScanState {
            crc16: Crc16::new(),
            crc32: Crc32::new(),
            crc64: Crc64::new(),
            xxh: Xxh64::new(),
        }
    }

    fn finalize(self, request: AlgorithmSet, bytes: u64, elapsed: std::time::Duration) -> DigestResult {
        DigestResult {
            crc16: request.crc16.then(|| self.crc16.finalize()),
            crc32: request.crc32.then(|| self.crc32.finalize()),
            crc64: request.crc64.then(|| self.crc64.finalize()),
            xxh64: request.xxh64.then(|| self.xxh.digest()),
            xxh128: request.xxh128.then(|| self.xxh.digest128()),
            bytes,
            elapsed,
        }
    }
}

/// One fused update routine, bound per algorithm combination
type ScanRoutine = fn(&mut ScanState, &[u8]);

/// Fused per-byte update for one fixed algorithm combination
///
/// The const parameters make each combination its own monomorphized loop;
/// the `if` tests below fold away at compile time. A lone CRC-32 request is
/// forwarded to the engine's word-wide path instead of the byte loop.
fn fused<const C16: bool, const C32: bool, const C64: bool, const XXH: bool>(
    state: &mut ScanState,
    chunk: &[u8],
) {
    if C32 && !C16 && !C64 && !XXH {
        state.crc32.update(chunk);
        return;
    }
    for &byte in chunk {
        if C16 {
            state.crc16.update_byte(byte);
        }
        if C32 {
            state.crc32.update_byte(byte);
        }
        if C64 {
            state.crc64.update_byte(byte);
        }
        if XXH {
            state.xxh.update_byte(byte);
        }
    }
}

/// Map the requested set to its combined-update routine
///
/// xxHash128 collapses onto the xxHash64 accumulator, so the closed tag set
/// has 16 members, one per (crc16, crc32, crc64, xxh) combination.
fn select_routine(request: AlgorithmSet) -> ScanRoutine {
    let xxh = request.needs_xxh_accumulator();
    match (request.crc16, request.crc32, request.crc64, xxh) {
        // Rejected before dispatch; bound only to keep the tag set closed.
        (false, false, false, false) => fused::<false, false, false, false>,
        (true, false, false, false) => fused::<true, false, false, false>,
        (false, true, false, false) => fused::<false, true, false, false>,
        (true, true, false, false) => fused::<true, true, false, false>,
        (false, false, true, false) => fused::<false, false, true, false>,
        (true, false, true, false) => fused::<true, false, true, false>,
        (false, true, true, false) => fused::<false, true, true, false>,
        (true, true, true, false) => fused::<true, true, true, false>,
        (false, false, false, true) => fused::<false, false, false, true>,
        (true, false, false, true) => fused::<true, false, false, true>,
        (false, true, false, true) => fused::<false, true, false, true>,
        (true, true, false, true) => fused::<true, true, false, true>,
        (false, false, true, true) => fused::<false, false, true, true>,
        (true, false, true, true) => fused::<true, false, true, true>,
        (false, true, true, true) => fused::<false, true, true, true>,
        (true, true, true, true) => fused::<true, true, true, true>,
    }
}

/// Hash a buffer with every requested algorithm in one linear scan
///
/// Rejects a zero-length buffer with [`SumScanError::EmptySource`] and an
/// empty request with [`SumScanError::EmptyRequest`]. The optional progress
/// observer is notified about every 1% of the input and unconditionally
/// after the final byte.
pub fn hash_stream(
    source: ByteSource<'_>,
    request: AlgorithmSet,
    mut progress: Option<ProgressObserver<'_>>,
) -> Result<DigestResult> {
    if source.is_empty() {
        return Err(SumScanError::EmptySource);
    }
    if request.is_empty() {
        return Err(SumScanError::EmptyRequest);
    }

    // Warm the lookup tables outside the timed region.
    tables::shared();

    let data = source.as_slice();
    let total = data.len() as u64;
    let routine = select_routine(request);
    // Notification cadence, resolved to a slice length before the loop.
    let interval = (data.len() / 100).max(1);
    debug!(bytes = total, ?request, "single-pass scan");

    let started = Instant::now();
    let mut state = ScanState::new();
    let mut processed = 0u64;
    for chunk in data.chunks(interval) {
        routine(&mut state, chunk);
        processed += chunk.len() as u64;
        if let Some(observer) = progress.as_mut() {
            observer(processed, total);
        }
    }
    let elapsed = started.elapsed();

    Ok(state.finalize(request, total, elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Algorithm;
    use proptest::prelude::*;

    fn sample_data() -> Vec<u8> {
        (0..1000u32).map(|i| (i % 256) as u8).collect()
    }

    fn set_from_bits(bits: u8) -> AlgorithmSet {
        AlgorithmSet {
            crc16: bits & 0x01 != 0,
            crc32: bits & 0x02 != 0,
            crc64: bits & 0x04 != 0,
            xxh64: bits & 0x08 != 0,
            xxh128: bits & 0x10 != 0,
        }
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        for bits in 0..32u8 {
            let err = hash_stream(ByteSource::new(&[]), set_from_bits(bits), None).unwrap_err();
            assert!(matches!(err, SumScanError::EmptySource));
        }
    }

    #[test]
    fn test_empty_request_is_rejected() {
        let data = sample_data();
        let err = hash_stream(ByteSource::new(&data), AlgorithmSet::default(), None).unwrap_err();
        assert!(matches!(err, SumScanError::EmptyRequest));
    }

    #[test]
    fn test_every_combination_matches_isolated_engines() {
        let data = sample_data();
        for bits in 1..32u8 {
            let request = set_from_bits(bits);
            let result = hash_stream(ByteSource::new(&data), request, None).unwrap();
            assert_eq!(
                result.crc16,
                request.crc16.then(|| Crc16::checksum(&data)),
                "combination {bits:#07b}"
            );
            assert_eq!(
                result.crc32,
                request.crc32.then(|| Crc32::checksum(&data)),
                "combination {bits:#07b}"
            );
            assert_eq!(
                result.crc64,
                request.crc64.then(|| Crc64::checksum(&data)),
                "combination {bits:#07b}"
            );
            assert_eq!(
                result.xxh64,
                request.xxh64.then(|| Xxh64::checksum(&data)),
                "combination {bits:#07b}"
            );
            assert_eq!(
                result.xxh128,
                request.xxh128.then(|| Xxh64::checksum128(&data)),
                "combination {bits:#07b}"
            );
        }
    }

    #[test]
    fn test_xxh64_unchanged_by_xxh128_presence() {
        let data = sample_data();
        let alone = hash_stream(
            ByteSource::new(&data),
            AlgorithmSet::single(Algorithm::Xxh64),
            None,
        )
        .unwrap();
        let mut both_set = AlgorithmSet::single(Algorithm::Xxh64);
        both_set.insert(Algorithm::Xxh128);
        let both = hash_stream(ByteSource::new(&data), both_set, None).unwrap();
        assert_eq!(alone.xxh64, both.xxh64);
        // Low half of the 128-bit digest is the finalized 64-bit value.
        assert_eq!(both.xxh128.map(|v| v as u64), both.xxh64);
    }

    #[test]
    fn test_single_byte_determinism() {
        let first = hash_stream(ByteSource::new(b"A"), AlgorithmSet::all(), None).unwrap();
        for _ in 0..3 {
            let again = hash_stream(ByteSource::new(b"A"), AlgorithmSet::all(), None).unwrap();
            assert_eq!(again.crc16, first.crc16);
            assert_eq!(again.crc32, first.crc32);
            assert_eq!(again.crc64, first.crc64);
            assert_eq!(again.xxh64, first.xxh64);
            assert_eq!(again.xxh128, first.xxh128);
        }
    }

    #[test]
    fn test_progress_cadence_and_final_notification() {
        let data = sample_data();
        let mut calls: Vec<(u64, u64)> = Vec::new();
        let mut observer = |processed: u64, total: u64| calls.push((processed, total));
        hash_stream(
            ByteSource::new(&data),
            AlgorithmSet::all(),
            Some(&mut observer),
        )
        .unwrap();

        // 1000 bytes in 10-byte slices: one call per slice, last at the end.
        assert_eq!(calls.len(), 100);
        assert_eq!(calls.last(), Some(&(1000, 1000)));
        assert!(calls.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_progress_observer_does_not_change_digests() {
        let data = sample_data();
        let silent = hash_stream(ByteSource::new(&data), AlgorithmSet::all(), None).unwrap();
        let mut sink = |_: u64, _: u64| {};
        let observed = hash_stream(
            ByteSource::new(&data),
            AlgorithmSet::all(),
            Some(&mut sink),
        )
        .unwrap();
        assert_eq!(silent.digests(), observed.digests());
    }

    #[test]
    fn test_tiny_buffer_progress() {
        let mut calls = 0usize;
        let mut observer = |_: u64, _: u64| calls += 1;
        hash_stream(
            ByteSource::new(b"xy"),
            AlgorithmSet::single(Algorithm::Crc32),
            Some(&mut observer),
        )
        .unwrap();
        // Interval clamps to one byte for buffers under 100 bytes.
        assert_eq!(calls, 2);
    }

    proptest! {
        #[test]
        fn prop_fused_matches_isolated(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            bits in 1u8..32,
        ) {
            let request = set_from_bits(bits);
            let result = hash_stream(ByteSource::new(&data), request, None).unwrap();
            if request.crc16 {
                prop_assert_eq!(result.crc16, Some(Crc16::checksum(&data)));
            }
            if request.crc32 {
                prop_assert_eq!(result.crc32, Some(Crc32::checksum(&data)));
            }
            if request.crc64 {
                prop_assert_eq!(result.crc64, Some(Crc64::checksum(&data)));
            }
            if request.xxh64 {
                prop_assert_eq!(result.xxh64, Some(Xxh64::checksum(&data)));
            }
            if request.xxh128 {
                prop_assert_eq!(result.xxh128, Some(Xxh64::checksum128(&data)));
            }
        }
    }
}
