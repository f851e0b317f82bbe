//! # SumScan - Multi-Algorithm Integrity Checksums
//!
//! SumScan computes integrity digests over a byte buffer using several
//! non-cryptographic algorithms, either fused into one linear scan or
//! measured individually for throughput comparison.
//!
//! ## Features
//!
//! - **Single-Pass Fused Hashing**: one combined-update routine is selected
//!   per request, so the hot loop carries no per-algorithm branching
//! - **Accelerated CRC-32**: native `crc32` instruction with a bit-identical
//!   software table fallback, selected once per process
//! - **CRC-16 / CRC-64**: branch-free table-driven engines
//! - **xxHash64 / xxHash128**: a fast byte-wise variant with a 128-bit
//!   digest derived from the same accumulator
//! - **Benchmark Mode**: one isolated pass per algorithm with MB/s reporting
//! - **Memory-Mapped Input**: the OS handles paging; the core never copies
//!
//! ## Quick Start
//!
//! ```no_run
//! use sumscan::config::{Algorithm, AlgorithmSet};
//! use sumscan::hash::{hash_stream, ByteSource};
//!
//! let data = std::fs::read("file.bin").unwrap();
//! let request = AlgorithmSet::single(Algorithm::Crc32);
//!
//! let result = hash_stream(ByteSource::new(&data), request, None).unwrap();
//! for digest in result.digests() {
//!     println!("{}: {}", digest.algorithm, digest);
//! }
//! ```
//!
//! ## Hashing a Mapped File with Progress
//!
//! ```no_run
//! use sumscan::config::AlgorithmSet;
//! use sumscan::fs::MappedFile;
//! use sumscan::hash::hash_stream;
//! use sumscan::progress::HashProgress;
//!
//! let mapped = MappedFile::open("large.iso").unwrap();
//! let progress = HashProgress::new(mapped.len());
//!
//! let mut observer = |processed: u64, _total: u64| progress.set_position(processed);
//! let result = hash_stream(mapped.source(), AlgorithmSet::all(), Some(&mut observer)).unwrap();
//! progress.finish();
//!
//! println!("hashed {} bytes in {:?}", result.bytes, result.elapsed);
//! ```
//!
//! ## Benchmarking
//!
//! ```no_run
//! use sumscan::fs::MappedFile;
//! use sumscan::hash::benchmark_stream;
//!
//! let mapped = MappedFile::open("large.iso").unwrap();
//! let report = benchmark_stream(mapped.source()).unwrap();
//!
//! for entry in &report.entries {
//!     println!(
//!         "{}: {} @ {:.2} MB/s",
//!         entry.algorithm, entry.digest, entry.throughput_mbps
//!     );
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;
pub mod progress;
pub mod system;

// Re-export commonly used types
pub use config::{Algorithm, AlgorithmSet};
pub use error::{Result, SumScanError};
pub use hash::{benchmark_stream, hash_stream, ByteSource, DigestResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use sumscan::prelude::*;
    //! ```

    pub use crate::config::{Algorithm, AlgorithmSet, OutputFormat};
    pub use crate::error::{Result, SumScanError};
    pub use crate::fs::MappedFile;
    pub use crate::hash::{
        benchmark_stream, hash_stream, BenchmarkReport, ByteSource, Crc32Backend, DigestResult,
    };
    pub use crate::progress::HashProgress;
    pub use crate::system::{CpuFeatures, HostInfo};
}
