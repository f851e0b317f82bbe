//! Multi-algorithm hashing core
//!
//! Streaming engines for CRC-16, CRC-32 (hardware-accelerated with a
//! bit-identical software fallback), CRC-64, and a byte-wise xxHash64/128
//! variant, plus a single-pass fused dispatcher and an isolated-pass
//! benchmark driver.

mod benchmark;
mod crc16;
mod crc32;
mod crc64;
mod digest;
mod single_pass;
mod tables;
mod xxhash;

pub use benchmark::{benchmark_stream, BenchmarkEntry, BenchmarkReport};
pub use crc16::Crc16;
pub use crc32::{Backend as Crc32Backend, Crc32};
pub use crc64::Crc64;
pub use digest::{Digest, DigestEntry, DigestReport, DigestResult};
pub use single_pass::{hash_stream, ByteSource, ProgressObserver};
pub use tables::{build_tables, Tables, CRC16_POLY, CRC64_POLY};
pub use xxhash::Xxh64;
