//! Configuration settings for SumScan
//!
//! Defines the CLI arguments, the algorithm identifiers, and the
//! requested-algorithm set handed to the hashing core.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// SumScan - multi-algorithm integrity checksums over memory-mapped files
#[derive(Parser, Debug, Clone)]
#[command(name = "sumscan")]
#[command(author = "SumScan Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fast multi-algorithm checksums with single-pass fused hashing")]
#[command(long_about = r#"
SumScan computes integrity digests over a memory-mapped file using several
non-cryptographic algorithms, either fused into one linear scan or measured
individually for throughput comparison.

Algorithms:
  CRC-16 (CCITT), CRC-32 (hardware-accelerated with software fallback),
  CRC-64 (ECMA-182), xxHash64 and xxHash128 (byte-wise variant).

Examples:
  sumscan file.iso                     # CRC-32 (default)
  sumscan file.iso --crc64 --xxh64     # fused single pass, two digests
  sumscan file.iso --all --progress    # all five, with a progress bar
  sumscan file.iso --benchmark         # per-algorithm throughput report
  sumscan info                         # host and CPU capability report
"#)]
pub struct CliArgs {
    /// File to hash
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Compute the CRC-16 checksum
    #[arg(long, alias = "c16")]
    pub crc16: bool,

    /// Compute the CRC-32 checksum
    #[arg(long, alias = "c32")]
    pub crc32: bool,

    /// Compute the CRC-64 checksum
    #[arg(long, alias = "c64")]
    pub crc64: bool,

    /// Compute the xxHash64 digest
    #[arg(long, alias = "x64")]
    pub xxh64: bool,

    /// Compute the xxHash128 digest
    #[arg(long, alias = "x128")]
    pub xxh128: bool,

    /// Compute all five digests in one pass
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Benchmark each algorithm with its own pass over the file
    #[arg(short = 'b', long)]
    pub benchmark: bool,

    /// Show a progress bar while hashing
    #[arg(short = 'p', long)]
    pub progress: bool,

    /// Quiet mode (digests only, no progress or file header)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for reports
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show host information and CPU capabilities
    #[command(name = "info")]
    Info {
        /// Include the instruction-set feature report
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Output format for digest and benchmark reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Checksum algorithm identifiers, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// CRC-16/CCITT, polynomial 0x1021
    Crc16,
    /// CRC-32, hardware instruction polynomial
    Crc32,
    /// CRC-64/ECMA-182, polynomial 0x42F0E1EBA9EA3693
    Crc64,
    /// Byte-wise xxHash64 variant
    Xxh64,
    /// 128-bit digest derived from the xxHash64 accumulator
    Xxh128,
}

impl Algorithm {
    /// All algorithms in the fixed report order
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Crc16,
        Algorithm::Crc32,
        Algorithm::Crc64,
        Algorithm::Xxh64,
        Algorithm::Xxh128,
    ];

    /// Display name for reports
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Crc16 => "CRC-16",
            Algorithm::Crc32 => "CRC-32",
            Algorithm::Crc64 => "CRC-64",
            Algorithm::Xxh64 => "xxH64",
            Algorithm::Xxh128 => "xxH128",
        }
    }

    /// Number of uppercase hex digits in the rendered digest
    pub fn hex_width(&self) -> usize {
        match self {
            Algorithm::Crc16 => 4,
            Algorithm::Crc32 => 8,
            Algorithm::Crc64 | Algorithm::Xxh64 => 16,
            Algorithm::Xxh128 => 32,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of algorithms requested for one hashing call
///
/// Requesting [`Algorithm::Xxh128`] keeps the xxHash64 accumulator running
/// during the scan; the 128-bit digest is derived from it at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlgorithmSet {
    /// CRC-16 requested
    pub crc16: bool,
    /// CRC-32 requested
    pub crc32: bool,
    /// CRC-64 requested
    pub crc64: bool,
    /// xxHash64 requested
    pub xxh64: bool,
    /// xxHash128 requested
    pub xxh128: bool,
}

impl AlgorithmSet {
    /// Set containing a single algorithm
    pub fn single(algorithm: Algorithm) -> Self {
        let mut set = Self::default();
        set.insert(algorithm);
        set
    }

    /// Set containing all five algorithms
    pub fn all() -> Self {
        Self {
            crc16: true,
            crc32: true,
            crc64: true,
            xxh64: true,
            xxh128: true,
        }
    }

    /// Build the set from CLI flags, defaulting to CRC-32 when none is given
    pub fn from_cli(args: &CliArgs) -> Self {
        if args.all {
            return Self::all();
        }
        let set = Self {
            crc16: args.crc16,
            crc32: args.crc32,
            crc64: args.crc64,
            xxh64: args.xxh64,
            xxh128: args.xxh128,
        };
        if set.is_empty() {
            Self::single(Algorithm::Crc32)
        } else {
            set
        }
    }

    /// Add an algorithm to the set
    pub fn insert(&mut self, algorithm: Algorithm) {
        match algorithm {
            Algorithm::Crc16 => self.crc16 = true,
            Algorithm::Crc32 => self.crc32 = true,
            Algorithm::Crc64 => self.crc64 = true,
            Algorithm::Xxh64 => self.xxh64 = true,
            Algorithm::Xxh128 => self.xxh128 = true,
        }
    }

    /// Whether the set contains the given algorithm
    pub fn contains(&self, algorithm: Algorithm) -> bool {
        match algorithm {
            Algorithm::Crc16 => self.crc16,
            Algorithm::Crc32 => self.crc32,
            Algorithm::Crc64 => self.crc64,
            Algorithm::Xxh64 => self.xxh64,
            Algorithm::Xxh128 => self.xxh128,
        }
    }

    /// Whether no algorithm is selected
    pub fn is_empty(&self) -> bool {
        !(self.crc16 || self.crc32 || self.crc64 || self.xxh64 || self.xxh128)
    }

    /// Whether the scan must keep the xxHash64 accumulator running
    pub fn needs_xxh_accumulator(&self) -> bool {
        self.xxh64 || self.xxh128
    }

    /// Selected algorithms in the fixed report order
    pub fn iter(&self) -> impl Iterator<Item = Algorithm> + '_ {
        Algorithm::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_from(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_default_request_is_crc32() {
        let args = args_from(&["sumscan", "file.bin"]);
        let set = AlgorithmSet::from_cli(&args);
        assert_eq!(set, AlgorithmSet::single(Algorithm::Crc32));
    }

    #[test]
    fn test_all_flag_selects_everything() {
        let args = args_from(&["sumscan", "file.bin", "--all"]);
        let set = AlgorithmSet::from_cli(&args);
        assert_eq!(set, AlgorithmSet::all());
        assert_eq!(set.iter().count(), 5);
    }

    #[test]
    fn test_explicit_flags_suppress_default() {
        let args = args_from(&["sumscan", "file.bin", "--crc16", "--xxh128"]);
        let set = AlgorithmSet::from_cli(&args);
        assert!(set.crc16);
        assert!(!set.crc32);
        assert!(set.xxh128);
        assert!(!set.xxh64);
        assert!(set.needs_xxh_accumulator());
    }

    #[test]
    fn test_iteration_order_is_fixed() {
        let set = AlgorithmSet::all();
        let order: Vec<Algorithm> = set.iter().collect();
        assert_eq!(order, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_hex_widths() {
        assert_eq!(Algorithm::Crc16.hex_width(), 4);
        assert_eq!(Algorithm::Crc32.hex_width(), 8);
        assert_eq!(Algorithm::Crc64.hex_width(), 16);
        assert_eq!(Algorithm::Xxh64.hex_width(), 16);
        assert_eq!(Algorithm::Xxh128.hex_width(), 32);
    }

    #[test]
    fn test_empty_set() {
        let set = AlgorithmSet::default();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
