//! Filesystem access
//!
//! Memory-mapped read-only input files for the hashing core.

mod mapped;

pub use mapped::*;
