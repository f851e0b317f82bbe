//! Configuration module
//!
//! CLI arguments, algorithm selection, and output format options.

mod settings;

pub use settings::*;
