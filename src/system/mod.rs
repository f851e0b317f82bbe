//! System introspection
//!
//! Host resource snapshot and CPU capability detection for the info
//! report.

mod resources;

pub use resources::*;
