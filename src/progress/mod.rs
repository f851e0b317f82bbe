//! Progress reporting
//!
//! Terminal progress bar fed by the scan's bounded-cadence notifications.

mod reporter;

pub use reporter::*;
