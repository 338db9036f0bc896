//! Data models for the Student Ambassador Connect platform.
//!
//! Field names match the wire format the browser clients already speak.

mod ambassador;
mod log;
mod snapshot;
mod stats;

pub use ambassador::*;
pub use log::*;
pub use snapshot::*;
pub use stats::*;
