//! Whirl Common Utilities
//!
//! Shared infrastructure for all Whirl crates:
//! - Error types and result aliases
//! - Virtual-time deadlines and fixed-cadence tick intervals
//! - Tracing/logging initialization

pub mod clock;
pub mod error;
pub mod logging;

pub use clock::*;
pub use error::*;
