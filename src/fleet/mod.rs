//! Per-vessel reference data
//!
//! Last hull cleaning, coating and ship particulars, keyed by the normalized
//! vessel name.

pub mod registry;

pub use registry::{FleetRegistry, UNKNOWN_CLASS};
