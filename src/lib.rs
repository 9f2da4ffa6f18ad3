//! Hull Advisor: Hull Performance Index estimation
//!
//! Estimates how much extra fuel a fouled hull costs, fits a linear
//! degradation model over days since the last dry-docking, and projects it
//! forward to recommend a cleaning date.
//!
//! ## Architecture
//!
//! - **Acquisition**: CSV exports into typed records
//! - **Processing**: joins voyage events with fuel consumption
//! - **Baseline**: clean-hull fuel rate (CFI_clean) per vessel
//! - **ML Engine**: HPI features, OLS fit, coefficient sanitizing, retrain scheduling
//! - **Strategic**: thresholds, biofouling levels, forward simulation
//! - **Pipeline**: `HullAdvisor` facade over an atomically swapped snapshot

pub mod acquisition;
pub mod baseline;
pub mod config;
pub mod fleet;
pub mod identity;
pub mod ml_engine;
pub mod pipeline;
pub mod processing;
pub mod strategic;
pub mod types;

pub use config::HullConfig;
pub use identity::normalize;
pub use pipeline::{HullAdvisor, ModelSnapshot};
pub use types::{CleaningSuggestion, DailyPrediction, FleetReport, ModelState, TrainingSummary};
