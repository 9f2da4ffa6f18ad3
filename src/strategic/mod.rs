//! Strategic Analysis Module
//!
//! Per-vessel decision logic on top of a trained model: the cleaning
//! threshold for each ship, fuel-penalty metrics, biofouling classification
//! and the forward degradation simulation that picks a cleaning date.

pub mod classification;
pub mod metrics;
pub mod simulator;
pub mod thresholds;

pub use classification::BiofoulingLevel;
pub use simulator::{DegradationSimulator, SimulationInput};
pub use thresholds::{DynamicThreshold, ShipClass};
