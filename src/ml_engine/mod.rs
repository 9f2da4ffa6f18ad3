//! HPI degradation model
//!
//! ## Architecture
//! - `features`: consolidated sessions to regression rows (HPI target)
//! - `regression`: OLS fit via linfa-linear, R² and F-test p-value via statrs
//! - `sanitizer`: clamps raw coefficients into the plausible range
//! - `trainer`: one full training run, producing a `ModelSnapshot`
//! - `scheduler`: periodic retrain (`HULL_RETRAIN_INTERVAL_SECS`)

pub mod features;
pub mod regression;
pub mod sanitizer;
pub mod scheduler;
pub mod trainer;

pub use features::{FeatureEngineer, FeatureReport};
pub use regression::{RegressionTrainer, TrainingFailure};
pub use sanitizer::{CoefficientSanitizer, Correction, SanitizedCoefficients};
pub use scheduler::{get_interval, get_interval_secs, RetrainScheduler};
pub use trainer::ModelTrainer;
