//! Regression model types: coefficients, fit diagnostics, model state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of predictors (days since cleaning, trim, displacement).
pub const NUM_FEATURES: usize = 3;

/// Minimum training rows for a fit: one per predictor, the intercept, and
/// one degree of freedom for the residual.
pub const MIN_TRAINING_ROWS: usize = NUM_FEATURES + 2;

/// Linear HPI model `hpi = intercept + days·d + trim·t + displacement·D`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    /// HPI per day since cleaning
    pub days: f64,
    pub trim: f64,
    pub displacement: f64,
}

impl Coefficients {
    /// `[intercept, β_days, β_trim, β_displacement]`
    pub const fn to_array(self) -> [f64; 4] {
        [self.intercept, self.days, self.trim, self.displacement]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    /// HPI at `days` since cleaning with trim and displacement held at zero,
    /// floored at the clean baseline.
    pub fn project(&self, days: i64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let raw = self.intercept + self.days * days as f64;
        raw.max(1.0)
    }
}

/// A fitted model plus diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub coefficients: Coefficients,
    pub sample_count: usize,
    pub r_squared: f64,
    /// Overall F-test p-value; `None` when the residual variance is zero
    pub f_p_value: Option<f64>,
    /// Reference date of the training run
    pub as_of: NaiveDate,
}

/// Why no model is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsenceReason {
    NotTrained,
    InsufficientData { rows: usize, required: usize },
    SingularDesign,
    Numerical(String),
}

impl std::fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTrained => write!(f, "model has not been trained yet"),
            Self::InsufficientData { rows, required } => {
                write!(f, "insufficient training data ({rows} rows, {required} required)")
            }
            Self::SingularDesign => write!(f, "singular design matrix"),
            Self::Numerical(msg) => write!(f, "numerical failure: {msg}"),
        }
    }
}

/// Trained model or an explicit absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelState {
    Trained(TrainedModel),
    Absent(AbsenceReason),
}

impl ModelState {
    pub const fn is_trained(&self) -> bool {
        matches!(self, Self::Trained(_))
    }
}

impl Default for ModelState {
    fn default() -> Self {
        Self::Absent(AbsenceReason::NotTrained)
    }
}

/// Row counts through one training run, for logs and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub events: usize,
    pub consumption_sessions: usize,
    pub consolidated_records: usize,
    pub training_rows: usize,
    /// Consolidated sessions dropped before feature extraction
    pub skipped_no_docking: usize,
    pub skipped_bad_timestamp: usize,
    pub skipped_before_cleaning: usize,
    pub skipped_too_soon: usize,
    pub vessels_with_docking: usize,
    pub vessels_with_baseline: usize,
    pub vessels_with_coating: usize,
    pub vessels_with_details: usize,
}
