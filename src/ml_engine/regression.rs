//! Regression Trainer
//!
//! Ordinary least squares over `(days_since_cleaning, trim_adjusted,
//! displacement) -> hpi`, with the intercept estimated by `linfa-linear`.
//!
//! ## Failure modes
//!
//! - Fewer than `NUM_FEATURES + 2` rows
//! - A constant predictor, or predictors that are (nearly) collinear
//! - Solver errors and non-finite coefficients
//!
//! All of them become `ModelState::Absent` upstream; nothing here panics.

use chrono::NaiveDate;
use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, Axis};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{
    AbsenceReason, Coefficients, TrainedModel, TrainingRecord, MIN_TRAINING_ROWS, NUM_FEATURES,
};

/// Correlation-matrix determinant below which the design is treated as singular.
const COLLINEARITY_EPSILON: f64 = 1e-10;

const FEATURE_NAMES: [&str; NUM_FEATURES] = ["days_since_cleaning", "trim_adjusted", "displacement"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrainingFailure {
    #[error("Insufficient training data: have {rows} rows, need {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("Singular design matrix: {0}")]
    SingularDesign(String),

    #[error("Numerical failure: {0}")]
    Numerical(String),
}

impl From<TrainingFailure> for AbsenceReason {
    fn from(failure: TrainingFailure) -> Self {
        match failure {
            TrainingFailure::InsufficientData { rows, required } => {
                Self::InsufficientData { rows, required }
            }
            TrainingFailure::SingularDesign(_) => Self::SingularDesign,
            TrainingFailure::Numerical(msg) => Self::Numerical(msg),
        }
    }
}

/// Column means and population standard deviations of the predictors.
struct Standardization {
    mean: Array1<f64>,
    std: Array1<f64>,
}

pub struct RegressionTrainer;

impl RegressionTrainer {
    /// Fit the HPI model on `rows`.
    pub fn fit(rows: &[TrainingRecord], as_of: NaiveDate) -> Result<TrainedModel, TrainingFailure> {
        if rows.len() < MIN_TRAINING_ROWS {
            return Err(TrainingFailure::InsufficientData {
                rows: rows.len(),
                required: MIN_TRAINING_ROWS,
            });
        }

        let (x, y) = Self::design(rows)?;
        let scaling = Self::check_design(&x)?;

        // Fit on standardized predictors; displacement is ~1e5 times larger
        // than trim and would otherwise dominate the normal equations.
        let z = (&x - &scaling.mean) / &scaling.std;
        let fitted = LinearRegression::new()
            .fit(&Dataset::new(z, y.clone()))
            .map_err(|e| TrainingFailure::Numerical(e.to_string()))?;

        let params = fitted.params();
        if params.len() != NUM_FEATURES {
            return Err(TrainingFailure::Numerical(format!(
                "expected {NUM_FEATURES} slope parameters, got {}",
                params.len()
            )));
        }
        let slopes = params / &scaling.std;
        let coefficients = Coefficients {
            intercept: fitted.intercept() - slopes.dot(&scaling.mean),
            days: slopes[0],
            trim: slopes[1],
            displacement: slopes[2],
        };
        if !coefficients.is_finite() {
            return Err(TrainingFailure::Numerical(
                "non-finite regression coefficients".to_string(),
            ));
        }

        let (r_squared, f_p_value) = Self::diagnostics(&x, &y, &coefficients);

        info!(
            samples = rows.len(),
            intercept = coefficients.intercept,
            beta_days = coefficients.days,
            beta_trim = coefficients.trim,
            beta_displacement = coefficients.displacement,
            r_squared,
            p_value = ?f_p_value,
            "Regression trained"
        );

        Ok(TrainedModel {
            coefficients,
            sample_count: rows.len(),
            r_squared,
            f_p_value,
            as_of,
        })
    }

    /// Predictor matrix (n x 3) and target vector.
    fn design(rows: &[TrainingRecord]) -> Result<(Array2<f64>, Array1<f64>), TrainingFailure> {
        #[allow(clippy::cast_precision_loss)]
        let feats: Vec<f64> = rows
            .iter()
            .flat_map(|r| [r.days_since_cleaning as f64, r.trim_adjusted, r.displacement])
            .collect();
        let targets: Vec<f64> = rows.iter().map(|r| r.hpi).collect();

        if feats.iter().chain(targets.iter()).any(|v| !v.is_finite()) {
            return Err(TrainingFailure::Numerical(
                "non-finite value in training data".to_string(),
            ));
        }

        let x = Array2::from_shape_vec((rows.len(), NUM_FEATURES), feats)
            .map_err(|e| TrainingFailure::Numerical(e.to_string()))?;
        Ok((x, Array1::from_vec(targets)))
    }

    /// Reject constant and collinear predictors before the solver sees them.
    fn check_design(x: &Array2<f64>) -> Result<Standardization, TrainingFailure> {
        let Some(mean) = x.mean_axis(Axis(0)) else {
            return Err(TrainingFailure::Numerical("empty design matrix".to_string()));
        };
        let centered = x - &mean;
        let scatter = centered.t().dot(&centered);

        for (i, name) in FEATURE_NAMES.iter().enumerate() {
            if scatter[[i, i]] <= f64::EPSILON * (1.0 + mean[i].abs()) {
                return Err(TrainingFailure::SingularDesign(format!(
                    "predictor '{name}' has zero variance"
                )));
            }
        }

        // Determinant of the predictor correlation matrix: 1 for orthogonal
        // predictors, 0 for linearly dependent ones.
        let mut corr = [[0.0_f64; NUM_FEATURES]; NUM_FEATURES];
        for i in 0..NUM_FEATURES {
            for j in 0..NUM_FEATURES {
                corr[i][j] = scatter[[i, j]] / (scatter[[i, i]] * scatter[[j, j]]).sqrt();
            }
        }
        let det = det3(&corr);
        if !det.is_finite() || det < COLLINEARITY_EPSILON {
            return Err(TrainingFailure::SingularDesign(format!(
                "predictors are collinear (correlation determinant {det:.3e})"
            )));
        }

        #[allow(clippy::cast_precision_loss)]
        let n = x.nrows() as f64;
        let std = Array1::from_iter((0..NUM_FEATURES).map(|i| (scatter[[i, i]] / n).sqrt()));
        Ok(Standardization { mean, std })
    }

    /// R² and the overall F-test p-value.
    fn diagnostics(x: &Array2<f64>, y: &Array1<f64>, c: &Coefficients) -> (f64, Option<f64>) {
        let fitted: Array1<f64> = x.rows().into_iter().map(|row| {
            c.intercept + c.days * row[0] + c.trim * row[1] + c.displacement * row[2]
        }).collect();

        let n = y.len();
        let mean_y = y.mean().unwrap_or(0.0);
        let ss_tot: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
        let ss_res: f64 = y.iter().zip(fitted.iter()).map(|(a, b)| (a - b).powi(2)).sum();

        if ss_tot <= 0.0 {
            warn!("Constant HPI target, fit diagnostics undefined");
            return (0.0, None);
        }
        let r_squared = 1.0 - ss_res / ss_tot;

        #[allow(clippy::cast_precision_loss)]
        let df_model = NUM_FEATURES as f64;
        #[allow(clippy::cast_precision_loss)]
        let df_resid = (n - NUM_FEATURES - 1) as f64;
        if ss_res <= 0.0 {
            return (r_squared, None);
        }
        let f_stat = ((ss_tot - ss_res) / df_model) / (ss_res / df_resid);

        let p_value = FisherSnedecor::new(df_model, df_resid)
            .ok()
            .filter(|_| f_stat.is_finite() && f_stat >= 0.0)
            .map(|dist| 1.0 - dist.cdf(f_stat));

        (r_squared, p_value)
    }
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
