//! Degradation Simulator
//!
//! Projects HPI forward from today with the sanitized linear model and
//! recommends cleaning on the first day the projection reaches the vessel's
//! threshold.
//!
//! ## Projection
//!
//! With `dsl` = days since last cleaning:
//! - day 0 is today, at `max(1, b0 + b_days·dsl)`
//! - days `dsl+1 ..= dsl+horizon` follow, dated `last_cleaning + d`
//!
//! Trim and displacement are held at zero. The current level and status
//! come from today's HPI.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::{BiofoulingConfig, HullConfig};
use crate::ml_engine::sanitizer::CoefficientSanitizer;
use crate::types::{CleaningSuggestion, Coefficients};

use super::classification::BiofoulingLevel;
use super::metrics::daily_prediction;

/// Everything one projection needs about a vessel.
#[derive(Debug, Clone)]
pub struct SimulationInput<'a> {
    pub vessel_id: &'a str,
    /// Raw coefficients as trained; sanitized before use
    pub coefficients: Coefficients,
    pub last_cleaning: NaiveDate,
    pub cfi_clean: f64,
    pub threshold: f64,
    pub today: NaiveDate,
}

pub struct DegradationSimulator;

impl DegradationSimulator {
    pub fn simulate(input: &SimulationInput<'_>, config: &HullConfig) -> CleaningSuggestion {
        let coefficients =
            CoefficientSanitizer::sanitize(input.coefficients, &config.sanitizer).coefficients;

        let days_since_cleaning = (input.today - input.last_cleaning).num_days();
        let initial_hpi = coefficients.project(days_since_cleaning);

        let horizon = config.simulation.horizon_days.max(0);
        let mut predictions = Vec::with_capacity(usize::try_from(horizon).unwrap_or(0) + 1);
        predictions.push(daily_prediction(input.today, initial_hpi, input.cfi_clean));
        let mut max_extra_fuel = predictions[0].extra_fuel_ton_per_day;
        let mut ideal_date = None;
        let mut final_hpi = initial_hpi;

        for d in (days_since_cleaning + 1)..=(days_since_cleaning + horizon) {
            let Some(date) = input.last_cleaning.checked_add_signed(Duration::days(d)) else {
                break;
            };
            let hpi = coefficients.project(d);
            let prediction = daily_prediction(date, hpi, input.cfi_clean);
            max_extra_fuel = max_extra_fuel.max(prediction.extra_fuel_ton_per_day);
            final_hpi = hpi;
            predictions.push(prediction);

            if ideal_date.is_none() && hpi >= input.threshold {
                ideal_date = Some(date);
                if config.simulation.stop_at_first_crossing {
                    break;
                }
            }
        }

        let level = BiofoulingLevel::classify(initial_hpi, input.threshold, &config.biofouling);
        let days_to_intervention = ideal_date.map(|d| (d - input.today).num_days());

        let justification = match (ideal_date, days_to_intervention) {
            (Some(date), Some(days)) => format!(
                "Projected HPI reaches the cleaning threshold of {:.4} on {date} ({days} days from today).",
                input.threshold
            ),
            _ => format!(
                "Projected HPI ({final_hpi:.4}) does not reach the cleaning threshold of {:.4} within the {horizon}-day projection.",
                input.threshold
            ),
        };

        debug!(
            vessel = %input.vessel_id,
            days_since_cleaning,
            initial_hpi,
            ideal_date = ?ideal_date,
            "Degradation simulated"
        );

        CleaningSuggestion {
            vessel_id: input.vessel_id.to_string(),
            last_cleaning_date: Some(input.last_cleaning),
            ideal_cleaning_date: ideal_date,
            days_to_intervention,
            justification,
            current_status: level.status_label().to_string(),
            current_level: level.level(),
            cfi_clean_ton_per_day: input.cfi_clean,
            max_extra_fuel_ton_per_day: max_extra_fuel,
            threshold: input.threshold,
            predictions,
        }
    }

    /// Well-formed suggestion for a vessel that cannot be projected.
    ///
    /// The hull is reported as clean (HPI 1.0) and no extra fuel is claimed.
    pub fn fallback(
        vessel_id: &str,
        justification: String,
        last_cleaning: Option<NaiveDate>,
        cfi_clean: f64,
        threshold: f64,
        biofouling: &BiofoulingConfig,
    ) -> CleaningSuggestion {
        let level = BiofoulingLevel::classify(1.0, threshold, biofouling);
        CleaningSuggestion {
            vessel_id: vessel_id.to_string(),
            last_cleaning_date: last_cleaning,
            ideal_cleaning_date: None,
            days_to_intervention: None,
            justification,
            current_status: level.status_label().to_string(),
            current_level: level.level(),
            cfi_clean_ton_per_day: cfi_clean,
            max_extra_fuel_ton_per_day: 0.0,
            threshold,
            predictions: Vec::new(),
        }
    }
}
