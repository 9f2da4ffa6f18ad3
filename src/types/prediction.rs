//! Forward-projection outputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Projected hull condition on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub hpi: f64,
    pub drag_percent: f64,
    pub extra_fuel_ton_per_day: f64,
    pub estimated_coverage_percent: f64,
}

/// Hull-cleaning recommendation for one vessel.
///
/// Failure paths (no docking, no model) still produce this shape, with an
/// empty `predictions` list and the reason in `justification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningSuggestion {
    pub vessel_id: String,
    pub last_cleaning_date: Option<NaiveDate>,
    pub ideal_cleaning_date: Option<NaiveDate>,
    /// Days from today to `ideal_cleaning_date`
    pub days_to_intervention: Option<i64>,
    pub justification: String,
    pub current_status: String,
    /// Biofouling level 0-4
    pub current_level: u8,
    pub cfi_clean_ton_per_day: f64,
    pub max_extra_fuel_ton_per_day: f64,
    /// HPI at which cleaning is recommended for this vessel
    pub threshold: f64,
    pub predictions: Vec<DailyPrediction>,
}

impl CleaningSuggestion {
    /// True when the suggestion came from a failure path.
    pub fn is_fallback(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Suggestions for every known vessel, computed against one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetReport {
    pub today: NaiveDate,
    pub model_trained: bool,
    pub suggestions: Vec<CleaningSuggestion>,
}

impl FleetReport {
    /// Vessels whose projected crossing falls within `days` of today.
    pub fn due_within(&self, days: i64) -> impl Iterator<Item = &CleaningSuggestion> {
        self.suggestions
            .iter()
            .filter(move |s| s.days_to_intervention.is_some_and(|d| d <= days))
    }
}
