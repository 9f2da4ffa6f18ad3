//! Immutable training output shared by all readers.
//!
//! A snapshot is built whole by one training run and never mutated; a
//! retrain publishes a replacement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::baseline::CfiBaseline;
use crate::config::ThresholdConfig;
use crate::fleet::FleetRegistry;
use crate::strategic::thresholds::DynamicThreshold;
use crate::types::{CoatingRecord, ModelState, ShipDetail, TrainingSummary};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub model: ModelState,
    pub registry: FleetRegistry,
    pub baseline: CfiBaseline,
    pub summary: TrainingSummary,
    /// Reference date of the run; `None` before the first training
    pub as_of: Option<NaiveDate>,
}

impl ModelSnapshot {
    /// Snapshot served before any training run.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn last_cleaning_date(&self, vessel_id: &str) -> Option<NaiveDate> {
        self.registry.last_cleaning_date(vessel_id)
    }

    pub fn cfi_clean_ton_per_day(&self, vessel_id: &str) -> f64 {
        self.baseline.cfi_clean(vessel_id)
    }

    pub fn ship_class_type(&self, vessel_id: &str) -> String {
        self.registry.ship_class_type(vessel_id)
    }

    pub fn ship_detail(&self, vessel_id: &str) -> Option<&ShipDetail> {
        self.registry.ship_detail(vessel_id)
    }

    pub fn coating(&self, vessel_id: &str) -> Option<&CoatingRecord> {
        self.registry.coating(vessel_id)
    }

    pub fn coating_base_period(&self, vessel_id: &str, thresholds: &ThresholdConfig) -> u32 {
        self.registry
            .coating_base_period(vessel_id, thresholds.default_coating_period_weeks)
    }

    /// Cleaning threshold for this vessel's class and coating.
    ///
    /// Class and cargo come from the ship details, or from the coating
    /// record when the vessel has no details row.
    pub fn threshold_for(&self, vessel_id: &str, thresholds: &ThresholdConfig) -> f64 {
        let detail = self.ship_detail(vessel_id);
        let coating = self.coating(vessel_id);
        let class = detail
            .map(|d| d.class.as_str())
            .or_else(|| coating.map(|c| c.class_type.as_str()));
        let cargo = detail
            .map(|d| d.cargo_type.as_str())
            .or_else(|| coating.map(|c| c.cargo_type.as_str()));
        DynamicThreshold::for_vessel(
            class,
            cargo,
            self.coating_base_period(vessel_id, thresholds),
            thresholds,
        )
    }
}
