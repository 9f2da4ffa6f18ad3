//! Clean-Hull Baseline (CFI_clean)
//!
//! A vessel's clean fuel-consumption index is its mean daily consumption in
//! the first days after a docking, once post-docking transients have passed.
//! HPI is measured against it.
//!
//! ## Window
//!
//! Only sessions that started `window_start_day..=window_end_day` days after
//! the last docking count (days 3-7 by default). A vessel with no session in
//! the window falls back to `fallback_cfi_ton_per_day` on lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BaselineConfig;
use crate::fleet::FleetRegistry;
use crate::identity::normalize;
use crate::types::ConsolidatedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfiBaseline {
    per_vessel: HashMap<String, f64>,
    fleet_average: f64,
    fallback: f64,
}

impl CfiBaseline {
    /// Estimate CFI_clean for every vessel with clean-window samples.
    pub fn estimate(
        records: &[ConsolidatedRecord],
        registry: &FleetRegistry,
        config: &BaselineConfig,
    ) -> Self {
        let mut samples: HashMap<&str, (f64, usize)> = HashMap::new();

        for rec in records {
            let Some(cleaned) = registry.last_cleaning_date(&rec.vessel_name) else {
                continue;
            };
            let Some(event_date) = rec.event_date() else {
                continue;
            };
            if event_date < cleaned {
                continue;
            }
            let days_post_cleaning = (event_date - cleaned).num_days();
            if !(config.window_start_day..=config.window_end_day).contains(&days_post_cleaning) {
                continue;
            }

            let daily = rec.daily_consumption();
            if !daily.is_finite() {
                continue;
            }
            let entry = samples.entry(rec.vessel_name.as_str()).or_insert((0.0, 0));
            entry.0 += daily;
            entry.1 += 1;
        }

        #[allow(clippy::cast_precision_loss)]
        let per_vessel: HashMap<String, f64> = samples
            .into_iter()
            .map(|(vessel, (sum, n))| (normalize(vessel), sum / n as f64))
            .collect();

        let fleet_average = if per_vessel.is_empty() {
            config.fallback_cfi_ton_per_day
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = per_vessel.len() as f64;
            per_vessel.values().sum::<f64>() / n
        };

        for (vessel, cfi) in &per_vessel {
            debug!(vessel = %vessel, cfi_clean = cfi, "Clean-hull baseline");
        }
        info!(
            vessels = per_vessel.len(),
            fleet_average,
            window_start = config.window_start_day,
            window_end = config.window_end_day,
            "CFI_clean estimated"
        );

        Self {
            per_vessel,
            fleet_average,
            fallback: config.fallback_cfi_ton_per_day,
        }
    }

    /// CFI_clean in tons/day, or the fallback for vessels without samples.
    pub fn cfi_clean(&self, vessel_id: &str) -> f64 {
        self.per_vessel
            .get(&normalize(vessel_id))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Mean of all per-vessel values (the fallback when there are none).
    pub const fn fleet_average(&self) -> f64 {
        self.fleet_average
    }

    pub fn vessel_count(&self) -> usize {
        self.per_vessel.len()
    }
}

impl Default for CfiBaseline {
    fn default() -> Self {
        let config = BaselineConfig::default();
        Self {
            per_vessel: HashMap::new(),
            fleet_average: config.fallback_cfi_ton_per_day,
            fallback: config.fallback_cfi_ton_per_day,
        }
    }
}
