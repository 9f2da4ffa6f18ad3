//! Feature Engineer
//!
//! Turns consolidated sessions into regression rows:
//! - `days_since_cleaning`: event date minus last docking
//! - `trim_adjusted`: aft minus fore draft
//! - `displacement`
//! - target `hpi`: daily consumption over the vessel's CFI_clean, floored at 1.0

use tracing::info;

use crate::baseline::CfiBaseline;
use crate::config::TrainingConfig;
use crate::fleet::FleetRegistry;
use crate::types::{ConsolidatedRecord, TrainingRecord};

/// Counters for rows that did not become training rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureReport {
    pub no_docking: usize,
    pub bad_timestamp: usize,
    pub before_cleaning: usize,
    pub too_soon: usize,
}

pub struct FeatureEngineer;

impl FeatureEngineer {
    pub fn build(
        records: &[ConsolidatedRecord],
        registry: &FleetRegistry,
        baseline: &CfiBaseline,
        config: &TrainingConfig,
    ) -> (Vec<TrainingRecord>, FeatureReport) {
        let mut rows = Vec::with_capacity(records.len());
        let mut report = FeatureReport::default();

        for rec in records {
            let Some(cleaned) = registry.last_cleaning_date(&rec.vessel_name) else {
                report.no_docking += 1;
                continue;
            };
            let Some(event_date) = rec.event_date() else {
                report.bad_timestamp += 1;
                continue;
            };
            if event_date < cleaned {
                report.before_cleaning += 1;
                continue;
            }
            let days_since_cleaning = (event_date - cleaned).num_days();
            if days_since_cleaning < config.min_days_since_cleaning {
                report.too_soon += 1;
                continue;
            }

            let hpi = Self::hpi(rec.daily_consumption(), baseline.cfi_clean(&rec.vessel_name));
            rows.push(TrainingRecord {
                vessel_name: rec.vessel_name.clone(),
                hpi,
                days_since_cleaning,
                trim_adjusted: rec.trim_adjusted(),
                displacement: rec.displacement,
            });
        }

        info!(
            rows = rows.len(),
            no_docking = report.no_docking,
            bad_timestamp = report.bad_timestamp,
            before_cleaning = report.before_cleaning,
            too_soon = report.too_soon,
            "Feature engineering complete"
        );

        (rows, report)
    }

    /// Observed over ideal consumption, never below the clean baseline.
    pub fn hpi(daily_consumption: f64, cfi_clean: f64) -> f64 {
        let ratio = daily_consumption / cfi_clean;
        if ratio.is_nan() {
            1.0
        } else {
            ratio.max(1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaselineConfig;
    use crate::types::DockingRecord;
    use chrono::NaiveDate;

    fn record(vessel: &str, start: &str, tons: f64) -> ConsolidatedRecord {
        ConsolidatedRecord {
            session_id: start.to_string(),
            vessel_name: vessel.to_string(),
            class: String::new(),
            event_name: String::new(),
            start_gmt: start.to_string(),
            consumed_tons: tons,
            duration_hours: 24.0,
            speed: 12.0,
            aft_draft: 11.0,
            fwd_draft: 10.5,
            displacement: 120_000.0,
            beaufort_scale: 4,
        }
    }

    fn registry() -> FleetRegistry {
        FleetRegistry::build(
            &[DockingRecord {
                vessel_name: "Cartola".to_string(),
                docking_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                docking_type: String::new(),
            }],
            &[],
            &[],
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    #[test]
    fn hpi_is_floored_at_one() {
        assert!((FeatureEngineer::hpi(20.0, 25.0) - 1.0).abs() < f64::EPSILON);
        assert!((FeatureEngineer::hpi(27.5, 25.0) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn builds_rows_and_counts_rejections() {
        let reg = registry();
        let baseline = CfiBaseline::estimate(&[], &reg, &BaselineConfig::default());
        let (rows, report) = FeatureEngineer::build(
            &[
                record("CARTOLA", "2025-03-01 10:00:00", 30.0),
                record("CARTOLA", "2025-01-01 10:00:00", 30.0),
                record("CARTOLA", "2024-12-20 10:00:00", 30.0),
                record("CARTOLA", "bad", 30.0),
                record("ORPHAN", "2025-03-01 10:00:00", 30.0),
            ],
            &reg,
            &baseline,
            &TrainingConfig::default(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].days_since_cleaning, 59);
        assert!((rows[0].hpi - 1.2).abs() < 1e-12);
        assert!((rows[0].trim_adjusted - 0.5).abs() < 1e-12);
        assert_eq!(report.too_soon, 1);
        assert_eq!(report.before_cleaning, 1);
        assert_eq!(report.bad_timestamp, 1);
        assert_eq!(report.no_docking, 1);
    }
}
