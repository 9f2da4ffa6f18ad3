//! Training pipeline
//!
//! One batch run: registry → consolidation → CFI_clean → features →
//! regression. The result is a complete `ModelSnapshot`; a failed fit still
//! yields a snapshot, with the model marked absent and every lookup intact.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::baseline::CfiBaseline;
use crate::config::HullConfig;
use crate::fleet::FleetRegistry;
use crate::pipeline::ModelSnapshot;
use crate::processing::DataConsolidator;
use crate::types::{FleetDataset, ModelState, TrainingSummary};

use super::features::FeatureEngineer;
use super::regression::RegressionTrainer;

pub struct ModelTrainer;

impl ModelTrainer {
    /// Build a snapshot from `dataset`, treating `as_of` as the present.
    pub fn train(dataset: &FleetDataset, as_of: NaiveDate, config: &HullConfig) -> ModelSnapshot {
        info!(
            fleet = %config.fleet.name,
            as_of = %as_of,
            events = dataset.events.len(),
            "Training run starting"
        );

        let registry = FleetRegistry::build(
            &dataset.dockings,
            &dataset.coatings,
            &dataset.ship_details,
            as_of,
        );

        let consolidation =
            DataConsolidator::consolidate(&dataset.events, &dataset.consumption, &config.consolidation);

        let baseline = CfiBaseline::estimate(&consolidation.records, &registry, &config.baseline);

        let (rows, skipped) =
            FeatureEngineer::build(&consolidation.records, &registry, &baseline, &config.training);

        let model = match RegressionTrainer::fit(&rows, as_of) {
            Ok(model) => ModelState::Trained(model),
            Err(failure) => {
                warn!(reason = %failure, "Model unavailable after training run");
                ModelState::Absent(failure.into())
            }
        };

        let summary = TrainingSummary {
            events: consolidation.report.events,
            consumption_sessions: consolidation.report.consumption_sessions,
            consolidated_records: consolidation.records.len(),
            training_rows: rows.len(),
            skipped_no_docking: skipped.no_docking,
            skipped_bad_timestamp: skipped.bad_timestamp,
            skipped_before_cleaning: skipped.before_cleaning,
            skipped_too_soon: skipped.too_soon,
            vessels_with_docking: registry.docking_count(),
            vessels_with_baseline: baseline.vessel_count(),
            vessels_with_coating: registry.coating_count(),
            vessels_with_details: registry.ship_detail_count(),
        };

        info!(
            trained = model.is_trained(),
            training_rows = summary.training_rows,
            skipped_no_docking = summary.skipped_no_docking,
            skipped_too_soon = summary.skipped_too_soon,
            vessels_with_docking = summary.vessels_with_docking,
            fleet_cfi_average = baseline.fleet_average(),
            "Training run complete"
        );

        ModelSnapshot {
            model,
            registry,
            baseline,
            summary,
            as_of: Some(as_of),
        }
    }
}
