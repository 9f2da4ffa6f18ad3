//! Hull advisor service facade.
//!
//! Owns the configuration, the dataset source and the current
//! `ModelSnapshot`. Training publishes a new snapshot with a single atomic
//! store; every query loads one `Arc` and answers entirely from it, so a
//! retrain never tears a prediction.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use tracing::{debug, error, info};

use crate::acquisition::csv_loader::IngestError;
use crate::acquisition::source::{CsvDirectorySource, DatasetSource};
use crate::config::HullConfig;
use crate::ml_engine::trainer::ModelTrainer;
use crate::strategic::simulator::{DegradationSimulator, SimulationInput};
use crate::types::{CleaningSuggestion, FleetDataset, FleetReport, ModelState, TrainingSummary};

use super::snapshot::ModelSnapshot;

const NO_DOCKING_JUSTIFICATION: &str = "Docking date not found for vessel.";

pub struct HullAdvisor {
    config: HullConfig,
    source: Box<dyn DatasetSource>,
    snapshot: ArcSwap<ModelSnapshot>,
}

impl HullAdvisor {
    pub fn new(config: HullConfig, source: Box<dyn DatasetSource>) -> Self {
        Self {
            config,
            source,
            snapshot: ArcSwap::from_pointee(ModelSnapshot::empty()),
        }
    }

    /// Advisor reading the CSV exports under `config.data`.
    pub fn from_config(config: HullConfig) -> Self {
        let source = CsvDirectorySource::new(config.data.clone());
        Self::new(config, Box::new(source))
    }

    pub const fn config(&self) -> &HullConfig {
        &self.config
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Current snapshot. Hold the `Arc` for the duration of one query.
    pub fn snapshot(&self) -> Arc<ModelSnapshot> {
        self.snapshot.load_full()
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Train with today's local date as the reference.
    pub fn train_model(&self) -> Result<TrainingSummary, IngestError> {
        self.train_model_as_of(Local::now().date_naive())
    }

    /// Load from the source and train as of `as_of`.
    ///
    /// On an ingest error the previous snapshot stays in place.
    pub fn train_model_as_of(&self, as_of: NaiveDate) -> Result<TrainingSummary, IngestError> {
        let dataset = match self.source.load() {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(source = self.source.source_name(), error = %e, "Dataset load failed");
                return Err(e);
            }
        };
        Ok(self.train_with(&dataset, as_of))
    }

    /// Train on an already-loaded dataset and publish the result.
    pub fn train_with(&self, dataset: &FleetDataset, as_of: NaiveDate) -> TrainingSummary {
        let snapshot = ModelTrainer::train(dataset, as_of, &self.config);
        let summary = snapshot.summary;
        self.snapshot.store(Arc::new(snapshot));
        summary
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn last_cleaning_date(&self, vessel_id: &str) -> Option<NaiveDate> {
        self.snapshot.load().last_cleaning_date(vessel_id)
    }

    pub fn cfi_clean_ton_per_day(&self, vessel_id: &str) -> f64 {
        self.snapshot.load().cfi_clean_ton_per_day(vessel_id)
    }

    pub fn ship_class_type(&self, vessel_id: &str) -> String {
        self.snapshot.load().ship_class_type(vessel_id)
    }

    pub fn coating_base_period(&self, vessel_id: &str) -> u32 {
        self.snapshot
            .load()
            .coating_base_period(vessel_id, &self.config.thresholds)
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    pub fn suggest_cleaning_date(&self, vessel_id: &str) -> CleaningSuggestion {
        self.suggest_cleaning_date_on(vessel_id, Local::now().date_naive())
    }

    /// Recommendation for `vessel_id` with `today` as the projection start.
    /// Never fails; missing inputs produce a fallback suggestion.
    pub fn suggest_cleaning_date_on(&self, vessel_id: &str, today: NaiveDate) -> CleaningSuggestion {
        let snapshot = self.snapshot.load_full();
        Self::suggest_from(&snapshot, &self.config, vessel_id, today)
    }

    /// Suggestions for every vessel known to the current snapshot.
    pub fn fleet_report(&self, today: NaiveDate) -> FleetReport {
        let snapshot = self.snapshot.load_full();
        let vessels = snapshot.registry.vessels();

        let suggestions: Vec<CleaningSuggestion> = vessels
            .par_iter()
            .map(|vessel| Self::suggest_from(&snapshot, &self.config, vessel, today))
            .collect();

        info!(
            vessels = suggestions.len(),
            due_within_30_days = suggestions
                .iter()
                .filter(|s| s.days_to_intervention.is_some_and(|d| d <= 30))
                .count(),
            "Fleet report computed"
        );

        FleetReport {
            today,
            model_trained: snapshot.model.is_trained(),
            suggestions,
        }
    }

    fn suggest_from(
        snapshot: &ModelSnapshot,
        config: &HullConfig,
        vessel_id: &str,
        today: NaiveDate,
    ) -> CleaningSuggestion {
        let cfi_clean = snapshot.cfi_clean_ton_per_day(vessel_id);
        let threshold = snapshot.threshold_for(vessel_id, &config.thresholds);

        let Some(last_cleaning) = snapshot.last_cleaning_date(vessel_id) else {
            debug!(vessel = %vessel_id, "No docking date, returning fallback suggestion");
            return DegradationSimulator::fallback(
                vessel_id,
                NO_DOCKING_JUSTIFICATION.to_string(),
                None,
                cfi_clean,
                threshold,
                &config.biofouling,
            );
        };

        let model = match &snapshot.model {
            ModelState::Trained(model) => model,
            ModelState::Absent(reason) => {
                debug!(vessel = %vessel_id, reason = %reason, "Model absent, returning fallback suggestion");
                return DegradationSimulator::fallback(
                    vessel_id,
                    format!("Model not trained or unavailable: {reason}."),
                    Some(last_cleaning),
                    cfi_clean,
                    threshold,
                    &config.biofouling,
                );
            }
        };

        DegradationSimulator::simulate(
            &SimulationInput {
                vessel_id,
                coefficients: model.coefficients,
                last_cleaning,
                cfi_clean,
                threshold,
                today,
            },
            config,
        )
    }
}
