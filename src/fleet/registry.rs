//! Fleet Registry - the per-vessel lookups a prediction needs.
//!
//! Built once per training run from the docking, coating and ship-detail
//! tables. Records dated after the reference date are ignored, so a run
//! "as of" a past date sees the fleet as it was then.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::identity::normalize;
use crate::types::{CoatingRecord, DockingRecord, ShipDetail};

/// Class label reported for vessels without ship details.
pub const UNKNOWN_CLASS: &str = "UNKNOWN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetRegistry {
    last_cleaning: HashMap<String, NaiveDate>,
    coatings: HashMap<String, CoatingRecord>,
    ship_details: HashMap<String, ShipDetail>,
}

impl FleetRegistry {
    pub fn build(
        dockings: &[DockingRecord],
        coatings: &[CoatingRecord],
        ship_details: &[ShipDetail],
        as_of: NaiveDate,
    ) -> Self {
        let mut registry = Self::default();

        for docking in dockings.iter().filter(|d| d.docking_date <= as_of) {
            let key = normalize(&docking.vessel_name);
            if key.is_empty() {
                continue;
            }
            registry
                .last_cleaning
                .entry(key)
                .and_modify(|d| *d = (*d).max(docking.docking_date))
                .or_insert(docking.docking_date);
        }

        for coating in coatings.iter().filter(|c| c.application_date <= as_of) {
            let key = normalize(&coating.vessel_name);
            if key.is_empty() {
                continue;
            }
            match registry.coatings.get(&key) {
                Some(existing) if existing.application_date >= coating.application_date => {}
                _ => {
                    registry.coatings.insert(key, coating.clone());
                }
            }
        }

        for detail in ship_details {
            let key = normalize(&detail.vessel_name);
            if !key.is_empty() {
                registry.ship_details.insert(key, detail.clone());
            }
        }

        info!(
            dockings = registry.last_cleaning.len(),
            coatings = registry.coatings.len(),
            ship_details = registry.ship_details.len(),
            as_of = %as_of,
            "Fleet registry built"
        );

        registry
    }

    /// Date of the most recent docking (full hull cleaning).
    pub fn last_cleaning_date(&self, vessel_id: &str) -> Option<NaiveDate> {
        self.last_cleaning.get(&normalize(vessel_id)).copied()
    }

    /// Most recent coating application.
    pub fn coating(&self, vessel_id: &str) -> Option<&CoatingRecord> {
        self.coatings.get(&normalize(vessel_id))
    }

    /// Coating base verification period in weeks, or `default_weeks`.
    pub fn coating_base_period(&self, vessel_id: &str, default_weeks: u32) -> u32 {
        self.coating(vessel_id)
            .map_or(default_weeks, |c| c.base_period_weeks)
    }

    pub fn ship_detail(&self, vessel_id: &str) -> Option<&ShipDetail> {
        self.ship_details.get(&normalize(vessel_id))
    }

    /// Ship class label as recorded, or [`UNKNOWN_CLASS`].
    pub fn ship_class_type(&self, vessel_id: &str) -> String {
        self.ship_detail(vessel_id)
            .map_or_else(|| UNKNOWN_CLASS.to_string(), |d| d.class.clone())
    }

    /// Every vessel named in any table, sorted.
    pub fn vessels(&self) -> Vec<String> {
        let all: BTreeSet<&String> = self
            .last_cleaning
            .keys()
            .chain(self.coatings.keys())
            .chain(self.ship_details.keys())
            .collect();
        all.into_iter().cloned().collect()
    }

    pub fn docking_count(&self) -> usize {
        self.last_cleaning.len()
    }

    pub fn coating_count(&self) -> usize {
        self.coatings.len()
    }

    pub fn ship_detail_count(&self) -> usize {
        self.ship_details.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn docking(name: &str, d: NaiveDate) -> DockingRecord {
        DockingRecord {
            vessel_name: name.to_string(),
            docking_date: d,
            docking_type: "Docagem".to_string(),
        }
    }

    fn coating(name: &str, d: NaiveDate, weeks: u32) -> CoatingRecord {
        CoatingRecord {
            code: "C".to_string(),
            vessel_name: name.to_string(),
            class_type: String::new(),
            cargo_type: String::new(),
            class_number: String::new(),
            application_date: d,
            base_period_weeks: weeks,
            max_accumulated_stoppage: None,
        }
    }

    #[test]
    fn keeps_latest_docking_up_to_reference_date() {
        let registry = FleetRegistry::build(
            &[
                docking("Cartola", date(2022, 5, 1)),
                docking("CARTOLA ", date(2024, 2, 10)),
                docking("cártola", date(2026, 1, 1)),
            ],
            &[],
            &[],
            date(2025, 6, 1),
        );
        assert_eq!(registry.last_cleaning_date("Cartola"), Some(date(2024, 2, 10)));
        assert_eq!(registry.last_cleaning_date("  cartola"), Some(date(2024, 2, 10)));
        assert_eq!(registry.last_cleaning_date("Other"), None);
    }

    #[test]
    fn latest_coating_wins_and_default_period_applies() {
        let registry = FleetRegistry::build(
            &[],
            &[
                coating("Anita Garibaldi", date(2023, 1, 1), 90),
                coating("Anita Garibaldi", date(2024, 1, 1), 130),
                coating("Anita Garibaldi", date(2023, 6, 1), 30),
            ],
            &[],
            date(2025, 1, 1),
        );
        assert_eq!(registry.coating_base_period("ANITA GARIBALDI", 52), 130);
        assert_eq!(registry.coating_base_period("Unknown", 52), 52);
    }

    #[test]
    fn class_lookup_normalizes_and_falls_back() {
        let registry = FleetRegistry::build(
            &[],
            &[],
            &[ShipDetail {
                vessel_name: "Rômulo Almeida".to_string(),
                class: "Suezmax".to_string(),
                cargo_type: "Petroleiro".to_string(),
                deadweight_tonnage: 157_000.0,
                length_m: None,
                beam_m: None,
                draft_m: None,
                depth_m: None,
            }],
            date(2025, 1, 1),
        );
        assert_eq!(registry.ship_class_type("romulo almeida"), "Suezmax");
        assert_eq!(registry.ship_class_type("Ghost"), UNKNOWN_CLASS);
        assert_eq!(registry.vessels(), vec!["ROMULO ALMEIDA".to_string()]);
    }
}
