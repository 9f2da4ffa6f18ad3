//! Ingested rows and derived training rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw inputs
// ============================================================================

/// One navigation session from the voyage-event export.
///
/// Numeric columns are kept exactly as ingested; the consolidator decides
/// which of them must parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub session_id: String,
    pub vessel_name: String,
    pub class: String,
    pub event_name: String,
    /// `yyyy-MM-dd HH:mm:ss`
    pub start_gmt: String,
    pub end_gmt: String,
    /// Hours
    pub duration: String,
    pub distance: String,
    pub aft_draft: String,
    pub fwd_draft: String,
    pub mid_draft: String,
    pub trim: String,
    pub displacement: String,
    pub beaufort_scale: String,
    pub sea_condition: String,
    pub beaufort_scale_desc: String,
    pub sea_condition_desc: String,
    /// Knots
    pub speed: String,
    pub speed_gps: String,
    pub port: String,
    pub latitude: String,
    pub longitude: String,
}

/// Fuel consumed during one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub session_id: String,
    /// Tons, as ingested
    pub consumed_quantity: String,
    pub description: String,
}

/// A dry-docking; the most recent one is the last full hull cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockingRecord {
    pub vessel_name: String,
    pub docking_date: NaiveDate,
    pub docking_type: String,
}

/// Antifouling coating application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoatingRecord {
    pub code: String,
    pub vessel_name: String,
    pub class_type: String,
    pub cargo_type: String,
    pub class_number: String,
    pub application_date: NaiveDate,
    /// Base verification period in weeks
    pub base_period_weeks: u32,
    pub max_accumulated_stoppage: Option<u32>,
}

/// Static particulars of a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDetail {
    pub vessel_name: String,
    /// e.g. "Suezmax", "Aframax"
    pub class: String,
    pub cargo_type: String,
    pub deadweight_tonnage: f64,
    pub length_m: Option<f64>,
    pub beam_m: Option<f64>,
    pub draft_m: Option<f64>,
    pub depth_m: Option<f64>,
}

/// Everything one training run reads.
#[derive(Debug, Clone, Default)]
pub struct FleetDataset {
    pub events: Vec<NavigationEvent>,
    pub consumption: Vec<ConsumptionRecord>,
    pub dockings: Vec<DockingRecord>,
    pub coatings: Vec<CoatingRecord>,
    pub ship_details: Vec<ShipDetail>,
}

// ============================================================================
// Derived rows
// ============================================================================

/// A sailing session joined with its fuel consumption.
///
/// Always satisfies `speed > min_speed` and `duration_hours > min_duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub session_id: String,
    /// Normalized vessel key
    pub vessel_name: String,
    pub class: String,
    pub event_name: String,
    pub start_gmt: String,
    pub consumed_tons: f64,
    pub duration_hours: f64,
    pub speed: f64,
    pub aft_draft: f64,
    pub fwd_draft: f64,
    pub displacement: f64,
    pub beaufort_scale: i32,
}

impl ConsolidatedRecord {
    /// Calendar date the session started, from the leading `yyyy-MM-dd`.
    pub fn event_date(&self) -> Option<NaiveDate> {
        crate::acquisition::dates::parse_event_date(&self.start_gmt)
    }

    /// Consumption scaled to a full day (tons/day).
    pub fn daily_consumption(&self) -> f64 {
        self.consumed_tons / (self.duration_hours / 24.0)
    }

    /// Stern-minus-bow draft (positive when trimmed by the stern).
    pub fn trim_adjusted(&self) -> f64 {
        self.aft_draft - self.fwd_draft
    }
}

/// One regression row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub vessel_name: String,
    /// Always >= 1.0
    pub hpi: f64,
    /// Always >= 1
    pub days_since_cleaning: i64,
    pub trim_adjusted: f64,
    pub displacement: f64,
}
