//! Data Consolidator
//!
//! Produces one `ConsolidatedRecord` per sailing session with a positive fuel
//! figure. Rejects:
//! - Sessions with no (or non-positive) consumption
//! - Rows whose speed, drafts, displacement, duration or Beaufort scale do
//!   not parse
//! - Anchored/idle sessions (speed or duration at or below the minimum)

use std::collections::HashMap;

use tracing::{debug, info};

use crate::config::ConsolidationConfig;
use crate::identity::normalize;
use crate::types::{ConsolidatedRecord, ConsumptionRecord, NavigationEvent};

/// Why a navigation event did not become a consolidated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    NoConsumption,
    Unparseable(&'static str),
    Idle,
}

/// Per-reason discard counters for one consolidation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub events: usize,
    pub consumption_sessions: usize,
    pub kept: usize,
    pub no_consumption: usize,
    pub unparseable: usize,
    pub idle: usize,
}

#[derive(Debug, Clone)]
pub struct ConsolidationResult {
    pub records: Vec<ConsolidatedRecord>,
    pub report: ConsolidationReport,
}

/// Joins events and consumption by session id.
pub struct DataConsolidator;

impl DataConsolidator {
    /// Session id → consumed tons, for positive quantities only.
    ///
    /// A later row for the same session overwrites an earlier one.
    pub fn consumption_by_session(consumption: &[ConsumptionRecord]) -> HashMap<String, f64> {
        let mut map = HashMap::with_capacity(consumption.len());
        for rec in consumption {
            if let Some(qty) = parse_f64(&rec.consumed_quantity).filter(|q| *q > 0.0) {
                map.insert(rec.session_id.trim().to_string(), qty);
            }
        }
        map
    }

    pub fn consolidate(
        events: &[NavigationEvent],
        consumption: &[ConsumptionRecord],
        config: &ConsolidationConfig,
    ) -> ConsolidationResult {
        let by_session = Self::consumption_by_session(consumption);
        let mut report = ConsolidationReport {
            events: events.len(),
            consumption_sessions: by_session.len(),
            ..ConsolidationReport::default()
        };
        let mut records = Vec::new();

        for event in events {
            let consumed = by_session.get(event.session_id.trim()).copied();
            match Self::validate(event, consumed, config) {
                Ok(rec) => records.push(rec),
                Err(DiscardReason::NoConsumption) => report.no_consumption += 1,
                Err(DiscardReason::Unparseable(field)) => {
                    report.unparseable += 1;
                    debug!(session = %event.session_id, field, "Discarding session with unparseable field");
                }
                Err(DiscardReason::Idle) => report.idle += 1,
            }
        }
        report.kept = records.len();

        info!(
            events = report.events,
            kept = report.kept,
            no_consumption = report.no_consumption,
            unparseable = report.unparseable,
            idle = report.idle,
            "Consolidation complete"
        );

        ConsolidationResult { records, report }
    }

    /// Validate a single event against its consumption figure.
    pub fn validate(
        event: &NavigationEvent,
        consumed_tons: Option<f64>,
        config: &ConsolidationConfig,
    ) -> Result<ConsolidatedRecord, DiscardReason> {
        let consumed_tons = consumed_tons.ok_or(DiscardReason::NoConsumption)?;

        let speed = field(&event.speed, "speed")?;
        let aft_draft = field(&event.aft_draft, "aftDraft")?;
        let fwd_draft = field(&event.fwd_draft, "fwdDraft")?;
        let displacement = field(&event.displacement, "displacement")?;
        let duration_hours = field(&event.duration, "duration")?;
        let beaufort_scale = event
            .beaufort_scale
            .trim()
            .parse::<i32>()
            .map_err(|_| DiscardReason::Unparseable("beaufortScale"))?;

        if speed <= config.min_speed || duration_hours <= config.min_duration_hours {
            return Err(DiscardReason::Idle);
        }

        Ok(ConsolidatedRecord {
            session_id: event.session_id.trim().to_string(),
            vessel_name: normalize(&event.vessel_name),
            class: event.class.trim().to_string(),
            event_name: event.event_name.trim().to_string(),
            start_gmt: event.start_gmt.trim().to_string(),
            consumed_tons,
            duration_hours,
            speed,
            aft_draft,
            fwd_draft,
            displacement,
            beaufort_scale,
        })
    }
}

fn parse_f64(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn field(text: &str, name: &'static str) -> Result<f64, DiscardReason> {
    parse_f64(text).ok_or(DiscardReason::Unparseable(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(session: &str, speed: &str, duration: &str) -> NavigationEvent {
        NavigationEvent {
            session_id: session.to_string(),
            vessel_name: " Cártola ".to_string(),
            start_gmt: "2025-03-10 06:00:00".to_string(),
            duration: duration.to_string(),
            aft_draft: "12.4".to_string(),
            fwd_draft: "11.9".to_string(),
            displacement: "145000".to_string(),
            beaufort_scale: "4".to_string(),
            speed: speed.to_string(),
            ..NavigationEvent::default()
        }
    }

    fn consumption(session: &str, qty: &str) -> ConsumptionRecord {
        ConsumptionRecord {
            session_id: session.to_string(),
            consumed_quantity: qty.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn non_positive_and_unparseable_quantities_are_dropped() {
        let map = DataConsolidator::consumption_by_session(&[
            consumption("A", "10.5"),
            consumption("B", "0"),
            consumption("C", "-3"),
            consumption("D", "abc"),
            consumption("E", "NaN"),
        ]);
        assert_eq!(map.len(), 1);
        assert!((map["A"] - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn later_duplicate_session_overwrites() {
        let map = DataConsolidator::consumption_by_session(&[
            consumption("A", "10"),
            consumption("A", "12"),
        ]);
        assert!((map["A"] - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn joins_and_normalizes_vessel_name() {
        let result = DataConsolidator::consolidate(
            &[event("S1", "12.0", "20")],
            &[consumption("S1", "30")],
            &ConsolidationConfig::default(),
        );
        assert_eq!(result.records.len(), 1);
        let rec = &result.records[0];
        assert_eq!(rec.vessel_name, "CARTOLA");
        assert!((rec.trim_adjusted() - 0.5).abs() < 1e-9);
        assert!((rec.daily_consumption() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn idle_sessions_are_filtered_at_the_boundary() {
        let cfg = ConsolidationConfig::default();
        let result = DataConsolidator::consolidate(
            &[
                event("S1", "1.0", "20"),
                event("S2", "12.0", "1.0"),
                event("S3", "1.01", "1.01"),
            ],
            &[consumption("S1", "5"), consumption("S2", "5"), consumption("S3", "5")],
            &cfg,
        );
        assert_eq!(result.report.idle, 2);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].session_id, "S3");
    }

    #[test]
    fn bad_rows_do_not_abort_the_batch() {
        let mut bad_beaufort = event("S2", "12", "20");
        bad_beaufort.beaufort_scale = "4.5".to_string();
        let mut bad_draft = event("S3", "12", "20");
        bad_draft.fwd_draft = String::new();

        let result = DataConsolidator::consolidate(
            &[event("S1", "12", "20"), bad_beaufort, bad_draft, event("S4", "12", "20")],
            &[
                consumption("S1", "5"),
                consumption("S2", "5"),
                consumption("S3", "5"),
            ],
            &ConsolidationConfig::default(),
        );
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.report.unparseable, 2);
        assert_eq!(result.report.no_consumption, 1);
    }
}
