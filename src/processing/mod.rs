//! Session processing
//!
//! Joins voyage events with their fuel consumption and filters out sessions
//! whose fuel burn cannot be attributed to hull resistance.

pub mod consolidator;

pub use consolidator::{ConsolidationReport, ConsolidationResult, DataConsolidator, DiscardReason};
