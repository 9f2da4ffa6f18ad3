//! Snapshot and service facade
//!
//! ```text
//! DatasetSource ──load──▶ ModelTrainer ──store──▶ ArcSwap<ModelSnapshot>
//!                                                        │ load_full
//!                          suggest / fleet_report ◀──────┘
//! ```

mod advisor;
mod snapshot;

pub use advisor::HullAdvisor;
pub use snapshot::ModelSnapshot;
