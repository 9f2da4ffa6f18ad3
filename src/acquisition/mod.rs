//! Tabular data acquisition
//!
//! Reads the fleet exports (dockings, coatings, ship particulars, voyage
//! events, fuel consumption) into typed records.

pub mod csv_loader;
pub mod dates;
pub mod source;

pub use csv_loader::{load_dataset, IngestError, LoadStats, RowError};
pub use source::{CsvDirectorySource, DatasetSource, InMemorySource};
