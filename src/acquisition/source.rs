//! Dataset source abstraction.
//!
//! A training run pulls one complete `FleetDataset` from a source: the CSV
//! directory in deployments, an in-memory dataset in tests and embedding
//! applications.

use crate::config::DataConfig;
use crate::types::FleetDataset;

use super::csv_loader::{load_dataset, IngestError};

/// Where training data comes from.
pub trait DatasetSource: Send + Sync {
    /// Load a full snapshot of the input tables.
    fn load(&self) -> Result<FleetDataset, IngestError>;

    /// Human-readable name for logging (e.g. "CSV", "memory").
    fn source_name(&self) -> &str;
}

// ============================================================================
// CSV directory
// ============================================================================

/// Reads the five exports from the configured data directory.
pub struct CsvDirectorySource {
    data: DataConfig,
}

impl CsvDirectorySource {
    pub const fn new(data: DataConfig) -> Self {
        Self { data }
    }
}

impl DatasetSource for CsvDirectorySource {
    fn load(&self) -> Result<FleetDataset, IngestError> {
        load_dataset(&self.data)
    }

    fn source_name(&self) -> &str {
        "CSV"
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Hands out clones of a prepared dataset.
pub struct InMemorySource {
    dataset: FleetDataset,
}

impl InMemorySource {
    pub const fn new(dataset: FleetDataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for InMemorySource {
    fn load(&self) -> Result<FleetDataset, IngestError> {
        Ok(self.dataset.clone())
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}
