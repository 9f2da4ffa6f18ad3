//! Shared data structures for hull performance estimation
//!
//! - `records`: raw ingested rows and the rows derived from them
//! - `model`: trained regression coefficients and model state
//! - `prediction`: per-day projections and cleaning suggestions

mod model;
mod prediction;
mod records;

pub use model::*;
pub use prediction::*;
pub use records::*;
