//! Hull Configuration Module
//!
//! Fleet-wide configuration loaded from TOML, covering every constant of the
//! hull model (baseline window, sanitizer caps, thresholds, horizon).
//!
//! ## Loading Order
//!
//! 1. `HULL_CONFIG` environment variable (path to TOML file)
//! 2. `hull_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! // In main():
//! config::init(HullConfig::load());
//!
//! // Anywhere in the codebase:
//! let horizon = config::get().simulation.horizon_days;
//! ```
//!
//! Library entry points also accept an explicit `&HullConfig`, so tests can
//! run with tailored values without touching the global.

mod hull_config;
pub mod defaults;
pub mod validation;

pub use hull_config::*;

use std::sync::OnceLock;

/// Global hull configuration, initialized once at startup.
static HULL_CONFIG: OnceLock<HullConfig> = OnceLock::new();

/// Initialize the global hull configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: HullConfig) {
    if HULL_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global hull configuration.
///
/// Falls back to built-in defaults when `init()` was never called.
pub fn get() -> &'static HullConfig {
    HULL_CONFIG.get_or_init(|| {
        tracing::debug!("config::get() before init(), using built-in defaults");
        HullConfig::default()
    })
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    HULL_CONFIG.get().is_some()
}
