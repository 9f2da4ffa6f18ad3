//! Hull Configuration - every model constant as an operator-tunable TOML value
//!
//! Each struct implements `Default` with the values in `defaults.rs`, so a
//! deployment without a config file gets the reference behaviour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a fleet deployment.
///
/// Load with `HullConfig::load()` which searches:
/// 1. `$HULL_CONFIG` env var
/// 2. `./hull_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HullConfig {
    /// Fleet identification
    #[serde(default)]
    pub fleet: FleetInfo,

    /// Input file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Session filtering
    #[serde(default)]
    pub consolidation: ConsolidationConfig,

    /// Clean-hull baseline window
    #[serde(default)]
    pub baseline: BaselineConfig,

    /// Training run parameters
    #[serde(default)]
    pub training: TrainingConfig,

    /// Coefficient sanitizer bounds
    #[serde(default)]
    pub sanitizer: SanitizerConfig,

    /// Forward projection
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Per-class cleaning thresholds
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Biofouling level boundaries
    #[serde(default)]
    pub biofouling: BiofoulingConfig,
}

impl HullConfig {
    /// Load configuration using the standard search order:
    /// 1. `$HULL_CONFIG` environment variable
    /// 2. `./hull_config.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("HULL_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), fleet = %config.fleet.name, "Loaded hull config from HULL_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from HULL_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "HULL_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("hull_config.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(fleet = %config.fleet.name, "Loaded hull config from ./hull_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./hull_config.toml, using defaults");
                }
            }
        }

        info!("No hull_config.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are reported as warnings; inconsistent values are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        for w in super::validation::plausibility_warnings(&config) {
            warn!(field = %w.field, "{}", w);
        }
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Clean window must be ordered and start after docking day
    /// - Fallback CFI and filters must be positive
    /// - Sanitizer caps must be ordered (default rate within (0, max])
    /// - Every cleaning threshold must be above the clean baseline
    /// - Biofouling levels must escalate (critical < urgent)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let b = &self.baseline;
        if b.window_start_day < 0 {
            errors.push(format!(
                "baseline.window_start_day ({}) must be >= 0",
                b.window_start_day
            ));
        }
        if b.window_end_day < b.window_start_day {
            errors.push(format!(
                "baseline.window_end_day ({}) must be >= window_start_day ({})",
                b.window_end_day, b.window_start_day
            ));
        }
        Self::check_positive(b.fallback_cfi_ton_per_day, "baseline.fallback_cfi_ton_per_day", &mut errors);

        let c = &self.consolidation;
        Self::check_non_negative(c.min_speed, "consolidation.min_speed", &mut errors);
        Self::check_non_negative(c.min_duration_hours, "consolidation.min_duration_hours", &mut errors);

        if self.training.min_days_since_cleaning < 0 {
            errors.push("training.min_days_since_cleaning must be >= 0".to_string());
        }
        if self.training.retrain_interval_secs == 0 {
            errors.push("training.retrain_interval_secs must be > 0".to_string());
        }

        let s = &self.sanitizer;
        Self::check_positive(s.max_degradation_rate, "sanitizer.max_degradation_rate", &mut errors);
        if !(s.default_degradation_rate > 0.0 && s.default_degradation_rate <= s.max_degradation_rate) {
            errors.push(format!(
                "sanitizer.default_degradation_rate ({}) must be in (0, max_degradation_rate = {}]",
                s.default_degradation_rate, s.max_degradation_rate
            ));
        }
        if !(s.min_intercept.is_finite() && s.max_clean_intercept.is_finite())
            || s.max_clean_intercept < s.min_intercept
        {
            errors.push(format!(
                "sanitizer.max_clean_intercept ({}) must be >= min_intercept ({})",
                s.max_clean_intercept, s.min_intercept
            ));
        }

        if self.simulation.horizon_days <= 0 {
            errors.push(format!(
                "simulation.horizon_days ({}) must be > 0",
                self.simulation.horizon_days
            ));
        }

        let t = &self.thresholds;
        for (name, value) in [
            ("suezmax", t.suezmax),
            ("aframax", t.aframax),
            ("product_carrier", t.product_carrier),
            ("gas_carrier", t.gas_carrier),
            ("default_threshold", t.default_threshold),
        ] {
            if !value.is_finite() || value - t.coating_adjustment <= 1.0 {
                errors.push(format!(
                    "thresholds.{name} ({value}) minus coating_adjustment must stay above 1.0"
                ));
            }
        }
        if t.premium_coating_min_weeks <= t.standard_coating_max_weeks {
            errors.push(format!(
                "thresholds.premium_coating_min_weeks ({}) must be > standard_coating_max_weeks ({})",
                t.premium_coating_min_weeks, t.standard_coating_max_weeks
            ));
        }
        Self::check_non_negative(t.coating_adjustment, "thresholds.coating_adjustment", &mut errors);

        let bf = &self.biofouling;
        if !(bf.critical_hpi.is_finite() && bf.urgent_hpi.is_finite()) || bf.urgent_hpi <= bf.critical_hpi {
            errors.push(format!(
                "biofouling.urgent_hpi ({}) must be > critical_hpi ({})",
                bf.urgent_hpi, bf.critical_hpi
            ));
        }
        if bf.critical_hpi <= 1.0 {
            errors.push(format!(
                "biofouling.critical_hpi ({}) must be > 1.0",
                bf.critical_hpi
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} must be a finite number > 0 (got {value})"));
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!("{name} must be a finite number >= 0 (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Fleet Info
// ============================================================================

/// Identification metadata, used only in logs and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetInfo {
    #[serde(default = "default_fleet_name")]
    pub name: String,

    #[serde(default)]
    pub operator: String,
}

fn default_fleet_name() -> String {
    "DEFAULT".to_string()
}

impl Default for FleetInfo {
    fn default() -> Self {
        Self {
            name: default_fleet_name(),
            operator: String::new(),
        }
    }
}

// ============================================================================
// Data
// ============================================================================

/// Locations of the five tabular exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_docking_file")]
    pub docking_file: String,
    #[serde(default = "default_coating_file")]
    pub coating_file: String,
    #[serde(default = "default_ship_details_file")]
    pub ship_details_file: String,
    #[serde(default = "default_events_file")]
    pub events_file: String,
    #[serde(default = "default_consumption_file")]
    pub consumption_file: String,
}

fn default_data_dir() -> PathBuf { PathBuf::from(defaults::DATA_DIR) }
fn default_docking_file() -> String { defaults::DOCKING_FILE.to_string() }
fn default_coating_file() -> String { defaults::COATING_FILE.to_string() }
fn default_ship_details_file() -> String { defaults::SHIP_DETAILS_FILE.to_string() }
fn default_events_file() -> String { defaults::EVENTS_FILE.to_string() }
fn default_consumption_file() -> String { defaults::CONSUMPTION_FILE.to_string() }

impl DataConfig {
    /// Resolve a file name against the data directory.
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            docking_file: default_docking_file(),
            coating_file: default_coating_file(),
            ship_details_file: default_ship_details_file(),
            events_file: default_events_file(),
            consumption_file: default_consumption_file(),
        }
    }
}

// ============================================================================
// Consolidation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationConfig {
    /// Sessions must be strictly faster than this (knots)
    #[serde(default = "default_min_speed")]
    pub min_speed: f64,
    /// Sessions must last strictly longer than this (hours)
    #[serde(default = "default_min_duration")]
    pub min_duration_hours: f64,
}

fn default_min_speed() -> f64 { defaults::MIN_SESSION_SPEED }
fn default_min_duration() -> f64 { defaults::MIN_SESSION_DURATION_HOURS }

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            min_speed: default_min_speed(),
            min_duration_hours: default_min_duration(),
        }
    }
}

// ============================================================================
// Baseline
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// First post-docking day of the clean window (inclusive)
    #[serde(default = "default_window_start")]
    pub window_start_day: i64,
    /// Last post-docking day of the clean window (inclusive)
    #[serde(default = "default_window_end")]
    pub window_end_day: i64,
    /// CFI_clean for vessels without clean-window samples (tons/day)
    #[serde(default = "default_fallback_cfi")]
    pub fallback_cfi_ton_per_day: f64,
}

fn default_window_start() -> i64 { defaults::CLEAN_WINDOW_START_DAY }
fn default_window_end() -> i64 { defaults::CLEAN_WINDOW_END_DAY }
fn default_fallback_cfi() -> f64 { defaults::FALLBACK_CFI_TON_PER_DAY }

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            window_start_day: default_window_start(),
            window_end_day: default_window_end(),
            fallback_cfi_ton_per_day: default_fallback_cfi(),
        }
    }
}

// ============================================================================
// Training
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_min_days_since_cleaning")]
    pub min_days_since_cleaning: i64,
    /// Scheduled retrain interval (seconds). `HULL_RETRAIN_INTERVAL_SECS` overrides.
    #[serde(default = "default_retrain_interval")]
    pub retrain_interval_secs: u64,
}

fn default_min_days_since_cleaning() -> i64 { defaults::MIN_DAYS_SINCE_CLEANING }
fn default_retrain_interval() -> u64 { defaults::RETRAIN_INTERVAL_SECS }

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_days_since_cleaning: default_min_days_since_cleaning(),
            retrain_interval_secs: default_retrain_interval(),
        }
    }
}

// ============================================================================
// Sanitizer
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    #[serde(default = "default_degradation_rate")]
    pub default_degradation_rate: f64,
    #[serde(default = "default_max_degradation_rate")]
    pub max_degradation_rate: f64,
    #[serde(default = "default_min_intercept")]
    pub min_intercept: f64,
    #[serde(default = "default_max_clean_intercept")]
    pub max_clean_intercept: f64,
}

fn default_degradation_rate() -> f64 { defaults::DEFAULT_DEGRADATION_RATE }
fn default_max_degradation_rate() -> f64 { defaults::MAX_DEGRADATION_RATE }
fn default_min_intercept() -> f64 { defaults::MIN_INTERCEPT }
fn default_max_clean_intercept() -> f64 { defaults::MAX_CLEAN_INTERCEPT }

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            default_degradation_rate: default_degradation_rate(),
            max_degradation_rate: default_max_degradation_rate(),
            min_intercept: default_min_intercept(),
            max_clean_intercept: default_max_clean_intercept(),
        }
    }
}

// ============================================================================
// Simulation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Days projected after today
    #[serde(default = "default_horizon")]
    pub horizon_days: i64,
    /// End the projection on the first threshold crossing instead of
    /// emitting the full horizon
    #[serde(default)]
    pub stop_at_first_crossing: bool,
}

fn default_horizon() -> i64 { defaults::PROJECTION_HORIZON_DAYS }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon(),
            stop_at_first_crossing: false,
        }
    }
}

// ============================================================================
// Thresholds
// ============================================================================

/// HPI at which each ship class is due for cleaning, plus coating adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_suezmax")]
    pub suezmax: f64,
    #[serde(default = "default_aframax")]
    pub aframax: f64,
    #[serde(default = "default_product_carrier")]
    pub product_carrier: f64,
    #[serde(default = "default_gas_carrier")]
    pub gas_carrier: f64,
    /// Threshold for unrecognized classes
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    #[serde(default = "default_standard_coating")]
    pub standard_coating_max_weeks: u32,
    #[serde(default = "default_premium_coating")]
    pub premium_coating_min_weeks: u32,
    #[serde(default = "default_coating_adjustment")]
    pub coating_adjustment: f64,
    #[serde(default = "default_coating_period")]
    pub default_coating_period_weeks: u32,
}

fn default_suezmax() -> f64 { defaults::THRESHOLD_SUEZMAX }
fn default_aframax() -> f64 { defaults::THRESHOLD_AFRAMAX }
fn default_product_carrier() -> f64 { defaults::THRESHOLD_PRODUCT_CARRIER }
fn default_gas_carrier() -> f64 { defaults::THRESHOLD_GAS_CARRIER }
fn default_threshold() -> f64 { defaults::THRESHOLD_DEFAULT }
fn default_standard_coating() -> u32 { defaults::STANDARD_COATING_MAX_WEEKS }
fn default_premium_coating() -> u32 { defaults::PREMIUM_COATING_MIN_WEEKS }
fn default_coating_adjustment() -> f64 { defaults::COATING_THRESHOLD_ADJUSTMENT }
fn default_coating_period() -> u32 { defaults::DEFAULT_COATING_PERIOD_WEEKS }

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            suezmax: default_suezmax(),
            aframax: default_aframax(),
            product_carrier: default_product_carrier(),
            gas_carrier: default_gas_carrier(),
            default_threshold: default_threshold(),
            standard_coating_max_weeks: default_standard_coating(),
            premium_coating_min_weeks: default_premium_coating(),
            coating_adjustment: default_coating_adjustment(),
            default_coating_period_weeks: default_coating_period(),
        }
    }
}

// ============================================================================
// Biofouling
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiofoulingConfig {
    #[serde(default = "default_critical_hpi")]
    pub critical_hpi: f64,
    #[serde(default = "default_urgent_hpi")]
    pub urgent_hpi: f64,
}

fn default_critical_hpi() -> f64 { defaults::CRITICAL_HPI }
fn default_urgent_hpi() -> f64 { defaults::URGENT_HPI }

impl Default for BiofoulingConfig {
    fn default() -> Self {
        Self {
            critical_hpi: default_critical_hpi(),
            urgent_hpi: default_urgent_hpi(),
        }
    }
}
