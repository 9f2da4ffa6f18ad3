//! System-wide default constants.
//!
//! Centralises the numbers the hull model depends on. Every `Default` impl in
//! `hull_config.rs` reads from here, so a run without `hull_config.toml`
//! behaves exactly as these values describe.

// ============================================================================
// Input files
// ============================================================================

/// Directory that holds the five CSV exports.
pub const DATA_DIR: &str = "data";

pub const DOCKING_FILE: &str = "dados_docagem.csv";
pub const COATING_FILE: &str = "revestimento.csv";
pub const SHIP_DETAILS_FILE: &str = "dados_navio.csv";
pub const EVENTS_FILE: &str = "ResultadoQueryEventos.csv";
pub const CONSUMPTION_FILE: &str = "ResultadoQueryConsumo.csv";

// ============================================================================
// Consolidation
// ============================================================================

/// Sessions at or below this speed (knots) are anchored/idle.
pub const MIN_SESSION_SPEED: f64 = 1.0;

/// Sessions at or below this duration (hours) are discarded.
pub const MIN_SESSION_DURATION_HOURS: f64 = 1.0;

// ============================================================================
// Baseline (CFI_clean)
// ============================================================================

/// First day after docking that counts as "clean hull" (days 0-2 are transients).
pub const CLEAN_WINDOW_START_DAY: i64 = 3;

/// Last day after docking that counts as "clean hull".
pub const CLEAN_WINDOW_END_DAY: i64 = 7;

/// CFI_clean used for vessels with no samples in the clean window (tons/day).
pub const FALLBACK_CFI_TON_PER_DAY: f64 = 25.0;

// ============================================================================
// Training
// ============================================================================

/// Sessions closer than this to the last cleaning are same-day noise.
pub const MIN_DAYS_SINCE_CLEANING: i64 = 1;

/// Interval between scheduled retrains (seconds). 86 400 = daily.
pub const RETRAIN_INTERVAL_SECS: u64 = 86_400;

// ============================================================================
// Coefficient sanitizer
// ============================================================================

/// Degradation rate substituted for non-positive or implausible fits (HPI/day).
pub const DEFAULT_DEGRADATION_RATE: f64 = 0.0005;

/// Largest plausible degradation rate (HPI/day).
pub const MAX_DEGRADATION_RATE: f64 = 0.005;

/// HPI cannot fall below the clean baseline.
pub const MIN_INTERCEPT: f64 = 1.0;

/// Highest intercept still considered a clean hull at day zero.
pub const MAX_CLEAN_INTERCEPT: f64 = 1.03;

// ============================================================================
// Simulation
// ============================================================================

/// Days projected past today.
pub const PROJECTION_HORIZON_DAYS: i64 = 180;

// ============================================================================
// Dynamic thresholds
// ============================================================================

pub const THRESHOLD_SUEZMAX: f64 = 1.030;
pub const THRESHOLD_AFRAMAX: f64 = 1.025;
pub const THRESHOLD_PRODUCT_CARRIER: f64 = 1.020;
pub const THRESHOLD_GAS_CARRIER: f64 = 1.028;
pub const THRESHOLD_DEFAULT: f64 = 1.0275;

/// Coatings rated for at most this many weeks are "standard" (tighter threshold).
pub const STANDARD_COATING_MAX_WEEKS: u32 = 35;

/// Coatings rated for at least this many weeks are "premium" (looser threshold).
pub const PREMIUM_COATING_MIN_WEEKS: u32 = 120;

/// Threshold shift applied for standard/premium coatings.
pub const COATING_THRESHOLD_ADJUSTMENT: f64 = 0.005;

/// Coating period assumed when a vessel has no coating record (weeks).
pub const DEFAULT_COATING_PERIOD_WEEKS: u32 = 52;

// ============================================================================
// Biofouling levels
// ============================================================================

/// HPI at or above which fouling is moderate macrofouling (level 3).
pub const CRITICAL_HPI: f64 = 1.06;

/// HPI at or above which fouling is heavy macrofouling (level 4).
pub const URGENT_HPI: f64 = 1.08;
