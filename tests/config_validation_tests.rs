//! Config Validation Tests
//!
//! Typo detection on raw TOML, range validation on parsed configs, and the
//! TOML round trip used by `hull-advisor config`.

use hull_advisor::config::validation::{
    known_config_keys, plausibility_warnings, suggest_correction, validate_unknown_keys,
};
use hull_advisor::config::{ConfigError, HullConfig};

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_threshold_key_warns_with_suggestion() {
    let toml_str = r#"
[thresholds]
suezmx = 1.031
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("suezmx"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("thresholds.suezmax"));
}

#[test]
fn unknown_section_has_no_close_match() {
    let warnings = validate_unknown_keys("[dashboard]\nport = 8080\n");
    let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
    assert_eq!(fields, vec!["dashboard", "dashboard.port"]);
    assert!(warnings.iter().all(|w| w.suggestion.is_none()));
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[fleet]
name = "Tanker Fleet"
operator = "Coastal Shipping"

[data]
dir = "/srv/hull/exports"

[baseline]
window_start_day = 2
window_end_day = 8

[sanitizer]
default_degradation_rate = 0.0004

[simulation]
horizon_days = 120
stop_at_first_crossing = true

[thresholds]
aframax = 1.026
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Unexpected warnings: {warnings:?}");
}

#[test]
fn suggestion_requires_small_edit_distance() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("simulation.horizon_day", &known).as_deref(),
        Some("simulation.horizon_days")
    );
    assert!(suggest_correction("completely.different.key", &known).is_none());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_are_valid() {
    let config = HullConfig::default();
    assert!(config.validate().is_ok());
    assert!(plausibility_warnings(&config).is_empty());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = HullConfig::from_toml_str(
        r#"
[simulation]
horizon_days = 90
"#,
    )
    .unwrap();
    assert_eq!(config.simulation.horizon_days, 90);
    assert_eq!(config.baseline.window_start_day, 3);
    assert_eq!(config.baseline.window_end_day, 7);
    assert!((config.thresholds.suezmax - 1.030).abs() < f64::EPSILON);
}

#[test]
fn inverted_baseline_window_is_rejected() {
    let err = HullConfig::from_toml_str(
        r#"
[baseline]
window_start_day = 9
window_end_day = 4
"#,
    )
    .unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("window_end_day")), "{errors:?}");
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn multiple_errors_are_collected() {
    let mut config = HullConfig::default();
    config.simulation.horizon_days = 0;
    config.biofouling.urgent_hpi = 1.05;
    config.sanitizer.default_degradation_rate = 0.01;
    match config.validate() {
        Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3, "{errors:?}"),
        other => panic!("expected 3 validation errors, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = HullConfig::from_toml_str("[simulation\nhorizon_days = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)));
}

#[test]
fn late_threshold_is_flagged_as_implausible() {
    let mut config = HullConfig::default();
    config.thresholds.suezmax = 1.07;
    let warnings = plausibility_warnings(&config);
    assert!(warnings.iter().any(|w| w.field == "thresholds.suezmax"));
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn rendered_toml_loads_back() {
    let mut config = HullConfig::default();
    config.fleet.name = "Round Trip".to_string();
    config.thresholds.gas_carrier = 1.029;

    let rendered = config.to_toml().unwrap();
    assert!(validate_unknown_keys(&rendered).is_empty());

    let reloaded = HullConfig::from_toml_str(&rendered).unwrap();
    assert_eq!(reloaded.fleet.name, "Round Trip");
    assert!((reloaded.thresholds.gas_carrier - 1.029).abs() < f64::EPSILON);
}

#[test]
fn load_from_file_reads_tempfile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hull_config.toml");
    std::fs::write(&path, "[training]\nretrain_interval_secs = 600\n").unwrap();

    let config = HullConfig::load_from_file(&path).unwrap();
    assert_eq!(config.training.retrain_interval_secs, 600);

    let missing = HullConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(missing, ConfigError::Io(..)));
}
