//! Config validation: unknown-key detection with Levenshtein suggestions
//! and plausibility checks on the model constants.
//!
//! The raw TOML is first walked as a `toml::Value` tree and every dotted key
//! is compared against the known field names. Unknown keys only warn; they
//! never stop an existing config from loading.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `HullConfig`.
///
/// Maintained by hand to match the struct hierarchy in `hull_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [fleet]
        "fleet",
        "fleet.name",
        "fleet.operator",
        // [data]
        "data",
        "data.dir",
        "data.docking_file",
        "data.coating_file",
        "data.ship_details_file",
        "data.events_file",
        "data.consumption_file",
        // [consolidation]
        "consolidation",
        "consolidation.min_speed",
        "consolidation.min_duration_hours",
        // [baseline]
        "baseline",
        "baseline.window_start_day",
        "baseline.window_end_day",
        "baseline.fallback_cfi_ton_per_day",
        // [training]
        "training",
        "training.min_days_since_cleaning",
        "training.retrain_interval_secs",
        // [sanitizer]
        "sanitizer",
        "sanitizer.default_degradation_rate",
        "sanitizer.max_degradation_rate",
        "sanitizer.min_intercept",
        "sanitizer.max_clean_intercept",
        // [simulation]
        "simulation",
        "simulation.horizon_days",
        "simulation.stop_at_first_crossing",
        // [thresholds]
        "thresholds",
        "thresholds.suezmax",
        "thresholds.aframax",
        "thresholds.product_carrier",
        "thresholds.gas_carrier",
        "thresholds.default_threshold",
        "thresholds.standard_coating_max_weeks",
        "thresholds.premium_coating_min_weeks",
        "thresholds.coating_adjustment",
        "thresholds.default_coating_period_weeks",
        // [biofouling]
        "biofouling",
        "biofouling.critical_hpi",
        "biofouling.urgent_hpi",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// A table `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        // parse errors are reported by serde afterwards
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Plausibility Checks
// ============================================================================

/// Flag values that are legal but unusual for a merchant tanker fleet.
pub fn plausibility_warnings(config: &super::HullConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let cfi = config.baseline.fallback_cfi_ton_per_day;
    if !(1.0..=200.0).contains(&cfi) {
        warnings.push(ValidationWarning {
            field: "baseline.fallback_cfi_ton_per_day".to_string(),
            message: format!(
                "fallback_cfi_ton_per_day = {cfi:.1} is outside the typical range (1-200 t/day)"
            ),
            suggestion: None,
        });
    }

    let t = &config.thresholds;
    for (name, value) in [
        ("thresholds.suezmax", t.suezmax),
        ("thresholds.aframax", t.aframax),
        ("thresholds.product_carrier", t.product_carrier),
        ("thresholds.gas_carrier", t.gas_carrier),
        ("thresholds.default_threshold", t.default_threshold),
    ] {
        if value + t.coating_adjustment >= config.biofouling.critical_hpi {
            warnings.push(ValidationWarning {
                field: name.to_string(),
                message: format!(
                    "{name} = {value:.4} reaches the critical fouling level ({:.2}); cleaning would be recommended late",
                    config.biofouling.critical_hpi
                ),
                suggestion: None,
            });
        }
    }

    if config.simulation.horizon_days > 730 {
        warnings.push(ValidationWarning {
            field: "simulation.horizon_days".to_string(),
            message: format!(
                "horizon_days = {} projects more than two years of linear fouling",
                config.simulation.horizon_days
            ),
            suggestion: None,
        });
    }

    warnings
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("suezmax", "suezmax"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("aframx", "aframax"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [thresholds]
            suezmax = 1.03
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"thresholds".to_string()));
        assert!(keys.contains(&"thresholds.suezmax".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let warnings = validate_unknown_keys(
            r#"
[baseline]
fallback_cfi_ton_per_dya = 30.0
"#,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("baseline.fallback_cfi_ton_per_day")
        );
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let warnings = validate_unknown_keys(
            r#"
[fleet]
name = "Coastal"

[simulation]
horizon_days = 180
stop_at_first_crossing = true

[biofouling]
critical_hpi = 1.06
"#,
        );
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[reports]\nenabled = true\n");
        assert!(warnings.iter().any(|w| w.field == "reports"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_defaults_are_plausible() {
        let config = crate::config::HullConfig::default();
        let warnings = plausibility_warnings(&config);
        assert!(warnings.is_empty(), "unexpected: {warnings:?}");
    }

    #[test]
    fn test_threshold_near_critical_warns() {
        let mut config = crate::config::HullConfig::default();
        config.thresholds.suezmax = 1.058;
        let warnings = plausibility_warnings(&config);
        assert!(warnings.iter().any(|w| w.field == "thresholds.suezmax"));
    }
}
