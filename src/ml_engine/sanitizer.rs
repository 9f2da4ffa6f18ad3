//! Coefficient Sanitizer
//!
//! A fit on a few noisy sessions can produce a negative fouling rate or an
//! intercept far from a clean hull. Before every projection the raw
//! coefficients are pulled back into the physically plausible range:
//!
//! - `β_days <= 0` or above the cap: replaced by the default rate
//! - intercept below the clean baseline: raised to it
//! - intercept above the clean-hull ceiling: lowered to it
//!
//! Trim and displacement terms pass through untouched.

use tracing::warn;

use crate::config::SanitizerConfig;
use crate::types::Coefficients;

/// One adjustment made to a raw coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    DegradationRateReplaced { raw: f64, replacement: f64 },
    InterceptRaised { raw: f64, floor: f64 },
    InterceptLowered { raw: f64, ceiling: f64 },
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegradationRateReplaced { raw, replacement } => write!(
                f,
                "degradation rate {raw:.6} implausible, using {replacement:.6}"
            ),
            Self::InterceptRaised { raw, floor } => {
                write!(f, "intercept {raw:.4} below clean baseline, raised to {floor:.4}")
            }
            Self::InterceptLowered { raw, ceiling } => {
                write!(f, "intercept {raw:.4} above clean-hull ceiling, lowered to {ceiling:.4}")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SanitizedCoefficients {
    pub coefficients: Coefficients,
    pub corrections: Vec<Correction>,
}

pub struct CoefficientSanitizer;

impl CoefficientSanitizer {
    pub fn sanitize(raw: Coefficients, config: &SanitizerConfig) -> SanitizedCoefficients {
        let mut coefficients = raw;
        let mut corrections = Vec::new();

        let rate_ok = raw.days > 0.0 && raw.days <= config.max_degradation_rate;
        if !rate_ok {
            coefficients.days = config.default_degradation_rate;
            corrections.push(Correction::DegradationRateReplaced {
                raw: raw.days,
                replacement: config.default_degradation_rate,
            });
        }

        if raw.intercept.is_nan() || raw.intercept < config.min_intercept {
            coefficients.intercept = config.min_intercept;
            corrections.push(Correction::InterceptRaised {
                raw: raw.intercept,
                floor: config.min_intercept,
            });
        } else if raw.intercept > config.max_clean_intercept {
            coefficients.intercept = config.max_clean_intercept;
            corrections.push(Correction::InterceptLowered {
                raw: raw.intercept,
                ceiling: config.max_clean_intercept,
            });
        }

        for c in &corrections {
            warn!(correction = %c, "Sanitized regression coefficient");
        }

        SanitizedCoefficients {
            coefficients,
            corrections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs(intercept: f64, days: f64) -> Coefficients {
        Coefficients {
            intercept,
            days,
            trim: 0.01,
            displacement: -1e-7,
        }
    }

    #[test]
    fn plausible_coefficients_pass_through() {
        let out = CoefficientSanitizer::sanitize(coeffs(1.01, 0.0002), &SanitizerConfig::default());
        assert!(out.corrections.is_empty());
        assert_eq!(out.coefficients, coeffs(1.01, 0.0002));
    }

    #[test]
    fn non_positive_rate_is_replaced() {
        let cfg = SanitizerConfig::default();
        for rate in [0.0, -0.001] {
            let out = CoefficientSanitizer::sanitize(coeffs(1.0, rate), &cfg);
            assert!((out.coefficients.days - 0.0005).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rate_at_cap_is_kept_and_above_is_replaced() {
        let cfg = SanitizerConfig::default();
        let at_cap = CoefficientSanitizer::sanitize(coeffs(1.0, 0.005), &cfg);
        assert!((at_cap.coefficients.days - 0.005).abs() < f64::EPSILON);
        let above = CoefficientSanitizer::sanitize(coeffs(1.0, 0.0051), &cfg);
        assert!((above.coefficients.days - 0.0005).abs() < f64::EPSILON);
    }

    #[test]
    fn intercept_is_clamped_both_ways() {
        let cfg = SanitizerConfig::default();
        let low = CoefficientSanitizer::sanitize(coeffs(0.93, 0.0003), &cfg);
        assert!((low.coefficients.intercept - 1.0).abs() < f64::EPSILON);
        let high = CoefficientSanitizer::sanitize(coeffs(1.2, 0.0003), &cfg);
        assert!((high.coefficients.intercept - 1.03).abs() < f64::EPSILON);
        assert!(matches!(high.corrections[0], Correction::InterceptLowered { .. }));
    }

    #[test]
    fn trim_and_displacement_untouched() {
        let out = CoefficientSanitizer::sanitize(coeffs(0.5, -1.0), &SanitizerConfig::default());
        assert_eq!(out.corrections.len(), 2);
        assert!((out.coefficients.trim - 0.01).abs() < f64::EPSILON);
        assert!((out.coefficients.displacement + 1e-7).abs() < f64::EPSILON);
    }
}
