//! Fuel-penalty metrics derived from an HPI value.

use chrono::NaiveDate;

use crate::types::DailyPrediction;

/// Hull-coverage curve: (HPI, percent of hull fouled). Linear between knots.
const COVERAGE_CURVE: [(f64, f64); 5] = [
    (1.000, 0.0),
    (1.025, 1.0),
    (1.050, 15.0),
    (1.100, 40.0),
    (1.200, 100.0),
];

/// Added resistance relative to a clean hull, in percent.
pub fn drag_percent(hpi: f64) -> f64 {
    ((hpi - 1.0) * 100.0).max(0.0)
}

/// Fuel burned per day above the clean baseline (tons/day).
pub fn extra_fuel_ton_per_day(hpi: f64, cfi_clean: f64) -> f64 {
    (cfi_clean * (hpi - 1.0)).max(0.0)
}

/// Estimated fouled share of the hull, rounded to two decimals.
pub fn estimated_coverage_percent(hpi: f64) -> f64 {
    let (first_hpi, first_pct) = COVERAGE_CURVE[0];
    let (last_hpi, last_pct) = COVERAGE_CURVE[COVERAGE_CURVE.len() - 1];

    let raw = if hpi.is_nan() || hpi <= first_hpi {
        first_pct
    } else if hpi >= last_hpi {
        last_pct
    } else {
        COVERAGE_CURVE
            .windows(2)
            .find(|w| hpi <= w[1].0)
            .map_or(last_pct, |w| {
                let (h0, p0) = w[0];
                let (h1, p1) = w[1];
                p0 + (hpi - h0) / (h1 - h0) * (p1 - p0)
            })
    };

    (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0
}

/// All metrics for one projected day.
pub fn daily_prediction(date: NaiveDate, hpi: f64, cfi_clean: f64) -> DailyPrediction {
    DailyPrediction {
        date,
        hpi,
        drag_percent: drag_percent(hpi),
        extra_fuel_ton_per_day: extra_fuel_ton_per_day(hpi, cfi_clean),
        estimated_coverage_percent: estimated_coverage_percent(hpi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drag_and_extra_fuel() {
        assert!((drag_percent(1.025) - 2.5).abs() < 1e-9);
        assert!((extra_fuel_ton_per_day(1.04, 25.0) - 1.0).abs() < 1e-9);
        assert!(drag_percent(0.98).abs() < f64::EPSILON);
        assert!(extra_fuel_ton_per_day(0.98, 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_hits_knots() {
        assert!(estimated_coverage_percent(1.0).abs() < f64::EPSILON);
        assert!((estimated_coverage_percent(1.025) - 1.0).abs() < 1e-9);
        assert!((estimated_coverage_percent(1.05) - 15.0).abs() < 1e-9);
        assert!((estimated_coverage_percent(1.1) - 40.0).abs() < 1e-9);
        assert!((estimated_coverage_percent(1.2) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_interpolates_and_clamps() {
        assert!((estimated_coverage_percent(1.075) - 27.5).abs() < 1e-9);
        assert!((estimated_coverage_percent(1.15) - 70.0).abs() < 1e-9);
        assert!((estimated_coverage_percent(1.5) - 100.0).abs() < f64::EPSILON);
        assert!(estimated_coverage_percent(0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_rounds_to_two_decimals() {
        // 1.0125 is halfway to 1.025 => 0.5
        assert!((estimated_coverage_percent(1.0125) - 0.5).abs() < 1e-9);
        let v = estimated_coverage_percent(1.0333);
        assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn coverage_is_monotonic(a in 0.9f64..1.3, b in 0.9f64..1.3) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(estimated_coverage_percent(lo) <= estimated_coverage_percent(hi));
        }

        #[test]
        fn metrics_never_negative(hpi in 0.5f64..2.0, cfi in 0.0f64..200.0) {
            prop_assert!(drag_percent(hpi) >= 0.0);
            prop_assert!(extra_fuel_ton_per_day(hpi, cfi) >= 0.0);
            let c = estimated_coverage_percent(hpi);
            prop_assert!((0.0..=100.0).contains(&c));
        }
    }
}
