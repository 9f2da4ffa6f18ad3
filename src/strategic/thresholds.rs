//! Dynamic cleaning threshold.
//!
//! Larger hulls tolerate more fouling before cleaning pays off, so the HPI at
//! which cleaning is recommended depends on ship class. Coating quality
//! shifts it: short-lived coatings foul faster and get a tighter limit,
//! premium coatings a looser one.

use crate::config::ThresholdConfig;
use crate::identity::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipClass {
    Suezmax,
    Aframax,
    ProductCarrier,
    GasCarrier,
}

impl ShipClass {
    /// Recognize a class from a free-text class or cargo label.
    pub fn recognize(label: &str) -> Option<Self> {
        let key = normalize(label);
        if key.contains("SUEZMAX") {
            Some(Self::Suezmax)
        } else if key.contains("AFRAMAX") {
            Some(Self::Aframax)
        } else if key.contains("PRODUCT") || key.contains("PRODUTO") {
            Some(Self::ProductCarrier)
        } else if ["GASEIRO", "GAS CARRIER", "LPG", "GLP"]
            .iter()
            .any(|g| key.contains(g))
        {
            Some(Self::GasCarrier)
        } else {
            None
        }
    }

    pub const fn base_threshold(self, config: &ThresholdConfig) -> f64 {
        match self {
            Self::Suezmax => config.suezmax,
            Self::Aframax => config.aframax,
            Self::ProductCarrier => config.product_carrier,
            Self::GasCarrier => config.gas_carrier,
        }
    }
}

pub struct DynamicThreshold;

impl DynamicThreshold {
    /// Threshold for a vessel. The class label is tried first, then the
    /// cargo type; unrecognized vessels get the default threshold.
    pub fn for_vessel(
        class: Option<&str>,
        cargo_type: Option<&str>,
        coating_period_weeks: u32,
        config: &ThresholdConfig,
    ) -> f64 {
        let base = class
            .and_then(ShipClass::recognize)
            .or_else(|| cargo_type.and_then(ShipClass::recognize))
            .map_or(config.default_threshold, |c| c.base_threshold(config));

        base + Self::coating_adjustment(coating_period_weeks, config)
    }

    pub fn coating_adjustment(coating_period_weeks: u32, config: &ThresholdConfig) -> f64 {
        if coating_period_weeks <= config.standard_coating_max_weeks {
            -config.coating_adjustment
        } else if coating_period_weeks >= config.premium_coating_min_weeks {
            config.coating_adjustment
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ThresholdConfig {
        ThresholdConfig::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn suezmax_with_short_coating() {
        assert!(close(DynamicThreshold::for_vessel(Some("Suezmax"), None, 20, &cfg()), 1.025));
    }

    #[test]
    fn base_thresholds_by_class() {
        let c = cfg();
        assert!(close(DynamicThreshold::for_vessel(Some("AFRAMAX"), None, 52, &c), 1.025));
        assert!(close(DynamicThreshold::for_vessel(Some("Product Carrier"), None, 52, &c), 1.020));
        assert!(close(DynamicThreshold::for_vessel(Some("Panamax"), None, 52, &c), 1.0275));
        assert!(close(DynamicThreshold::for_vessel(None, None, 52, &c), 1.0275));
    }

    #[test]
    fn gas_carrier_recognized_from_cargo() {
        let t = DynamicThreshold::for_vessel(Some("Handy"), Some("Gaseiro"), 52, &cfg());
        assert!(close(t, 1.028));
    }

    #[test]
    fn premium_coating_loosens() {
        assert!(close(DynamicThreshold::for_vessel(Some("suezmax"), None, 120, &cfg()), 1.035));
        assert!(close(DynamicThreshold::for_vessel(Some("suezmax"), None, 119, &cfg()), 1.030));
        assert!(close(DynamicThreshold::for_vessel(Some("suezmax"), None, 35, &cfg()), 1.025));
        assert!(close(DynamicThreshold::for_vessel(Some("suezmax"), None, 36, &cfg()), 1.030));
    }

    #[test]
    fn recognition_ignores_case_and_accents() {
        assert_eq!(ShipClass::recognize("  produto "), Some(ShipClass::ProductCarrier));
        assert_eq!(ShipClass::recognize("Navio GLP"), Some(ShipClass::GasCarrier));
        assert_eq!(ShipClass::recognize("Petroleiro"), None);
    }
}
