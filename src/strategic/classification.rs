//! Biofouling level from HPI.

use serde::{Deserialize, Serialize};

use crate::config::BiofoulingConfig;

/// Five-step fouling scale, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BiofoulingLevel {
    Clean,
    Attention,
    Alert,
    Critical,
    Urgent,
}

impl BiofoulingLevel {
    /// Classify `hpi` against the vessel's cleaning threshold.
    ///
    /// Urgent and critical use fleet-wide limits; alert starts at the
    /// vessel's own threshold; any HPI above 1.0 is at least attention.
    pub fn classify(hpi: f64, threshold: f64, config: &BiofoulingConfig) -> Self {
        if hpi >= config.urgent_hpi {
            Self::Urgent
        } else if hpi >= config.critical_hpi {
            Self::Critical
        } else if hpi >= threshold {
            Self::Alert
        } else if hpi > 1.0 {
            Self::Attention
        } else {
            Self::Clean
        }
    }

    /// Numeric level, 0 (clean) to 4 (urgent).
    pub const fn level(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::Attention => 1,
            Self::Alert => 2,
            Self::Critical => 3,
            Self::Urgent => 4,
        }
    }

    pub const fn status_label(self) -> &'static str {
        match self {
            Self::Clean => "CLEAN (no biofouling)",
            Self::Attention => "ATTENTION (microfouling)",
            Self::Alert => "ALERT (light macrofouling)",
            Self::Critical => "CRITICAL (moderate macrofouling)",
            Self::Urgent => "URGENT (heavy macrofouling)",
        }
    }
}

impl std::fmt::Display for BiofoulingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(hpi: f64) -> BiofoulingLevel {
        BiofoulingLevel::classify(hpi, 1.025, &BiofoulingConfig::default())
    }

    #[test]
    fn boundaries() {
        assert_eq!(classify(1.0), BiofoulingLevel::Clean);
        assert_eq!(classify(1.0001), BiofoulingLevel::Attention);
        assert_eq!(classify(1.025), BiofoulingLevel::Alert);
        assert_eq!(classify(1.06), BiofoulingLevel::Critical);
        assert_eq!(classify(1.08), BiofoulingLevel::Urgent);
        assert_eq!(classify(1.3).level(), 4);
    }

    #[test]
    fn alert_follows_vessel_threshold() {
        let cfg = BiofoulingConfig::default();
        assert_eq!(BiofoulingLevel::classify(1.022, 1.020, &cfg), BiofoulingLevel::Alert);
        assert_eq!(BiofoulingLevel::classify(1.022, 1.030, &cfg), BiofoulingLevel::Attention);
    }

    #[test]
    fn labels_match_levels() {
        assert!(BiofoulingLevel::Clean.status_label().starts_with("CLEAN"));
        assert_eq!(BiofoulingLevel::Critical.level(), 3);
        assert!(BiofoulingLevel::Urgent > BiofoulingLevel::Alert);
    }
}
