//! config.rs: Engine configuration with safe defaults.
//! Weights and thresholds used by all five calculators live here, in one place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// ------------ Health signal weights ------------

/// Fixed weight per health signal source. The weighted average renormalises
/// by the weights actually present, so these need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SignalWeights {
    pub pia: f64,
    pub dpia_compliance: f64,
    pub ropa_compliance: f64,
    pub scan_security: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self { pia: 0.30, dpia_compliance: 0.25, ropa_compliance: 0.25, scan_security: 0.20 }
    }
}

/// ------------ Bands ------------

/// Lower bounds (inclusive) of the health levels; anything below `fair` is Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HealthBands {
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
}

impl Default for HealthBands {
    fn default() -> Self {
        Self { excellent: 80, good: 60, fair: 40 }
    }
}

/// Upper bounds (inclusive) of the likelihood×impact score per rating;
/// anything above `high_max` is Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RiskBands {
    pub low_max: u8,
    pub medium_max: u8,
    pub high_max: u8,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self { low_max: 4, medium_max: 8, high_max: 12 }
    }
}

/// ------------ EngineConfig ------------

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    pub weights: SignalWeights,
    pub health_bands: HealthBands,
    pub risk_bands: RiskBands,
    pub scan: ScanScoring,
}

/// Scan findings → security score: `max(0, 100 - findings * penalty_per_finding)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ScanScoring {
    pub penalty_per_finding: u32,
}

impl Default for ScanScoring {
    fn default() -> Self {
        Self { penalty_per_finding: 5 }
    }
}

/// -------- Validation (domain + cross-field consistency) --------

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        let w = &self.weights;
        for (k, v) in [
            ("weights.pia", w.pia),
            ("weights.dpia_compliance", w.dpia_compliance),
            ("weights.ropa_compliance", w.ropa_compliance),
            ("weights.scan_security", w.scan_security),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CoreError::DomainOutOfRange(k));
            }
        }

        let h = &self.health_bands;
        if h.excellent > 100 {
            return Err(CoreError::DomainOutOfRange("health_bands.excellent"));
        }
        if !(h.fair < h.good && h.good < h.excellent) {
            return Err(CoreError::BandOrder("health_bands"));
        }

        // Score range is 1..=20; bands must split it into four non-empty ranges.
        let r = &self.risk_bands;
        if r.low_max == 0 || r.high_max >= 20 {
            return Err(CoreError::DomainOutOfRange("risk_bands"));
        }
        if !(r.low_max < r.medium_max && r.medium_max < r.high_max) {
            return Err(CoreError::BandOrder("risk_bands"));
        }
        Ok(())
    }
}
