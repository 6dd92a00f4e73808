//! Health signals and the derived health level.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{HealthBands, SignalWeights};
use crate::errors::CoreError;

wire_enum!(
    SignalSource, CoreError::InvalidToken => {
        Pia            = "pia",
        DpiaCompliance = "dpia_compliance",
        RopaCompliance = "ropa_compliance",
        ScanSecurity   = "scan_security",
    }
);

impl SignalSource {
    /// Configured weight for this source.
    pub fn weight(self, w: &SignalWeights) -> f64 {
        match self {
            SignalSource::Pia => w.pia,
            SignalSource::DpiaCompliance => w.dpia_compliance,
            SignalSource::RopaCompliance => w.ropa_compliance,
            SignalSource::ScanSecurity => w.scan_security,
        }
    }
}

/// One available input to the health score: `score` in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HealthSignal {
    pub score: f64,
    pub weight: f64,
    pub source: SignalSource,
}

impl HealthSignal {
    pub fn new(source: SignalSource, score: f64, weights: &SignalWeights) -> Self {
        Self { score, weight: source.weight(weights), source }
    }
}

/// A signal left out of the weighted average, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedSignal {
    pub source: SignalSource,
    pub reason: String,
}

wire_enum!(
    HealthLevel, CoreError::InvalidToken => {
        Poor      = "Poor",
        Fair      = "Fair",
        Good      = "Good",
        Excellent = "Excellent",
    }
);

impl HealthLevel {
    pub fn classify(score: u8, bands: &HealthBands) -> Self {
        if score >= bands.excellent {
            HealthLevel::Excellent
        } else if score >= bands.good {
            HealthLevel::Good
        } else if score >= bands.fair {
            HealthLevel::Fair
        } else {
            HealthLevel::Poor
        }
    }

    /// Presentation colour token.
    pub fn colour(self) -> &'static str {
        match self {
            HealthLevel::Excellent => "green",
            HealthLevel::Good => "blue",
            HealthLevel::Fair => "yellow",
            HealthLevel::Poor => "red",
        }
    }
}
