//! Risk register inputs and the derived rating.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

wire_enum!(
    /// How likely a risk is to materialise (form selection).
    Likelihood, CoreError::UnknownLikelihood => {
        VeryUnlikely = "Very Unlikely",
        Unlikely     = "Unlikely",
        Possible     = "Possible",
        Likely       = "Likely",
        VeryLikely   = "Very Likely",
    }
);

wire_enum!(
    /// Consequence of a risk materialising (form selection).
    Impact, CoreError::UnknownImpact => {
        Low      = "Low",
        Moderate = "Moderate",
        High     = "High",
        Severe   = "Severe",
    }
);

wire_enum!(
    /// Qualitative rating. Also used for the `risk_level` carried by
    /// assessment records (`LOW|MEDIUM|HIGH|CRITICAL` parse case-insensitively).
    RiskRating, CoreError::UnknownRiskLevel => {
        Low      = "Low",
        Medium   = "Medium",
        High     = "High",
        Critical = "Critical",
    }
);

impl Likelihood {
    /// Severity 1..=5.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Likelihood::VeryUnlikely => 1,
            Likelihood::Unlikely => 2,
            Likelihood::Possible => 3,
            Likelihood::Likely => 4,
            Likelihood::VeryLikely => 5,
        }
    }
}

impl Impact {
    /// Severity 1..=4.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            Impact::Low => 1,
            Impact::Moderate => 2,
            Impact::High => 3,
            Impact::Severe => 4,
        }
    }
}

/// One entry of the project's risk register. Only the inputs are stored;
/// the rating is recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiskEntry {
    pub title: String,
    pub likelihood: Option<Likelihood>,
    pub impact: Option<Impact>,
}

/// A risk entry paired with its freshly computed rating (`None` = incomplete form).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatedRisk {
    pub title: String,
    pub likelihood: Option<Likelihood>,
    pub impact: Option<Impact>,
    pub score: Option<u8>,
    pub risk_rating: Option<RiskRating>,
}

/// Register-wide counts per rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RiskSummary {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
    pub unrated: u32,
}

impl RiskSummary {
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical + self.unrated
    }
}
