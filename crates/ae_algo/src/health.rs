//! Project health: weighted average of whichever signals are available.
//!
//! `health = round(Σ score·weight / Σ weight)` over the supplied signals,
//! half-up, clamped to `0..=100`. The weights of *present* signals are the
//! denominator, so a missing signal neither drags the score down nor
//! inflates it. Signals with a non-finite score or a non-positive weight
//! contribute nothing.

use ae_core::{
    config::HealthBands,
    entities::{HealthLevel, HealthSignal},
    rounding::clamp_pct,
};

pub fn health(signals: &[HealthSignal]) -> u8 {
    let (weighted, total_weight) = signals
        .iter()
        .filter(|s| usable(s))
        .fold((0.0_f64, 0.0_f64), |(acc, w), s| (acc + s.score * s.weight, w + s.weight));

    if total_weight <= 0.0 {
        return 0;
    }
    clamp_pct(weighted / total_weight)
}

#[inline]
fn usable(s: &HealthSignal) -> bool {
    s.score.is_finite() && s.weight.is_finite() && s.weight > 0.0
}

#[inline]
pub fn classify(score: u8, bands: &HealthBands) -> HealthLevel {
    HealthLevel::classify(score, bands)
}
