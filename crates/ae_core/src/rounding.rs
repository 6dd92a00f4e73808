//! Integer-first percentage helpers.
//!
//! Dashboard percentages round half **up** (x.5 → x+1), matching the values
//! users already see. Count-based percentages never touch floats; weighted
//! averages use `round_half_up` on an `f64` and are clamped afterwards.

/// `round(num / den * 100)` with half-up rounding, `0` when `den == 0`.
/// Result is clamped to `0..=100`.
#[inline]
pub fn pct_round_half_up(num: u64, den: u64) -> u8 {
    if den == 0 {
        return 0;
    }
    // (200·num + den) / (2·den) == floor(100·num/den + 1/2)
    let n = 200u128 * num as u128 + den as u128;
    let d = 2u128 * den as u128;
    (n / d).min(100) as u8
}

/// Half-up rounding for non-negative and negative values alike
/// (`floor(x + 0.5)`); non-finite input yields `None`.
#[inline]
pub fn round_half_up(x: f64) -> Option<f64> {
    if x.is_finite() { Some((x + 0.5).floor()) } else { None }
}

/// Round half-up and clamp into a percentage.
#[inline]
pub fn clamp_pct(x: f64) -> u8 {
    match round_half_up(x) {
        Some(v) => v.clamp(0.0, 100.0) as u8,
        None => 0,
    }
}
