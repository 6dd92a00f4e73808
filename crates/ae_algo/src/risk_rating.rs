//! Risk rating: likelihood × impact → Low / Medium / High / Critical.
//!
//! `score = likelihood (1..=5) * impact (1..=4)`, so 1..=20. Band edges are
//! inclusive upper bounds taken from `RiskBands` (defaults 4 / 8 / 12).
//! A blank side of the form yields no rating at all.

use ae_core::{
    config::RiskBands,
    entities::{Impact, Likelihood, RatedRisk, RiskEntry, RiskRating, RiskSummary},
};

/// Numeric score 1..=20.
#[inline]
pub fn risk_score(likelihood: Likelihood, impact: Impact) -> u8 {
    likelihood.value() * impact.value()
}

#[inline]
pub fn rating_for_score(score: u8, bands: &RiskBands) -> RiskRating {
    if score <= bands.low_max {
        RiskRating::Low
    } else if score <= bands.medium_max {
        RiskRating::Medium
    } else if score <= bands.high_max {
        RiskRating::High
    } else {
        RiskRating::Critical
    }
}

pub fn rate(likelihood: Likelihood, impact: Impact, bands: &RiskBands) -> RiskRating {
    rating_for_score(risk_score(likelihood, impact), bands)
}

/// `None` when either input is unset.
pub fn rate_optional(
    likelihood: Option<Likelihood>,
    impact: Option<Impact>,
    bands: &RiskBands,
) -> Option<RiskRating> {
    Some(rate(likelihood?, impact?, bands))
}

/// Rate raw form values. Empty or unrecognised selections leave the rating blank.
pub fn rate_form(likelihood: &str, impact: &str, bands: &RiskBands) -> Option<RiskRating> {
    rate_optional(parse_selection(likelihood), parse_selection(impact), bands)
}

#[inline]
fn parse_selection<T: core::str::FromStr>(s: &str) -> Option<T> {
    let s = s.trim();
    if s.is_empty() { None } else { s.parse().ok() }
}

/// Recompute the rating of a register entry from its stored inputs.
pub fn rate_entry(entry: &RiskEntry, bands: &RiskBands) -> RatedRisk {
    let score = match (entry.likelihood, entry.impact) {
        (Some(l), Some(i)) => Some(risk_score(l, i)),
        _ => None,
    };
    RatedRisk {
        title: entry.title.clone(),
        likelihood: entry.likelihood,
        impact: entry.impact,
        score,
        risk_rating: score.map(|s| rating_for_score(s, bands)),
    }
}

pub fn summarize(rated: &[RatedRisk]) -> RiskSummary {
    rated.iter().fold(RiskSummary::default(), |mut acc, r| {
        match r.risk_rating {
            Some(RiskRating::Low) => acc.low += 1,
            Some(RiskRating::Medium) => acc.medium += 1,
            Some(RiskRating::High) => acc.high += 1,
            Some(RiskRating::Critical) => acc.critical += 1,
            None => acc.unrated += 1,
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b() -> RiskBands { RiskBands::default() }

    #[test]
    fn band_edges() {
        let cases = [
            (1, RiskRating::Low),
            (4, RiskRating::Low),
            (5, RiskRating::Medium),
            (8, RiskRating::Medium),
            (9, RiskRating::High),
            (12, RiskRating::High),
            (13, RiskRating::Critical),
            (20, RiskRating::Critical),
        ];
        for (score, want) in cases {
            assert_eq!(rating_for_score(score, &b()), want, "score {score}");
        }
    }

    #[test]
    fn corners_of_the_matrix() {
        assert_eq!(rate(Likelihood::VeryUnlikely, Impact::Low, &b()), RiskRating::Low);
        assert_eq!(rate(Likelihood::VeryLikely, Impact::Severe, &b()), RiskRating::Critical);
        assert_eq!(rate(Likelihood::Possible, Impact::High, &b()), RiskRating::High); // 9
        assert_eq!(rate(Likelihood::Likely, Impact::Moderate, &b()), RiskRating::Medium); // 8
        assert_eq!(rate(Likelihood::Possible, Impact::Severe, &b()), RiskRating::High); // 12
        assert_eq!(rate(Likelihood::VeryLikely, Impact::High, &b()), RiskRating::Critical); // 15
    }

    #[test]
    fn blank_side_is_unrated_not_low() {
        assert_eq!(rate_optional(None, Some(Impact::Low), &b()), None);
        assert_eq!(rate_optional(Some(Likelihood::Likely), None, &b()), None);
        assert_eq!(rate_form("", "Severe", &b()), None);
        assert_eq!(rate_form("Likely", "   ", &b()), None);
        assert_eq!(rate_form("Likely", "Catastrophic", &b()), None);
        assert_eq!(rate_form("Very Likely", "Severe", &b()), Some(RiskRating::Critical));
    }

    #[test]
    fn custom_bands_move_edges() {
        let strict = RiskBands { low_max: 2, medium_max: 4, high_max: 6 };
        assert_eq!(rate(Likelihood::Unlikely, Impact::Moderate, &strict), RiskRating::Medium); // 4
        assert_eq!(rate(Likelihood::Possible, Impact::High, &strict), RiskRating::Critical); // 9
    }

    #[test]
    fn entry_round_trip_is_stable() {
        let e = RiskEntry {
            title: "Vendor access".into(),
            likelihood: Some(Likelihood::Likely),
            impact: Some(Impact::High),
        };
        let first = rate_entry(&e, &b());
        assert_eq!(first.score, Some(12));
        assert_eq!(first.risk_rating, Some(RiskRating::High));
        // Feeding the stored inputs back never changes the rating.
        let again = rate_entry(
            &RiskEntry { title: first.title.clone(), likelihood: first.likelihood, impact: first.impact },
            &b(),
        );
        assert_eq!(again, first);
    }

    #[test]
    fn summary_counts_every_entry_once() {
        let entries = [
            (Some(Likelihood::VeryUnlikely), Some(Impact::Low)),
            (Some(Likelihood::Likely), Some(Impact::Moderate)),
            (Some(Likelihood::VeryLikely), Some(Impact::Severe)),
            (None, Some(Impact::Severe)),
        ];
        let rated: Vec<RatedRisk> = entries
            .iter()
            .map(|&(likelihood, impact)| rate_entry(&RiskEntry { title: "r".into(), likelihood, impact }, &b()))
            .collect();
        let s = summarize(&rated);
        assert_eq!(s, RiskSummary { low: 1, medium: 1, high: 0, critical: 1, unrated: 1 });
        assert_eq!(s.total(), 4);
    }
}
