// crates/ae_algo/tests/properties.rs
//! Property checks over the calculators' full input spaces.

use ae_algo::{health, progress, risk_rating, score, status};
use ae_core::config::RiskBands;
use ae_core::entities::*;
use proptest::prelude::*;
use proptest::sample::select;

fn response() -> impl Strategy<Value = ResponseValue> {
    select(ResponseValue::ALL)
}

fn outcome() -> impl Strategy<Value = Option<ScanOutcome>> {
    prop_oneof![
        Just(None),
        any::<Option<u32>>().prop_map(|f| Some(ScanOutcome::Completed(ScanSummary { total_findings: f }))),
        Just(Some(ScanOutcome::Failed { reason: "error".into() })),
    ]
}

proptest! {
    #[test]
    fn rating_is_monotone_in_both_axes(
        l in select(Likelihood::ALL),
        i in select(Impact::ALL),
    ) {
        let b = RiskBands::default();
        let r = risk_rating::rate(l, i, &b);
        for &l2 in Likelihood::ALL.iter().filter(|&&x| x.value() >= l.value()) {
            prop_assert!(risk_rating::rate(l2, i, &b) >= r);
        }
        for &i2 in Impact::ALL.iter().filter(|&&x| x.value() >= i.value()) {
            prop_assert!(risk_rating::rate(l, i2, &b) >= r);
        }
    }

    #[test]
    fn completion_percentage_is_a_third(pia in any::<bool>(), dpia in any::<bool>(), ropa in any::<bool>()) {
        let key = ProjectKey::by_name("P");
        let mut sets = AssessmentSets::default();
        if pia { sets.pia.push(AssessmentRecord::named(AssessmentKind::Pia, "P")); }
        if dpia { sets.dpia.push(AssessmentRecord::named(AssessmentKind::Dpia, "P")); }
        if ropa { sets.ropa.push(AssessmentRecord::named(AssessmentKind::Ropa, "P")); }
        let st = status(&key, &sets);
        prop_assert!([0u8, 33, 67, 100].contains(&st.percentage));
        prop_assert_eq!(st.completed_assessments as usize, [pia, dpia, ropa].iter().filter(|b| **b).count());
    }

    #[test]
    fn questionnaire_counts_add_up(
        answers in prop::collection::vec(prop::collection::vec(prop::option::of(response()), 0..6), 0..5),
    ) {
        let sections: Vec<Section> = answers
            .iter()
            .enumerate()
            .map(|(s, qs)| Section { heading: format!("S{s}"), questions: vec!["q".to_string(); qs.len()] })
            .collect();
        let mut responses = Responses::new();
        for (s, qs) in answers.iter().enumerate() {
            for (q, a) in qs.iter().enumerate() {
                if let Some(v) = a {
                    responses.insert(ResponseKey::new(s as u32, q as u32), *v);
                }
            }
        }
        let out = score(&sections, &responses);
        prop_assert_eq!(out.categories.len(), sections.len());
        for (entry, qs) in out.categories.iter().zip(answers.iter()) {
            let c = &entry.score;
            prop_assert_eq!(c.total as usize, qs.len());
            prop_assert_eq!(c.met + c.not_met + c.not_applicable, c.total);
            prop_assert_eq!(c.applicable_questions, c.met + c.not_met);
            prop_assert!(c.percentage <= 100);
        }
        prop_assert_eq!(score(&sections, &responses), out);
    }

    #[test]
    fn health_stays_within_signal_range(
        raw in prop::collection::vec((0.0f64..=100.0, 0.01f64..=1.0), 1..5),
    ) {
        let signals: Vec<HealthSignal> = raw
            .iter()
            .zip(SignalSource::ALL.iter().cycle())
            .map(|(&(score, weight), &source)| HealthSignal { score, weight, source })
            .collect();
        let h = health(&signals) as f64;
        let lo = raw.iter().map(|r| r.0).fold(f64::INFINITY, f64::min);
        let hi = raw.iter().map(|r| r.0).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(h >= lo.floor() && h <= hi.ceil(), "{} outside [{}, {}]", h, lo, hi);
    }

    #[test]
    fn scan_progress_is_a_quarter(a in outcome(), b in outcome(), c in outcome(), d in outcome()) {
        let set = ScanResultSet { git_scan: a, security_headers: b, cookie_analysis: c, mobile_scan: d };
        prop_assert!([0u8, 25, 50, 75, 100].contains(&progress(&set)));
    }
}
