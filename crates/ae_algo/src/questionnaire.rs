//! Questionnaire scoring (deterministic, integers only).
//!
//! Rules in this layer:
//! - every question of every section is visited exactly once, by index;
//! - an unanswered question counts as **Not Met**;
//! - Not Applicable is excluded from the denominator:
//!   `percentage = round(met / (met + not_met) * 100)`, `0` when nothing applies;
//! - every supplied section appears in the output, in definition order.

use ae_core::{
    entities::{CategoryEntry, CategoryScore, QuestionnaireScore, ResponseKey, ResponseValue, Responses, Section},
    rounding::pct_round_half_up,
};

pub fn score(sections: &[Section], responses: &Responses) -> QuestionnaireScore {
    let mut overall = CategoryScore::default();
    let mut categories = Vec::with_capacity(sections.len());

    for (s_idx, section) in sections.iter().enumerate() {
        let mut cat = CategoryScore::default();
        for q_idx in 0..section.questions.len() {
            let key = ResponseKey::new(s_idx as u32, q_idx as u32);
            let value = responses.get(&key).copied().unwrap_or(ResponseValue::NotMet);
            tally(&mut cat, value);
            tally(&mut overall, value);
        }
        finish(&mut cat);
        categories.push(CategoryEntry { heading: section.heading.clone(), score: cat });
    }
    finish(&mut overall);

    QuestionnaireScore { categories, overall }
}

#[inline]
fn tally(c: &mut CategoryScore, v: ResponseValue) {
    match v {
        ResponseValue::Met => c.met += 1,
        ResponseValue::NotMet => c.not_met += 1,
        ResponseValue::NotApplicable => c.not_applicable += 1,
    }
    c.total += 1;
}

#[inline]
fn finish(c: &mut CategoryScore) {
    c.applicable_questions = c.met + c.not_met;
    c.percentage = pct_round_half_up(c.met as u64, c.applicable_questions as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(heading: &str, n: usize) -> Section {
        Section {
            heading: heading.into(),
            questions: (0..n).map(|i| format!("Q{i}")).collect(),
        }
    }

    fn responses(items: &[((u32, u32), ResponseValue)]) -> Responses {
        items.iter().map(|&((s, q), v)| (ResponseKey::new(s, q), v)).collect()
    }

    #[test]
    fn two_section_example() {
        let sections = vec![section("Governance", 3), section("Security", 2)];
        let r = responses(&[
            ((0, 0), ResponseValue::Met),
            ((0, 1), ResponseValue::NotMet),
            // (0, 2) unanswered
            ((1, 0), ResponseValue::NotApplicable),
            ((1, 1), ResponseValue::Met),
        ]);
        let out = score(&sections, &r);

        let g = out.category("Governance").unwrap();
        assert_eq!((g.met, g.not_met, g.not_applicable, g.total), (1, 2, 0, 3));
        assert_eq!(g.applicable_questions, 3);
        assert_eq!(g.percentage, 33);

        let s = out.category("Security").unwrap();
        assert_eq!((s.met, s.not_met, s.not_applicable, s.total), (1, 0, 1, 2));
        assert_eq!(s.applicable_questions, 1);
        assert_eq!(s.percentage, 100);

        assert_eq!((out.overall.met, out.overall.not_met, out.overall.not_applicable), (2, 2, 1));
        assert_eq!(out.overall.total, 5);
        assert_eq!(out.overall.percentage, 50);
    }

    #[test]
    fn all_not_applicable_scores_zero() {
        let sections = vec![section("Retention", 2)];
        let r = responses(&[((0, 0), ResponseValue::NotApplicable), ((0, 1), ResponseValue::NotApplicable)]);
        let out = score(&sections, &r);
        let c = out.category("Retention").unwrap();
        assert_eq!(c.applicable_questions, 0);
        assert_eq!(c.percentage, 0);
    }

    #[test]
    fn unanswered_and_empty_sections_still_reported() {
        let sections = vec![section("Empty", 0), section("Silent", 4)];
        let out = score(&sections, &Responses::new());
        let headings: Vec<&str> = out.categories.iter().map(|c| c.heading.as_str()).collect();
        assert_eq!(headings, vec!["Empty", "Silent"]);
        assert_eq!(out.category("Empty").unwrap(), &CategoryScore::default());
        let silent = out.category("Silent").unwrap();
        assert_eq!((silent.not_met, silent.total, silent.percentage), (4, 4, 0));
    }

    #[test]
    fn responses_outside_the_definition_are_ignored() {
        let sections = vec![section("Only", 1)];
        let r = responses(&[((0, 0), ResponseValue::Met), ((0, 7), ResponseValue::NotMet), ((3, 0), ResponseValue::NotMet)]);
        let out = score(&sections, &r);
        assert_eq!(out.overall.total, 1);
        assert_eq!(out.overall.percentage, 100);
    }

    #[test]
    fn duplicate_headings_are_kept_apart() {
        let sections = vec![section("Misc", 1), section("Misc", 1)];
        let r = responses(&[((0, 0), ResponseValue::Met), ((1, 0), ResponseValue::NotMet)]);
        let out = score(&sections, &r);
        assert_eq!(out.categories.len(), 2);
        assert_eq!(out.categories[0].score.percentage, 100);
        assert_eq!(out.categories[1].score.percentage, 0);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let sections = vec![section("A", 3)];
        let r = responses(&[((0, 1), ResponseValue::Met)]);
        assert_eq!(score(&sections, &r), score(&sections, &r));
    }
}
