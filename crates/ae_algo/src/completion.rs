//! Assessment completion: which of PIA / DPIA / RoPA exist for a project.
//!
//! Matching rule:
//! - both sides carry a `ProjectId` → the ids decide;
//! - otherwise (legacy) any of `project_name`, `project_info.name`,
//!   `project_info.project_name` equal to the key name, exact string match.
//!
//! Presence is boolean. The result is derived fresh on every call and is the
//! only source of the project's status label.

use ae_core::{
    determinism::latest_by_recency,
    entities::{AssessmentKind, AssessmentRecord, AssessmentSets, ProjectAssessmentStatus, ProjectKey, ProjectRef},
    rounding::pct_round_half_up,
};

const ASSESSMENT_KINDS: u64 = 3;

pub fn matches_project(key: &ProjectKey, r: &ProjectRef) -> bool {
    if let (Some(want), Some(got)) = (&key.id, &r.project_id) {
        return want == got;
    }
    // An empty key name never matches; blank names on records are common.
    !key.name.is_empty() && r.candidate_names().any(|n| n == key.name)
}

#[inline]
fn has_record(key: &ProjectKey, records: &[AssessmentRecord]) -> bool {
    records.iter().any(|r| matches_project(key, &r.project))
}

pub fn status(key: &ProjectKey, sets: &AssessmentSets) -> ProjectAssessmentStatus {
    let has_pia = has_record(key, sets.records(AssessmentKind::Pia));
    let has_dpia = has_record(key, sets.records(AssessmentKind::Dpia));
    let has_ropa = has_record(key, sets.records(AssessmentKind::Ropa));

    let completed = [has_pia, has_dpia, has_ropa].iter().filter(|&&b| b).count() as u8;

    ProjectAssessmentStatus {
        has_pia,
        has_dpia,
        has_ropa,
        completed_assessments: completed,
        percentage: pct_round_half_up(completed as u64, ASSESSMENT_KINDS),
    }
}

/// Most recently generated record for `key`; a newer report supersedes older ones.
pub fn latest_for<'a>(key: &ProjectKey, records: &'a [AssessmentRecord]) -> Option<&'a AssessmentRecord> {
    latest_by_recency(
        records.iter().filter(|r| matches_project(key, &r.project)),
        |r| r.generated_at.as_ref(),
    )
}
