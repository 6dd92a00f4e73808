//! Assessment records (PIA/DPIA/RoPA), the project join key, and derived
//! completion status.

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::RiskRating;
use crate::errors::CoreError;
use crate::ids::ProjectId;

wire_enum!(
    AssessmentKind, CoreError::InvalidToken => {
        Pia  = "PIA",
        Dpia = "DPIA",
        Ropa = "RoPA",
    }
);

/// Typed join key. When both sides carry a `ProjectId` the ids decide;
/// otherwise matching falls back to the legacy exact-name comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectKey {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<ProjectId>,
    pub name: String,
}

impl ProjectKey {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { id: None, name: name.into() }
    }

    pub fn with_id(id: ProjectId, name: impl Into<String>) -> Self {
        Self { id: Some(id), name: name.into() }
    }
}

/// The project reference found on an assessment record. Reports produced by
/// the backend put the name in one of three places.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectRef {
    pub project_id: Option<ProjectId>,
    /// `project_name`
    pub project_name: Option<String>,
    /// `project_info.name`
    pub info_name: Option<String>,
    /// `project_info.project_name`
    pub info_project_name: Option<String>,
}

impl ProjectRef {
    /// Candidate names in matching order.
    pub fn candidate_names(&self) -> impl Iterator<Item = &str> {
        [&self.project_name, &self.info_name, &self.info_project_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
    }
}

/// Risk score as it arrived: a number, free text, or nothing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RiskScoreField {
    Numeric(f64),
    Text(String),
    #[default]
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssessmentRecord {
    pub kind: AssessmentKind,
    pub project: ProjectRef,
    pub risk_score: RiskScoreField,
    pub risk_level: Option<RiskRating>,
    pub compliance_score: Option<f64>,
    pub impact_score: Option<f64>,
    /// Textual report summary; may embed the risk score ("Risk Score: 45/100").
    pub summary: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl AssessmentRecord {
    /// Bare record for `kind`, matched by name only.
    pub fn named(kind: AssessmentKind, project_name: impl Into<String>) -> Self {
        Self {
            kind,
            project: ProjectRef { project_name: Some(project_name.into()), ..ProjectRef::default() },
            risk_score: RiskScoreField::Missing,
            risk_level: None,
            compliance_score: None,
            impact_score: None,
            summary: None,
            generated_at: None,
        }
    }
}

/// The three fetched collections.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssessmentSets {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pia: Vec<AssessmentRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dpia: Vec<AssessmentRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ropa: Vec<AssessmentRecord>,
}

impl AssessmentSets {
    pub fn records(&self, kind: AssessmentKind) -> &[AssessmentRecord] {
        match kind {
            AssessmentKind::Pia => &self.pia,
            AssessmentKind::Dpia => &self.dpia,
            AssessmentKind::Ropa => &self.ropa,
        }
    }
}

wire_enum!(
    /// Project status label derived from the completion percentage.
    ProjectStatus, CoreError::InvalidToken => {
        NotStarted = "Not Started",
        InProgress = "In Progress",
        Completed  = "Completed",
    }
);

impl ProjectStatus {
    pub fn from_percentage(pct: u8) -> Self {
        match pct {
            0 => ProjectStatus::NotStarted,
            100..=u8::MAX => ProjectStatus::Completed,
            _ => ProjectStatus::InProgress,
        }
    }
}

/// Derived on every read; never cached beyond one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectAssessmentStatus {
    pub has_pia: bool,
    pub has_dpia: bool,
    pub has_ropa: bool,
    pub completed_assessments: u8,
    pub percentage: u8,
}

impl ProjectAssessmentStatus {
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::from_percentage(self.percentage)
    }
}
