//! dashboard.rs: the presentation-ready output document and its id.
//!
//! The id is `DSH:` + SHA-256 of the canonical JSON of the body (everything
//! except `id`), so identical inputs and config always give an identical id.

use serde::{Deserialize, Serialize};

use ae_core::{
    entities::{
        HealthLevel, HealthSignal, ProjectAssessmentStatus, ProjectKey, ProjectStatus, QuestionnaireScore,
        RatedRisk, RiskSummary, ScanProgress, SkippedSignal,
    },
    ids::DashboardId,
};
use ae_io::hasher;

use crate::PipelineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentsBlock {
    #[serde(flatten)]
    pub status: ProjectAssessmentStatus,
    pub label: ProjectStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RisksBlock {
    pub entries: Vec<RatedRisk>,
    pub summary: RiskSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBlock {
    pub score: u8,
    pub level: HealthLevel,
    pub colour: String,
    pub signals: Vec<HealthSignal>,
    pub skipped: Vec<SkippedSignal>,
}

/// Dashboard without its id; this is what gets hashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBody {
    pub project: ProjectKey,
    pub assessments: AssessmentsBlock,
    pub risks: RisksBlock,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub questionnaire: Option<QuestionnaireScore>,
    pub health: HealthBlock,
    pub scan_progress: ScanProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDashboard {
    pub id: DashboardId,
    #[serde(flatten)]
    pub body: DashboardBody,
}

impl ProjectDashboard {
    /// Seal a body with its content-derived id.
    pub fn seal(body: DashboardBody) -> Result<Self, PipelineError> {
        let id = hasher::dashboard_id_from_canonical(&body)?;
        Ok(Self { id, body })
    }

    /// Recompute the id from the body and compare.
    pub fn verify_id(&self) -> Result<bool, PipelineError> {
        Ok(hasher::dashboard_id_from_canonical(&self.body)? == self.id)
    }
}
