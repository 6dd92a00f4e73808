//! ae_pipeline: deterministic evaluation of one project snapshot
//! (select latest → derive signals → run calculators → assemble → id).
//!
//! This crate does no file I/O of its own beyond the `run_from_paths`
//! convenience, which delegates loading to `ae_io`. Math lives in `ae_algo`.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use ae_core::{
    entities::{AssessmentKind, RatedRisk},
    EngineConfig,
};
use ae_io::{loader, wire::Snapshot, IoError};

pub mod dashboard;
pub mod signals;

pub use dashboard::{AssessmentsBlock, DashboardBody, HealthBlock, ProjectDashboard, RisksBlock};
pub use signals::SignalSet;

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    /// Input could not be read.
    Io(String),
    /// Input was read but its shape is unusable.
    Input(String),
    /// Engine config failed validation.
    Config(String),
    /// Canonicalization / hashing of the output failed.
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io(m) => write!(f, "io: {m}"),
            PipelineError::Input(m) => write!(f, "input: {m}"),
            PipelineError::Config(m) => write!(f, "config: {m}"),
            PipelineError::Build(m) => write!(f, "build: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        use PipelineError::*;
        match e {
            IoError::Read(m) => Io(format!("read: {m}")),
            IoError::Path(m) => Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => Input(format!("json {pointer}: {msg}")),
            IoError::Config(m) => Config(m),
            IoError::Hash(m) => Build(format!("hash: {m}")),
        }
    }
}

// -------------------------------------- Public API --------------------------------------

/// Evaluate one snapshot under `cfg`. Pure apart from `tracing` events.
pub fn evaluate(snap: &Snapshot, cfg: &EngineConfig) -> Result<ProjectDashboard, PipelineError> {
    cfg.validate().map_err(|e| PipelineError::Config(e.to_string()))?;
    let key = &snap.project;

    // --- Completion (single source of the status label) ---
    let status = ae_algo::status(key, &snap.assessments);
    let label = status.status();
    debug!(project = %key.name, completed = status.completed_assessments, %label, "completion");

    // --- Risks ---
    let entries: Vec<RatedRisk> = snap
        .risks
        .iter()
        .map(|r| ae_algo::rate_entry(r, &cfg.risk_bands))
        .collect();
    let summary = ae_algo::summarize(&entries);
    debug!(total = summary.total(), unrated = summary.unrated, "risks rated");

    // --- Questionnaire ---
    let questionnaire = snap
        .questionnaire
        .as_ref()
        .map(|q| ae_algo::score(&q.sections, &q.responses));

    // --- Health ---
    let latest = |kind| ae_algo::latest_for(key, snap.assessments.records(kind));
    let signals = signals::derive(
        latest(AssessmentKind::Pia),
        latest(AssessmentKind::Dpia),
        latest(AssessmentKind::Ropa),
        &snap.scans,
        cfg,
    );
    for s in &signals.skipped {
        warn!(project = %key.name, source = %s.source, reason = %s.reason, "health signal skipped");
    }
    let score = ae_algo::health(&signals.used);
    let level = ae_algo::classify(score, &cfg.health_bands);

    // --- Scans ---
    let scan_progress = ae_algo::progress_detail(&snap.scans);

    let body = DashboardBody {
        project: key.clone(),
        assessments: AssessmentsBlock { status, label },
        risks: RisksBlock { entries, summary },
        questionnaire,
        health: HealthBlock {
            score,
            level,
            colour: level.colour().to_string(),
            signals: signals.used,
            skipped: signals.skipped,
        },
        scan_progress,
    };

    let dash = ProjectDashboard::seal(body)?;
    info!(
        project = %key.name,
        id = %dash.id,
        health = score,
        %level,
        completion = status.percentage,
        scans = scan_progress.percentage,
        "dashboard built"
    );
    Ok(dash)
}

/// Load config (or defaults) and a snapshot from disk, then evaluate.
pub fn run_from_paths(snapshot: &Path, config: Option<&Path>) -> Result<ProjectDashboard, PipelineError> {
    let cfg = match config {
        Some(p) => loader::load_config(p)?,
        None => EngineConfig::default(),
    };
    let snap = loader::load_snapshot(snapshot)?;
    evaluate(&snap, &cfg)
}

/// Load and validate inputs without evaluating.
pub fn validate_inputs(snapshot: &Path, config: Option<&Path>) -> Result<(), PipelineError> {
    if let Some(p) = config {
        loader::load_config(p)?;
    }
    loader::load_snapshot(snapshot)?;
    Ok(())
}
