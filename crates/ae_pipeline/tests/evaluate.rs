// crates/ae_pipeline/tests/evaluate.rs
//! End-to-end evaluation of the demo snapshot, plus determinism checks.

use std::path::PathBuf;

use assert_json_diff::assert_json_include;
use serde_json::json;

use ae_core::EngineConfig;
use ae_io::{canonical_json, wire};
use ae_pipeline::{evaluate, run_from_paths, validate_inputs, PipelineError, ProjectDashboard};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
}

fn demo_dashboard() -> ProjectDashboard {
    run_from_paths(&demo("apollo_snapshot.json"), None).expect("demo snapshot evaluates")
}

#[test]
fn demo_snapshot_produces_expected_dashboard() {
    let dash = demo_dashboard();
    let actual = serde_json::to_value(&dash).unwrap();

    assert_json_include!(
        actual: actual,
        expected: json!({
            "project": { "name": "Apollo" },
            "assessments": {
                "has_pia": true, "has_dpia": true, "has_ropa": false,
                "completed_assessments": 2, "percentage": 67, "label": "In Progress"
            },
            "risks": {
                "entries": [
                    { "title": "Vendor access to customer data", "score": 12, "risk_rating": "High" },
                    { "title": "Retention schedule not agreed", "likelihood": null, "impact": "Low", "score": null, "risk_rating": null },
                    { "title": "Legacy backups unencrypted", "score": 20, "risk_rating": "Critical" }
                ],
                "summary": { "low": 0, "medium": 0, "high": 1, "critical": 1, "unrated": 1 }
            },
            "questionnaire": {
                "categories": [
                    { "heading": "Governance", "score": { "met": 1, "not_met": 2, "percentage": 33 } },
                    { "heading": "Security", "score": { "not_applicable": 1, "applicable_questions": 1, "percentage": 100 } }
                ],
                "overall": { "met": 2, "not_met": 2, "percentage": 50 }
            },
            "health": {
                "score": 79, "level": "Good", "colour": "blue",
                "signals": [
                    { "source": "pia", "score": 80.0, "weight": 0.3 },
                    { "source": "dpia_compliance", "score": 70.0, "weight": 0.25 },
                    { "source": "scan_security", "score": 90.0, "weight": 0.2 }
                ],
                "skipped": [ { "source": "ropa_compliance", "reason": "no RoPA report" } ]
            },
            "scan_progress": { "completed": 2, "failed": 1, "not_run": 1, "total": 4, "percentage": 50 }
        })
    );
    assert!(dash.id.as_str().starts_with("DSH:"));
    assert!(dash.verify_id().unwrap());
}

#[test]
fn explicit_default_config_matches_no_config() {
    let with_cfg = run_from_paths(&demo("apollo_snapshot.json"), Some(&demo("engine_config.json"))).unwrap();
    assert_eq!(with_cfg, demo_dashboard());
}

#[test]
fn identical_inputs_give_identical_bytes_and_id() {
    let a = demo_dashboard();
    let b = demo_dashboard();
    assert_eq!(a.id, b.id);
    assert_eq!(
        canonical_json::to_canonical_bytes(&a).unwrap(),
        canonical_json::to_canonical_bytes(&b).unwrap()
    );
}

#[test]
fn config_change_changes_id() {
    let snap = ae_io::loader::load_snapshot(&demo("apollo_snapshot.json")).unwrap();
    let base = evaluate(&snap, &EngineConfig::default()).unwrap();

    let mut cfg = EngineConfig::default();
    cfg.scan.penalty_per_finding = 10;
    let harsher = evaluate(&snap, &cfg).unwrap();

    assert_ne!(base.id, harsher.id);
    let scan_score = |d: &ProjectDashboard| {
        d.body.health.signals.iter().find(|s| s.source.as_str() == "scan_security").map(|s| s.score)
    };
    assert_eq!(scan_score(&base), Some(90.0));
    assert_eq!(scan_score(&harsher), Some(80.0));
}

#[test]
fn unknown_project_gets_zeroed_dashboard() {
    let v = json!({ "project": { "name": "Nobody" }, "assessments": { "pia": [ { "project_name": "Apollo", "risk_score": 10 } ] } });
    let snap = wire::parse_snapshot(&v).unwrap();
    let d = evaluate(&snap, &EngineConfig::default()).unwrap();

    assert_eq!(d.body.assessments.status.percentage, 0);
    assert_eq!(d.body.assessments.label.as_str(), "Not Started");
    assert_eq!(d.body.health.score, 0);
    assert_eq!(d.body.health.level.as_str(), "Poor");
    assert!(d.body.health.signals.is_empty());
    assert_eq!(d.body.health.skipped.len(), 4);
    assert!(d.body.questionnaire.is_none());
    assert_eq!(d.body.scan_progress.percentage, 0);
}

#[test]
fn project_id_join_ignores_renamed_records() {
    let v = json!({
        "project": { "id": "p-7", "name": "Apollo" },
        "assessments": {
            "pia":  [ { "project_id": "p-7", "project_name": "Apollo (renamed)", "risk_score": 30 } ],
            "dpia": [ { "project_id": "p-8", "project_name": "Apollo", "compliance_score": 10 } ],
            "ropa": [ { "project_name": "Apollo", "compliance_score": 60 } ]
        }
    });
    let d = evaluate(&wire::parse_snapshot(&v).unwrap(), &EngineConfig::default()).unwrap();
    let st = &d.body.assessments.status;
    assert_eq!((st.has_pia, st.has_dpia, st.has_ropa), (true, false, true));
    // (70·0.30 + 60·0.25) / 0.55 = 65.45…
    assert_eq!(d.body.health.score, 65);
}

#[test]
fn read_and_shape_errors_are_bucketed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(run_from_paths(&missing, None), Err(PipelineError::Io(_))));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"project": 7}"#).unwrap();
    assert!(matches!(run_from_paths(&bad, None), Err(PipelineError::Input(_))));

    let cfg = dir.path().join("cfg.json");
    std::fs::write(&cfg, r#"{"health_bands": {"excellent": 101}}"#).unwrap();
    assert!(matches!(
        validate_inputs(&demo("apollo_snapshot.json"), Some(&cfg)),
        Err(PipelineError::Config(_))
    ));
    assert!(validate_inputs(&demo("apollo_snapshot.json"), Some(&demo("engine_config.json"))).is_ok());
}

#[test]
fn dashboard_round_trips_through_json() {
    let d = demo_dashboard();
    let text = serde_json::to_string(&d).unwrap();
    let back: ProjectDashboard = serde_json::from_str(&text).unwrap();
    assert_eq!(back, d);
    assert!(back.verify_id().unwrap());
}
