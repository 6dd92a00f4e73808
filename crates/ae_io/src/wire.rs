//! Wire parsing: loosely-shaped backend JSON → typed `ae_core` values.
//!
//! Every record shape has a `Wire*` struct deserialized with serde and then
//! mapped onto the core types. Loose fields go through the `lenient`
//! helpers, which never fail: a malformed value is logged with `warn!` and
//! the calculators see it as absent (an unknown response literal is an
//! unanswered question, an unparseable score is a missing signal).
//!
//! Structural errors (root not an object, a collection that is not an array,
//! a record that is not an object, a missing project name) fail with
//! `IoError::Json` and a JSON Pointer to the offending node.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::{warn, warn_span};

use ae_core::entities::{
    AssessmentKind, AssessmentRecord, AssessmentSets, Impact, Likelihood, ProjectKey, ProjectRef,
    Responses, RiskEntry, RiskRating, RiskScoreField, ScanKind, ScanOutcome, ScanResultSet, ScanSummary,
    Section,
};
use ae_core::ids::ProjectId;

use crate::IoError;

/// Questionnaire definition plus the sparse response map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuestionnaireInput {
    pub sections: Vec<Section>,
    pub responses: Responses,
}

/// Everything the engine needs for one project, already typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub project: ProjectKey,
    pub risks: Vec<RiskEntry>,
    pub assessments: AssessmentSets,
    pub questionnaire: Option<QuestionnaireInput>,
    pub scans: ScanResultSet,
}

/* ------------------------------- wire types ------------------------------- */

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireRiskForm {
    #[serde(deserialize_with = "lenient::string")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient::literal")]
    likelihood: Option<Likelihood>,
    #[serde(deserialize_with = "lenient::literal")]
    impact: Option<Impact>,
}

impl From<WireRiskForm> for RiskEntry {
    fn from(w: WireRiskForm) -> Self {
        RiskEntry { title: w.title.unwrap_or_default(), likelihood: w.likelihood, impact: w.impact }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProjectInfo {
    #[serde(deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    project_name: Option<String>,
}

/// PIA/DPIA/RoPA report as the backend sends it. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireAssessment {
    #[serde(deserialize_with = "lenient::project_id")]
    project_id: Option<ProjectId>,
    #[serde(deserialize_with = "lenient::string")]
    project_name: Option<String>,
    #[serde(deserialize_with = "lenient::project_info")]
    project_info: WireProjectInfo,
    #[serde(deserialize_with = "lenient::risk_score")]
    risk_score: RiskScoreField,
    #[serde(deserialize_with = "lenient::literal")]
    risk_level: Option<RiskRating>,
    #[serde(deserialize_with = "lenient::number_like")]
    compliance_score: Option<f64>,
    #[serde(deserialize_with = "lenient::number_like")]
    impact_score: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    summary: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    generated_at: Option<DateTime<Utc>>,
}

impl WireAssessment {
    fn into_record(self, kind: AssessmentKind) -> AssessmentRecord {
        AssessmentRecord {
            kind,
            project: ProjectRef {
                project_id: self.project_id,
                project_name: self.project_name,
                info_name: self.project_info.name,
                info_project_name: self.project_info.project_name,
            },
            risk_score: self.risk_score,
            risk_level: self.risk_level,
            compliance_score: self.compliance_score,
            impact_score: self.impact_score,
            summary: self.summary,
            generated_at: self.generated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireSection {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default, deserialize_with = "lenient::questions")]
    questions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireQuestionnaire {
    sections: Option<Vec<Value>>,
    #[serde(deserialize_with = "lenient::responses")]
    responses: Responses,
}

/// One scan slot. Failure is signalled by `error` or `status: "failed"`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireScan {
    #[serde(deserialize_with = "lenient::failure")]
    error: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    status: Option<String>,
    #[serde(deserialize_with = "lenient::findings")]
    total_findings: Option<u32>,
    #[serde(rename = "summary", deserialize_with = "lenient::summary_findings")]
    summary_findings: Option<u32>,
}

impl WireScan {
    fn into_outcome(self) -> ScanOutcome {
        let failed_status = self
            .status
            .filter(|s| s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error"))
            .map(|s| format!("status: {s}"));
        match self.error.or(failed_status) {
            Some(reason) => ScanOutcome::Failed { reason },
            None => ScanOutcome::Completed(ScanSummary {
                total_findings: self.total_findings.or(self.summary_findings),
            }),
        }
    }
}

/// The project block is strict: it is the join key for everything else.
#[derive(Debug, Deserialize)]
struct WireProject {
    #[serde(default, deserialize_with = "strict_project_id")]
    id: Option<ProjectId>,
    #[serde(default)]
    name: Option<String>,
}

/// Ids arrive as strings or bare numbers.
fn id_token(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn strict_project_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ProjectId>, D::Error> {
    use serde::de::Error;
    let Some(v) = Option::<Value>::deserialize(d)? else {
        return Ok(None);
    };
    let token = id_token(&v).ok_or_else(|| D::Error::custom("project id must be a string or a number"))?;
    token
        .parse::<ProjectId>()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("project id: {e}")))
}

/* ----------------------------- lenient fields ----------------------------- */

mod lenient {
    use std::collections::BTreeMap;
    use std::str::FromStr;

    use serde::de::Error;

    use super::*;
    use ae_core::entities::{ResponseKey, ResponseValue};

    pub(super) fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                warn!(found = %other, "expected a string; field ignored");
                None
            }
        })
    }

    /// A number, or numeric text such as `"72"`, `"72.5"` or `"72%"`.
    pub(super) fn number_like<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let Some(v) = Option::<Value>::deserialize(d)? else {
            return Ok(None);
        };
        let n = match &v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|x| x.is_finite());
        if n.is_none() {
            warn!(found = %v, "not a number; field ignored");
        }
        Ok(n)
    }

    /// Kept raw; the pipeline decides how to read free text.
    pub(super) fn risk_score<'de, D: Deserializer<'de>>(d: D) -> Result<RiskScoreField, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            None => RiskScoreField::Missing,
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|x| x.is_finite())
                .map_or(RiskScoreField::Missing, RiskScoreField::Numeric),
            Some(Value::String(s)) => RiskScoreField::Text(s),
            Some(other) => {
                warn!(found = %other, "unsupported risk score; ignored");
                RiskScoreField::Missing
            }
        })
    }

    /// Wire literal read with the target's lenient `FromStr`. Blank is unset.
    pub(super) fn literal<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        let Some(raw) = string(d)? else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let parsed = trimmed.parse().ok();
        if parsed.is_none() {
            warn!(value = %trimmed, "unknown literal; left unset");
        }
        Ok(parsed)
    }

    pub(super) fn project_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ProjectId>, D::Error> {
        let Some(v) = Option::<Value>::deserialize(d)? else {
            return Ok(None);
        };
        let id = id_token(&v).and_then(|s| s.parse::<ProjectId>().ok());
        if id.is_none() {
            warn!(found = %v, "invalid project id; matching by name");
        }
        Ok(id)
    }

    pub(super) fn project_info<'de, D: Deserializer<'de>>(d: D) -> Result<WireProjectInfo, D::Error> {
        match Option::<Value>::deserialize(d)? {
            Some(v @ Value::Object(_)) => WireProjectInfo::deserialize(v).map_err(D::Error::custom),
            Some(other) => {
                warn!(found = %other, "project_info is not an object; ignored");
                Ok(WireProjectInfo::default())
            }
            None => Ok(WireProjectInfo::default()),
        }
    }

    pub(super) fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = string(d)? else {
            return Ok(None);
        };
        let ts = parse_timestamp(&raw);
        if ts.is_none() {
            warn!(value = %raw, "unparseable timestamp; treated as oldest");
        }
        Ok(ts)
    }

    /// Question texts; a non-string entry keeps its JSON text.
    pub(super) fn questions<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let items = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
        Ok(items
            .into_iter()
            .map(|q| match q {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect())
    }

    /// Sparse `"{section}-{question}"` map. Bad keys and unknown literals are dropped.
    pub(super) fn responses<'de, D: Deserializer<'de>>(d: D) -> Result<Responses, D::Error> {
        let mut out = Responses::new();
        let Some(raw) = Option::<BTreeMap<String, Value>>::deserialize(d)? else {
            return Ok(out);
        };
        for (k, val) in raw {
            let Ok(key) = k.parse::<ResponseKey>() else {
                warn!(key = %k, "malformed response key; dropped");
                continue;
            };
            match val {
                Value::Null => {}
                Value::String(s) if s.trim().is_empty() => {}
                Value::String(s) => match s.parse::<ResponseValue>() {
                    Ok(rv) => {
                        out.insert(key, rv);
                    }
                    Err(_) => warn!(key = %k, value = %s, "unknown response; counted as unanswered"),
                },
                other => warn!(key = %k, found = %other, "response is not a string; counted as unanswered"),
            }
        }
        Ok(out)
    }

    fn count(v: &Value) -> Option<u32> {
        let n = v.as_u64().and_then(|n| u32::try_from(n).ok());
        if n.is_none() {
            warn!(found = %v, "total_findings is not a non-negative integer; ignored");
        }
        n
    }

    pub(super) fn findings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(count))
    }

    /// `total_findings` nested under a `summary` object.
    pub(super) fn summary_findings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Object(m)) => m.get("total_findings").filter(|v| !v.is_null()).and_then(count),
            _ => None,
        })
    }

    /// `error` may be a message, a flag, or any other truthy value.
    pub(super) fn failure<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            None | Some(Value::Bool(false)) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        })
    }
}

/* ----------------------------- pointer helpers ----------------------------- */

fn child(at: &str, seg: &str) -> String {
    format!("{at}/{}", seg.replace('~', "~0").replace('/', "~1"))
}

fn index(at: &str, i: usize) -> String {
    format!("{at}/{i}")
}

fn shown(at: &str) -> &str {
    if at.is_empty() { "/" } else { at }
}

fn as_object<'a>(v: &'a Value, at: &str) -> Result<&'a Map<String, Value>, IoError> {
    v.as_object().ok_or_else(|| IoError::json(shown(at), "expected an object"))
}

/// Member present and not `null`.
fn member<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Decode one object-shaped record; lenient-field warnings carry its pointer.
fn record<T: DeserializeOwned>(v: &Value, at: &str) -> Result<T, IoError> {
    as_object(v, at)?;
    let _span = warn_span!("wire", pointer = %shown(at)).entered();
    T::deserialize(v).map_err(|e| IoError::json(shown(at), e.to_string()))
}

fn records<T: DeserializeOwned>(v: &Value, at: &str) -> Result<Vec<T>, IoError> {
    v.as_array()
        .ok_or_else(|| IoError::json(shown(at), "expected an array"))?
        .iter()
        .enumerate()
        .map(|(i, item)| record(item, &index(at, i)))
        .collect()
}

/* --------------------------------- parsers -------------------------------- */

/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`, `+02:00`) and offset-less ISO
/// timestamps, which are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|n| Utc.from_utc_datetime(&n))
}

/// Blank selections are unset; unknown literals are dropped with a warning.
pub fn parse_risk_form(v: &Value, at: &str) -> Result<RiskEntry, IoError> {
    record::<WireRiskForm>(v, at).map(RiskEntry::from)
}

pub fn parse_assessment(kind: AssessmentKind, v: &Value, at: &str) -> Result<AssessmentRecord, IoError> {
    record::<WireAssessment>(v, at).map(|w| w.into_record(kind))
}

pub fn parse_assessment_sets(v: &Value, at: &str) -> Result<AssessmentSets, IoError> {
    let obj = as_object(v, at)?;
    let list = |kind: AssessmentKind, key: &str| -> Result<Vec<AssessmentRecord>, IoError> {
        match member(obj, key) {
            Some(v) => Ok(records::<WireAssessment>(v, &child(at, key))?
                .into_iter()
                .map(|w| w.into_record(kind))
                .collect()),
            None => Ok(Vec::new()),
        }
    };
    Ok(AssessmentSets {
        pia: list(AssessmentKind::Pia, "pia")?,
        dpia: list(AssessmentKind::Dpia, "dpia")?,
        ropa: list(AssessmentKind::Ropa, "ropa")?,
    })
}

pub fn parse_questionnaire(v: &Value, at: &str) -> Result<QuestionnaireInput, IoError> {
    let wire: WireQuestionnaire = record(v, at)?;
    let sections_at = child(at, "sections");
    let sections = wire
        .sections
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, s)| -> Result<Section, IoError> {
            let at = index(&sections_at, i);
            let w: WireSection = record(s, &at)?;
            let heading = w
                .heading
                .ok_or_else(|| IoError::json(child(&at, "heading"), "missing section heading"))?;
            Ok(Section { heading, questions: w.questions })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionnaireInput { sections, responses: wire.responses })
}

/// `null` is "not run". A non-object value is taken as completed without findings.
pub fn parse_scan_outcome(v: &Value, at: &str) -> Result<Option<ScanOutcome>, IoError> {
    match v {
        Value::Null => Ok(None),
        Value::Object(_) => record::<WireScan>(v, at).map(|w| Some(w.into_outcome())),
        other => {
            warn!(pointer = %shown(at), found = %other, "scan result is not an object; treated as completed without findings");
            Ok(Some(ScanOutcome::Completed(ScanSummary::default())))
        }
    }
}

pub fn parse_scans(v: &Value, at: &str) -> Result<ScanResultSet, IoError> {
    let mut set = ScanResultSet::default();
    if v.is_null() {
        return Ok(set);
    }
    for (k, val) in as_object(v, at)? {
        match k.parse::<ScanKind>() {
            Ok(kind) => *set.slot_mut(kind) = parse_scan_outcome(val, &child(at, k))?,
            Err(_) => warn!(pointer = %child(at, k), "unknown scan type; ignored"),
        }
    }
    Ok(set)
}

fn parse_project(v: &Value, at: &str) -> Result<ProjectKey, IoError> {
    let w: WireProject = record(v, at)?;
    let name = w.name.ok_or_else(|| IoError::json(child(at, "name"), "missing project name"))?;
    Ok(ProjectKey { id: w.id, name })
}

pub fn parse_snapshot(v: &Value) -> Result<Snapshot, IoError> {
    let root = as_object(v, "")?;

    let project = match member(root, "project") {
        Some(p) => parse_project(p, "/project")?,
        None => return Err(IoError::json("/project", "missing project")),
    };

    let risks = match member(root, "risks") {
        Some(r) => records::<WireRiskForm>(r, "/risks")?.into_iter().map(RiskEntry::from).collect(),
        None => Vec::new(),
    };

    let assessments = match member(root, "assessments") {
        Some(a) => parse_assessment_sets(a, "/assessments")?,
        None => AssessmentSets::default(),
    };

    let questionnaire = match member(root, "questionnaire") {
        Some(q) => Some(parse_questionnaire(q, "/questionnaire")?),
        None => None,
    };

    let scans = match member(root, "scans") {
        Some(s) => parse_scans(s, "/scans")?,
        None => ScanResultSet::default(),
    };

    Ok(Snapshot { project, risks, assessments, questionnaire, scans })
}
