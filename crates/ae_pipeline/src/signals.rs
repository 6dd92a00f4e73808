//! signals.rs: derive the health signals from the latest typed records.
//!
//! Each source yields at most one signal. A source that cannot produce a
//! trustworthy number is skipped with a reason instead of contributing a
//! fabricated value; the weighted average then renormalises over the rest.
//!
//! | source           | score                                  |
//! |------------------|----------------------------------------|
//! | pia              | `100 - risk_score`                     |
//! | dpia_compliance  | `compliance_score`                     |
//! | ropa_compliance  | `compliance_score`                     |
//! | scan_security    | `max(0, 100 - Σ findings · penalty)`   |
//!
//! Risk and compliance scores outside `0..=100` are skipped as malformed.

use ae_core::{
    config::EngineConfig,
    entities::{AssessmentRecord, HealthSignal, RiskScoreField, ScanResultSet, SignalSource, SkippedSignal},
};

/// Signals that feed the average plus those left out, in `SignalSource` order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalSet {
    pub used: Vec<HealthSignal>,
    pub skipped: Vec<SkippedSignal>,
}

impl SignalSet {
    fn push(&mut self, source: SignalSource, score: Result<f64, String>, cfg: &EngineConfig) {
        match score {
            Ok(_) if source.weight(&cfg.weights) <= 0.0 => self.skipped.push(SkippedSignal {
                source,
                reason: "weight is zero".into(),
            }),
            Ok(score) => self.used.push(HealthSignal::new(source, score, &cfg.weights)),
            Err(reason) => self.skipped.push(SkippedSignal { source, reason }),
        }
    }
}

/* ----------------------------- risk score text ----------------------------- */

/// Leading decimal number of `s` (after leading whitespace).
fn leading_number(s: &str) -> Option<(f64, &str)> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || c == '.'))
        .map_or(s.len(), |(i, _)| i);
    let n = s[..end].parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some((n, &s[end..]))
}

/// `"45"`, `"45%"`, `"45/100"`, `"9/20"` (scaled to 45). Trailing text is ignored.
fn score_text(s: &str) -> Option<f64> {
    let (n, rest) = leading_number(s)?;
    match rest.trim_start().strip_prefix('/').and_then(leading_number) {
        Some((den, _)) if den > 0.0 => Some(n * 100.0 / den),
        _ => Some(n),
    }
}

/// `"... Risk Score: 45/100 ..."` anywhere in a report summary (case-insensitive).
/// The first occurrence followed by a number wins.
fn score_in_summary(summary: &str) -> Option<f64> {
    const LABEL: &str = "risk score";
    let lower = summary.to_ascii_lowercase();
    lower.match_indices(LABEL).find_map(|(at, _)| {
        let rest = summary[at + LABEL.len()..].trim_start().trim_start_matches(':');
        score_text(rest)
    })
}

/// PIA risk score from the numeric field, numeric text, or the summary, in that order.
pub fn parse_risk_score(field: &RiskScoreField, summary: Option<&str>) -> Option<f64> {
    let direct = match field {
        RiskScoreField::Numeric(x) if x.is_finite() => Some(*x),
        RiskScoreField::Text(t) => score_text(t),
        _ => None,
    };
    direct.or_else(|| summary.and_then(score_in_summary))
}

/* --------------------------------- sources --------------------------------- */

/// Risk and compliance scores are percentages; anything else is malformed.
fn in_range(x: f64, what: &str) -> Result<f64, String> {
    if (0.0..=100.0).contains(&x) {
        Ok(x)
    } else {
        Err(format!("{what} out of range: {x}"))
    }
}

fn pia_score(pia: Option<&AssessmentRecord>) -> Result<f64, String> {
    let r = pia.ok_or("no PIA report")?;
    let risk = parse_risk_score(&r.risk_score, r.summary.as_deref())
        .ok_or("PIA risk score missing or unparseable")?;
    Ok(100.0 - in_range(risk, "PIA risk score")?)
}

fn compliance_score(rec: Option<&AssessmentRecord>, what: &str) -> Result<f64, String> {
    let r = rec.ok_or_else(|| format!("no {what} report"))?;
    let score = r
        .compliance_score
        .filter(|x| x.is_finite())
        .ok_or_else(|| format!("{what} compliance score missing"))?;
    in_range(score, &format!("{what} compliance score"))
}

fn scan_score(scans: &ScanResultSet, penalty_per_finding: u32) -> Result<f64, String> {
    let reported: Vec<u32> = scans.iter().filter_map(|(_, s)| s?.total_findings()).collect();
    if reported.is_empty() {
        return Err("no completed scan reports findings".into());
    }
    let findings: u64 = reported.iter().map(|&n| n as u64).sum();
    let penalty = findings.saturating_mul(penalty_per_finding as u64);
    Ok(100u64.saturating_sub(penalty) as f64)
}

/// Build the signal set from the latest PIA/DPIA/RoPA records and the scan slots.
pub fn derive(
    pia: Option<&AssessmentRecord>,
    dpia: Option<&AssessmentRecord>,
    ropa: Option<&AssessmentRecord>,
    scans: &ScanResultSet,
    cfg: &EngineConfig,
) -> SignalSet {
    let mut set = SignalSet::default();
    set.push(SignalSource::Pia, pia_score(pia), cfg);
    set.push(SignalSource::DpiaCompliance, compliance_score(dpia, "DPIA"), cfg);
    set.push(SignalSource::RopaCompliance, compliance_score(ropa, "RoPA"), cfg);
    set.push(SignalSource::ScanSecurity, scan_score(scans, cfg.scan.penalty_per_finding), cfg);
    set
}
