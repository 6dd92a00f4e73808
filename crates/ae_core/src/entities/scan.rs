//! Typed scan results (one slot per scan kind) and derived progress.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

wire_enum!(
    ScanKind, CoreError::InvalidToken => {
        GitScan         = "gitScan",
        SecurityHeaders = "securityHeaders",
        CookieAnalysis  = "cookieAnalysis",
        MobileScan      = "mobileScan",
    }
);

/// The fields of a finished scan the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanSummary {
    pub total_findings: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum ScanOutcome {
    Completed(ScanSummary),
    Failed { reason: String },
}

impl ScanOutcome {
    pub fn total_findings(&self) -> Option<u32> {
        match self {
            ScanOutcome::Completed(s) => s.total_findings,
            ScanOutcome::Failed { .. } => None,
        }
    }
}

/// `None` in a slot means the scan has not been run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanResultSet {
    pub git_scan: Option<ScanOutcome>,
    pub security_headers: Option<ScanOutcome>,
    pub cookie_analysis: Option<ScanOutcome>,
    pub mobile_scan: Option<ScanOutcome>,
}

impl ScanResultSet {
    pub fn slot(&self, kind: ScanKind) -> Option<&ScanOutcome> {
        match kind {
            ScanKind::GitScan => self.git_scan.as_ref(),
            ScanKind::SecurityHeaders => self.security_headers.as_ref(),
            ScanKind::CookieAnalysis => self.cookie_analysis.as_ref(),
            ScanKind::MobileScan => self.mobile_scan.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, kind: ScanKind) -> &mut Option<ScanOutcome> {
        match kind {
            ScanKind::GitScan => &mut self.git_scan,
            ScanKind::SecurityHeaders => &mut self.security_headers,
            ScanKind::CookieAnalysis => &mut self.cookie_analysis,
            ScanKind::MobileScan => &mut self.mobile_scan,
        }
    }

    /// All four slots in fixed `ScanKind` order.
    pub fn iter(&self) -> impl Iterator<Item = (ScanKind, Option<&ScanOutcome>)> + '_ {
        ScanKind::ALL.iter().map(move |&k| (k, self.slot(k)))
    }
}

/// Progress over the fixed set of scan kinds. Only `completed` feeds the
/// percentage; `failed` and `not_run` are reported for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanProgress {
    pub completed: u8,
    pub failed: u8,
    pub not_run: u8,
    pub total: u8,
    pub percentage: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_visits_all_four_in_order() {
        let mut set = ScanResultSet::default();
        *set.slot_mut(ScanKind::CookieAnalysis) =
            Some(ScanOutcome::Completed(ScanSummary { total_findings: Some(3) }));
        let got: Vec<(ScanKind, bool)> = set.iter().map(|(k, s)| (k, s.is_some())).collect();
        assert_eq!(
            got,
            vec![
                (ScanKind::GitScan, false),
                (ScanKind::SecurityHeaders, false),
                (ScanKind::CookieAnalysis, true),
                (ScanKind::MobileScan, false),
            ]
        );
        assert_eq!(set.cookie_analysis.as_ref().and_then(|s| s.total_findings()), Some(3));
    }

    #[test]
    fn failed_scan_has_no_findings() {
        let f = ScanOutcome::Failed { reason: "timeout".into() };
        assert_eq!(f.total_findings(), None);
    }
}
