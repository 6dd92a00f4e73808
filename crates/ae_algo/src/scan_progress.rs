//! Scan progress over the four fixed scan kinds.
//!
//! A slot counts as done only when the scan completed; failed scans are
//! reported but never count towards the percentage.

use ae_core::{
    entities::{ScanKind, ScanOutcome, ScanProgress, ScanResultSet},
    rounding::pct_round_half_up,
};

pub fn progress(scans: &ScanResultSet) -> u8 {
    progress_detail(scans).percentage
}

pub fn progress_detail(scans: &ScanResultSet) -> ScanProgress {
    let mut p = ScanProgress { total: ScanKind::ALL.len() as u8, ..ScanProgress::default() };
    for (_, slot) in scans.iter() {
        match slot {
            Some(ScanOutcome::Completed(_)) => p.completed += 1,
            Some(ScanOutcome::Failed { .. }) => p.failed += 1,
            None => p.not_run += 1,
        }
    }
    p.percentage = pct_round_half_up(p.completed as u64, p.total as u64);
    p
}
