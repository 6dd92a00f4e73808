//! Loader: read local JSON inputs (engine config, project snapshot), bound
//! their size, parse, and return typed values. No network I/O.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ae_core::EngineConfig;
use serde_json::Value;
use tracing::debug;

use crate::wire::{self, Snapshot};
use crate::{hasher, looks_like_url_strict, IoError};

/// Inputs are small documents; anything larger is almost certainly the wrong file.
pub const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;

/// Read a local JSON file into a `Value` with a size bound.
pub fn read_json_value_with_limits(path: &Path) -> Result<Value, IoError> {
    let shown = path.display();
    if looks_like_url_strict(&path.to_string_lossy()) {
        return Err(IoError::Read(format!("{shown}: URLs are not supported (offline only)")));
    }
    let f = File::open(path).map_err(|e| IoError::Read(format!("{shown} ({e})")))?;
    let mut buf = Vec::new();
    f.take(MAX_INPUT_BYTES as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Read(format!("{shown} ({e})")))?;
    if buf.len() > MAX_INPUT_BYTES {
        return Err(IoError::Read(format!("{shown}: exceeds {MAX_INPUT_BYTES} bytes")));
    }
    debug!(path = %shown, bytes = buf.len(), sha256 = %hasher::sha256_hex(&buf), "read input");
    serde_json::from_slice(&buf).map_err(|e| IoError::json("/", format!("{shown}: {e}")))
}

/// Parse and validate an engine config document. Absent fields take defaults.
pub fn parse_config(v: Value) -> Result<EngineConfig, IoError> {
    let cfg: EngineConfig = serde_json::from_value(v).map_err(|e| IoError::Config(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<EngineConfig, IoError> {
    parse_config(read_json_value_with_limits(path)?)
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, IoError> {
    let v = read_json_value_with_limits(path)?;
    let snap = wire::parse_snapshot(&v)?;
    debug!(
        project = %snap.project.name,
        risks = snap.risks.len(),
        pia = snap.assessments.pia.len(),
        dpia = snap.assessments.dpia.len(),
        ropa = snap.assessments.ropa.len(),
        "snapshot parsed"
    );
    Ok(snap)
}
