//! crates/ae_io/src/hasher.rs
//!
//! Deterministic hashing and the dashboard id builder.
//!
//! - Canonical JSON hashing: UTF-8, **sorted object keys**, array order preserved.
//! - `DSH:<hex>` derives from the canonical bytes of the dashboard *without* its id.
//! - Hex digests are **lowercase**.
//!
//! Use `sha256_canonical(..)` for values/structs (goes through canonical_json) and
//! `sha256_hex(..)` for raw input bytes (logged by the loader).

use ae_core::ids::DashboardId;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let bytes = to_canonical_bytes(value).map_err(|e| IoError::Hash(e.to_string()))?;
    Ok(sha256_hex(&bytes))
}

/// `DSH:<hex>` for a dashboard body. The caller passes the body without the id field.
pub fn dashboard_id_from_canonical<T: Serialize>(body: &T) -> Result<DashboardId, IoError> {
    let hex = sha256_canonical(body)?;
    DashboardId::from_hex(&hex).map_err(|e| IoError::Hash(e.to_string()))
}
