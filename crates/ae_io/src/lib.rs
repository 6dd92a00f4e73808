//! crates/ae_io/src/lib.rs
//! Boundary crate: everything that touches bytes, files or loosely-shaped JSON.
//!
//! - `wire`: loose backend JSON → typed `ae_core` values (lenient, logs what it drops)
//! - `loader`: bounded file reads for the engine config and project snapshots
//! - `canonical_json`: sorted-key compact JSON + atomic write
//! - `hasher`: SHA-256 helpers and the `DSH:` dashboard id
//!
//! One shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for ae_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Reading an input file failed (missing, unreadable, too large).
    #[error("read error: {0}")]
    Read(String),

    /// JSON parse errors or shape errors, with a JSON Pointer to the offending node.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Engine config failed domain validation.
    #[error("config error: {0}")]
    Config(String),

    /// Canonicalization / hashing failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Filesystem / path errors on the write side (create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),
}

impl IoError {
    pub(crate) fn json(pointer: impl Into<String>, msg: impl Into<String>) -> Self {
        IoError::Json { pointer: pointer.into(), msg: msg.into() }
    }
}

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; callers enrich when they can.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

impl From<ae_core::CoreError> for IoError {
    fn from(e: ae_core::CoreError) -> Self {
        IoError::Config(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;
pub mod wire;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
/// The engine is offline; callers reject such paths early.
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}
