//! ae_core: Core types, typed join keys, rounding helpers, and the engine config.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`ae_io`, `ae_algo`, `ae_pipeline`, `ae_cli`).
//!
//! - Typed IDs: `ProjectId` (join key), `DashboardId` (`DSH:`)
//! - Domain entities: risk inputs, assessment records, questionnaire
//!   responses, scan results, health signals, derived labels
//! - Integer-first percentage rounding (half-up, matching the dashboard)
//! - `EngineConfig`: weights and bands hoisted into one structure
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind `serde` feature.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        InvalidId,
        UnknownLikelihood,
        UnknownImpact,
        UnknownRiskLevel,
        UnknownResponse,
        BadResponseKey,
        DomainOutOfRange(&'static str),
        BandOrder(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::UnknownLikelihood => write!(f, "unknown likelihood"),
                CoreError::UnknownImpact => write!(f, "unknown impact"),
                CoreError::UnknownRiskLevel => write!(f, "unknown risk level"),
                CoreError::UnknownResponse => write!(f, "unknown questionnaire response"),
                CoreError::BadResponseKey => write!(f, "bad response key (expected \"<section>-<question>\")"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::BandOrder(k) => write!(f, "bands not strictly ascending: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod config;
pub mod determinism;
pub mod entities;
pub mod ids;
pub mod rounding;

pub use config::EngineConfig;
pub use errors::CoreError;
