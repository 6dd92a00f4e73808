// crates/ae_algo/src/lib.rs
//! Pure calculators. Every entry point is a synchronous function of its
//! arguments: no I/O, no clocks, no shared state, no logging.
#![forbid(unsafe_code)]

pub mod completion;
pub mod health;
pub mod questionnaire;
pub mod risk_rating;
pub mod scan_progress;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use completion::{latest_for, matches_project, status};
pub use health::{classify, health};
pub use questionnaire::score;
pub use risk_rating::{rate, rate_entry, rate_form, rate_optional, summarize};
pub use scan_progress::{progress, progress_detail};
