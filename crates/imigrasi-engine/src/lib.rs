//! Imigrasi Engine -- the round driver behind the immigration-desk game.
//!
//! This crate builds on [`imigrasi_audit`] to run one round: a batch of
//! document sets is generated and mixed once, then the player approves or
//! declines each set in turn against a per-document countdown. The driver
//! keeps the score, hands out the end-of-round star rating, and can capture
//! a BLAKE3-hashed snapshot of the whole round for persistence or
//! determinism checks.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use imigrasi_engine::prelude::*;
//!
//! let config = RoundConfig { seed: Some(6), ..Default::default() };
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut round = Round::generate(&config, now).unwrap();
//!
//! while let Some(set) = round.current() {
//!     let verdict = Verdict::for_set(set);
//!     round.judge(verdict).unwrap();
//! }
//!
//! assert!(round.is_finished());
//! assert_eq!(round.score(), 6);
//! assert_eq!(round.stars(), 3);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod round;
pub mod snapshot;

use std::path::PathBuf;

/// Re-export the audit crate for convenience.
pub use imigrasi_audit;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A configuration value is outside its allowed range.
    #[error("invalid round config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse round config: {details}")]
    ConfigParse { details: String },

    #[error("failed to read reference tables from {}: {source}", .path.display())]
    TablesIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tables(#[from] imigrasi_docs::DocsError),

    /// Every set has already been judged or timed out.
    #[error("round already finished after {resolved} documents")]
    RoundFinished { resolved: usize },

    #[error(
        "snapshot hash mismatch: recorded {recorded} but recomputed {recomputed}. \
         The snapshot may be corrupted or tampered with."
    )]
    SnapshotHashMismatch {
        recorded: String,
        recomputed: String,
    },

    #[error("invalid snapshot: {details}")]
    InvalidSnapshot { details: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use imigrasi_audit::prelude::*;

    pub use crate::config::RoundConfig;
    pub use crate::round::{
        Judgment, Outcome, Progress, Round, RoundSummary, Verdict, MAX_STARS, PAGES,
    };
    pub use crate::snapshot::RoundSnapshot;
    pub use crate::EngineError;
}
