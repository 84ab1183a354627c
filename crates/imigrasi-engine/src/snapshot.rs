//! Round snapshot and restore with BLAKE3 hashing.
//!
//! A [`RoundSnapshot`] is a serializable copy of a whole [`Round`]: the
//! configuration, the generation instant, the mixed batch with its
//! corruption journal, and the player's progress. It carries a BLAKE3
//! content hash so a stored round can be checked for tampering before it
//! is resumed, and so two runs can be compared for determinism.
//!
//! ```
//! use chrono::NaiveDate;
//! use imigrasi_engine::prelude::*;
//!
//! let config = RoundConfig { seed: Some(11), ..Default::default() };
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut round = Round::generate(&config, now).unwrap();
//! round.judge(Verdict::Approved).unwrap();
//!
//! let snapshot = round.capture_snapshot();
//! assert_eq!(snapshot.hash.len(), 64); // BLAKE3 hex digest
//!
//! let json = serde_json::to_string(&snapshot).unwrap();
//! let stored: RoundSnapshot = serde_json::from_str(&json).unwrap();
//! let resumed = Round::restore_from_snapshot(&stored).unwrap();
//! assert_eq!(resumed, round);
//! ```
//!
//! The reference tables and the random source are not part of a snapshot:
//! the batch is generated once, so neither is consulted after generation.

use chrono::NaiveDateTime;
use imigrasi_audit::mixer::MixReport;
use serde::{Deserialize, Serialize};

use crate::config::RoundConfig;
use crate::round::{Progress, Round, PAGES};
use crate::EngineError;

// ---------------------------------------------------------------------------
// RoundSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub config: RoundConfig,
    pub now: NaiveDateTime,
    pub report: MixReport,
    pub progress: Progress,
    /// BLAKE3 hex digest (64 lowercase hex chars) of everything above.
    pub hash: String,
}

impl RoundSnapshot {
    /// Recompute the hash and compare it with the recorded one.
    pub fn verify(&self) -> Result<(), EngineError> {
        let recomputed = compute_hash(&self.config, self.now, &self.report, &self.progress);
        if recomputed != self.hash {
            return Err(EngineError::SnapshotHashMismatch {
                recorded: self.hash.clone(),
                recomputed,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Hashing helpers
// ---------------------------------------------------------------------------

/// BLAKE3 hex digest of the hashable round state. The hash field itself is
/// not included.
fn compute_hash(
    config: &RoundConfig,
    now: NaiveDateTime,
    report: &MixReport,
    progress: &Progress,
) -> String {
    #[derive(Serialize)]
    struct HashableState<'a> {
        config: &'a RoundConfig,
        now: NaiveDateTime,
        report: &'a MixReport,
        progress: &'a Progress,
    }

    let hashable = HashableState {
        config,
        now,
        report,
        progress,
    };

    let json_bytes = serde_json::to_vec(&hashable)
        .expect("RoundSnapshot state should always be JSON-serializable");

    blake3::hash(&json_bytes).to_hex().to_string()
}

// ---------------------------------------------------------------------------
// Round snapshot/restore methods
// ---------------------------------------------------------------------------

impl Round {
    pub fn capture_snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            config: self.config.clone(),
            now: self.now,
            report: self.report.clone(),
            progress: self.progress.clone(),
            hash: self.state_hash(),
        }
    }

    /// Rebuild a round from `snapshot`.
    ///
    /// # Errors
    ///
    /// Fails if the hash does not match the data, or if the progress points
    /// outside the batch.
    pub fn restore_from_snapshot(snapshot: &RoundSnapshot) -> Result<Self, EngineError> {
        snapshot.verify()?;

        let len = snapshot.report.sets.len();
        let progress = &snapshot.progress;
        if progress.cursor > len {
            return Err(EngineError::InvalidSnapshot {
                details: format!("cursor {} beyond batch of {len}", progress.cursor),
            });
        }
        if progress.page >= PAGES.len() {
            return Err(EngineError::InvalidSnapshot {
                details: format!("page {} out of range", progress.page),
            });
        }
        if progress.judgments.len() != progress.cursor {
            return Err(EngineError::InvalidSnapshot {
                details: format!(
                    "{} judgments recorded for cursor {}",
                    progress.judgments.len(),
                    progress.cursor
                ),
            });
        }

        Ok(Self {
            config: snapshot.config.clone(),
            now: snapshot.now,
            report: snapshot.report.clone(),
            progress: progress.clone(),
        })
    }

    /// The BLAKE3 hash a snapshot taken now would carry.
    pub fn state_hash(&self) -> String {
        compute_hash(&self.config, self.now, &self.report, &self.progress)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
