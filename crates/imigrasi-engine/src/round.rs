//! The round driver.
//!
//! A [`Round`] owns one mixed batch and walks through it set by set. Each
//! set is resolved exactly once, either by a player [`Verdict`] or by the
//! countdown running out:
//!
//! 1. [`Round::judge`] scores a point when the verdict agrees with the set's
//!    ground truth, then moves on.
//! 2. [`Round::advance_clock`] accumulates time on the current set; when the
//!    limit is reached the set is skipped without scoring.
//! 3. Moving to the next set resets the countdown and flips the viewer back
//!    to the passport page.
//!
//! Once every set is resolved the round is finished and [`Round::stars`]
//! gives the end-of-round rating.

use chrono::NaiveDateTime;
use imigrasi_audit::mixer::{self, MixReport};
use imigrasi_docs::model::{DocumentKind, DocumentSet};
use imigrasi_docs::reference::ReferenceTables;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RoundConfig;
use crate::EngineError;

/// Upper bound of the end-of-round rating.
pub const MAX_STARS: u32 = 3;

/// Pages of the document viewer, in browsing order.
pub const PAGES: [DocumentKind; 3] = [
    DocumentKind::Passport,
    DocumentKind::Visa,
    DocumentKind::BoardingPass,
];

// ---------------------------------------------------------------------------
// Verdict / Outcome / Judgment
// ---------------------------------------------------------------------------

/// The player's decision on one traveller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Declined,
}

impl Verdict {
    /// The verdict a perfect player gives for `set`.
    pub fn for_set(set: &DocumentSet) -> Self {
        if set.valid {
            Verdict::Approved
        } else {
            Verdict::Declined
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
    TimedOut,
}

/// How one set was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub set_index: usize,
    /// `None` when the countdown ran out.
    pub verdict: Option<Verdict>,
    pub expected: Verdict,
    pub outcome: Outcome,
    /// The first document error of the set, if it was forged.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// The mutable part of a round. Everything else is fixed at generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Index of the set under inspection; equals the batch length once the
    /// round is finished.
    pub cursor: usize,
    /// Index into [`PAGES`].
    pub page: usize,
    pub elapsed_ms: u64,
    pub score: u32,
    pub judgments: Vec<Judgment>,
}

// ---------------------------------------------------------------------------
// RoundSummary
// ---------------------------------------------------------------------------

/// End-of-round figures for the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub total: usize,
    pub score: u32,
    pub stars: u32,
    pub correct: usize,
    pub wrong: usize,
    pub timed_out: usize,
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub(crate) config: RoundConfig,
    pub(crate) now: NaiveDateTime,
    pub(crate) report: MixReport,
    pub(crate) progress: Progress,
}

impl Round {
    /// Validate `config`, load its reference tables, and generate the batch.
    pub fn generate(config: &RoundConfig, now: NaiveDateTime) -> Result<Self, EngineError> {
        config.validate()?;
        let tables = config.tables()?;
        Self::generate_with_tables(config, &tables, now)
    }

    /// Like [`generate`](Self::generate) with tables the caller already holds.
    /// `config.tables_path` is ignored.
    pub fn generate_with_tables(
        config: &RoundConfig,
        tables: &ReferenceTables,
        now: NaiveDateTime,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        tables.validate()?;
        let mut rng = config.rng();
        let report = mixer::generate_batch(
            config.batch_size,
            &mut rng,
            tables,
            now,
            config.mix_policy,
        );
        info!(
            sets = report.sets.len(),
            num_fakes = report.num_fakes,
            invalid = report.invalid_count(),
            seed = ?config.seed,
            "round generated"
        );
        Ok(Self {
            config: config.clone(),
            now,
            report,
            progress: Progress::default(),
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// The instant the batch was generated for.
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn report(&self) -> &MixReport {
        &self.report
    }

    pub fn sets(&self) -> &[DocumentSet] {
        &self.report.sets
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress.cursor >= self.report.sets.len()
    }

    /// Index of the set under inspection, `None` once finished.
    pub fn current_index(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.progress.cursor)
    }

    pub fn current(&self) -> Option<&DocumentSet> {
        self.report.sets.get(self.progress.cursor)
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn judgments(&self) -> &[Judgment] {
        &self.progress.judgments
    }

    /// Resolve the current set with `verdict`.
    ///
    /// # Errors
    ///
    /// [`EngineError::RoundFinished`] when every set is already resolved;
    /// the round is left untouched.
    pub fn judge(&mut self, verdict: Verdict) -> Result<Judgment, EngineError> {
        let Some(set) = self.current() else {
            let resolved = self.progress.judgments.len();
            warn!(?verdict, resolved, "judgment rejected: round finished");
            return Err(EngineError::RoundFinished { resolved });
        };

        let expected = Verdict::for_set(set);
        let outcome = if verdict == expected {
            Outcome::Correct
        } else {
            Outcome::Wrong
        };
        let judgment = Judgment {
            set_index: self.progress.cursor,
            verdict: Some(verdict),
            expected,
            outcome,
            reason: set.first_error().map(str::to_owned),
        };
        if outcome == Outcome::Correct {
            self.progress.score += 1;
        }
        debug!(
            set_index = judgment.set_index,
            ?verdict,
            ?outcome,
            score = self.progress.score,
            "judged set"
        );
        self.resolve(judgment.clone());
        Ok(judgment)
    }

    /// Add `elapsed_ms` to the current set's countdown.
    ///
    /// Returns the timeout judgment when this call exhausted the limit. At
    /// most one set times out per call: time beyond the limit is dropped
    /// along with the reset. Does nothing once the round is finished.
    pub fn advance_clock(&mut self, elapsed_ms: u64) -> Option<Judgment> {
        let set = self.current()?;
        let expected = Verdict::for_set(set);
        let reason = set.first_error().map(str::to_owned);

        self.progress.elapsed_ms = self.progress.elapsed_ms.saturating_add(elapsed_ms);
        if self.progress.elapsed_ms < self.config.time_limit_ms {
            return None;
        }

        let judgment = Judgment {
            set_index: self.progress.cursor,
            verdict: None,
            expected,
            outcome: Outcome::TimedOut,
            reason,
        };
        debug!(set_index = judgment.set_index, "countdown expired");
        self.resolve(judgment.clone());
        Some(judgment)
    }

    /// Milliseconds left on the current set's countdown.
    pub fn remaining_ms(&self) -> u64 {
        self.config
            .time_limit_ms
            .saturating_sub(self.progress.elapsed_ms)
    }

    /// `true` once less than half of the countdown is left.
    pub fn time_running_low(&self) -> bool {
        self.remaining_ms().saturating_mul(2) < self.config.time_limit_ms
    }

    /// The document page currently shown.
    pub fn page(&self) -> DocumentKind {
        PAGES[self.progress.page % PAGES.len()]
    }

    /// Flip forward, wrapping from the boarding pass to the passport.
    pub fn next_page(&mut self) -> DocumentKind {
        self.progress.page = (self.progress.page + 1) % PAGES.len();
        self.page()
    }

    /// Flip back, wrapping from the passport to the boarding pass.
    pub fn prev_page(&mut self) -> DocumentKind {
        self.progress.page = (self.progress.page + PAGES.len() - 1) % PAGES.len();
        self.page()
    }

    /// End-of-round rating: one star per two points, capped at [`MAX_STARS`].
    pub fn stars(&self) -> u32 {
        (self.progress.score / 2).min(MAX_STARS)
    }

    pub fn summary(&self) -> RoundSummary {
        let count = |wanted: Outcome| {
            self.progress
                .judgments
                .iter()
                .filter(|j| j.outcome == wanted)
                .count()
        };
        RoundSummary {
            total: self.report.sets.len(),
            score: self.progress.score,
            stars: self.stars(),
            correct: count(Outcome::Correct),
            wrong: count(Outcome::Wrong),
            timed_out: count(Outcome::TimedOut),
        }
    }

    fn resolve(&mut self, judgment: Judgment) {
        self.progress.judgments.push(judgment);
        self.progress.cursor += 1;
        self.progress.elapsed_ms = 0;
        self.progress.page = 0;
        if self.is_finished() {
            info!(
                score = self.progress.score,
                stars = self.stars(),
                "round finished"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
