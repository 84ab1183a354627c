//! Batch mixer: turns a batch of consistent document sets into a round where
//! some sets are forged.
//!
//! The mixer draws `num_fakes` from `1..=len`, then performs that many
//! corruption operations. Each operation picks a set, picks one of the four
//! document kinds uniformly, fires a uniformly chosen rule from that kind's
//! catalog, and immediately recomputes the set's `valid` flag.
//!
//! With [`MixPolicy::WithReplacement`] the same set may be hit several
//! times, so the number of invalid sets can be smaller than `num_fakes`.
//! [`MixPolicy::DistinctSets`] picks `num_fakes` different sets instead.

use chrono::NaiveDateTime;
use imigrasi_docs::generate::DocumentGenerator;
use imigrasi_docs::model::{DocumentKind, DocumentSet};
use imigrasi_docs::random::DeskRng;
use imigrasi_docs::reference::ReferenceTables;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::journal::{CorruptionEntry, CorruptionJournal};
use crate::rules::{apply_rule, CorruptionContext, CorruptionRule};
use crate::validity;
use crate::AuditError;

// ---------------------------------------------------------------------------
// MixPolicy
// ---------------------------------------------------------------------------

/// How target sets are chosen for corruption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixPolicy {
    /// Pick a set per operation, with replacement.
    #[default]
    WithReplacement,
    /// Pick `num_fakes` distinct sets, one operation each.
    DistinctSets,
}

// ---------------------------------------------------------------------------
// MixReport
// ---------------------------------------------------------------------------

/// A mixed batch and the record of how it was mixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixReport {
    pub sets: Vec<DocumentSet>,
    /// Number of corruption operations performed.
    pub num_fakes: usize,
    pub journal: CorruptionJournal,
}

impl MixReport {
    /// Number of sets whose ground truth is "decline".
    pub fn invalid_count(&self) -> usize {
        self.sets.iter().filter(|s| !s.valid).count()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Apply `rule` to `sets[index]`, recompute its validity, and describe what
/// happened. `operation` is the ordinal stored in the journal entry.
pub fn corrupt_at(
    sets: &mut [DocumentSet],
    index: usize,
    rule: CorruptionRule,
    operation: usize,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> Result<CorruptionEntry, AuditError> {
    let len = sets.len();
    let set = sets
        .get_mut(index)
        .ok_or(AuditError::SetIndexOutOfRange { index, len })?;

    let valid_before = set.valid;
    let outcome = apply_rule(set, rule, rng, ctx);
    let valid_after = validity::revalidate(set, ctx.today);
    debug!(
        operation,
        set_index = index,
        rule = %rule,
        field = %outcome.field,
        valid_after,
        "applied corruption"
    );

    Ok(CorruptionEntry {
        operation,
        set_index: index,
        outcome,
        valid_before,
        valid_after,
    })
}

/// Corrupt a random subset of `sets`.
///
/// An empty batch comes back unchanged with `num_fakes == 0`.
pub fn mix_batch(
    mut sets: Vec<DocumentSet>,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
    policy: MixPolicy,
) -> MixReport {
    let mut journal = CorruptionJournal::new();
    if sets.is_empty() {
        return MixReport {
            sets,
            num_fakes: 0,
            journal,
        };
    }

    let len = sets.len();
    let num_fakes = rng.int_inclusive(1, len as i64) as usize;
    let targets: Vec<usize> = match policy {
        MixPolicy::WithReplacement => (0..num_fakes).map(|_| rng.index(len)).collect(),
        MixPolicy::DistinctSets => rng.distinct_indices(len, num_fakes),
    };

    for (operation, index) in targets.into_iter().enumerate() {
        let kind = *rng.pick(&DocumentKind::ALL);
        let rule = CorruptionRule::random_for(kind, rng);
        // `index` comes from `0..len`, so this cannot fail.
        if let Ok(entry) = corrupt_at(&mut sets, index, rule, operation, rng, ctx) {
            journal.record(entry);
        }
    }

    let report = MixReport {
        sets,
        num_fakes,
        journal,
    };
    info!(
        sets = len,
        num_fakes,
        invalid = report.invalid_count(),
        ?policy,
        "mixed batch"
    );
    report
}

/// Generate `count` fresh sets as of `now` and mix them: the full
/// per-round entry point.
pub fn generate_batch(
    count: usize,
    rng: &mut DeskRng,
    tables: &ReferenceTables,
    now: NaiveDateTime,
    policy: MixPolicy,
) -> MixReport {
    let mut generator = DocumentGenerator::new(rng, tables, now);
    let today = generator.today();
    let sets = generator.generate_batch(count);
    let ctx = CorruptionContext { tables, today };
    mix_batch(sets, rng, &ctx, policy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
