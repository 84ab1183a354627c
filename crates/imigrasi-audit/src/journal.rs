//! Corruption journal: one entry per corruption operation applied to a batch.
//!
//! The [`CorruptionJournal`] records, in application order, which set was hit,
//! which rule fired, what it changed, and how the set's validity flag moved.
//! It is the audit trail behind every `valid == false` a player is scored
//! against.
//!
//! # Query API
//!
//! - **Set**: [`CorruptionJournal::entries_for_set`]
//! - **Document kind**: [`CorruptionJournal::entries_for_kind`]
//! - **Distinct sets touched**: [`CorruptionJournal::corrupted_sets`]
//!
//! # Example
//!
//! ```
//! use imigrasi_audit::journal::{CorruptionEntry, CorruptionJournal};
//! use imigrasi_audit::rules::{CorruptionOutcome, CorruptionRule, NarrationRule};
//! use imigrasi_docs::model::DocumentKind;
//!
//! let mut journal = CorruptionJournal::new();
//! journal.record(CorruptionEntry {
//!     operation: 0,
//!     set_index: 2,
//!     outcome: CorruptionOutcome {
//!         rule: CorruptionRule::Narration(NarrationRule::AgeMismatch),
//!         field: "narrationAge".to_owned(),
//!         before: serde_json::json!(36),
//!         after: serde_json::json!(71),
//!     },
//!     valid_before: true,
//!     valid_after: false,
//! });
//!
//! assert_eq!(journal.len(), 1);
//! assert_eq!(journal.entries_for_kind(DocumentKind::Narration).count(), 1);
//! ```

use std::collections::BTreeSet;

use imigrasi_docs::model::DocumentKind;
use serde::{Deserialize, Serialize};

use crate::rules::CorruptionOutcome;

// ---------------------------------------------------------------------------
// CorruptionEntry
// ---------------------------------------------------------------------------

/// A single corruption operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionEntry {
    /// Position of this operation within the mixing pass (0-based).
    pub operation: usize,
    /// Index of the document set inside the batch.
    pub set_index: usize,
    /// Rule, field and before/after values.
    pub outcome: CorruptionOutcome,
    /// The set's `valid` flag before the operation.
    pub valid_before: bool,
    /// The set's `valid` flag recomputed after the operation.
    pub valid_after: bool,
}

impl CorruptionEntry {
    pub fn kind(&self) -> DocumentKind {
        self.outcome.rule.kind()
    }
}

// ---------------------------------------------------------------------------
// CorruptionJournal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorruptionJournal {
    entries: Vec<CorruptionEntry>,
}

impl CorruptionJournal {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: CorruptionEntry) {
        self.entries.push(entry);
    }

    /// Number of corruption operations recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in application order.
    pub fn entries(&self) -> &[CorruptionEntry] {
        &self.entries
    }

    pub fn entries_for_set(&self, set_index: usize) -> impl Iterator<Item = &CorruptionEntry> {
        self.entries
            .iter()
            .filter(move |e| e.set_index == set_index)
    }

    pub fn entries_for_kind(&self, kind: DocumentKind) -> impl Iterator<Item = &CorruptionEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }

    /// Distinct set indices touched by at least one operation, ascending.
    pub fn corrupted_sets(&self) -> BTreeSet<usize> {
        self.entries.iter().map(|e| e.set_index).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
