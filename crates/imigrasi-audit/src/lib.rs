//! Imigrasi Audit -- forging and checking document sets.
//!
//! Builds on [`imigrasi_docs`] to turn a batch of consistent document sets
//! into a playable round:
//!
//! - [`rules`]: closed catalogs of corruption rules, one per document type,
//!   each attaching a fixed Indonesian error message.
//! - [`validity`]: the validity predicate and the list of clauses a set
//!   breaks.
//! - [`mixer`]: picks how many and which sets to forge and keeps every
//!   set's `valid` flag in sync with the predicate.
//! - [`journal`]: the record of every corruption operation.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use imigrasi_audit::prelude::*;
//!
//! let tables = ReferenceTables::builtin();
//! let mut rng = DeskRng::seeded(6);
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(8, 0, 0).unwrap();
//!
//! let report = generate_batch(6, &mut rng, &tables, now, MixPolicy::default());
//! assert_eq!(report.journal.len(), report.num_fakes);
//! assert!(report.sets.iter().any(|set| !set.valid));
//! ```

#![deny(unsafe_code)]

pub mod journal;
pub mod mixer;
pub mod rules;
pub mod validity;

/// Re-export the document crate for convenience.
pub use imigrasi_docs;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// A corruption targeted a set that is not in the batch.
    #[error("set index {index} out of range for a batch of {len}")]
    SetIndexOutOfRange { index: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use imigrasi_docs::prelude::*;

    pub use crate::journal::{CorruptionEntry, CorruptionJournal};
    pub use crate::mixer::{corrupt_at, generate_batch, mix_batch, MixPolicy, MixReport};
    pub use crate::rules::{
        apply_rule, BoardingPassRule, CorruptionContext, CorruptionOutcome, CorruptionRule,
        NarrationRule, PassportRule, VisaRule,
    };
    pub use crate::validity::{is_valid, revalidate, violations, Violation};
    pub use crate::AuditError;
}
