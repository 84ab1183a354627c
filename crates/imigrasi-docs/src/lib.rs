//! Imigrasi Docs -- synthetic travel documents for the immigration-desk game.
//!
//! This crate owns the data side of a round: the document records, the
//! read-only reference tables they are drawn from, the seedable random
//! source, and the generators that build one internally consistent
//! [`DocumentSet`](model::DocumentSet) per traveller. Deliberate corruption
//! and the validity predicate live one layer up, in `imigrasi-audit`.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use imigrasi_docs::prelude::*;
//!
//! let tables = ReferenceTables::builtin();
//! let mut rng = DeskRng::seeded(2026);
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(8, 0, 0).unwrap();
//!
//! let batch = DocumentGenerator::new(&mut rng, &tables, now).generate_batch(6);
//! assert_eq!(batch.len(), 6);
//! assert!(batch.iter().all(|set| set.valid));
//! println!("{}", batch[0].narration.text());
//! ```

#![deny(unsafe_code)]

pub mod calendar;
pub mod generate;
pub mod model;
pub mod random;
pub mod reference;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while building reference tables.
///
/// Generation itself is infallible once tables are validated.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// A table is too small for generation or mismatch rules to work.
    #[error("reference table '{table}' needs at least {required} distinct entries, found {found}")]
    TooFewEntries {
        table: &'static str,
        required: usize,
        found: usize,
    },

    /// Gender-flip rules need both genders in the person table.
    #[error("reference table 'persons' has no {gender} entry")]
    MissingGender { gender: model::Gender },

    /// A nationality named after the home city would make a destination
    /// mismatch indistinguishable from a correct boarding pass.
    #[error("nationality '{country}' collides with the home city")]
    HomeCityCollision { country: String },

    #[error("nationality '{country}' has an empty airport code")]
    EmptyAirportCode { country: String },

    #[error("failed to parse reference tables: {details}")]
    Parse { details: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::generate::DocumentGenerator;
    pub use crate::model::{
        BoardingPass, ClassType, Document, DocumentKind, DocumentSet, FlightEndpoint,
        FlightMoment, Gender, Narration, Passport, Visa, HOME_CITY,
    };
    pub use crate::random::DeskRng;
    pub use crate::reference::{NationalityRecord, PersonRecord, ReferenceTables};
    pub use crate::DocsError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
