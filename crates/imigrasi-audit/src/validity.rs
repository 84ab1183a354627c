//! The validity predicate: the single authority on whether a document set
//! should be approved.
//!
//! A set is valid iff every clause below holds:
//!
//! | Clause | Compared fields |
//! |--------|-----------------|
//! | visa name | `passport.name == visa.name` |
//! | boarding name | `passport.name == boardingPass.passengerTop` |
//! | narrated name | `narration.name == passport.name` |
//! | narrated nationality | `narration.nationality == passport.nationality` |
//! | narrated age | `narration.age == today.year - passport.birthDate.year` |
//! | passenger lines | `passengerTop == passengerBottom` |
//! | birth date | `passport.birthDate == visa.birthDate` |
//! | nationality | `passport.nationality == visa.nationality` |
//! | gender | `passport.gender == visa.gender` |
//! | destination | `boardingPass.flightTo.city == HOME_CITY` |
//! | landing | `boardingPass.landing == takeOff + 3h` |
//! | document flags | every document's own `valid` flag is set |
//!
//! The result is always computed from the fields; nothing is cached.

use std::fmt;

use chrono::NaiveDate;
use imigrasi_docs::calendar;
use imigrasi_docs::generate::landing_after;
use imigrasi_docs::model::{Document, DocumentKind, DocumentSet, HOME_CITY};
use serde::{Deserialize, Serialize};

/// One broken clause of the validity predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "clause", rename_all = "camelCase")]
pub enum Violation {
    VisaName,
    BoardingPassName,
    NarrationName,
    NarrationNationality,
    NarrationAge { expected: i32, actual: i32 },
    PassengerLines,
    BirthDate,
    Nationality,
    Gender,
    Destination { city: String },
    Landing,
    DocumentFlagged { kind: DocumentKind },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::VisaName => f.write_str("visa name differs from passport"),
            Violation::BoardingPassName => f.write_str("boarding pass name differs from passport"),
            Violation::NarrationName => f.write_str("narrated name differs from passport"),
            Violation::NarrationNationality => {
                f.write_str("narrated nationality differs from passport")
            }
            Violation::NarrationAge { expected, actual } => {
                write!(f, "narrated age {actual} but passport implies {expected}")
            }
            Violation::PassengerLines => f.write_str("boarding pass passenger lines differ"),
            Violation::BirthDate => f.write_str("visa birth date differs from passport"),
            Violation::Nationality => f.write_str("visa nationality differs from passport"),
            Violation::Gender => f.write_str("visa gender differs from passport"),
            Violation::Destination { city } => {
                write!(f, "boarding pass lands in {city}, not {HOME_CITY}")
            }
            Violation::Landing => f.write_str("landing is not three hours after take-off"),
            Violation::DocumentFlagged { kind } => write!(f, "{kind} is flagged invalid"),
        }
    }
}

/// Every clause `set` breaks, in table order.
pub fn violations(set: &DocumentSet, today: NaiveDate) -> Vec<Violation> {
    let passport = &set.passport;
    let visa = &set.visa;
    let boarding = &set.boarding_pass;
    let narration = &set.narration;

    let mut found = Vec::new();
    if passport.name != visa.name {
        found.push(Violation::VisaName);
    }
    if passport.name != boarding.passenger_top {
        found.push(Violation::BoardingPassName);
    }
    if narration.name != passport.name {
        found.push(Violation::NarrationName);
    }
    if narration.nationality != passport.nationality {
        found.push(Violation::NarrationNationality);
    }
    let expected_age = calendar::age_on(passport.birth_date, today);
    if narration.age != expected_age {
        found.push(Violation::NarrationAge {
            expected: expected_age,
            actual: narration.age,
        });
    }
    if boarding.passenger_top != boarding.passenger_bottom {
        found.push(Violation::PassengerLines);
    }
    if passport.birth_date != visa.birth_date {
        found.push(Violation::BirthDate);
    }
    if passport.nationality != visa.nationality {
        found.push(Violation::Nationality);
    }
    if passport.gender != visa.gender {
        found.push(Violation::Gender);
    }
    if boarding.flight_to.city != HOME_CITY {
        found.push(Violation::Destination {
            city: boarding.flight_to.city.clone(),
        });
    }
    if boarding.landing.to_datetime() != landing_after(boarding.take_off.to_datetime()) {
        found.push(Violation::Landing);
    }

    let flags = [
        (DocumentKind::Passport, passport.is_flagged_valid()),
        (DocumentKind::Visa, visa.is_flagged_valid()),
        (DocumentKind::BoardingPass, boarding.is_flagged_valid()),
        (DocumentKind::Narration, narration.is_flagged_valid()),
    ];
    found.extend(
        flags
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(kind, _)| Violation::DocumentFlagged { kind }),
    );
    found
}

/// `true` iff `set` breaks no clause.
pub fn is_valid(set: &DocumentSet, today: NaiveDate) -> bool {
    violations(set, today).is_empty()
}

/// Recompute and store `set.valid`. Returns the new value.
pub fn revalidate(set: &mut DocumentSet, today: NaiveDate) -> bool {
    set.valid = is_valid(set, today);
    set.valid
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
