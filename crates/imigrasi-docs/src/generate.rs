//! Document generators.
//!
//! A [`DocumentGenerator`] borrows the round's random source and the
//! reference tables, and is pinned to one instant (`now`). Every document it
//! produces is derived from a single passport, so a fresh [`DocumentSet`]
//! satisfies all cross-document invariants:
//!
//! - passport, visa, both boarding-pass passenger lines and the narration
//!   carry the same name;
//! - passport and visa agree on gender, birth date and nationality, and the
//!   narration repeats the nationality;
//! - the boarding pass lands in [`HOME_CITY`] three hours after take-off;
//! - the visa runs exactly 90 days, the passport exactly 10 years;
//! - the narrated age is `currentYear - birthYear`.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use imigrasi_docs::prelude::*;
//!
//! let tables = ReferenceTables::builtin();
//! let mut rng = DeskRng::seeded(1);
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 30, 0).unwrap();
//!
//! let mut generator = DocumentGenerator::new(&mut rng, &tables, now);
//! let set = generator.generate_document_set();
//! assert_eq!(set.passport.name, set.visa.name);
//! assert!(set.valid);
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use tracing::debug;

use crate::calendar;
use crate::model::{
    BoardingPass, ClassType, DocumentSet, FlightEndpoint, FlightMoment, Narration, Passport,
    Visa, BIRTH_YEARS, DOCUMENT_ID_LIMIT, FLIGHT_DURATION_HOURS, HOME_AIRPORT_CODE, HOME_CITY,
    PASSPORT_NUMBER_LEN, PASSPORT_VALIDITY_YEARS, VISA_VALIDITY_DAYS,
};
use crate::random::DeskRng;
use crate::reference::ReferenceTables;

const TERMINAL_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];
const GATE_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];
const SEAT_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

// ---------------------------------------------------------------------------
// Derived values shared with the audit layer
// ---------------------------------------------------------------------------

/// Expiry date of a passport issued on `issued_on`.
pub fn passport_expiry(issued_on: NaiveDate) -> NaiveDate {
    calendar::shift_years(issued_on, PASSPORT_VALIDITY_YEARS)
}

/// Expiry date of a visa issued on `issued_on`.
pub fn visa_expiry(issued_on: NaiveDate) -> NaiveDate {
    calendar::shift_days(issued_on, VISA_VALIDITY_DAYS)
}

/// Landing instant of a flight taking off at `take_off`.
pub fn landing_after(take_off: NaiveDateTime) -> NaiveDateTime {
    take_off + TimeDelta::hours(FLIGHT_DURATION_HOURS)
}

// ---------------------------------------------------------------------------
// DocumentGenerator
// ---------------------------------------------------------------------------

/// Produces internally consistent documents for one round.
pub struct DocumentGenerator<'a> {
    rng: &'a mut DeskRng,
    tables: &'a ReferenceTables,
    now: NaiveDateTime,
}

impl<'a> DocumentGenerator<'a> {
    /// `now` is truncated to whole seconds; boarding-pass times are printed
    /// without fractions.
    pub fn new(rng: &'a mut DeskRng, tables: &'a ReferenceTables, now: NaiveDateTime) -> Self {
        Self {
            rng,
            tables,
            now: now.with_nanosecond(0).unwrap_or(now),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn document_id(&mut self) -> u32 {
        self.rng.int_inclusive(0, DOCUMENT_ID_LIMIT - 1) as u32
    }

    /// A random identity with a passport issued within the last ten years.
    pub fn generate_passport(&mut self) -> Passport {
        let person = self.tables.random_person(self.rng).clone();
        let nationality = self.tables.random_nationality(self.rng).country.clone();
        let job = self.tables.random_job(self.rng).to_owned();

        let today = self.today();
        // (today - 10y, today]: never expired, never issued in the future.
        let decade_ago = calendar::shift_years(today, -PASSPORT_VALIDITY_YEARS);
        let earliest = calendar::shift_days(decade_ago, 1);
        let issued_on = self.rng.date_between(earliest, today);

        Passport {
            id: self.document_id(),
            signature: person.name.to_uppercase(),
            name: person.name,
            gender: person.gender,
            birth_date: self.rng.date_in_years(BIRTH_YEARS.0, BIRTH_YEARS.1),
            place_of_birth: nationality.clone(),
            nationality,
            job,
            passport_number: self.rng.alphanumeric(PASSPORT_NUMBER_LEN),
            issued_on,
            expires_on: passport_expiry(issued_on),
            valid: true,
            error: None,
        }
    }

    /// Visa issued today for the passport holder.
    pub fn generate_visa(&mut self, passport: &Passport) -> Visa {
        let issued_on = self.today();
        Visa {
            id: self.document_id(),
            name: passport.name.clone(),
            gender: passport.gender,
            birth_date: passport.birth_date,
            nationality: passport.nationality.clone(),
            issued_on,
            expires_on: visa_expiry(issued_on),
            valid: true,
            error: None,
        }
    }

    /// Inbound boarding pass to [`HOME_CITY`], departing today or tomorrow.
    pub fn generate_boarding_pass(&mut self, passport: &Passport) -> BoardingPass {
        let origin = self.tables.random_nationality(self.rng);
        let flight_from = FlightEndpoint {
            code: origin.airport_code.clone(),
            city: origin.country.clone(),
        };

        let take_off = if self.rng.coin() {
            self.now + TimeDelta::days(1)
        } else {
            self.now
        };

        let terminal = format!(
            "{}{}",
            self.rng.int_inclusive(1, 5),
            self.rng.pick(&TERMINAL_LETTERS)
        );
        let flight_code = format!("EP{}", self.rng.int_inclusive(100, 999));
        let gate = format!(
            "{}{}",
            self.rng.pick(&GATE_LETTERS),
            self.rng.int_inclusive(1, 5)
        );
        let seat = format!(
            "{}{}",
            self.rng.int_inclusive(1, 30),
            self.rng.pick(&SEAT_LETTERS)
        );
        let class_type = *self.rng.pick(&ClassType::ALL);

        BoardingPass {
            id: self.document_id(),
            passenger_top: passport.name.clone(),
            passenger_bottom: passport.name.clone(),
            flight_from,
            flight_to: FlightEndpoint {
                code: HOME_AIRPORT_CODE.to_owned(),
                city: HOME_CITY.to_owned(),
            },
            take_off: FlightMoment::from_datetime(take_off),
            landing: FlightMoment::from_datetime(landing_after(take_off)),
            terminal,
            flight_code,
            gate,
            seat,
            class_type,
            valid: true,
            error: None,
        }
    }

    /// What the passport holder says about themselves.
    pub fn generate_narration(&self, passport: &Passport) -> Narration {
        Narration {
            name: passport.name.clone(),
            age: self.today().year() - passport.birth_date.year(),
            nationality: passport.nationality.clone(),
            valid: true,
            error: None,
        }
    }

    /// All four documents for one fresh identity.
    pub fn generate_document_set(&mut self) -> DocumentSet {
        let passport = self.generate_passport();
        let visa = self.generate_visa(&passport);
        let boarding_pass = self.generate_boarding_pass(&passport);
        let narration = self.generate_narration(&passport);
        DocumentSet {
            passport,
            visa,
            boarding_pass,
            narration,
            valid: true,
        }
    }

    /// `count` independent, uncorrupted document sets.
    pub fn generate_batch(&mut self, count: usize) -> Vec<DocumentSet> {
        (0..count)
            .map(|index| {
                let set = self.generate_document_set();
                debug!(
                    index,
                    name = %set.passport.name,
                    nationality = %set.passport.nationality,
                    "generated document set"
                );
                set
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
