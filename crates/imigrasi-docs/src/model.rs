//! Document records: passport, visa, boarding pass, narration, and the
//! [`DocumentSet`] a player judges as one unit.
//!
//! Field names serialize in camelCase (`passengerTop`, `narrationName`, ...)
//! so the presentation layer reads the same keys it always has. Dates travel
//! as `"DD MM YYYY"`, clock times as `"HH:MM:SS"`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::doc_date;

// ---------------------------------------------------------------------------
// Canonical constants
// ---------------------------------------------------------------------------

/// Every consistent boarding pass lands here.
pub const HOME_CITY: &str = "Banjarmasin";
/// Airport code of [`HOME_CITY`].
pub const HOME_AIRPORT_CODE: &str = "BDJ";
/// Length of a well-formed passport number.
pub const PASSPORT_NUMBER_LEN: usize = 8;
/// A passport expires on the tenth anniversary of its issue date.
pub const PASSPORT_VALIDITY_YEARS: i32 = 10;
/// A visa expires this many days after issue.
pub const VISA_VALIDITY_DAYS: i64 = 90;
/// Landing is always this many hours after take-off.
pub const FLIGHT_DURATION_HOURS: i64 = 3;
/// Birth dates are drawn from this inclusive year range.
pub const BIRTH_YEARS: (i32, i32) = (1960, 2000);
/// Exclusive upper bound of document ids.
pub const DOCUMENT_ID_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender as printed on passport and visa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The other gender.
    pub fn flipped(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        })
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The four document types inside a [`DocumentSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Passport,
    Visa,
    BoardingPass,
    Narration,
}

impl DocumentKind {
    /// All kinds, in display order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Passport,
        DocumentKind::Visa,
        DocumentKind::BoardingPass,
        DocumentKind::Narration,
    ];
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentKind::Passport => "passport",
            DocumentKind::Visa => "visa",
            DocumentKind::BoardingPass => "boardingPass",
            DocumentKind::Narration => "narration",
        })
    }
}

// ---------------------------------------------------------------------------
// Document trait
// ---------------------------------------------------------------------------

/// Per-document validity bookkeeping shared by all four document types.
///
/// The `valid` flag and `error` message are domain data: a corruption rule
/// clears the flag and attaches the message describing what it broke.
pub trait Document {
    /// Which slot of a [`DocumentSet`] this document occupies.
    const KIND: DocumentKind;

    /// The document's own validity flag.
    fn is_flagged_valid(&self) -> bool;

    /// Human-readable description of the broken field, if any.
    fn error(&self) -> Option<&str>;

    /// Clear the validity flag and record `error`.
    fn flag_invalid(&mut self, error: &str);
}

macro_rules! impl_document {
    ($ty:ty, $kind:expr) => {
        impl Document for $ty {
            const KIND: DocumentKind = $kind;

            fn is_flagged_valid(&self) -> bool {
                self.valid
            }

            fn error(&self) -> Option<&str> {
                self.error.as_deref()
            }

            fn flag_invalid(&mut self, error: &str) {
                self.valid = false;
                self.error = Some(error.to_owned());
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Passport
// ---------------------------------------------------------------------------

/// The anchor document: every other document copies its identity from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub id: u32,
    pub name: String,
    pub gender: Gender,
    #[serde(with = "doc_date")]
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub place_of_birth: String,
    pub job: String,
    pub passport_number: String,
    #[serde(with = "doc_date")]
    pub issued_on: NaiveDate,
    #[serde(with = "doc_date")]
    pub expires_on: NaiveDate,
    /// The holder's name in uppercase.
    pub signature: String,
    pub valid: bool,
    pub error: Option<String>,
}

impl_document!(Passport, DocumentKind::Passport);

// ---------------------------------------------------------------------------
// Visa
// ---------------------------------------------------------------------------

/// Entry visa, issued on the day of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visa {
    pub id: u32,
    pub name: String,
    pub gender: Gender,
    #[serde(with = "doc_date")]
    pub birth_date: NaiveDate,
    pub nationality: String,
    #[serde(with = "doc_date")]
    pub issued_on: NaiveDate,
    #[serde(with = "doc_date")]
    pub expires_on: NaiveDate,
    pub valid: bool,
    pub error: Option<String>,
}

impl_document!(Visa, DocumentKind::Visa);

// ---------------------------------------------------------------------------
// BoardingPass
// ---------------------------------------------------------------------------

/// One end of a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    pub code: String,
    pub city: String,
}

/// A printed date + time pair on the boarding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightMoment {
    #[serde(with = "doc_date")]
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl FlightMoment {
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self {
            date: at.date(),
            time: at.time(),
        }
    }

    pub fn to_datetime(self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Cabin class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassType {
    Business,
    Economy,
    First,
}

impl ClassType {
    pub const ALL: [ClassType; 3] = [ClassType::Business, ClassType::Economy, ClassType::First];
}

/// Boarding pass for the inbound flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPass {
    pub id: u32,
    pub passenger_top: String,
    pub passenger_bottom: String,
    pub flight_from: FlightEndpoint,
    pub flight_to: FlightEndpoint,
    pub take_off: FlightMoment,
    pub landing: FlightMoment,
    /// Digit 1-5 followed by a letter A-D.
    pub terminal: String,
    /// `"EP"` followed by three digits.
    pub flight_code: String,
    /// Letter A-E followed by a digit 1-5.
    pub gate: String,
    /// Row 1-30 followed by a letter A-D.
    pub seat: String,
    pub class_type: ClassType,
    pub valid: bool,
    pub error: Option<String>,
}

impl_document!(BoardingPass, DocumentKind::BoardingPass);

// ---------------------------------------------------------------------------
// Narration
// ---------------------------------------------------------------------------

/// What the traveller says out loud at the desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    #[serde(rename = "narrationName")]
    pub name: String,
    #[serde(rename = "narrationAge")]
    pub age: i32,
    #[serde(rename = "narrationNationality")]
    pub nationality: String,
    pub valid: bool,
    pub error: Option<String>,
}

impl_document!(Narration, DocumentKind::Narration);

impl Narration {
    /// The spoken line shown on screen (Indonesian).
    pub fn text(&self) -> String {
        format!(
            "Hai, saya {}. Saya berusia {} tahun, saya berasal dari negara {}, saya berniat melakukan perjalanan...",
            self.name, self.age, self.nationality
        )
    }
}

// ---------------------------------------------------------------------------
// DocumentSet
// ---------------------------------------------------------------------------

/// Passport, visa, boarding pass and narration for one traveller.
///
/// `valid` is the ground truth used for scoring. It is owned by the audit
/// layer, which recomputes it after every corruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSet {
    pub passport: Passport,
    pub visa: Visa,
    pub boarding_pass: BoardingPass,
    pub narration: Narration,
    pub valid: bool,
}

impl DocumentSet {
    /// First document error in passport, visa, boarding pass, narration order.
    pub fn first_error(&self) -> Option<&str> {
        self.passport
            .error()
            .or_else(|| self.visa.error())
            .or_else(|| self.boarding_pass.error())
            .or_else(|| self.narration.error())
    }

    /// Error attached to one specific document.
    pub fn error_for(&self, kind: DocumentKind) -> Option<&str> {
        match kind {
            DocumentKind::Passport => self.passport.error(),
            DocumentKind::Visa => self.visa.error(),
            DocumentKind::BoardingPass => self.boarding_pass.error(),
            DocumentKind::Narration => self.narration.error(),
        }
    }

    /// `true` when none of the four documents has been flagged.
    pub fn documents_flagged_valid(&self) -> bool {
        self.passport.is_flagged_valid()
            && self.visa.is_flagged_valid()
            && self.boarding_pass.is_flagged_valid()
            && self.narration.is_flagged_valid()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
