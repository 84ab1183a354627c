//! Corruption rule catalogs, one closed enum per document type.
//!
//! A rule breaks exactly one consistency invariant of its document. Applying
//! it works on a copy of the target document:
//!
//! 1. clone the document out of the set,
//! 2. mutate one semantic aspect (a field, or a coupled issue/expiry pair),
//! 3. attach the rule's fixed Indonesian error message and clear `valid`,
//! 4. write the copy back into the set.
//!
//! Every replacement value is drawn so that it differs from the value the
//! validity predicate compares against. Selection is uniform over each
//! enum's `ALL` table, so every draw maps to a real mutation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use imigrasi_docs::calendar::{self, format_date};
use imigrasi_docs::generate::landing_after;
use imigrasi_docs::model::{
    BoardingPass, Document, DocumentKind, DocumentSet, Narration, Passport, Visa, BIRTH_YEARS,
    HOME_CITY, PASSPORT_NUMBER_LEN, PASSPORT_VALIDITY_YEARS,
};
use imigrasi_docs::random::DeskRng;
use imigrasi_docs::reference::ReferenceTables;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Lower bound of the issue year drawn by [`PassportRule::ValidityDuration`],
/// lowered to ten years back when the round is played before then.
const SKEWED_ISSUE_YEAR_FLOOR: i32 = 2010;
/// Exclusive upper bound of a mismatched narrated age.
const AGE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Per-document catalogs
// ---------------------------------------------------------------------------

macro_rules! rule_catalog {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $message:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every rule in this catalog.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The error message attached to a document broken by this rule.
            pub fn message(self) -> &'static str {
                match self {
                    $($name::$variant => $message),+
                }
            }

            /// Uniform pick over [`Self::ALL`].
            pub fn random(rng: &mut DeskRng) -> Self {
                *rng.pick(Self::ALL)
            }
        }
    };
}

rule_catalog! {
    /// Ways to break a passport.
    PassportRule {
        GenderFlip => "Passport: Jenis Kelamin Tidak Sesuai",
        NumberLength => "Passport: Nomor Paspor Tidak Sesuai",
        ValidityDuration => "Passport: Tanggal Berlaku Tidak Sesuai",
        AlreadyExpired => "Passport: Paspor Sudah Kadaluarsa",
        SignatureMismatch => "Passport: Tanda Tangan Tidak Sesuai",
    }
}

rule_catalog! {
    /// Ways to break a visa.
    VisaRule {
        NameMismatch => "Visa: Nama Tidak Sesuai",
        BirthDateMismatch => "Visa: Tanggal Lahir Tidak Sesuai",
        NationalityMismatch => "Visa: Kewarganegaraan Tidak Sesuai",
        ExpiryAnomaly => "Visa: Tanggal Berlaku Tidak Sesuai",
        GenderMismatch => "Visa: Jenis Kelamin Tidak Sesuai",
    }
}

rule_catalog! {
    /// Ways to break a boarding pass.
    BoardingPassRule {
        DestinationMismatch => "BoardingPass: Kota Pendaratan Tidak Sesuai",
        PassengerTopMismatch => "BoardingPass: Nama Penumpang Tidak Sesuai",
        PassengerBottomMismatch => "BoardingPass: Nama Penumpang Tidak Sesuai",
        LandingDateAnomaly => "BoardingPass: Tanggal Pendaratan Tidak Sesuai",
    }
}

rule_catalog! {
    /// Ways to break the spoken narration.
    NarrationRule {
        NameMismatch => "Narration: Nama Tidak Sesuai Pada Narasi",
        AgeMismatch => "Narration: Umur Tidak Sesuai Pada Narasi",
        NationalityMismatch => "Narration: Kewarganegaraan Tidak Sesuai Pada Narasi",
    }
}

// ---------------------------------------------------------------------------
// CorruptionRule
// ---------------------------------------------------------------------------

/// A rule from any of the four catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "document", content = "rule", rename_all = "camelCase")]
pub enum CorruptionRule {
    Passport(PassportRule),
    Visa(VisaRule),
    BoardingPass(BoardingPassRule),
    Narration(NarrationRule),
}

impl CorruptionRule {
    /// The document this rule mutates.
    pub fn kind(self) -> DocumentKind {
        match self {
            CorruptionRule::Passport(_) => DocumentKind::Passport,
            CorruptionRule::Visa(_) => DocumentKind::Visa,
            CorruptionRule::BoardingPass(_) => DocumentKind::BoardingPass,
            CorruptionRule::Narration(_) => DocumentKind::Narration,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CorruptionRule::Passport(rule) => rule.message(),
            CorruptionRule::Visa(rule) => rule.message(),
            CorruptionRule::BoardingPass(rule) => rule.message(),
            CorruptionRule::Narration(rule) => rule.message(),
        }
    }

    /// Uniform pick from the catalog of `kind`.
    pub fn random_for(kind: DocumentKind, rng: &mut DeskRng) -> Self {
        match kind {
            DocumentKind::Passport => CorruptionRule::Passport(PassportRule::random(rng)),
            DocumentKind::Visa => CorruptionRule::Visa(VisaRule::random(rng)),
            DocumentKind::BoardingPass => {
                CorruptionRule::BoardingPass(BoardingPassRule::random(rng))
            }
            DocumentKind::Narration => CorruptionRule::Narration(NarrationRule::random(rng)),
        }
    }

    /// Every rule of every catalog.
    pub fn all() -> Vec<Self> {
        PassportRule::ALL
            .iter()
            .map(|&r| CorruptionRule::Passport(r))
            .chain(VisaRule::ALL.iter().map(|&r| CorruptionRule::Visa(r)))
            .chain(
                BoardingPassRule::ALL
                    .iter()
                    .map(|&r| CorruptionRule::BoardingPass(r)),
            )
            .chain(NarrationRule::ALL.iter().map(|&r| CorruptionRule::Narration(r)))
            .collect()
    }
}

impl fmt::Display for CorruptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptionRule::Passport(rule) => write!(f, "passport.{rule:?}"),
            CorruptionRule::Visa(rule) => write!(f, "visa.{rule:?}"),
            CorruptionRule::BoardingPass(rule) => write!(f, "boardingPass.{rule:?}"),
            CorruptionRule::Narration(rule) => write!(f, "narration.{rule:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Context and outcome
// ---------------------------------------------------------------------------

/// Read-only inputs every rule needs besides the random source.
#[derive(Debug, Clone, Copy)]
pub struct CorruptionContext<'a> {
    pub tables: &'a ReferenceTables,
    /// The day the round is played.
    pub today: NaiveDate,
}

/// What a rule changed. Values are rendered the way the documents print
/// them (dates as `"DD MM YYYY"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionOutcome {
    pub rule: CorruptionRule,
    /// Serialized key of the touched field, e.g. `"passportNumber"` or
    /// `"issuedOn+expiresOn"` for coupled fields.
    pub field: String,
    pub before: Value,
    pub after: Value,
}

impl CorruptionOutcome {
    fn new(rule: CorruptionRule, field: &str, before: Value, after: Value) -> Self {
        Self {
            rule,
            field: field.to_owned(),
            before,
            after,
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Apply `rule` to the matching document of `set`.
///
/// The set-level `valid` flag is left untouched; the caller recomputes it
/// with [`crate::validity::revalidate`].
pub fn apply_rule(
    set: &mut DocumentSet,
    rule: CorruptionRule,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> CorruptionOutcome {
    match rule {
        CorruptionRule::Passport(r) => {
            let (copy, outcome) = corrupt_passport(&set.passport, r, rng, ctx);
            set.passport = copy;
            outcome
        }
        CorruptionRule::Visa(r) => {
            let (copy, outcome) = corrupt_visa(&set.visa, &set.passport, r, rng, ctx);
            set.visa = copy;
            outcome
        }
        CorruptionRule::BoardingPass(r) => {
            let (copy, outcome) =
                corrupt_boarding_pass(&set.boarding_pass, &set.passport, r, rng, ctx);
            set.boarding_pass = copy;
            outcome
        }
        CorruptionRule::Narration(r) => {
            let (copy, outcome) = corrupt_narration(&set.narration, &set.passport, r, rng, ctx);
            set.narration = copy;
            outcome
        }
    }
}

fn date_pair(issued_on: NaiveDate, expires_on: NaiveDate) -> Value {
    json!({
        "issuedOn": format_date(issued_on),
        "expiresOn": format_date(expires_on),
    })
}

/// Draw from `draw` until the value differs from `current`.
fn redraw_until_different<T: PartialEq>(
    rng: &mut DeskRng,
    current: &T,
    mut draw: impl FnMut(&mut DeskRng) -> T,
) -> T {
    loop {
        let candidate = draw(rng);
        if candidate != *current {
            return candidate;
        }
    }
}

pub fn corrupt_passport(
    passport: &Passport,
    rule: PassportRule,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> (Passport, CorruptionOutcome) {
    let mut fake = passport.clone();
    let tagged = CorruptionRule::Passport(rule);
    let outcome = match rule {
        PassportRule::GenderFlip => {
            fake.gender = passport.gender.flipped();
            CorruptionOutcome::new(tagged, "gender", json!(passport.gender), json!(fake.gender))
        }
        PassportRule::NumberLength => {
            let len = if rng.coin() {
                PASSPORT_NUMBER_LEN - 1
            } else {
                PASSPORT_NUMBER_LEN + 1
            };
            fake.passport_number = rng.alphanumeric(len);
            CorruptionOutcome::new(
                tagged,
                "passportNumber",
                json!(passport.passport_number),
                json!(fake.passport_number),
            )
        }
        PassportRule::ValidityDuration => {
            let this_year = ctx.today.year();
            let floor = SKEWED_ISSUE_YEAR_FLOOR.min(this_year - PASSPORT_VALIDITY_YEARS);
            let issued_year = rng.int_inclusive(floor as i64, this_year as i64) as i32;
            let years = if rng.coin() {
                PASSPORT_VALIDITY_YEARS - 2
            } else {
                PASSPORT_VALIDITY_YEARS + 2
            };
            fake.issued_on = rng.date_in_years(issued_year, issued_year);
            fake.expires_on = calendar::shift_years(fake.issued_on, years);
            CorruptionOutcome::new(
                tagged,
                "issuedOn+expiresOn",
                date_pair(passport.issued_on, passport.expires_on),
                date_pair(fake.issued_on, fake.expires_on),
            )
        }
        PassportRule::AlreadyExpired => {
            let earliest = calendar::shift_years(ctx.today, -PASSPORT_VALIDITY_YEARS);
            let yesterday = calendar::shift_days(ctx.today, -1);
            fake.expires_on = rng.date_between(earliest, yesterday);
            fake.issued_on = calendar::shift_years(fake.expires_on, -PASSPORT_VALIDITY_YEARS);
            CorruptionOutcome::new(
                tagged,
                "issuedOn+expiresOn",
                date_pair(passport.issued_on, passport.expires_on),
                date_pair(fake.issued_on, fake.expires_on),
            )
        }
        PassportRule::SignatureMismatch => {
            fake.signature = ctx.tables.other_name(rng, &passport.name).to_uppercase();
            CorruptionOutcome::new(
                tagged,
                "signature",
                json!(passport.signature),
                json!(fake.signature),
            )
        }
    };
    fake.flag_invalid(rule.message());
    (fake, outcome)
}

pub fn corrupt_visa(
    visa: &Visa,
    passport: &Passport,
    rule: VisaRule,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> (Visa, CorruptionOutcome) {
    let mut fake = visa.clone();
    let tagged = CorruptionRule::Visa(rule);
    let outcome = match rule {
        VisaRule::NameMismatch => {
            fake.name = ctx.tables.other_name(rng, &passport.name).to_owned();
            CorruptionOutcome::new(tagged, "name", json!(visa.name), json!(fake.name))
        }
        VisaRule::BirthDateMismatch => {
            fake.birth_date = redraw_until_different(rng, &passport.birth_date, |rng| {
                rng.date_in_years(BIRTH_YEARS.0, BIRTH_YEARS.1)
            });
            CorruptionOutcome::new(
                tagged,
                "birthDate",
                json!(format_date(visa.birth_date)),
                json!(format_date(fake.birth_date)),
            )
        }
        VisaRule::NationalityMismatch => {
            fake.nationality = ctx.tables.other_country(rng, &passport.nationality).to_owned();
            CorruptionOutcome::new(
                tagged,
                "nationality",
                json!(visa.nationality),
                json!(fake.nationality),
            )
        }
        VisaRule::ExpiryAnomaly => {
            fake.expires_on = if rng.coin() {
                // Expired before it was even issued.
                calendar::shift_days(visa.issued_on, -rng.int_inclusive(1, 30))
            } else {
                let days = if rng.coin() { 60 } else { 120 };
                calendar::shift_days(visa.issued_on, days)
            };
            CorruptionOutcome::new(
                tagged,
                "expiresOn",
                json!(format_date(visa.expires_on)),
                json!(format_date(fake.expires_on)),
            )
        }
        VisaRule::GenderMismatch => {
            fake.gender = passport.gender.flipped();
            CorruptionOutcome::new(tagged, "gender", json!(visa.gender), json!(fake.gender))
        }
    };
    fake.flag_invalid(rule.message());
    (fake, outcome)
}

pub fn corrupt_boarding_pass(
    boarding_pass: &BoardingPass,
    passport: &Passport,
    rule: BoardingPassRule,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> (BoardingPass, CorruptionOutcome) {
    let mut fake = boarding_pass.clone();
    let tagged = CorruptionRule::BoardingPass(rule);
    let outcome = match rule {
        BoardingPassRule::DestinationMismatch => {
            fake.flight_to.city = ctx.tables.other_country(rng, HOME_CITY).to_uppercase();
            CorruptionOutcome::new(
                tagged,
                "flightTo.city",
                json!(boarding_pass.flight_to.city),
                json!(fake.flight_to.city),
            )
        }
        BoardingPassRule::PassengerTopMismatch => {
            fake.passenger_top = ctx.tables.other_name(rng, &passport.name).to_uppercase();
            CorruptionOutcome::new(
                tagged,
                "passengerTop",
                json!(boarding_pass.passenger_top),
                json!(fake.passenger_top),
            )
        }
        BoardingPassRule::PassengerBottomMismatch => {
            fake.passenger_bottom = ctx.tables.other_name(rng, &passport.name).to_uppercase();
            CorruptionOutcome::new(
                tagged,
                "passengerBottom",
                json!(boarding_pass.passenger_bottom),
                json!(fake.passenger_bottom),
            )
        }
        BoardingPassRule::LandingDateAnomaly => {
            let expected = landing_after(boarding_pass.take_off.to_datetime()).date();
            let year = ctx.today.year();
            fake.landing.date = redraw_until_different(rng, &expected, |rng| {
                rng.date_in_years(year, year)
            });
            CorruptionOutcome::new(
                tagged,
                "landing.date",
                json!(format_date(boarding_pass.landing.date)),
                json!(format_date(fake.landing.date)),
            )
        }
    };
    fake.flag_invalid(rule.message());
    (fake, outcome)
}

pub fn corrupt_narration(
    narration: &Narration,
    passport: &Passport,
    rule: NarrationRule,
    rng: &mut DeskRng,
    ctx: &CorruptionContext<'_>,
) -> (Narration, CorruptionOutcome) {
    let mut fake = narration.clone();
    let tagged = CorruptionRule::Narration(rule);
    let outcome = match rule {
        NarrationRule::NameMismatch => {
            fake.name = ctx.tables.other_name(rng, &passport.name).to_owned();
            CorruptionOutcome::new(
                tagged,
                "narrationName",
                json!(narration.name),
                json!(fake.name),
            )
        }
        NarrationRule::AgeMismatch => {
            let expected = calendar::age_on(passport.birth_date, ctx.today);
            fake.age = redraw_until_different(rng, &expected, |rng| {
                rng.int_inclusive(0, AGE_LIMIT - 1) as i32
            });
            CorruptionOutcome::new(tagged, "narrationAge", json!(narration.age), json!(fake.age))
        }
        NarrationRule::NationalityMismatch => {
            fake.nationality = ctx.tables.other_country(rng, &passport.nationality).to_owned();
            CorruptionOutcome::new(
                tagged,
                "narrationNationality",
                json!(narration.nationality),
                json!(fake.nationality),
            )
        }
    };
    fake.flag_invalid(rule.message());
    (fake, outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use imigrasi_docs::generate::DocumentGenerator;
    use imigrasi_docs::model::{Gender, VISA_VALIDITY_DAYS};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn fresh_set(seed: u64) -> (DocumentSet, DeskRng) {
        let tables = ReferenceTables::builtin();
        let mut rng = DeskRng::seeded(seed);
        let now = today().and_hms_opt(9, 0, 0).unwrap();
        let set = DocumentGenerator::new(&mut rng, &tables, now).generate_document_set();
        (set, rng)
    }

    #[test]
    fn catalogs_cover_every_category() {
        assert_eq!(PassportRule::ALL.len(), 5);
        assert_eq!(VisaRule::ALL.len(), 5);
        assert_eq!(BoardingPassRule::ALL.len(), 4);
        assert_eq!(NarrationRule::ALL.len(), 3);
        assert_eq!(CorruptionRule::all().len(), 17);
    }

    #[test]
    fn random_for_stays_in_its_catalog() {
        let mut rng = DeskRng::seeded(1);
        for kind in DocumentKind::ALL {
            for _ in 0..50 {
                assert_eq!(CorruptionRule::random_for(kind, &mut rng).kind(), kind);
            }
        }
    }

    #[test]
    fn random_reaches_every_rule() {
        let mut rng = DeskRng::seeded(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            let kind = *rng.pick(&DocumentKind::ALL);
            seen.insert(CorruptionRule::random_for(kind, &mut rng));
        }
        assert_eq!(seen.len(), CorruptionRule::all().len());
    }

    #[test]
    fn every_rule_flags_its_document() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        for (seed, rule) in CorruptionRule::all().into_iter().enumerate() {
            let (mut set, mut rng) = fresh_set(seed as u64);
            let original = set.clone();
            let outcome = apply_rule(&mut set, rule, &mut rng, &ctx);
            assert_eq!(outcome.rule, rule);
            assert_ne!(outcome.before, outcome.after, "{rule} changed nothing");
            assert_eq!(set.error_for(rule.kind()), Some(rule.message()));
            assert!(!set.documents_flagged_valid());
            assert_ne!(set, original);
        }
    }

    #[test]
    fn gender_flip_on_male_passport() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (mut set, mut rng) = fresh_set(3);
        set.passport.gender = Gender::Male;
        set.visa.gender = Gender::Male;
        apply_rule(
            &mut set,
            CorruptionRule::Passport(PassportRule::GenderFlip),
            &mut rng,
            &ctx,
        );
        assert_eq!(set.passport.gender, Gender::Female);
        assert!(!set.passport.valid);
        assert_eq!(
            set.passport.error.as_deref(),
            Some("Passport: Jenis Kelamin Tidak Sesuai")
        );
    }

    #[test]
    fn number_length_is_seven_or_nine() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(4);
        for _ in 0..50 {
            let (fake, _) =
                corrupt_passport(&set.passport, PassportRule::NumberLength, &mut rng, &ctx);
            assert!(matches!(fake.passport_number.len(), 7 | 9));
        }
    }

    #[test]
    fn validity_duration_is_never_ten_years() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(5);
        for _ in 0..100 {
            let (fake, _) =
                corrupt_passport(&set.passport, PassportRule::ValidityDuration, &mut rng, &ctx);
            let span = fake.expires_on.year() - fake.issued_on.year();
            assert!(span == 8 || span == 12);
            assert!((2010..=2026).contains(&fake.issued_on.year()));
        }
    }

    #[test]
    fn validity_duration_before_the_floor_year() {
        let tables = ReferenceTables::builtin();
        let today = NaiveDate::from_ymd_opt(2005, 3, 14).unwrap();
        let ctx = CorruptionContext {
            tables: &tables,
            today,
        };
        let mut rng = DeskRng::seeded(12);
        let now = today.and_hms_opt(9, 0, 0).unwrap();
        let set = DocumentGenerator::new(&mut rng, &tables, now).generate_document_set();
        for _ in 0..100 {
            let (fake, _) =
                corrupt_passport(&set.passport, PassportRule::ValidityDuration, &mut rng, &ctx);
            assert!((1995..=2005).contains(&fake.issued_on.year()));
            let span = fake.expires_on.year() - fake.issued_on.year();
            assert!(span == 8 || span == 12);
        }
    }

    #[test]
    fn already_expired_is_in_the_past() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(6);
        for _ in 0..100 {
            let (fake, _) =
                corrupt_passport(&set.passport, PassportRule::AlreadyExpired, &mut rng, &ctx);
            assert!(fake.expires_on < today());
            assert_eq!(fake.expires_on.year() - fake.issued_on.year(), 10);
        }
    }

    #[test]
    fn visa_expiry_anomaly_breaks_ninety_days() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(7);
        let mut saw_expired = false;
        let mut saw_skewed = false;
        for _ in 0..100 {
            let (fake, _) =
                corrupt_visa(&set.visa, &set.passport, VisaRule::ExpiryAnomaly, &mut rng, &ctx);
            let days = (fake.expires_on - fake.issued_on).num_days();
            assert_ne!(days, VISA_VALIDITY_DAYS);
            if days < 0 {
                assert!((-30..=-1).contains(&days));
                saw_expired = true;
            } else {
                assert!(days == 60 || days == 120);
                saw_skewed = true;
            }
        }
        assert!(saw_expired && saw_skewed);
    }

    #[test]
    fn landing_anomaly_moves_the_date() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(8);
        for _ in 0..100 {
            let (fake, _) = corrupt_boarding_pass(
                &set.boarding_pass,
                &set.passport,
                BoardingPassRule::LandingDateAnomaly,
                &mut rng,
                &ctx,
            );
            assert_ne!(fake.landing.date, set.boarding_pass.landing.date);
            assert_eq!(fake.landing.time, set.boarding_pass.landing.time);
        }
    }

    #[test]
    fn narration_age_mismatch_never_matches() {
        let tables = ReferenceTables::builtin();
        let ctx = CorruptionContext {
            tables: &tables,
            today: today(),
        };
        let (set, mut rng) = fresh_set(9);
        for _ in 0..200 {
            let (fake, _) = corrupt_narration(
                &set.narration,
                &set.passport,
                NarrationRule::AgeMismatch,
                &mut rng,
                &ctx,
            );
            assert_ne!(fake.age, set.narration.age);
            assert!((0..100).contains(&fake.age));
        }
    }

    #[test]
    fn rule_serializes_with_document_tag() {
        let rule = CorruptionRule::Visa(VisaRule::GenderMismatch);
        let json = serde_json::to_value(rule).unwrap();
        assert_eq!(json, json!({"document": "visa", "rule": "GenderMismatch"}));
        assert_eq!(rule.to_string(), "visa.GenderMismatch");
    }
}
