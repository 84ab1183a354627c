//! Scenario tests for corruption, validity and batch mixing.
//!
//! Each test drives the public API the way the round driver does: generate
//! a batch for a fixed instant, corrupt it, and check the ground truth the
//! scoring layer will read.

use chrono::{NaiveDate, NaiveDateTime};
use imigrasi_audit::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(14, 45, 0)
        .unwrap()
}

fn today() -> NaiveDate {
    now().date()
}

fn fresh_sets(seed: u64, count: usize) -> (Vec<DocumentSet>, DeskRng) {
    let tables = ReferenceTables::builtin();
    let mut rng = DeskRng::seeded(seed);
    let sets = DocumentGenerator::new(&mut rng, &tables, now()).generate_batch(count);
    (sets, rng)
}

// ---------------------------------------------------------------------------
// Fresh batches
// ---------------------------------------------------------------------------

#[test]
fn uncorrupted_sets_are_valid() {
    for seed in 0..100 {
        let (sets, _) = fresh_sets(seed, 6);
        for set in &sets {
            assert!(is_valid(set, today()), "seed {seed}: {:?}", violations(set, today()));
        }
    }
}

// ---------------------------------------------------------------------------
// Single rule application
// ---------------------------------------------------------------------------

#[test]
fn every_rule_invalidates_with_its_own_message() {
    let tables = ReferenceTables::builtin();
    let ctx = CorruptionContext {
        tables: &tables,
        today: today(),
    };
    for rule in CorruptionRule::all() {
        for seed in 0..20 {
            let (mut sets, mut rng) = fresh_sets(seed, 1);
            let entry = corrupt_at(&mut sets, 0, rule, 0, &mut rng, &ctx).unwrap();
            let set = &sets[0];
            assert!(!entry.valid_after);
            assert!(!set.valid);
            assert!(!is_valid(set, today()));
            assert_eq!(set.error_for(rule.kind()), Some(rule.message()));
            assert_eq!(set.first_error(), Some(rule.message()));
        }
    }
}

#[test]
fn passport_gender_flip_scenario() {
    let tables = ReferenceTables::builtin();
    let ctx = CorruptionContext {
        tables: &tables,
        today: today(),
    };
    let (mut sets, mut rng) = fresh_sets(10, 1);
    sets[0].passport.gender = Gender::Male;
    sets[0].visa.gender = Gender::Male;
    assert!(revalidate(&mut sets[0], today()));

    corrupt_at(
        &mut sets,
        0,
        CorruptionRule::Passport(PassportRule::GenderFlip),
        0,
        &mut rng,
        &ctx,
    )
    .unwrap();

    let set = &sets[0];
    assert_eq!(set.passport.gender, Gender::Female);
    assert!(!set.passport.valid);
    assert_eq!(
        set.passport.error.as_deref(),
        Some("Passport: Jenis Kelamin Tidak Sesuai")
    );
    assert!(!is_valid(set, today()));
}

#[test]
fn destination_mismatch_scenario() {
    let tables = ReferenceTables::builtin();
    let ctx = CorruptionContext {
        tables: &tables,
        today: today(),
    };
    let (mut sets, mut rng) = fresh_sets(11, 1);
    corrupt_at(
        &mut sets,
        0,
        CorruptionRule::BoardingPass(BoardingPassRule::DestinationMismatch),
        0,
        &mut rng,
        &ctx,
    )
    .unwrap();

    let set = &sets[0];
    assert!(!is_valid(set, today()));
    assert_ne!(set.boarding_pass.flight_to.city, HOME_CITY);
    let found = violations(set, today());
    assert_eq!(
        found,
        vec![
            Violation::Destination {
                city: set.boarding_pass.flight_to.city.clone()
            },
            Violation::DocumentFlagged {
                kind: DocumentKind::BoardingPass
            },
        ]
    );
}

#[test]
fn cross_document_rules_break_a_field_clause() {
    // Rules that break a cross-document comparison must show up as more than
    // just a flagged document.
    let tables = ReferenceTables::builtin();
    let ctx = CorruptionContext {
        tables: &tables,
        today: today(),
    };
    let cross = [
        CorruptionRule::Visa(VisaRule::NameMismatch),
        CorruptionRule::Visa(VisaRule::BirthDateMismatch),
        CorruptionRule::Visa(VisaRule::NationalityMismatch),
        CorruptionRule::Visa(VisaRule::GenderMismatch),
        CorruptionRule::BoardingPass(BoardingPassRule::DestinationMismatch),
        CorruptionRule::BoardingPass(BoardingPassRule::PassengerTopMismatch),
        CorruptionRule::BoardingPass(BoardingPassRule::PassengerBottomMismatch),
        CorruptionRule::BoardingPass(BoardingPassRule::LandingDateAnomaly),
        CorruptionRule::Narration(NarrationRule::NameMismatch),
        CorruptionRule::Narration(NarrationRule::AgeMismatch),
        CorruptionRule::Narration(NarrationRule::NationalityMismatch),
    ];
    for rule in cross {
        let (mut sets, mut rng) = fresh_sets(12, 1);
        corrupt_at(&mut sets, 0, rule, 0, &mut rng, &ctx).unwrap();
        let field_clauses = violations(&sets[0], today())
            .into_iter()
            .filter(|v| !matches!(v, Violation::DocumentFlagged { .. }))
            .count();
        assert!(field_clauses >= 1, "{rule} broke no field clause");
    }
}

// ---------------------------------------------------------------------------
// Batch mixing
// ---------------------------------------------------------------------------

#[test]
fn batch_of_six_records_every_operation() {
    let tables = ReferenceTables::builtin();
    for seed in 0..200 {
        let mut rng = DeskRng::seeded(seed);
        let report = generate_batch(6, &mut rng, &tables, now(), MixPolicy::WithReplacement);
        assert_eq!(report.journal.len(), report.num_fakes);
        assert!(report.sets.iter().any(|s| !s.valid));
        for (op, entry) in report.journal.entries().iter().enumerate() {
            assert_eq!(entry.operation, op);
            assert!(entry.set_index < 6);
            assert!(!entry.valid_after);
        }
    }
}

#[test]
fn num_fakes_matches_the_first_draw() {
    // The mixer's first draw after generation is `num_fakes`; replaying the
    // same stream by hand yields the same count.
    let tables = ReferenceTables::builtin();
    for seed in 0..20 {
        let mut rng = DeskRng::seeded(seed);
        let report = generate_batch(6, &mut rng, &tables, now(), MixPolicy::WithReplacement);

        let mut replay = DeskRng::seeded(seed);
        let _ = DocumentGenerator::new(&mut replay, &tables, now()).generate_batch(6);
        let expected = replay.int_inclusive(1, 6) as usize;
        assert_eq!(report.num_fakes, expected);
    }
}

#[test]
fn seeded_rounds_are_reproducible() {
    let tables = ReferenceTables::builtin();
    let mut a = DeskRng::seeded(2026);
    let mut b = DeskRng::seeded(2026);
    let left = generate_batch(6, &mut a, &tables, now(), MixPolicy::WithReplacement);
    let right = generate_batch(6, &mut b, &tables, now(), MixPolicy::WithReplacement);
    assert_eq!(left, right);
}

#[test]
fn all_four_kinds_get_corrupted_across_seeds() {
    let tables = ReferenceTables::builtin();
    let mut seen = std::collections::HashSet::new();
    for seed in 0..100 {
        let mut rng = DeskRng::seeded(seed);
        let report = generate_batch(6, &mut rng, &tables, now(), MixPolicy::WithReplacement);
        for entry in report.journal.entries() {
            seen.insert(entry.kind());
        }
    }
    assert_eq!(seen.len(), 4);
}
