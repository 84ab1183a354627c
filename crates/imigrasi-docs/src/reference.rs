//! Read-only reference tables: people, nationalities, jobs.
//!
//! Tables are validated once at construction and never mutated afterwards,
//! so generators and corruption rules can rely on two guarantees:
//!
//! - every table has something to pick from, and
//! - the person and nationality tables always contain a second, distinct
//!   entry, so a "replace with a different value" rule cannot no-op.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Gender, HOME_CITY};
use crate::random::DeskRng;
use crate::DocsError;

/// A name and the gender printed next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub gender: Gender,
}

/// A country and the airport travellers from there depart from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalityRecord {
    pub country: String,
    pub airport_code: String,
}

const BUILTIN_PERSONS: &[(&str, Gender)] = &[
    ("Ahmad Fauzi", Gender::Male),
    ("Budi Santoso", Gender::Male),
    ("Dewi Lestari", Gender::Female),
    ("Siti Rahma", Gender::Female),
    ("Rizky Pratama", Gender::Male),
    ("Putri Ayu", Gender::Female),
    ("Kenji Tanaka", Gender::Male),
    ("Yuki Sato", Gender::Female),
    ("Liam Walker", Gender::Male),
    ("Emma Johnson", Gender::Female),
    ("Lucas Martin", Gender::Male),
    ("Chloe Dubois", Gender::Female),
    ("Mateo Garcia", Gender::Male),
    ("Sofia Rossi", Gender::Female),
    ("Hyun Woo Park", Gender::Male),
    ("Ji Min Kim", Gender::Female),
    ("Arjun Sharma", Gender::Male),
    ("Priya Nair", Gender::Female),
    ("Nur Aisyah", Gender::Female),
    ("Wei Chen", Gender::Male),
];

const BUILTIN_NATIONALITIES: &[(&str, &str)] = &[
    ("Indonesia", "CGK"),
    ("Malaysia", "KUL"),
    ("Singapore", "SIN"),
    ("Japan", "HND"),
    ("South Korea", "ICN"),
    ("Australia", "SYD"),
    ("United States", "JFK"),
    ("United Kingdom", "LHR"),
    ("France", "CDG"),
    ("Germany", "FRA"),
    ("Netherlands", "AMS"),
    ("Italy", "FCO"),
    ("Spain", "MAD"),
    ("India", "DEL"),
    ("Thailand", "BKK"),
    ("Philippines", "MNL"),
];

const BUILTIN_JOBS: &[&str] = &["Teacher", "Engineer", "Doctor", "Artist", "Scientist"];

// ---------------------------------------------------------------------------
// ReferenceTables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTables")]
pub struct ReferenceTables {
    persons: Vec<PersonRecord>,
    nationalities: Vec<NationalityRecord>,
    jobs: Vec<String>,
}

/// Wire shape of [`ReferenceTables`] before validation.
#[derive(Deserialize)]
struct RawTables {
    persons: Vec<PersonRecord>,
    nationalities: Vec<NationalityRecord>,
    jobs: Vec<String>,
}

impl TryFrom<RawTables> for ReferenceTables {
    type Error = DocsError;

    fn try_from(raw: RawTables) -> Result<Self, DocsError> {
        Self::new(raw.persons, raw.nationalities, raw.jobs)
    }
}

impl ReferenceTables {
    /// The tables bundled with the game.
    pub fn builtin() -> Self {
        Self {
            persons: BUILTIN_PERSONS
                .iter()
                .map(|&(name, gender)| PersonRecord {
                    name: name.to_owned(),
                    gender,
                })
                .collect(),
            nationalities: BUILTIN_NATIONALITIES
                .iter()
                .map(|&(country, code)| NationalityRecord {
                    country: country.to_owned(),
                    airport_code: code.to_owned(),
                })
                .collect(),
            jobs: BUILTIN_JOBS.iter().map(|&job| job.to_owned()).collect(),
        }
    }

    /// Build tables from explicit lists.
    ///
    /// # Errors
    ///
    /// Returns the first [`DocsError`] reported by [`validate`](Self::validate).
    pub fn new(
        persons: Vec<PersonRecord>,
        nationalities: Vec<NationalityRecord>,
        jobs: Vec<String>,
    ) -> Result<Self, DocsError> {
        let tables = Self {
            persons,
            nationalities,
            jobs,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Parse and validate tables from JSON of the form
    /// `{"persons": [...], "nationalities": [...], "jobs": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, DocsError> {
        let raw: RawTables = serde_json::from_str(json).map_err(|e| DocsError::Parse {
            details: e.to_string(),
        })?;
        Self::try_from(raw)
    }

    /// Check the invariants the generators and corruption rules rely on.
    pub fn validate(&self) -> Result<(), DocsError> {
        let distinct_names = count_distinct(self.persons.iter().map(|p| p.name.as_str()));
        if distinct_names < 2 {
            return Err(DocsError::TooFewEntries {
                table: "persons",
                required: 2,
                found: distinct_names,
            });
        }
        for gender in [Gender::Male, Gender::Female] {
            if !self.persons.iter().any(|p| p.gender == gender) {
                return Err(DocsError::MissingGender { gender });
            }
        }

        let distinct_countries =
            count_distinct(self.nationalities.iter().map(|n| n.country.as_str()));
        if distinct_countries < 2 {
            return Err(DocsError::TooFewEntries {
                table: "nationalities",
                required: 2,
                found: distinct_countries,
            });
        }
        for record in &self.nationalities {
            if record.country.eq_ignore_ascii_case(HOME_CITY) {
                return Err(DocsError::HomeCityCollision {
                    country: record.country.clone(),
                });
            }
            if record.airport_code.trim().is_empty() {
                return Err(DocsError::EmptyAirportCode {
                    country: record.country.clone(),
                });
            }
        }

        if self.jobs.is_empty() {
            return Err(DocsError::TooFewEntries {
                table: "jobs",
                required: 1,
                found: 0,
            });
        }
        Ok(())
    }

    pub fn persons(&self) -> &[PersonRecord] {
        &self.persons
    }

    pub fn nationalities(&self) -> &[NationalityRecord] {
        &self.nationalities
    }

    pub fn jobs(&self) -> &[String] {
        &self.jobs
    }

    // -- random access -------------------------------------------------------

    pub fn random_person(&self, rng: &mut DeskRng) -> &PersonRecord {
        rng.pick(&self.persons)
    }

    pub fn random_nationality(&self, rng: &mut DeskRng) -> &NationalityRecord {
        rng.pick(&self.nationalities)
    }

    pub fn random_job(&self, rng: &mut DeskRng) -> &str {
        rng.pick(&self.jobs).as_str()
    }

    /// A person name that differs (case-insensitively) from `exclude`.
    pub fn other_name(&self, rng: &mut DeskRng, exclude: &str) -> &str {
        &rng.pick_where(&self.persons, |p| !p.name.eq_ignore_ascii_case(exclude))
            .expect("validated tables hold at least two distinct names")
            .name
    }

    /// A country that differs (case-insensitively) from `exclude`.
    pub fn other_country(&self, rng: &mut DeskRng, exclude: &str) -> &str {
        &rng.pick_where(&self.nationalities, |n| {
            !n.country.eq_ignore_ascii_case(exclude)
        })
        .expect("validated tables hold at least two distinct countries")
        .country
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn count_distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(str::to_ascii_uppercase)
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
