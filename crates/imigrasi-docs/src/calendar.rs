//! Calendar helpers and the `"DD MM YYYY"` wire format for document dates.
//!
//! All arithmetic saturates at chrono's representable range instead of
//! panicking; document dates never get near those bounds.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};

/// Display and serialization format of every document date.
pub const DATE_FORMAT: &str = "%d %m %Y";

/// 1 January of `year`.
pub fn year_start(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// 31 December of `year`.
pub fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Move `date` by whole days (negative moves backwards).
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Move `date` by whole years. 29 February lands on 28 February in
/// non-leap target years.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let months = Months::new(years.unsigned_abs().saturating_mul(12));
    let shifted = if years >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(if years < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Age as the game counts it: difference of calendar years.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - birth_date.year()
}

/// Render a date as `"DD MM YYYY"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `"DD MM YYYY"` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
}

/// `#[serde(with = "...")]` adapter for `"DD MM YYYY"` dates.
pub mod doc_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_is_day_month_year() {
        assert_eq!(format_date(ymd(2024, 3, 7)), "07 03 2024");
        assert_eq!(parse_date("07 03 2024").unwrap(), ymd(2024, 3, 7));
    }

    #[test]
    fn shift_years_clamps_leap_day() {
        assert_eq!(shift_years(ymd(2024, 2, 29), 10), ymd(2034, 2, 28));
        assert_eq!(shift_years(ymd(2024, 2, 29), 4), ymd(2028, 2, 29));
        assert_eq!(shift_years(ymd(2030, 6, 1), -10), ymd(2020, 6, 1));
    }

    #[test]
    fn shift_days_crosses_year_boundary() {
        assert_eq!(shift_days(ymd(2026, 12, 1), 90), ymd(2027, 3, 1));
        assert_eq!(shift_days(ymd(2026, 1, 5), -10), ymd(2025, 12, 26));
    }

    #[test]
    fn age_is_year_difference() {
        assert_eq!(age_on(ymd(1990, 12, 31), ymd(2026, 1, 1)), 36);
    }
}
