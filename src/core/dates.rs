//! Date arithmetic used by the valuation engine.
//!
//! Two measures of elapsed time are used and both are counted from the
//! earlier date to the later one:
//!
//! * whole days: the calendar day difference, truncated, never fractional;
//! * fractional years: whole days divided by 365.25, so that a partial year
//!   contributes proportionally and leap years average out.

use super::error::{PatrimoineError, Result};
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serializer};

pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Calendar days from `from` to `to`. Negative when `to` is before `from`.
pub fn whole_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Elapsed years as a real number, based on [`DAYS_PER_YEAR`].
pub fn fractional_years_between(from: NaiveDate, to: NaiveDate) -> Decimal {
    Decimal::from(whole_days_between(from, to)) / DAYS_PER_YEAR
}

/// Parses an ISO-8601 date or date-time into a calendar date.
///
/// Accepts `2024-03-01`, `2024-03-01T10:00:00`, `2024-03-01T10:00:00.000Z`
/// and offsets such as `+03:00`. Date-times with an offset are normalised to
/// UTC before the date is taken, matching how timestamps are written out.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| PatrimoineError::InvalidDate(input.to_string()))
}

/// An inclusive `[start, end]` interval of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(PatrimoineError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The `n`-th month after `start`, clamped to the end of shorter months.
    pub(crate) fn months_after_start(&self, n: u32) -> Option<NaiveDate> {
        self.start.checked_add_months(Months::new(n))
    }
}

/// Serde adapter reading dates through [`parse_date`].
pub mod iso_date {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &NaiveDate,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> std::result::Result<S::Ok, S::Error> {
            match date {
                Some(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> std::result::Result<Option<NaiveDate>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse_date(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_whole_days() {
        assert_eq!(whole_days_between(date(2020, 1, 1), date(2020, 4, 1)), 91);
        assert_eq!(whole_days_between(date(2020, 1, 1), date(2020, 1, 1)), 0);
        assert_eq!(whole_days_between(date(2020, 1, 2), date(2020, 1, 1)), -1);
    }

    #[test]
    fn test_fractional_years() {
        assert_eq!(
            fractional_years_between(date(2020, 1, 1), date(2020, 1, 1)),
            Decimal::ZERO
        );
        // 1461 days span exactly four average years
        assert_eq!(
            fractional_years_between(date(2020, 1, 1), date(2024, 1, 1)),
            dec!(4)
        );
        let half = fractional_years_between(date(2021, 1, 1), date(2021, 7, 2));
        assert!(half > dec!(0.49) && half < dec!(0.51), "got {half}");
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-01").unwrap(), date(2024, 3, 1));
        assert_eq!(parse_date("2024-03-01T10:30:00").unwrap(), date(2024, 3, 1));
        assert_eq!(
            parse_date("2024-03-01T23:30:00.000Z").unwrap(),
            date(2024, 3, 1)
        );
        // 01:00 at +03:00 is still the previous day in UTC
        assert_eq!(
            parse_date("2024-03-01T01:00:00+03:00").unwrap(),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in ["", "yesterday", "2024-13-01", "2023-02-29", "01/03/2024"] {
            assert_eq!(
                parse_date(bad),
                Err(PatrimoineError::InvalidDate(bad.to_string())),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 12, 31)));
        assert!(!range.contains(date(2025, 1, 1)));
        assert_eq!(range.months_after_start(1), Some(date(2024, 2, 1)));

        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, PatrimoineError::InvalidDateRange { .. }));
    }
}
