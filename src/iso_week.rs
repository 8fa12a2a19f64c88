//! ISO 8601 week dates.
//!
//! ISO weeks start on Monday and week 1 is the week holding the year's first
//! Thursday, so the ISO year differs from the calendar year for a few days
//! around January 1.

use serde::Serialize;

use crate::consts::{DAYS_PER_WEEK, JANUARY};
use crate::date::CalendarDate;
use crate::day_number::{DayNumber, to_day_number};
use crate::error::RangeError;
use crate::navigator;
use crate::prelude::*;
use crate::types::Year;
use crate::week::{self, WeekRule};
use crate::weekday::Weekday;

/// An ISO year and week number, e.g. `2024-W01`.
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize)]
#[display(fmt = "{:04}-W{:02}", year, week)]
pub struct IsoWeek {
    year: i32,
    week: u8,
}

impl IsoWeek {
    /// # Errors
    /// Returns `RangeError::InvalidYear` for an unsupported year, or
    /// `RangeError::InvalidIsoWeek` if the year has no such week.
    pub fn new(iso_year: i32, week: u8) -> Result<Self, RangeError> {
        let weeks_in_year = iso_weeks_in_year(iso_year)?;
        if !(1..=weeks_in_year).contains(&week) {
            return Err(RangeError::InvalidIsoWeek {
                iso_year,
                week,
                weeks_in_year,
            });
        }
        Ok(Self {
            year: iso_year,
            week,
        })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn week(&self) -> u8 {
        self.week
    }

    /// Monday of this week
    ///
    /// # Errors
    /// Never fails for a constructed week; kept fallible for symmetry with
    /// [`IsoWeek::last_day`].
    pub fn first_day(&self) -> Result<DayNumber, RangeError> {
        first_date_of_iso_week(self.year, self.week)
    }

    /// Sunday of this week
    ///
    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` for 9999-W52, whose Sunday
    /// falls in year 10000.
    pub fn last_day(&self) -> Result<DayNumber, RangeError> {
        last_date_of_iso_week(self.year, self.week)
    }
}

/// ISO week containing `date`.
pub fn iso_week(date: CalendarDate) -> IsoWeek {
    let mut days = date.day_number().get();
    // Monday to Wednesday share their ISO week with the coming Thursday
    if date.weekday().days_from_monday() < Weekday::Thursday.days_from_monday() {
        days += 3;
    }
    let (year, week) = week::week_of_raw_day(days, WeekRule::ISO);
    // the Thursday of any supported date's week lies in years 1..=9999
    IsoWeek {
        year: year as i32,
        week,
    }
}

/// Number of ISO weeks in `iso_year`: 53 when January 1 is a Thursday, or a
/// Wednesday in a leap year, otherwise 52.
///
/// # Errors
/// Returns `RangeError::InvalidYear` outside 1..=9999.
pub fn iso_weeks_in_year(iso_year: i32) -> Result<u8, RangeError> {
    let leap = Year::new(iso_year)?.is_leap();
    let jan1 = to_day_number(iso_year, JANUARY, 1)?.weekday();
    let long = jan1 == Weekday::Thursday || (leap && jan1 == Weekday::Wednesday);
    Ok(if long { 53 } else { 52 })
}

/// Monday of ISO week `week` of `iso_year`.
///
/// # Errors
/// Returns `RangeError::InvalidIsoWeek` if the week does not exist in that
/// year. Weeks are never clamped.
pub fn first_date_of_iso_week(iso_year: i32, week: u8) -> Result<DayNumber, RangeError> {
    let weeks_in_year = iso_weeks_in_year(iso_year)?;
    if !(1..=weeks_in_year).contains(&week) {
        return Err(RangeError::InvalidIsoWeek {
            iso_year,
            week,
            weeks_in_year,
        });
    }
    let jan4 = to_day_number(iso_year, JANUARY, 4)?;
    let week1 = navigator::previous_on_or_before(jan4, Weekday::Monday)?;
    week1.checked_add_days(i64::from(week - 1) * DAYS_PER_WEEK)
}

/// Sunday of ISO week `week` of `iso_year`.
///
/// # Errors
/// As [`first_date_of_iso_week`], plus `RangeError::DayNumberOutOfRange`
/// when the Sunday lies past 9999-12-31.
pub fn last_date_of_iso_week(iso_year: i32, week: u8) -> Result<DayNumber, RangeError> {
    first_date_of_iso_week(iso_year, week)?.checked_add_days(DAYS_PER_WEEK - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, dn};

    #[test]
    fn test_iso_week_examples() {
        struct TestCase {
            date:     (i32, u8, u8),
            expected: &'static str,
        }

        let cases = [
            TestCase {
                date:     (2024, 1, 1),
                expected: "2024-W01",
            },
            TestCase {
                date:     (2023, 1, 1),
                expected: "2022-W52",
            },
            TestCase {
                date:     (2024, 12, 30),
                expected: "2025-W01",
            },
            TestCase {
                date:     (2021, 1, 3),
                expected: "2020-W53",
            },
            TestCase {
                date:     (2020, 12, 31),
                expected: "2020-W53",
            },
            TestCase {
                date:     (2026, 1, 1),
                expected: "2026-W01",
            },
            TestCase {
                date:     (1, 1, 1),
                expected: "0001-W01",
            },
            TestCase {
                date:     (9999, 12, 31),
                expected: "9999-W52",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            assert_eq!(iso_week(date(y, m, d)).to_string(), case.expected, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_weeks_in_year_matches_jan1_rule() {
        for year in 1990..=2040 {
            let jan1 = date(year, 1, 1).weekday();
            let leap = crate::is_leap_year(year).unwrap();
            let expected = if jan1 == Weekday::Thursday || (leap && jan1 == Weekday::Wednesday) {
                53
            } else {
                52
            };
            assert_eq!(iso_weeks_in_year(year), Ok(expected), "{year}");
            // December 28 always lies in the last ISO week
            assert_eq!(iso_week(date(year, 12, 28)).week(), expected, "{year}");
        }
        for year in [2004, 2009, 2015, 2020, 2026] {
            assert_eq!(iso_weeks_in_year(year), Ok(53), "{year}");
        }
        assert_eq!(iso_weeks_in_year(0), Err(RangeError::InvalidYear(0)));
    }

    #[test]
    fn test_first_date_of_iso_week() {
        assert_eq!(first_date_of_iso_week(2024, 1), Ok(dn(2024, 1, 1)));
        assert_eq!(first_date_of_iso_week(2022, 52), Ok(dn(2022, 12, 26)));
        assert_eq!(first_date_of_iso_week(2020, 53), Ok(dn(2020, 12, 28)));
        assert_eq!(first_date_of_iso_week(2026, 1), Ok(dn(2025, 12, 29)));
        assert_eq!(last_date_of_iso_week(2024, 1), Ok(dn(2024, 1, 7)));
    }

    #[test]
    fn test_invalid_weeks_are_rejected() {
        assert_eq!(
            first_date_of_iso_week(2021, 53),
            Err(RangeError::InvalidIsoWeek {
                iso_year:      2021,
                week:          53,
                weeks_in_year: 52,
            })
        );
        assert!(matches!(
            first_date_of_iso_week(2024, 0),
            Err(RangeError::InvalidIsoWeek { week: 0, .. })
        ));
        assert!(IsoWeek::new(2020, 54).is_err());
        assert!(matches!(
            last_date_of_iso_week(9999, 52),
            Err(RangeError::DayNumberOutOfRange(_))
        ));
    }

    #[test]
    fn test_first_date_round_trips() {
        for year in [2015, 2020, 2023, 2024] {
            let weeks = iso_weeks_in_year(year).unwrap();
            for week in 1..=weeks {
                let monday = first_date_of_iso_week(year, week).unwrap();
                assert_eq!(monday.weekday(), Weekday::Monday);
                let iso = iso_week(monday.to_date());
                assert_eq!((iso.year(), iso.week()), (year, week));
                let sunday = last_date_of_iso_week(year, week).unwrap();
                assert_eq!(iso_week(sunday.to_date()), iso);
            }
        }
    }

    #[test]
    fn test_iso_week_accessors_and_order() {
        let week = IsoWeek::new(2020, 53).unwrap();
        assert_eq!(week.first_day(), Ok(dn(2020, 12, 28)));
        assert_eq!(week.last_day(), Ok(dn(2021, 1, 3)));
        assert!(week < IsoWeek::new(2021, 1).unwrap());
        assert_eq!(
            serde_json::to_value(week).unwrap(),
            serde_json::json!({ "year": 2020, "week": 53 })
        );
    }
}
