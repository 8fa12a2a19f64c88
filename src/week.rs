//! Culture-defined weeks: week boundaries for an arbitrary first day of the
//! week, and week-of-year numbering under the three common first-week rules.
//!
//! Locale data is never read from the environment. Callers pass a
//! [`WeekRule`] explicitly.

use serde::{Deserialize, Serialize};

use crate::consts::DAYS_PER_WEEK;
use crate::date::CalendarDate;
use crate::day_number::{self, DayNumber};
use crate::error::RangeError;
use crate::navigator;
use crate::types;
use crate::weekday::Weekday;

/// How the first week of a year is chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarWeekRule {
    /// Week 1 is the week containing January 1
    #[default]
    FirstDay,
    /// Week 1 is the first week lying entirely in the new year
    FirstFullWeek,
    /// Week 1 is the first week with at least four days in the new year
    FirstFourDayWeek,
}

impl CalendarWeekRule {
    /// Days of the new year the first week must contain.
    const fn min_days_in_first_week(self) -> i64 {
        match self {
            Self::FirstDay => 1,
            Self::FirstFullWeek => 7,
            Self::FirstFourDayWeek => 4,
        }
    }
}

/// A locale's week convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekRule {
    pub first_day_of_week: Weekday,
    #[serde(default)]
    pub rule:              CalendarWeekRule,
}

impl WeekRule {
    /// Monday weeks, first week has four days in the new year
    pub const ISO: Self = Self::new(Weekday::Monday, CalendarWeekRule::FirstFourDayWeek);

    pub const fn new(first_day_of_week: Weekday, rule: CalendarWeekRule) -> Self {
        Self {
            first_day_of_week,
            rule,
        }
    }
}

impl Default for WeekRule {
    /// Sunday weeks numbered from the week containing January 1
    fn default() -> Self {
        Self::new(Weekday::Sunday, CalendarWeekRule::FirstDay)
    }
}

/// The `first_day` on or before `day`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` before 0001-01-01.
pub fn start_of_week(day: DayNumber, first_day: Weekday) -> Result<DayNumber, RangeError> {
    navigator::previous_on_or_before(day, first_day)
}

/// Last day of the week containing `day`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` past 9999-12-31.
pub fn end_of_week(day: DayNumber, first_day: Weekday) -> Result<DayNumber, RangeError> {
    navigator::next_on_or_after(day, first_day.pred())
}

/// Week of the year (1..=54) for `date` under `rule`. Days before the first
/// week of their year are numbered in the last week of the previous year.
pub fn week_of_year(date: CalendarDate, rule: WeekRule) -> u8 {
    let (_, week) = week_of_raw_day(date.day_number().get(), rule);
    week
}

/// Year the numbered week belongs to, and the week number, for a raw day
/// count that may lie a few days outside the supported range.
pub(crate) fn week_of_raw_day(days: i64, rule: WeekRule) -> (i64, u8) {
    let (year, ordinal) = day_number::year_and_ordinal_from_days(days);
    let weekday = i64::from(Weekday::from_days(days).days_from_sunday());
    week_in_year(year, ordinal, weekday, rule)
}

/// `ordinal` is zero-based, `weekday` counts from Sunday = 0.
fn week_in_year(year: i64, ordinal: i64, weekday: i64, rule: WeekRule) -> (i64, u8) {
    let first_day = i64::from(rule.first_day_of_week.days_from_sunday());
    // weekday of January 1, possibly negative
    let jan1 = weekday - ordinal % DAYS_PER_WEEK;

    let week = if rule.rule == CalendarWeekRule::FirstDay {
        let offset = (jan1 - first_day + 2 * DAYS_PER_WEEK) % DAYS_PER_WEEK;
        (ordinal + offset) / DAYS_PER_WEEK + 1
    } else {
        // days from January 1 to the first week start
        let mut offset = (first_day - jan1 + 2 * DAYS_PER_WEEK) % DAYS_PER_WEEK;
        if offset != 0 && offset >= rule.rule.min_days_in_first_week() {
            offset -= DAYS_PER_WEEK;
        }
        let day = ordinal - offset;
        if day < 0 {
            // belongs to the last week of the previous year: restart from December 31
            let previous = year - 1;
            let last_ordinal = if types::is_leap_i64(previous) { 365 } else { 364 };
            let last_weekday = (weekday - ordinal - 1).rem_euclid(DAYS_PER_WEEK);
            return week_in_year(previous, last_ordinal, last_weekday, rule);
        }
        day / DAYS_PER_WEEK + 1
    };
    (year, week as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, dn};

    #[test]
    fn test_week_bounds() {
        struct TestCase {
            first_day: Weekday,
            start:     (i32, u8, u8),
            end:       (i32, u8, u8),
        }

        // reference: Wednesday 2024-07-17
        let cases = [
            TestCase {
                first_day: Weekday::Monday,
                start:     (2024, 7, 15),
                end:       (2024, 7, 21),
            },
            TestCase {
                first_day: Weekday::Sunday,
                start:     (2024, 7, 14),
                end:       (2024, 7, 20),
            },
            TestCase {
                first_day: Weekday::Wednesday,
                start:     (2024, 7, 17),
                end:       (2024, 7, 23),
            },
            TestCase {
                first_day: Weekday::Thursday,
                start:     (2024, 7, 11),
                end:       (2024, 7, 17),
            },
        ];

        let day = dn(2024, 7, 17);
        for case in &cases {
            assert_eq!(
                start_of_week(day, case.first_day),
                Ok(dn(case.start.0, case.start.1, case.start.2)),
                "{:?}",
                case.first_day
            );
            assert_eq!(
                end_of_week(day, case.first_day),
                Ok(dn(case.end.0, case.end.1, case.end.2)),
                "{:?}",
                case.first_day
            );
        }
    }

    #[test]
    fn test_week_bounds_at_range_edges() {
        // 0001-01-01 is a Monday
        assert!(start_of_week(DayNumber::MIN, Weekday::Sunday).is_err());
        assert_eq!(start_of_week(DayNumber::MIN, Weekday::Monday), Ok(DayNumber::MIN));
        // 9999-12-31 is a Friday
        assert_eq!(end_of_week(DayNumber::MAX, Weekday::Saturday), Ok(DayNumber::MAX));
        assert!(end_of_week(DayNumber::MAX, Weekday::Monday).is_err());
    }

    #[test]
    fn test_week_of_year_rules() {
        struct TestCase {
            date:     (i32, u8, u8),
            rule:     WeekRule,
            expected: u8,
        }

        let sunday_first_day = WeekRule::default();
        let sunday_full_week = WeekRule::new(Weekday::Sunday, CalendarWeekRule::FirstFullWeek);
        let cases = [
            // 2024-01-01 is a Monday
            TestCase {
                date:     (2024, 1, 1),
                rule:     sunday_first_day,
                expected: 1,
            },
            TestCase {
                date:     (2024, 1, 7),
                rule:     sunday_first_day,
                expected: 2,
            },
            TestCase {
                date:     (2024, 12, 31),
                rule:     sunday_first_day,
                expected: 53,
            },
            // Saturday before the first full Sunday week: last week of 2023
            TestCase {
                date:     (2024, 1, 6),
                rule:     sunday_full_week,
                expected: 53,
            },
            TestCase {
                date:     (2024, 1, 7),
                rule:     sunday_full_week,
                expected: 1,
            },
            // 2023-01-01 is a Sunday: it falls in 2022's last four-day week
            TestCase {
                date:     (2023, 1, 1),
                rule:     WeekRule::ISO,
                expected: 52,
            },
            TestCase {
                date:     (2023, 1, 2),
                rule:     WeekRule::ISO,
                expected: 1,
            },
            // no year rollover here, unlike ISO week dates
            TestCase {
                date:     (2024, 12, 30),
                rule:     WeekRule::ISO,
                expected: 53,
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            assert_eq!(
                week_of_year(date(y, m, d), case.rule),
                case.expected,
                "{y}-{m}-{d} {:?}",
                case.rule
            );
        }
    }

    #[test]
    fn test_first_day_rule_ranges_up_to_54() {
        // 2000 is a leap year starting on Saturday: Dec 31 is a Sunday
        assert_eq!(week_of_year(date(2000, 12, 31), WeekRule::default()), 54);
    }

    #[test]
    fn test_weeks_advance_on_first_day() {
        for rule in [
            WeekRule::default(),
            WeekRule::ISO,
            WeekRule::new(Weekday::Saturday, CalendarWeekRule::FirstFullWeek),
        ] {
            let mut day = dn(2024, 1, 8);
            let mut previous = week_of_year(day.to_date(), rule);
            while day <= dn(2024, 12, 20) {
                day = day.checked_add_days(1).unwrap();
                let week = week_of_year(day.to_date(), rule);
                if day.weekday() == rule.first_day_of_week {
                    assert_eq!(week, previous + 1, "{day} {rule:?}");
                } else {
                    assert_eq!(week, previous, "{day} {rule:?}");
                }
                previous = week;
            }
        }
    }

    #[test]
    fn test_first_year_falls_back_before_range() {
        // 0001-01-01 is a Monday; with Tuesday-start full weeks it belongs
        // to the last week of year 0
        let rule = WeekRule::new(Weekday::Tuesday, CalendarWeekRule::FirstFullWeek);
        assert_eq!(week_of_raw_day(DayNumber::MIN.get(), rule).0, 0);
        assert!(week_of_year(date(1, 1, 1), rule) >= 52);
    }

    #[test]
    fn test_rule_serde() {
        let rule: WeekRule = serde_json::from_str(r#"{ "first_day_of_week": "Monday" }"#).unwrap();
        assert_eq!(rule, WeekRule::new(Weekday::Monday, CalendarWeekRule::FirstDay));

        let json = serde_json::to_string(&WeekRule::ISO).unwrap();
        let parsed: WeekRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, WeekRule::ISO);
    }
}
