//! Weekday navigation: finding occurrences of a weekday relative to a
//! reference day, and the n-th occurrence inside a month, year or arbitrary
//! window.
//!
//! Inclusive searches (`*_on_or_*`) return the reference itself when it
//! already falls on the target weekday. Strict searches never do: they move
//! a full week instead.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::day_number::{DayNumber, days_in_month, to_day_number};
use crate::error::RangeError;
use crate::weekday::Weekday;
use crate::{DAYS_PER_WEEK, DECEMBER, JANUARY};

/// Which occurrence of a weekday within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekOfMonthOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl WeekOfMonthOrdinal {
    /// One-based position for the numbered ordinals, `None` for `Last`.
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::First => Some(1),
            Self::Second => Some(2),
            Self::Third => Some(3),
            Self::Fourth => Some(4),
            Self::Fifth => Some(5),
            Self::Last => None,
        }
    }

    /// Numbered ordinal for positions 1..=5
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            5 => Some(Self::Fifth),
            _ => None,
        }
    }
}

/// First `weekday` on or after `day`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` past 9999-12-31.
pub fn next_on_or_after(day: DayNumber, weekday: Weekday) -> Result<DayNumber, RangeError> {
    day.checked_add_days(i64::from(day.weekday().days_until(weekday)))
}

/// First `weekday` strictly after `day`; a matching `day` yields `day + 7`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` past 9999-12-31.
pub fn strictly_next(day: DayNumber, weekday: Weekday) -> Result<DayNumber, RangeError> {
    let step = match day.weekday().days_until(weekday) {
        0 => DAYS_PER_WEEK,
        n => i64::from(n),
    };
    day.checked_add_days(step)
}

/// Last `weekday` on or before `day`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` before 0001-01-01.
pub fn previous_on_or_before(day: DayNumber, weekday: Weekday) -> Result<DayNumber, RangeError> {
    day.checked_add_days(-i64::from(day.weekday().days_since(weekday)))
}

/// Last `weekday` strictly before `day`; a matching `day` yields `day - 7`.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` before 0001-01-01.
pub fn strictly_previous(day: DayNumber, weekday: Weekday) -> Result<DayNumber, RangeError> {
    let step = match day.weekday().days_since(weekday) {
        0 => DAYS_PER_WEEK,
        n => i64::from(n),
    };
    day.checked_add_days(-step)
}

/// Closest `weekday` to `day` in either direction, preferring the earlier
/// date on a tie. Near the ends of the supported range the only
/// representable candidate wins.
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` only if neither candidate exists.
pub fn nearest_occurrence(day: DayNumber, weekday: Weekday) -> Result<DayNumber, RangeError> {
    let back = day.weekday().days_since(weekday);
    let forward = day.weekday().days_until(weekday);
    let previous = previous_on_or_before(day, weekday);
    let next = next_on_or_after(day, weekday);
    if back <= forward {
        previous.or(next)
    } else {
        next.or(previous)
    }
}

/// The `ordinal` occurrence of `weekday` in the given month.
///
/// # Errors
/// Returns `RangeError` for an invalid year/month, or
/// `RangeError::OrdinalNotInMonth` when the month has no such occurrence.
pub fn nth_occurrence_in_month(
    year: i32,
    month: u8,
    weekday: Weekday,
    ordinal: WeekOfMonthOrdinal,
) -> Result<DayNumber, RangeError> {
    let first = to_day_number(year, month, 1)?;
    let len = i64::from(days_in_month(year, month)?);

    let Some(n) = ordinal.number() else {
        let last = first.checked_add_days(len - 1)?;
        return previous_on_or_before(last, weekday);
    };

    let offset = i64::from(first.weekday().days_until(weekday)) + i64::from(n - 1) * DAYS_PER_WEEK;
    if offset >= len {
        return Err(RangeError::OrdinalNotInMonth {
            year: first.to_date().year(),
            month,
            weekday,
            ordinal,
        });
    }
    first.checked_add_days(offset)
}

/// How many times `weekday` occurs in the month (4 or 5).
///
/// # Errors
/// Returns `RangeError` for an invalid year/month.
pub fn occurrences_in_month(year: i32, month: u8, weekday: Weekday) -> Result<u8, RangeError> {
    let first = to_day_number(year, month, 1)?;
    let len = days_in_month(year, month)?;
    let offset = first.weekday().days_until(weekday);
    Ok((len - 1 - offset) / 7 + 1)
}

/// Which numbered occurrence of its own weekday `date` is within its month.
pub fn ordinal_in_month(date: CalendarDate) -> WeekOfMonthOrdinal {
    match WeekOfMonthOrdinal::from_number((date.day() - 1) / 7 + 1) {
        Some(ordinal) => ordinal,
        None => WeekOfMonthOrdinal::Fifth,
    }
}

/// Whether no later day in the month shares `date`'s weekday.
pub fn is_last_occurrence_in_month(date: CalendarDate) -> bool {
    let len = crate::types::month_length(date.year(), date.month());
    date.day() + 7 > len
}

/// The `n`-th (one-based) `weekday` in the inclusive window `start..=end`.
///
/// # Errors
/// Returns `RangeError::OccurrenceNotInWindow` if `n` is zero or the
/// occurrence falls after `end`.
pub fn nth_occurrence_between(
    start: DayNumber,
    end: DayNumber,
    weekday: Weekday,
    n: u32,
) -> Result<DayNumber, RangeError> {
    let missing = RangeError::OccurrenceNotInWindow { n, weekday };
    if n == 0 || start > end {
        return Err(missing);
    }
    let first = next_on_or_after(start, weekday).map_err(|_| missing)?;
    let candidate = first
        .checked_add_days(i64::from(n - 1) * DAYS_PER_WEEK)
        .map_err(|_| missing)?;
    if candidate > end {
        return Err(missing);
    }
    Ok(candidate)
}

/// The last `weekday` in the inclusive window `start..=end`.
///
/// # Errors
/// Returns `RangeError::OccurrenceNotInWindow` if the window has no such day.
pub fn last_occurrence_between(
    start: DayNumber,
    end: DayNumber,
    weekday: Weekday,
) -> Result<DayNumber, RangeError> {
    let missing = RangeError::OccurrenceNotInWindow { n: 1, weekday };
    match previous_on_or_before(end, weekday) {
        Ok(last) if last >= start => Ok(last),
        _ => Err(missing),
    }
}

/// The `n`-th `weekday` of a calendar year, e.g. the 20th Friday of 2024.
///
/// # Errors
/// Returns `RangeError` for an invalid year or an occurrence past year end.
pub fn nth_occurrence_in_year(year: i32, weekday: Weekday, n: u32) -> Result<DayNumber, RangeError> {
    let start = to_day_number(year, JANUARY, 1)?;
    let end = to_day_number(year, DECEMBER, 31)?;
    nth_occurrence_between(start, end, weekday, n)
}

/// # Errors
/// Returns `RangeError::InvalidYear` for an unsupported year.
pub fn last_occurrence_in_year(year: i32, weekday: Weekday) -> Result<DayNumber, RangeError> {
    let start = to_day_number(year, JANUARY, 1)?;
    let end = to_day_number(year, DECEMBER, 31)?;
    last_occurrence_between(start, end, weekday)
}
