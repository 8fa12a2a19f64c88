use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_YEAR,
};
use crate::error::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it lies in `MIN_YEAR..=MAX_YEAR`
    ///
    /// # Errors
    /// Returns `RangeError::InvalidYear` for 0, negative years and years past `MAX_YEAR`.
    pub fn new(value: i32) -> Result<Self, RangeError> {
        u16::try_from(value)
            .ok()
            .filter(|v| (MIN_YEAR..=MAX_YEAR).contains(v))
            .and_then(NonZeroU16::new)
            .map(Self)
            .ok_or(RangeError::InvalidYear(i64::from(value)))
    }

    /// For values already known to be in range (e.g. decoded from a `DayNumber`).
    pub(crate) fn from_raw(value: u16) -> Self {
        debug_assert!((MIN_YEAR..=MAX_YEAR).contains(&value));
        Self(NonZeroU16::new(value).unwrap_or(NonZeroU16::MIN))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap(self.get())
    }

    /// Days in this year, 365 or 366
    pub const fn len_days(self) -> u16 {
        if self.is_leap() { 366 } else { 365 }
    }
}

impl TryFrom<i32> for Year {
    type Error = RangeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        Self::from(year.0.get())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `RangeError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, RangeError> {
        let non_zero = NonZeroU8::new(value).ok_or(RangeError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(RangeError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    pub(crate) fn from_raw(value: u8) -> Self {
        debug_assert!((1..=MAX_MONTH).contains(&value));
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day-of-month value, valid for the year and month it was checked against.
/// Not serialized on its own: a day is only meaningful inside a `CalendarDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of the given month
    ///
    /// # Errors
    /// Returns `RangeError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, RangeError> {
        let max_day = month_length(year.get(), month.get());
        let invalid = RangeError::InvalidDay {
            year: year.get(),
            month: month.get(),
            day: value,
            max_day,
        };
        if value > max_day {
            return Err(invalid);
        }
        NonZeroU8::new(value).map(Self).ok_or(invalid)
    }

    pub(crate) fn from_raw(value: u8) -> Self {
        debug_assert!(value >= 1);
        Self(NonZeroU8::new(value).unwrap_or(NonZeroU8::MIN))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

// Helper functions

pub(crate) const fn is_leap(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Leap rule over the full integer line, for arithmetic that may step
/// briefly outside the supported year range.
pub(crate) const fn is_leap_i64(year: i64) -> bool {
    (year.rem_euclid(LEAP_YEAR_CYCLE as i64) == 0 && year.rem_euclid(CENTURY_CYCLE as i64) != 0)
        || year.rem_euclid(GREGORIAN_CYCLE as i64) == 0
}

pub(crate) const fn month_length(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
