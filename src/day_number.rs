//! Day-number core: conversions between Gregorian (year, month, day) triples
//! and a linear count of days since 0001-01-01.
//!
//! Everything else in the crate funnels its arithmetic through [`DayNumber`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{
    DAYS_BEFORE_MONTH, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS, DAYS_PER_4_YEARS, DAYS_PER_YEAR,
    FEBRUARY, MAX_DAY_NUMBER, MIN_DAY_NUMBER, TICKS_PER_DAY,
};
use crate::date::CalendarDate;
use crate::error::RangeError;
use crate::prelude::*;
use crate::types::{self, Day, Month, Year};
use crate::weekday::Weekday;

/// Days since 0001-01-01 in the proleptic Gregorian calendar.
/// Always within `MIN_DAY_NUMBER..=MAX_DAY_NUMBER` (years 1..=9999).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct DayNumber(i64);

impl DayNumber {
    /// 0001-01-01
    pub const MIN: Self = Self(MIN_DAY_NUMBER);
    /// 9999-12-31
    pub const MAX: Self = Self(MAX_DAY_NUMBER);

    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` outside `MIN_DAY_NUMBER..=MAX_DAY_NUMBER`.
    pub const fn new(value: i64) -> Result<Self, RangeError> {
        if value < MIN_DAY_NUMBER || value > MAX_DAY_NUMBER {
            return Err(RangeError::DayNumberOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Moves by `days` (either direction).
    ///
    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` if the result leaves the supported range.
    pub const fn checked_add_days(self, days: i64) -> Result<Self, RangeError> {
        match self.0.checked_add(days) {
            Some(value) => Self::new(value),
            None => Err(RangeError::DayNumberOutOfRange(if days < 0 {
                i64::MIN
            } else {
                i64::MAX
            })),
        }
    }

    /// Signed number of days from `self` to `other`.
    #[inline]
    pub const fn days_until(self, other: Self) -> i64 {
        other.0 - self.0
    }

    #[inline]
    pub const fn weekday(self) -> Weekday {
        Weekday::from_days(self.0)
    }

    pub fn to_date(self) -> CalendarDate {
        from_day_number(self)
    }
}

impl TryFrom<i64> for DayNumber {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date())
    }
}

/// A day number with a sub-day offset in 100 ns ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp {
    day:   DayNumber,
    ticks: i64,
}

impl Timestamp {
    /// # Errors
    /// Returns `RangeError::InvalidTicks` unless `0 <= ticks < TICKS_PER_DAY`.
    pub const fn new(day: DayNumber, ticks: i64) -> Result<Self, RangeError> {
        if ticks < 0 || ticks >= TICKS_PER_DAY {
            return Err(RangeError::InvalidTicks(ticks));
        }
        Ok(Self { day, ticks })
    }

    /// Splits a tick count measured from 0001-01-01T00:00.
    ///
    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` if the day part is unsupported.
    pub const fn from_total_ticks(total: i64) -> Result<Self, RangeError> {
        match DayNumber::new(total.div_euclid(TICKS_PER_DAY)) {
            Ok(day) => Ok(Self {
                day,
                ticks: total.rem_euclid(TICKS_PER_DAY),
            }),
            Err(err) => Err(err),
        }
    }

    /// Ticks since 0001-01-01T00:00. Cannot overflow: the supported range
    /// ends near 3.2e18 ticks.
    pub const fn total_ticks(self) -> i64 {
        self.day.get() * TICKS_PER_DAY + self.ticks
    }

    #[inline]
    pub const fn day(self) -> DayNumber {
        self.day
    }

    #[inline]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    pub const fn start_of_day(day: DayNumber) -> Self {
        Self { day, ticks: 0 }
    }

    /// Last representable tick of `day`
    pub const fn end_of_day(day: DayNumber) -> Self {
        Self {
            day,
            ticks: TICKS_PER_DAY - 1,
        }
    }

    /// Same time of day on another date
    pub const fn with_day(self, day: DayNumber) -> Self {
        Self { day, ..self }
    }
}

impl From<DayNumber> for Timestamp {
    fn from(day: DayNumber) -> Self {
        Self::start_of_day(day)
    }
}

/// Converts a calendar date to its day number.
///
/// # Errors
/// Returns `RangeError` if the year, month or day is invalid.
pub fn to_day_number(year: i32, month: u8, day: u8) -> Result<DayNumber, RangeError> {
    let year = Year::new(year)?;
    let month = Month::new(month)?;
    let day = Day::new(day, year, month)?;
    Ok(DayNumber(days_from_ymd(
        i64::from(year.get()),
        month.get(),
        day.get(),
    )))
}

/// Converts a day number back to its calendar date.
pub fn from_day_number(day_number: DayNumber) -> CalendarDate {
    let (year, month, day) = ymd_from_days(day_number.get());
    debug_assert!((1..=9999).contains(&year));
    CalendarDate::from_raw_parts(year as u16, month, day)
}

/// # Errors
/// Returns `RangeError` if the year or month is out of range.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, RangeError> {
    let year = Year::new(year)?;
    let month = Month::new(month)?;
    Ok(types::month_length(year.get(), month.get()))
}

/// # Errors
/// Returns `RangeError::InvalidYear` outside 1..=9999.
pub fn is_leap_year(year: i32) -> Result<bool, RangeError> {
    Year::new(year).map(Year::is_leap)
}

// --- unchecked arithmetic on the full integer line ---

const fn days_before_year(year: i64) -> i64 {
    let y = year - 1;
    y * DAYS_PER_YEAR + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

/// Days since 0001-01-01 without range checks. `month`/`day` must be valid for `year`.
pub(crate) const fn days_from_ymd(year: i64, month: u8, day: u8) -> i64 {
    let mut days = days_before_year(year) + DAYS_BEFORE_MONTH[(month - 1) as usize] as i64;
    if month > FEBRUARY && types::is_leap_i64(year) {
        days += 1;
    }
    days + day as i64 - 1
}

/// Zero-based day of year and the year, without range checks.
pub(crate) const fn year_and_ordinal_from_days(days: i64) -> (i64, i64) {
    let cycles_400 = days.div_euclid(DAYS_PER_400_YEARS);
    let mut rem = days.rem_euclid(DAYS_PER_400_YEARS);

    let mut centuries = rem / DAYS_PER_100_YEARS;
    // last day of a 400-year cycle
    if centuries == 4 {
        centuries = 3;
    }
    rem -= centuries * DAYS_PER_100_YEARS;

    let quads = rem / DAYS_PER_4_YEARS;
    rem -= quads * DAYS_PER_4_YEARS;

    let mut years = rem / DAYS_PER_YEAR;
    // last day of a leap year
    if years == 4 {
        years = 3;
    }
    rem -= years * DAYS_PER_YEAR;

    (cycles_400 * 400 + centuries * 100 + quads * 4 + years + 1, rem)
}

/// Inverse of [`days_from_ymd`], without range checks.
pub(crate) const fn ymd_from_days(days: i64) -> (i64, u8, u8) {
    let (year, ordinal) = year_and_ordinal_from_days(days);
    let leap = types::is_leap_i64(year);

    let mut month = 12;
    loop {
        let mut before = DAYS_BEFORE_MONTH[month - 1] as i64;
        if leap && (month as u8) > FEBRUARY {
            before += 1;
        }
        if ordinal >= before {
            return (year, month as u8, (ordinal - before + 1) as u8);
        }
        month -= 1;
    }
}
