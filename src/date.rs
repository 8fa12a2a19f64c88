use std::str::FromStr;

use crate::consts::DATE_SEPARATOR;
use crate::day_number::{self, DayNumber};
use crate::error::RangeError;
use crate::prelude::*;
use crate::types::{self, Day, Month, Year};
use crate::weekday::Weekday;

/// A validated proleptic Gregorian date.
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{}-{}-{}", year, month, day)]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "{_0}")]
    OutOfRange(RangeError),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl From<RangeError> for ParseError {
    fn from(err: RangeError) -> Self {
        Self::OutOfRange(err)
    }
}

impl CalendarDate {
    /// # Errors
    /// Returns `RangeError` if any component is out of range for the calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, RangeError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from components already known to be valid
    pub(crate) fn from_raw_parts(year: u16, month: u8, day: u8) -> Self {
        debug_assert!((1..=types::month_length(year, month)).contains(&day));
        Self {
            year:  Year::from_raw(year),
            month: Month::from_raw(month),
            day:   Day::from_raw(day),
        }
    }

    pub fn from_day_number(day_number: DayNumber) -> Self {
        day_number::from_day_number(day_number)
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day-of-month component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub fn day_number(&self) -> DayNumber {
        let days =
            day_number::days_from_ymd(i64::from(self.year()), self.month(), self.day());
        // components were validated on construction
        DayNumber::new(days).unwrap_or(DayNumber::MIN)
    }

    pub fn weekday(&self) -> Weekday {
        self.day_number().weekday()
    }

    /// One-based day of the year
    pub fn day_of_year(&self) -> u16 {
        let (_, ordinal) = day_number::year_and_ordinal_from_days(self.day_number().get());
        ordinal as u16 + 1
    }

    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` if the result leaves years 1..=9999.
    pub fn add_days(&self, days: i64) -> Result<Self, RangeError> {
        self.day_number()
            .checked_add_days(days)
            .map(DayNumber::to_date)
    }

    /// Same month and day `years` later, clamping Feb 29 to Feb 28 when the
    /// target year is not a leap year.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidYear` if the target year is unsupported.
    pub fn add_years(&self, years: i32) -> Result<Self, RangeError> {
        let target = i32::from(self.year()).saturating_add(years);
        let year = Year::new(target)?;
        let day = self
            .day()
            .min(types::month_length(year.get(), self.month()));
        Ok(Self::from_raw_parts(year.get(), self.month(), day))
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl From<CalendarDate> for DayNumber {
    fn from(date: CalendarDate) -> Self {
        date.day_number()
    }
}

impl From<DayNumber> for CalendarDate {
    fn from(day_number: DayNumber) -> Self {
        day_number.to_date()
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses ISO 8601 calendar dates: `YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s): {trimmed}",
                parts.len()
            )));
        };

        let year = Self::parse_component::<i32>(year)?;
        let month = Self::parse_component::<u8>(month)?;
        let day = Self::parse_component::<u8>(day)?;

        Ok(Self::new(year, month, day)?)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
