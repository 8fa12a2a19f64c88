//! Error types for calendar period arithmetic.
//!
//! [`RangeError`] covers every bad input value or unrepresentable result.
//! [`CalendarError`] wraps it and adds the usage errors raised when a
//! caller asks a built-in resolver for behavior only a provider can supply.

use crate::{MAX_DAY_NUMBER, MAX_MONTH, MAX_YEAR, TICKS_PER_DAY};
use crate::navigator::WeekOfMonthOrdinal;
use crate::weekday::Weekday;

/// An input value or computed result falls outside its valid domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("invalid year: {0} (must be 1-{max})", max = MAX_YEAR)]
    InvalidYear(i64),

    #[error("invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    #[error("invalid day {day} for month {year}-{month:02} (max {max_day})")]
    InvalidDay {
        year:    u16,
        month:   u8,
        day:     u8,
        max_day: u8,
    },

    /// A day number (input or computed) lies outside 0001-01-01..=9999-12-31.
    #[error("day number {0} is outside the supported range 0-{max}", max = MAX_DAY_NUMBER)]
    DayNumberOutOfRange(i64),

    #[error("invalid tick offset: {0} (must be 0-{max} exclusive)", max = TICKS_PER_DAY)]
    InvalidTicks(i64),

    #[error("invalid quarter: {0} (must be 1-4)")]
    InvalidQuarter(u8),

    #[error("invalid ISO week {week} for ISO year {iso_year} (must be 1-{weeks_in_year})")]
    InvalidIsoWeek {
        iso_year:      i32,
        week:          u8,
        weeks_in_year: u8,
    },

    #[error("{year}-{month:02} has no {ordinal:?} {weekday:?}")]
    OrdinalNotInMonth {
        year:    u16,
        month:   u8,
        weekday: Weekday,
        ordinal: WeekOfMonthOrdinal,
    },

    /// Occurrence index for a quarter or year window is zero or past the window.
    #[error("occurrence {n} of {weekday:?} does not exist in the requested window")]
    OccurrenceNotInWindow { n: u32, weekday: Weekday },

    /// A date lies outside the single fiscal year a provider was built for.
    #[error("week offset {total_weeks} is outside the fiscal year (0-{weeks_in_year} exclusive)")]
    FiscalWeekOutOfRange { total_weeks: i64, weeks_in_year: u8 },

    #[error("invalid fiscal period: {0} (must be 1-12)")]
    InvalidFiscalPeriod(u8),

    /// A weekday bit set with the unused high bit set.
    #[error("invalid weekday set: {0:#010b} (only the low seven bits name weekdays)")]
    InvalidWeekdaySet(u8),
}

/// Broad classification of a [`CalendarError`], for callers that only need
/// to distinguish bad data from API misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input value or unrepresentable result
    Range,
    /// A built-in resolver was asked to handle a provider-only definition
    InvalidOperation,
    /// A required provider argument was not supplied
    Precondition,
}

/// Error type for operations that dispatch on definitions and providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error(transparent)]
    Range(#[from] RangeError),

    /// `QuarterDefinition::Custom` reached a built-in resolver.
    #[error("{operation} cannot resolve a Custom quarter definition: provider required")]
    ProviderRequired { operation: &'static str },

    /// A `Custom` definition was requested without the provider that implements it.
    #[error("{capability} provider is required for a Custom definition")]
    MissingProvider { capability: &'static str },

    /// The weekend provider classifies every day of the week as weekend.
    #[error("weekend definition leaves no working day in the week")]
    NoWorkingDay,
}

impl CalendarError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Range(_) => ErrorKind::Range,
            Self::ProviderRequired { .. } | Self::NoWorkingDay => ErrorKind::InvalidOperation,
            Self::MissingProvider { .. } => ErrorKind::Precondition,
        }
    }
}
