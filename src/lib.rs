//! Calendar period arithmetic over a linear day number: quarters under
//! regional fiscal-year definitions, 52/53-week retail fiscal calendars,
//! ISO and culture-defined weeks, weekday navigation and weekend rules.
//!
//! Every operation is a pure function of its arguments. Definitions the
//! crate cannot resolve on its own (`Custom` quarters and weekends) are
//! supplied through the [`QuarterProvider`] and [`WeekendProvider`] traits.

mod consts;
mod date;
mod day_number;
mod error;
mod fiscal;
mod iso_week;
mod navigator;
mod prelude;
mod quarter;
mod types;
mod week;
mod weekday;
mod weekend;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use date::{CalendarDate, ParseError};
pub use day_number::{
    DayNumber, Timestamp, days_in_month, from_day_number, is_leap_year, to_day_number,
};
pub use error::{CalendarError, ErrorKind, RangeError};
pub use fiscal::{
    FiscalCalendarConfig, FiscalYearLength, PeriodPattern, RetailFiscalCalendar,
    align_to_start_of_week,
};
pub use iso_week::{
    IsoWeek, first_date_of_iso_week, iso_week, iso_weeks_in_year, last_date_of_iso_week,
};
pub use navigator::{
    WeekOfMonthOrdinal, is_last_occurrence_in_month, last_occurrence_between,
    last_occurrence_in_year, nearest_occurrence, next_on_or_after, nth_occurrence_between,
    nth_occurrence_in_month, nth_occurrence_in_year, occurrences_in_month, ordinal_in_month,
    previous_on_or_before, strictly_next, strictly_previous,
};
pub use quarter::{
    BuiltinQuarters, Quarter, QuarterDefinition, QuarterIndex, QuarterProvider,
    nth_occurrence_in_quarter, quarter_end, quarter_start, quarters_between, resolve_quarter,
    resolve_quarter_with,
};
pub use types::{Day, Month, Year};
pub use week::{CalendarWeekRule, WeekRule, end_of_week, start_of_week, week_of_year};
pub use weekday::Weekday;
pub use weekend::{
    WeekdaySet, WeekendDefinition, WeekendProvider, is_weekend, is_working_day,
    next_working_day, previous_working_day,
};
