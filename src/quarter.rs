//! Quarter resolution under built-in fiscal-year definitions, and the
//! [`QuarterProvider`] extension point for everything else.
//!
//! Built-in definitions anchor the fiscal year on a fixed month and day. A
//! fiscal year is labelled with the calendar year in which it begins, so
//! under [`QuarterDefinition::FinancialJuly`] 2024-07-15 falls in FY2024 Q1
//! and 2025-03-01 in FY2024 Q3.
//!
//! `QuarterDefinition::Custom` has no built-in meaning. Every function here
//! that takes a definition rejects it with
//! [`CalendarError::ProviderRequired`]; use [`resolve_quarter_with`] and a
//! provider instead.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_DAY, MONTHS_PER_QUARTER};
use crate::date::CalendarDate;
use crate::day_number::{self, DayNumber, Timestamp};
use crate::error::{CalendarError, RangeError};
use crate::navigator;
use crate::types::Month;
use crate::weekday::Weekday;

const MONTHS_PER_YEAR: i64 = 12;

/// How a year is partitioned into four quarters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuarterDefinition {
    /// January 1
    #[default]
    CalendarYear,
    /// July 1 (e.g. Australia, New Zealand)
    FinancialJuly,
    /// April 1 (e.g. India, Japan, UK government)
    FinancialApril,
    /// October 1 (e.g. US federal government)
    FinancialOctober,
    /// February 1 (common retail convention)
    FinancialFebruary,
    /// April 6, the UK personal tax year. Quarters are day-aligned: each
    /// starts on the 6th of its first month.
    UkTaxYear,
    /// Resolved only through a [`QuarterProvider`]
    Custom,
}

impl QuarterDefinition {
    /// The (month, day) on which the fiscal year begins, `None` for `Custom`.
    pub const fn anchor(self) -> Option<(u8, u8)> {
        match self {
            Self::CalendarYear => Some((1, MIN_DAY)),
            Self::FinancialJuly => Some((7, MIN_DAY)),
            Self::FinancialApril => Some((4, MIN_DAY)),
            Self::FinancialOctober => Some((10, MIN_DAY)),
            Self::FinancialFebruary => Some((2, MIN_DAY)),
            Self::UkTaxYear => Some((4, 6)),
            Self::Custom => None,
        }
    }

    fn require_anchor(self, operation: &'static str) -> Result<Anchor, CalendarError> {
        match self.anchor() {
            Some((month, day)) => Ok(Anchor { month, day }),
            None => {
                debug!("{operation} refused QuarterDefinition::Custom without a provider");
                Err(CalendarError::ProviderRequired { operation })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    month: u8,
    day:   u8,
}

impl Anchor {
    /// Fiscal year and zero-based fiscal month (0..12) containing `date`.
    fn position(self, date: CalendarDate) -> (i64, u8) {
        let mut months = i64::from(date.year()) * MONTHS_PER_YEAR + i64::from(date.month() - 1);
        if date.day() < self.day {
            months -= 1;
        }
        let fiscal = months - i64::from(self.month - 1);
        (
            fiscal.div_euclid(MONTHS_PER_YEAR),
            fiscal.rem_euclid(MONTHS_PER_YEAR) as u8,
        )
    }

    /// Raw day count of the first day of `quarter` in `fiscal_year`, which
    /// may lie outside the supported range.
    fn quarter_start_days(self, fiscal_year: i64, quarter: QuarterIndex) -> i64 {
        let months = fiscal_year * MONTHS_PER_YEAR
            + i64::from(self.month - 1)
            + i64::from(quarter.zero_based() * MONTHS_PER_QUARTER);
        day_number::days_from_ymd(
            months.div_euclid(MONTHS_PER_YEAR),
            months.rem_euclid(MONTHS_PER_YEAR) as u8 + 1,
            self.day,
        )
    }

    fn quarter_start(self, fiscal_year: i64, quarter: QuarterIndex) -> Result<DayNumber, RangeError> {
        DayNumber::new(self.quarter_start_days(fiscal_year, quarter))
    }

    fn quarter_end(self, fiscal_year: i64, quarter: QuarterIndex) -> Result<DayNumber, RangeError> {
        let (next_year, next_quarter) = match quarter.succ() {
            Some(next) => (fiscal_year, next),
            None => (fiscal_year + 1, QuarterIndex::Q1),
        };
        DayNumber::new(self.quarter_start_days(next_year, next_quarter) - 1)
    }

    fn start_month(self, quarter: QuarterIndex) -> Month {
        let zero_based = (self.month - 1 + quarter.zero_based() * MONTHS_PER_QUARTER) % 12;
        Month::from_raw(zero_based + 1)
    }
}

/// One of the four quarters of a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QuarterIndex {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

impl QuarterIndex {
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// # Errors
    /// Returns `RangeError::InvalidQuarter` outside 1..=4.
    pub const fn new(quarter: u8) -> Result<Self, RangeError> {
        match quarter {
            1 => Ok(Self::Q1),
            2 => Ok(Self::Q2),
            3 => Ok(Self::Q3),
            4 => Ok(Self::Q4),
            _ => Err(RangeError::InvalidQuarter(quarter)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self as u8
    }

    #[inline]
    pub(crate) const fn zero_based(self) -> u8 {
        self as u8 - 1
    }

    /// Following quarter in the same fiscal year, `None` after Q4.
    pub const fn succ(self) -> Option<Self> {
        match self {
            Self::Q1 => Some(Self::Q2),
            Self::Q2 => Some(Self::Q3),
            Self::Q3 => Some(Self::Q4),
            Self::Q4 => None,
        }
    }

    /// Preceding quarter in the same fiscal year, `None` before Q1.
    pub const fn pred(self) -> Option<Self> {
        match self {
            Self::Q1 => None,
            Self::Q2 => Some(Self::Q1),
            Self::Q3 => Some(Self::Q2),
            Self::Q4 => Some(Self::Q3),
        }
    }

    pub(crate) const fn from_zero_based(index: u8) -> Self {
        match index {
            0 => Self::Q1,
            1 => Self::Q2,
            2 => Self::Q3,
            _ => Self::Q4,
        }
    }
}

impl TryFrom<u8> for QuarterIndex {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuarterIndex> for u8 {
    fn from(quarter: QuarterIndex) -> Self {
        quarter.get()
    }
}

/// A resolved quarter: its fiscal-year label, position and inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Quarter {
    fiscal_year: i32,
    index:       QuarterIndex,
    start:       DayNumber,
    end:         DayNumber,
    definition:  QuarterDefinition,
}

impl Quarter {
    /// Calendar year in which this quarter's fiscal year begins
    pub const fn fiscal_year(&self) -> i32 {
        self.fiscal_year
    }

    pub const fn index(&self) -> QuarterIndex {
        self.index
    }

    /// First day of the quarter
    pub const fn start(&self) -> DayNumber {
        self.start
    }

    /// Last day of the quarter (inclusive)
    pub const fn end(&self) -> DayNumber {
        self.end
    }

    /// `Custom` for quarters resolved through a provider
    pub const fn definition(&self) -> QuarterDefinition {
        self.definition
    }

    pub fn contains(&self, day: DayNumber) -> bool {
        (self.start..=self.end).contains(&day)
    }

    pub const fn len_days(&self) -> i64 {
        self.start.days_until(self.end) + 1
    }

    /// Last tick of the quarter's final day
    pub const fn end_of_period(&self) -> Timestamp {
        Timestamp::end_of_day(self.end)
    }

    /// The following quarter under the same definition.
    ///
    /// # Errors
    /// Returns `CalendarError::ProviderRequired` for provider-resolved
    /// quarters, or a range error past 9999-12-31.
    pub fn next(&self) -> Result<Self, CalendarError> {
        let anchor = self.definition.require_anchor("Quarter::next")?;
        let (year, index) = match self.index.succ() {
            Some(next) => (self.fiscal_year, next),
            None => (self.fiscal_year + 1, QuarterIndex::Q1),
        };
        Ok(build_quarter(anchor, self.definition, i64::from(year), index)?)
    }

    /// The preceding quarter under the same definition.
    ///
    /// # Errors
    /// As [`Quarter::next`], bounded by 0001-01-01.
    pub fn previous(&self) -> Result<Self, CalendarError> {
        let anchor = self.definition.require_anchor("Quarter::previous")?;
        let (year, index) = match self.index.pred() {
            Some(previous) => (self.fiscal_year, previous),
            None => (self.fiscal_year - 1, QuarterIndex::Q4),
        };
        Ok(build_quarter(anchor, self.definition, i64::from(year), index)?)
    }
}

fn build_quarter(
    anchor: Anchor,
    definition: QuarterDefinition,
    fiscal_year: i64,
    index: QuarterIndex,
) -> Result<Quarter, RangeError> {
    let start = anchor.quarter_start(fiscal_year, index)?;
    let end = anchor.quarter_end(fiscal_year, index)?;
    Ok(Quarter {
        fiscal_year: i32::try_from(fiscal_year).map_err(|_| RangeError::InvalidYear(fiscal_year))?,
        index,
        start,
        end,
        definition,
    })
}

/// Resolves the quarter containing `date`.
///
/// # Errors
/// Returns `CalendarError::ProviderRequired` for `Custom`, or a range error
/// when the quarter's bounds fall outside years 1..=9999.
pub fn resolve_quarter(
    date: CalendarDate,
    definition: QuarterDefinition,
) -> Result<Quarter, CalendarError> {
    let anchor = definition.require_anchor("resolve_quarter")?;
    let (fiscal_year, month) = anchor.position(date);
    let index = QuarterIndex::from_zero_based(month / MONTHS_PER_QUARTER);
    Ok(build_quarter(anchor, definition, fiscal_year, index)?)
}

/// First day of `quarter` (1..=4) of `fiscal_year`.
///
/// # Errors
/// Returns `CalendarError::ProviderRequired` for `Custom`,
/// `RangeError::InvalidQuarter` for a bad index, or a range error when the
/// boundary is unrepresentable.
pub fn quarter_start(
    fiscal_year: i32,
    quarter: u8,
    definition: QuarterDefinition,
) -> Result<DayNumber, CalendarError> {
    let anchor = definition.require_anchor("quarter_start")?;
    let quarter = QuarterIndex::new(quarter)?;
    Ok(anchor.quarter_start(i64::from(fiscal_year), quarter)?)
}

/// Last day (inclusive) of `quarter` (1..=4) of `fiscal_year`.
///
/// # Errors
/// As [`quarter_start`].
pub fn quarter_end(
    fiscal_year: i32,
    quarter: u8,
    definition: QuarterDefinition,
) -> Result<DayNumber, CalendarError> {
    let anchor = definition.require_anchor("quarter_end")?;
    let quarter = QuarterIndex::new(quarter)?;
    Ok(anchor.quarter_end(i64::from(fiscal_year), quarter)?)
}

/// Signed number of quarter boundaries crossed going from `from` to `to`.
///
/// # Errors
/// Returns `CalendarError::ProviderRequired` for `Custom`.
pub fn quarters_between(
    from: CalendarDate,
    to: CalendarDate,
    definition: QuarterDefinition,
) -> Result<i64, CalendarError> {
    let anchor = definition.require_anchor("quarters_between")?;
    let ordinal = |date: CalendarDate| {
        let (year, month) = anchor.position(date);
        year * 4 + i64::from(month / MONTHS_PER_QUARTER)
    };
    Ok(ordinal(to) - ordinal(from))
}

/// The `n`-th `weekday` inside a quarter, e.g. the 13th Friday of FY2024 Q2.
///
/// # Errors
/// As [`quarter_start`], plus `RangeError::OccurrenceNotInWindow`.
pub fn nth_occurrence_in_quarter(
    fiscal_year: i32,
    quarter: u8,
    definition: QuarterDefinition,
    weekday: Weekday,
    n: u32,
) -> Result<DayNumber, CalendarError> {
    let start = quarter_start(fiscal_year, quarter, definition)?;
    let end = quarter_end(fiscal_year, quarter, definition)?;
    Ok(navigator::nth_occurrence_between(start, end, weekday, n)?)
}

/// Capability set for quarter systems the built-in definitions cannot
/// express, such as week-based retail calendars.
pub trait QuarterProvider: Send + Sync {
    /// # Errors
    /// Implementations reject dates their calendar does not cover.
    fn get_quarter(&self, date: CalendarDate) -> Result<QuarterIndex, CalendarError>;

    /// # Errors
    /// As [`QuarterProvider::get_quarter`].
    fn get_quarter_start(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError>;

    /// # Errors
    /// As [`QuarterProvider::get_quarter`].
    fn get_quarter_end(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError>;

    /// Calendar month in which `quarter` begins.
    ///
    /// # Errors
    /// Implementations may fail if the boundary is unrepresentable.
    fn get_start_month_from_quarter(&self, quarter: QuarterIndex) -> Result<Month, CalendarError>;

    /// Calendar year in which the fiscal year containing `date` begins.
    ///
    /// The default steps back from the quarter's start through earlier
    /// quarter starts to Q1 and takes that day's year.
    ///
    /// # Errors
    /// Propagates the provider's errors. The default returns
    /// `RangeError::DayNumberOutOfRange` when Q1 starts before 0001-01-01.
    fn get_fiscal_year(&self, date: CalendarDate) -> Result<i32, CalendarError> {
        let index = self.get_quarter(date)?;
        let mut year_start = self.get_quarter_start(date)?;
        for _ in 1..index.get() {
            year_start = self.get_quarter_start(year_start.add_days(-1)?)?;
        }
        Ok(i32::from(year_start.year()))
    }
}

/// Resolves the quarter containing `date` through `provider`.
///
/// The fiscal-year label comes from [`QuarterProvider::get_fiscal_year`]:
/// by default the calendar year of the provider's Q1 start. For a
/// [`RetailFiscalCalendar`](crate::RetailFiscalCalendar) that is the year of
/// the week-aligned anchor, not of the configured start, so a year configured
/// to start on Saturday 2022-01-01 with Sunday weeks begins on 2021-12-26 and
/// is labelled 2021.
///
/// # Errors
/// Propagates the provider's errors.
pub fn resolve_quarter_with(
    date: CalendarDate,
    provider: &dyn QuarterProvider,
) -> Result<Quarter, CalendarError> {
    let index = provider.get_quarter(date)?;
    let start = provider.get_quarter_start(date)?;
    let end = provider.get_quarter_end(date)?;
    let fiscal_year = provider.get_fiscal_year(date)?;
    trace!("provider resolved {date} to FY{fiscal_year} {index:?} starting {start}");

    Ok(Quarter {
        fiscal_year,
        index,
        start: start.day_number(),
        end: end.day_number(),
        definition: QuarterDefinition::Custom,
    })
}

/// Exposes a built-in definition through [`QuarterProvider`], so call sites
/// written against providers accept standard quarters too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinQuarters {
    definition: QuarterDefinition,
    anchor:     Anchor,
}

impl BuiltinQuarters {
    /// # Errors
    /// Returns `CalendarError::ProviderRequired` for `Custom`.
    pub fn new(definition: QuarterDefinition) -> Result<Self, CalendarError> {
        let anchor = definition.require_anchor("BuiltinQuarters::new")?;
        Ok(Self { definition, anchor })
    }

    pub const fn definition(&self) -> QuarterDefinition {
        self.definition
    }
}

impl QuarterProvider for BuiltinQuarters {
    fn get_quarter(&self, date: CalendarDate) -> Result<QuarterIndex, CalendarError> {
        Ok(resolve_quarter(date, self.definition)?.index())
    }

    fn get_quarter_start(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        Ok(resolve_quarter(date, self.definition)?.start().to_date())
    }

    fn get_quarter_end(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        Ok(resolve_quarter(date, self.definition)?.end().to_date())
    }

    fn get_start_month_from_quarter(&self, quarter: QuarterIndex) -> Result<Month, CalendarError> {
        Ok(self.anchor.start_month(quarter))
    }

    /// Same label as [`resolve_quarter`], including FY0 for the first
    /// months of year 1 under a mid-year anchor.
    fn get_fiscal_year(&self, date: CalendarDate) -> Result<i32, CalendarError> {
        Ok(resolve_quarter(date, self.definition)?.fiscal_year())
    }
}
