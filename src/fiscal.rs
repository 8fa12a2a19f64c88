//! Week-based retail fiscal calendars (5-4-4 and its 4-4-5 / 4-5-4 variants).
//!
//! A [`RetailFiscalCalendar`] describes exactly one fiscal year of 52 or 53
//! whole weeks. The year begins on the configured start date snapped back to
//! the week-start day; each quarter is 13 weeks, and a 53rd week belongs to
//! Q4. Dates outside the year are rejected rather than wrapped into a
//! neighbouring year.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, QUARTERS_PER_YEAR, WEEKS_PER_FISCAL_QUARTER, WEEKS_PER_FISCAL_YEAR};
use crate::date::CalendarDate;
use crate::day_number::{self, DayNumber};
use crate::error::{CalendarError, RangeError};
use crate::navigator;
use crate::quarter::{QuarterIndex, QuarterProvider};
use crate::types::{self, Month};
use crate::weekday::Weekday;

const PERIODS_PER_YEAR: u8 = 12;

/// Weeks in each of the three periods of a 13-week quarter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodPattern {
    #[default]
    FiveFourFour,
    FourFourFive,
    FourFiveFour,
}

impl PeriodPattern {
    pub const fn weeks(self) -> [u8; 3] {
        match self {
            Self::FiveFourFour => [5, 4, 4],
            Self::FourFourFive => [4, 4, 5],
            Self::FourFiveFour => [4, 5, 4],
        }
    }

    /// Zero-based period within a quarter for a zero-based week of that
    /// quarter. Weeks past the pattern (the 53rd week) stay in the last period.
    const fn period_of_week(self, week_in_quarter: u8) -> u8 {
        let [first, second, _] = self.weeks();
        if week_in_quarter < first {
            0
        } else if week_in_quarter < first + second {
            1
        } else {
            2
        }
    }

    /// Weeks in the quarter before the given zero-based period starts.
    const fn weeks_before_period(self, period_in_quarter: u8) -> u8 {
        let [first, second, _] = self.weeks();
        match period_in_quarter {
            0 => 0,
            1 => first,
            _ => first + second,
        }
    }
}

/// How the number of weeks in the fiscal year is decided.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiscalYearLength {
    /// 53 weeks when next year's aligned start lands more than 364 days on
    #[default]
    Auto,
    FiftyTwoWeeks,
    FiftyThreeWeeks,
}

const fn default_week_start() -> Weekday {
    Weekday::Sunday
}

/// Settings for one retail fiscal year, typically loaded from a config file.
///
/// ```json
/// { "fiscal_year_start": "2024-02-01", "week_start": "Sunday", "pattern": "FourFourFive" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalCalendarConfig {
    /// Nominal first day of the fiscal year, before week alignment
    pub fiscal_year_start: CalendarDate,
    #[serde(default = "default_week_start")]
    pub week_start:        Weekday,
    #[serde(default)]
    pub pattern:           PeriodPattern,
    #[serde(default)]
    pub year_length:       FiscalYearLength,
}

impl FiscalCalendarConfig {
    /// Sunday-start 5-4-4 year with automatic 53-week detection
    pub const fn new(fiscal_year_start: CalendarDate) -> Self {
        Self {
            fiscal_year_start,
            week_start: default_week_start(),
            pattern: PeriodPattern::FiveFourFour,
            year_length: FiscalYearLength::Auto,
        }
    }
}

/// Snaps `day` back to the most recent `week_start` (itself if it already is one).
///
/// # Errors
/// Returns `RangeError::DayNumberOutOfRange` if that day precedes 0001-01-01.
pub fn align_to_start_of_week(day: DayNumber, week_start: Weekday) -> Result<DayNumber, RangeError> {
    navigator::previous_on_or_before(day, week_start)
}

/// One 52- or 53-week retail fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RetailFiscalCalendar {
    anchor:        DayNumber,
    end:           DayNumber,
    week_start:    Weekday,
    weeks_in_year: u8,
    pattern:       PeriodPattern,
}

impl RetailFiscalCalendar {
    /// 5-4-4 year with automatic 53-week detection.
    ///
    /// # Errors
    /// Returns `RangeError` if the fiscal year does not fit in years 1..=9999.
    pub fn new(fiscal_year_start: CalendarDate, week_start: Weekday) -> Result<Self, RangeError> {
        Self::from_config(&FiscalCalendarConfig {
            week_start,
            ..FiscalCalendarConfig::new(fiscal_year_start)
        })
    }

    /// # Errors
    /// Returns `RangeError` if the fiscal year does not fit in years 1..=9999.
    pub fn from_config(config: &FiscalCalendarConfig) -> Result<Self, RangeError> {
        let start = config.fiscal_year_start;
        let anchor = align_to_start_of_week(start.day_number(), config.week_start)?;
        let weeks_in_year = match config.year_length {
            FiscalYearLength::Auto => {
                if next_year_gap(start, anchor, config.week_start) > 364 {
                    WEEKS_PER_FISCAL_YEAR + 1
                } else {
                    WEEKS_PER_FISCAL_YEAR
                }
            }
            FiscalYearLength::FiftyTwoWeeks => WEEKS_PER_FISCAL_YEAR,
            FiscalYearLength::FiftyThreeWeeks => WEEKS_PER_FISCAL_YEAR + 1,
        };
        let end = anchor.checked_add_days(i64::from(weeks_in_year) * DAYS_PER_WEEK - 1)?;

        debug!(
            "retail fiscal calendar from {start}: anchor {anchor}, {weeks_in_year} weeks, {:?}",
            config.pattern
        );
        Ok(Self {
            anchor,
            end,
            week_start: config.week_start,
            weeks_in_year,
            pattern: config.pattern,
        })
    }

    /// First day of the fiscal year, on a week-start day
    pub const fn anchor(&self) -> DayNumber {
        self.anchor
    }

    /// Last day of the fiscal year, including any 53rd week
    pub const fn fiscal_year_end(&self) -> DayNumber {
        self.end
    }

    pub const fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub const fn pattern(&self) -> PeriodPattern {
        self.pattern
    }

    /// 52 or 53
    pub const fn weeks_in_year(&self) -> u8 {
        self.weeks_in_year
    }

    pub const fn is_53_week_fiscal_year(&self) -> bool {
        self.weeks_in_year > WEEKS_PER_FISCAL_YEAR
    }

    pub fn contains(&self, day: DayNumber) -> bool {
        (self.anchor..=self.end).contains(&day)
    }

    /// # Errors
    /// Returns `RangeError::DayNumberOutOfRange` before 0001-01-01.
    pub fn align_to_start_of_week(&self, day: DayNumber) -> Result<DayNumber, RangeError> {
        align_to_start_of_week(day, self.week_start)
    }

    /// Zero-based week of the fiscal year containing `day`.
    fn week_offset(&self, day: DayNumber) -> Result<u8, RangeError> {
        // the anchor sits on a week start, so flooring equals aligning `day` first
        let total_weeks = self.anchor.days_until(day).div_euclid(DAYS_PER_WEEK);
        u8::try_from(total_weeks)
            .ok()
            .filter(|week| *week < self.weeks_in_year)
            .ok_or(RangeError::FiscalWeekOutOfRange {
                total_weeks,
                weeks_in_year: self.weeks_in_year,
            })
    }

    /// One-based week of the fiscal year (1..=52 or 1..=53).
    ///
    /// # Errors
    /// Returns `RangeError::FiscalWeekOutOfRange` outside this fiscal year.
    pub fn week_of_fiscal_year(&self, date: CalendarDate) -> Result<u8, RangeError> {
        self.week_offset(date.day_number()).map(|week| week + 1)
    }

    /// # Errors
    /// Returns `RangeError::FiscalWeekOutOfRange` outside this fiscal year.
    pub fn quarter_of(&self, date: CalendarDate) -> Result<QuarterIndex, RangeError> {
        let week = self.week_offset(date.day_number())?;
        let quarter = (week / WEEKS_PER_FISCAL_QUARTER + 1).min(QUARTERS_PER_YEAR);
        QuarterIndex::new(quarter)
    }

    /// First day of `quarter` within this fiscal year.
    pub fn quarter_start(&self, quarter: QuarterIndex) -> DayNumber {
        self.days_after_anchor(i64::from(quarter.zero_based() * WEEKS_PER_FISCAL_QUARTER) * DAYS_PER_WEEK)
    }

    /// Last day of `quarter`; Q4 runs to the fiscal year end.
    pub fn quarter_end(&self, quarter: QuarterIndex) -> DayNumber {
        match quarter.succ() {
            Some(next) => self.days_after_anchor(self.anchor.days_until(self.quarter_start(next)) - 1),
            None => self.end,
        }
    }

    /// Fiscal period (1..=12) containing `date`. The 53rd week counts
    /// towards period 12.
    ///
    /// # Errors
    /// Returns `RangeError::FiscalWeekOutOfRange` outside this fiscal year.
    pub fn fiscal_period(&self, date: CalendarDate) -> Result<u8, RangeError> {
        let week = self.week_offset(date.day_number())?;
        let quarter = (week / WEEKS_PER_FISCAL_QUARTER).min(QUARTERS_PER_YEAR - 1);
        let week_in_quarter = week - quarter * WEEKS_PER_FISCAL_QUARTER;
        Ok(quarter * 3 + self.pattern.period_of_week(week_in_quarter) + 1)
    }

    /// First day of fiscal period `period` (1..=12).
    ///
    /// # Errors
    /// Returns `RangeError::InvalidFiscalPeriod` outside 1..=12.
    pub fn period_start(&self, period: u8) -> Result<DayNumber, RangeError> {
        if !(1..=PERIODS_PER_YEAR).contains(&period) {
            return Err(RangeError::InvalidFiscalPeriod(period));
        }
        let quarter = (period - 1) / 3;
        let weeks = quarter * WEEKS_PER_FISCAL_QUARTER + self.pattern.weeks_before_period((period - 1) % 3);
        Ok(self.days_after_anchor(i64::from(weeks) * DAYS_PER_WEEK))
    }

    /// Last day of fiscal period `period` (1..=12).
    ///
    /// # Errors
    /// Returns `RangeError::InvalidFiscalPeriod` outside 1..=12.
    pub fn period_end(&self, period: u8) -> Result<DayNumber, RangeError> {
        if !(1..=PERIODS_PER_YEAR).contains(&period) {
            return Err(RangeError::InvalidFiscalPeriod(period));
        }
        if period == PERIODS_PER_YEAR {
            return Ok(self.end);
        }
        let next = self.period_start(period + 1)?;
        Ok(self.days_after_anchor(self.anchor.days_until(next) - 1))
    }

    /// `anchor + days` for offsets inside the fiscal year, which construction
    /// already proved representable.
    fn days_after_anchor(&self, days: i64) -> DayNumber {
        debug_assert!((0..=self.anchor.days_until(self.end)).contains(&days));
        self.anchor.checked_add_days(days).unwrap_or(self.end)
    }
}

/// Days from `anchor` to the aligned start of the following fiscal year,
/// where that start is the same month and day one year on (clamped to month
/// end). Computed on the raw day line so a year starting in 9999 still gets
/// a length.
fn next_year_gap(start: CalendarDate, anchor: DayNumber, week_start: Weekday) -> i64 {
    let next_year = start.year() + 1;
    let day = start.day().min(types::month_length(next_year, start.month()));
    let raw = day_number::days_from_ymd(i64::from(next_year), start.month(), day);
    let aligned = raw - i64::from(Weekday::from_days(raw).days_since(week_start));
    aligned - anchor.get()
}

impl QuarterProvider for RetailFiscalCalendar {
    fn get_quarter(&self, date: CalendarDate) -> Result<QuarterIndex, CalendarError> {
        Ok(self.quarter_of(date)?)
    }

    fn get_quarter_start(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        let quarter = self.quarter_of(date)?;
        Ok(self.quarter_start(quarter).to_date())
    }

    fn get_quarter_end(&self, date: CalendarDate) -> Result<CalendarDate, CalendarError> {
        let quarter = self.quarter_of(date)?;
        Ok(self.quarter_end(quarter).to_date())
    }

    /// Month in which the quarter's first week begins. A label only: quarter
    /// boundaries are week-aligned, not month-aligned.
    fn get_start_month_from_quarter(&self, quarter: QuarterIndex) -> Result<Month, CalendarError> {
        Ok(self.quarter_start(quarter).to_date().month_typed())
    }
}
