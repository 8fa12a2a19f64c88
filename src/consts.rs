/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days elapsed in a non-leap year before the first of each month.
/// Index 12 holds the length of the year.
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

pub(crate) const DAYS_PER_YEAR: i64 = 365;
pub(crate) const DAYS_PER_4_YEARS: i64 = DAYS_PER_YEAR * 4 + 1;
pub(crate) const DAYS_PER_100_YEARS: i64 = DAYS_PER_4_YEARS * 25 - 1;
pub(crate) const DAYS_PER_400_YEARS: i64 = DAYS_PER_100_YEARS * 4 + 1;

/// Day number of 0001-01-01, the epoch
pub const MIN_DAY_NUMBER: i64 = 0;
/// Day number of 9999-12-31
pub const MAX_DAY_NUMBER: i64 = 3_652_058;

pub const DAYS_PER_WEEK: i64 = 7;
/// Weeks in a regular 52-week fiscal year
pub const WEEKS_PER_FISCAL_YEAR: u8 = 52;
/// Weeks in a fiscal quarter (5 + 4 + 4)
pub const WEEKS_PER_FISCAL_QUARTER: u8 = 13;

pub const MONTHS_PER_QUARTER: u8 = 3;
pub const QUARTERS_PER_YEAR: u8 = 4;

/// 100-nanosecond ticks in one day
pub const TICKS_PER_DAY: i64 = 864_000_000_000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
