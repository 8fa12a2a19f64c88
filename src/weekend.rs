//! Weekend classification and working-day search.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::day_number::DayNumber;
use crate::error::{CalendarError, RangeError};
use crate::weekday::Weekday;

/// Which weekdays count as the weekend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekendDefinition {
    #[default]
    SaturdaySunday,
    FridaySaturday,
    SundayOnly,
    FridayOnly,
    /// Classification is delegated to a [`WeekendProvider`]
    Custom,
}

impl WeekendDefinition {
    /// Weekend set for the enumerated definitions, `None` for `Custom`.
    pub const fn weekdays(self) -> Option<WeekdaySet> {
        match self {
            Self::SaturdaySunday => Some(WeekdaySet::EMPTY.with(Weekday::Saturday).with(Weekday::Sunday)),
            Self::FridaySaturday => Some(WeekdaySet::EMPTY.with(Weekday::Friday).with(Weekday::Saturday)),
            Self::SundayOnly => Some(WeekdaySet::EMPTY.with(Weekday::Sunday)),
            Self::FridayOnly => Some(WeekdaySet::EMPTY.with(Weekday::Friday)),
            Self::Custom => None,
        }
    }
}

/// Custom weekend rule, supplied wherever `WeekendDefinition::Custom` is used.
pub trait WeekendProvider: Send + Sync {
    fn is_weekend(&self, weekday: Weekday) -> bool;
}

/// A set of weekdays packed into one byte, bit 0 = Monday. Bit 7 is always clear.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    const ALL_BITS: u8 = 0b0111_1111;

    /// # Errors
    /// Returns `RangeError::InvalidWeekdaySet` if bit 7 is set.
    pub const fn from_bits(bits: u8) -> Result<Self, RangeError> {
        if bits & !Self::ALL_BITS != 0 {
            return Err(RangeError::InvalidWeekdaySet(bits));
        }
        Ok(Self(bits))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn with(self, weekday: Weekday) -> Self {
        Self(self.0 | 1 << weekday.days_from_monday())
    }

    pub const fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.days_from_monday()) != 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for WeekdaySet {
    type Error = RangeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value)
    }
}

impl From<WeekdaySet> for u8 {
    fn from(set: WeekdaySet) -> Self {
        set.bits()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl WeekendProvider for WeekdaySet {
    fn is_weekend(&self, weekday: Weekday) -> bool {
        self.contains(weekday)
    }
}

/// Whether `weekday` is a weekend day under `definition`.
///
/// `provider` is consulted only for `WeekendDefinition::Custom`.
///
/// # Errors
/// Returns `CalendarError::MissingProvider` for `Custom` without a provider.
pub fn is_weekend(
    weekday: Weekday,
    definition: WeekendDefinition,
    provider: Option<&dyn WeekendProvider>,
) -> Result<bool, CalendarError> {
    if let Some(set) = definition.weekdays() {
        return Ok(set.contains(weekday));
    }
    let provider = provider.ok_or(CalendarError::MissingProvider {
        capability: "weekend",
    })?;
    let weekend = provider.is_weekend(weekday);
    trace!("custom weekend provider classified {weekday:?} as weekend={weekend}");
    Ok(weekend)
}

/// # Errors
/// Returns `CalendarError::MissingProvider` for `Custom` without a provider.
pub fn is_working_day(
    day: DayNumber,
    definition: WeekendDefinition,
    provider: Option<&dyn WeekendProvider>,
) -> Result<bool, CalendarError> {
    is_weekend(day.weekday(), definition, provider).map(|weekend| !weekend)
}

/// First working day strictly after `day`.
///
/// # Errors
/// Returns `CalendarError::MissingProvider` for `Custom` without a provider,
/// `CalendarError::NoWorkingDay` if every weekday is a weekend day, or a
/// range error past 9999-12-31.
pub fn next_working_day(
    day: DayNumber,
    definition: WeekendDefinition,
    provider: Option<&dyn WeekendProvider>,
) -> Result<DayNumber, CalendarError> {
    step_to_working_day(day, 1, definition, provider)
}

/// Last working day strictly before `day`.
///
/// # Errors
/// As [`next_working_day`], bounded by 0001-01-01.
pub fn previous_working_day(
    day: DayNumber,
    definition: WeekendDefinition,
    provider: Option<&dyn WeekendProvider>,
) -> Result<DayNumber, CalendarError> {
    step_to_working_day(day, -1, definition, provider)
}

fn step_to_working_day(
    day: DayNumber,
    step: i64,
    definition: WeekendDefinition,
    provider: Option<&dyn WeekendProvider>,
) -> Result<DayNumber, CalendarError> {
    // Check the weekday pattern before moving so an all-weekend provider
    // fails the same way regardless of where `day` sits in the range.
    let mut weekday = day.weekday();
    for distance in 1..=7 {
        weekday = if step > 0 { weekday.succ() } else { weekday.pred() };
        if !is_weekend(weekday, definition, provider)? {
            return Ok(day.checked_add_days(step * distance)?);
        }
    }
    Err(CalendarError::NoWorkingDay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_utils::dn;

    struct AllWeekend;

    impl WeekendProvider for AllWeekend {
        fn is_weekend(&self, _weekday: Weekday) -> bool {
            true
        }
    }

    #[test]
    fn test_enumerated_definitions() {
        struct TestCase {
            definition: WeekendDefinition,
            weekend:    &'static [Weekday],
        }

        let cases = [
            TestCase {
                definition: WeekendDefinition::SaturdaySunday,
                weekend:    &[Weekday::Saturday, Weekday::Sunday],
            },
            TestCase {
                definition: WeekendDefinition::FridaySaturday,
                weekend:    &[Weekday::Friday, Weekday::Saturday],
            },
            TestCase {
                definition: WeekendDefinition::SundayOnly,
                weekend:    &[Weekday::Sunday],
            },
            TestCase {
                definition: WeekendDefinition::FridayOnly,
                weekend:    &[Weekday::Friday],
            },
        ];

        for case in &cases {
            for weekday in Weekday::ALL {
                assert_eq!(
                    is_weekend(weekday, case.definition, None),
                    Ok(case.weekend.contains(&weekday)),
                    "{:?} {weekday:?}",
                    case.definition
                );
            }
        }
    }

    #[test]
    fn test_custom_requires_provider() {
        let err = is_weekend(Weekday::Monday, WeekendDefinition::Custom, None).unwrap_err();
        assert_eq!(
            err,
            CalendarError::MissingProvider {
                capability: "weekend",
            }
        );
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn test_custom_delegates_to_provider() {
        let thursday_friday: WeekdaySet = [Weekday::Thursday, Weekday::Friday].into_iter().collect();
        assert_eq!(thursday_friday.len(), 2);
        assert_eq!(
            is_weekend(Weekday::Thursday, WeekendDefinition::Custom, Some(&thursday_friday)),
            Ok(true)
        );
        assert_eq!(
            is_weekend(Weekday::Saturday, WeekendDefinition::Custom, Some(&thursday_friday)),
            Ok(false)
        );
        // enumerated definitions ignore the provider
        assert_eq!(
            is_weekend(Weekday::Saturday, WeekendDefinition::SaturdaySunday, Some(&thursday_friday)),
            Ok(true)
        );
    }

    #[test]
    fn test_working_day_search() {
        // 2024-07-19 is a Friday
        let friday = dn(2024, 7, 19);
        let monday = dn(2024, 7, 22);
        let def = WeekendDefinition::SaturdaySunday;
        assert_eq!(next_working_day(friday, def, None), Ok(monday));
        assert_eq!(previous_working_day(monday, def, None), Ok(friday));
        assert_eq!(
            next_working_day(monday, def, None),
            Ok(dn(2024, 7, 23))
        );

        let gulf = WeekendDefinition::FridaySaturday;
        let thursday = dn(2024, 7, 18);
        assert_eq!(next_working_day(thursday, gulf, None), Ok(dn(2024, 7, 21)));
        assert_eq!(is_working_day(friday, gulf, None), Ok(false));
        assert_eq!(is_working_day(dn(2024, 7, 21), gulf, None), Ok(true));
    }

    #[test]
    fn test_all_weekend_provider_has_no_working_day() {
        let day = dn(2024, 7, 19);
        assert_eq!(
            next_working_day(day, WeekendDefinition::Custom, Some(&AllWeekend)),
            Err(CalendarError::NoWorkingDay)
        );
        assert_eq!(
            previous_working_day(day, WeekendDefinition::Custom, Some(&AllWeekend)),
            Err(CalendarError::NoWorkingDay)
        );
    }

    #[test]
    fn test_working_day_search_at_range_edge() {
        // 9999-12-31 is a Friday: the next working day would be in year 10000
        assert_eq!(
            next_working_day(DayNumber::MAX, WeekendDefinition::SaturdaySunday, None),
            Err(CalendarError::Range(RangeError::DayNumberOutOfRange(
                DayNumber::MAX.get() + 3
            )))
        );
    }

    #[test]
    fn test_weekday_set_serde() {
        let set = WeekendDefinition::SundayOnly.weekdays().unwrap();
        assert!(set.contains(Weekday::Sunday));
        assert!(!set.is_empty());
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(serde_json::from_str::<WeekdaySet>(&json).unwrap(), set);

        // Saturday and Sunday are bits 5 and 6
        let weekend = WeekendDefinition::SaturdaySunday.weekdays().unwrap();
        assert_eq!(serde_json::to_string(&weekend).unwrap(), "96");
        assert_eq!(u8::from(weekend), 0b0110_0000);

        let def: WeekendDefinition = serde_json::from_str("\"FridaySaturday\"").unwrap();
        assert_eq!(def, WeekendDefinition::FridaySaturday);
    }

    #[test]
    fn test_weekday_set_rejects_high_bit() {
        assert_eq!(WeekdaySet::from_bits(0b0111_1111).unwrap().len(), 7);
        assert_eq!(
            WeekdaySet::from_bits(0b1000_0000),
            Err(RangeError::InvalidWeekdaySet(0b1000_0000))
        );
        assert_eq!(WeekdaySet::try_from(255), Err(RangeError::InvalidWeekdaySet(255)));
        assert!(serde_json::from_str::<WeekdaySet>("128").is_err());
        assert!(serde_json::from_str::<WeekdaySet>("255").is_err());

        let all: WeekdaySet = Weekday::ALL.into_iter().collect();
        assert_eq!(serde_json::from_str::<WeekdaySet>("127").unwrap(), all);
    }
}
