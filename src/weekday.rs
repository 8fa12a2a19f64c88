use serde::{Deserialize, Serialize};

use crate::DAYS_PER_WEEK;

/// Day of the week, ordered Monday first as in ISO 8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO 8601 weekday number: Monday = 1 ..= Sunday = 7
    #[inline]
    pub const fn number_from_monday(self) -> u8 {
        self as u8 + 1
    }

    /// Days since the preceding Monday: Monday = 0 ..= Sunday = 6
    #[inline]
    pub const fn days_from_monday(self) -> u8 {
        self as u8
    }

    /// Days since the preceding Sunday: Sunday = 0 ..= Saturday = 6
    #[inline]
    pub const fn days_from_sunday(self) -> u8 {
        (self as u8 + 1) % 7
    }

    /// Inverse of [`Weekday::number_from_monday`]
    pub const fn from_number_from_monday(number: u8) -> Option<Self> {
        if matches!(number, 1..=7) {
            Some(Self::ALL[(number - 1) as usize])
        } else {
            None
        }
    }

    /// Weekday of a day number; day 0 (0001-01-01) is a Monday.
    pub(crate) const fn from_days(days: i64) -> Self {
        Self::ALL[days.rem_euclid(DAYS_PER_WEEK) as usize]
    }

    pub const fn succ(self) -> Self {
        Self::ALL[(self as usize + 1) % 7]
    }

    pub const fn pred(self) -> Self {
        Self::ALL[(self as usize + 6) % 7]
    }

    /// Days to step forward from `self` to reach `target`, in `0..7`.
    #[inline]
    pub const fn days_until(self, target: Self) -> u8 {
        (target as u8 + 7 - self as u8) % 7
    }

    /// Days to step back from `self` to reach `target`, in `0..7`.
    #[inline]
    pub const fn days_since(self, target: Self) -> u8 {
        target.days_until(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering() {
        assert_eq!(Weekday::Monday.number_from_monday(), 1);
        assert_eq!(Weekday::Sunday.number_from_monday(), 7);
        assert_eq!(Weekday::Sunday.days_from_sunday(), 0);
        assert_eq!(Weekday::Saturday.days_from_sunday(), 6);
        assert_eq!(Weekday::Monday.days_from_sunday(), 1);

        for weekday in Weekday::ALL {
            assert_eq!(
                Weekday::from_number_from_monday(weekday.number_from_monday()),
                Some(weekday)
            );
        }
        assert_eq!(Weekday::from_number_from_monday(0), None);
        assert_eq!(Weekday::from_number_from_monday(8), None);
    }

    #[test]
    fn test_from_days() {
        assert_eq!(Weekday::from_days(0), Weekday::Monday);
        assert_eq!(Weekday::from_days(6), Weekday::Sunday);
        assert_eq!(Weekday::from_days(7), Weekday::Monday);
        assert_eq!(Weekday::from_days(-1), Weekday::Sunday);
    }

    #[test]
    fn test_succ_pred_wrap() {
        assert_eq!(Weekday::Sunday.succ(), Weekday::Monday);
        assert_eq!(Weekday::Monday.pred(), Weekday::Sunday);
        for weekday in Weekday::ALL {
            assert_eq!(weekday.succ().pred(), weekday);
        }
    }

    #[test]
    fn test_days_until_and_since() {
        assert_eq!(Weekday::Monday.days_until(Weekday::Monday), 0);
        assert_eq!(Weekday::Monday.days_until(Weekday::Sunday), 6);
        assert_eq!(Weekday::Sunday.days_until(Weekday::Monday), 1);
        assert_eq!(Weekday::Wednesday.days_since(Weekday::Monday), 2);
        assert_eq!(Weekday::Monday.days_since(Weekday::Wednesday), 5);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&Weekday::Thursday).unwrap();
        assert_eq!(json, "\"Thursday\"");
        let parsed: Weekday = serde_json::from_str("\"Sunday\"").unwrap();
        assert_eq!(parsed, Weekday::Sunday);
    }
}
