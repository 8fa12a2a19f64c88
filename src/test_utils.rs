use crate::date::CalendarDate;
use crate::day_number::DayNumber;

pub fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

pub fn dn(year: i32, month: u8, day: u8) -> DayNumber {
    crate::to_day_number(year, month, day).unwrap()
}
