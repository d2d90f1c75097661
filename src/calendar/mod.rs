//! Month arithmetic for the calendar view
//!
//! The calendar displays one month at a time. [`YearMonth`] is the month cursor, [`grid`] lays a month out in week rows, and [`entry`] describes the calendar entries that link tasks to a user's calendar.

pub mod grid;
pub mod entry;

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Local, NaiveDate};

/// Short weekday names, in the order of the grid columns (weeks start on Sunday)
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];


/// Proleptic Gregorian rule: every 4th year, except centuries, except every 4th century
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`.
///
/// Returns 0 for a month outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => if is_leap_year(year) { 29 } else { 28 },
        _ => 0,
    }
}


/// A month of a given year. This is the cursor the calendar view navigates with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Returns `None` if `month` is not in `1..=12` or if `year` is out of the supported range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
    }

    /// The month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self { first_day: date.with_day(1).unwrap_or(date) }
    }

    /// The current month, in the local time zone
    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 { self.first_day.year() }
    pub fn month(&self) -> u32 { self.first_day.month() }
    pub fn first_day(&self) -> NaiveDate { self.first_day }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Weekday index of the first day of this month (0 = Sunday .. 6 = Saturday)
    pub fn first_weekday(&self) -> u32 {
        self.first_day.weekday().num_days_from_sunday()
    }

    /// Returns the date of the `day`-th day of this month, if it exists
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    /// Whether `date` falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month.
    /// This stays on the current month in the (unlikely) case the date range supported by chrono is exceeded
    pub fn next(&self) -> Self {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            m => (self.year(), m + 1),
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The preceding month. See [`Self::next`]
    pub fn prev(&self) -> Self {
        let (year, month) = match self.month() {
            1 => (self.year() - 1, 12),
            m => (self.year(), m - 1),
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The English name of this month, e.g. `October`
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month() - 1) as usize]
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().splitn(2, '-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        Self::new(year, month)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert!(is_leap_year(2400));
        assert!(is_leap_year(2100) == false);
    }

    #[test]
    fn month_lengths_agree_with_chrono() {
        for year in 1890..2110 {
            for month in 1..=12 {
                let ym = YearMonth::new(year, month).unwrap();
                let next = ym.next().first_day();
                let expected = next.signed_duration_since(ym.first_day()).num_days() as u32;
                assert_eq!(days_in_month(year, month), expected, "{}-{}", year, month);
            }
        }
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn first_weekdays() {
        // September 1st, 2024 is a Sunday, October 1st, 2024 a Tuesday
        assert_eq!(YearMonth::new(2024, 9).unwrap().first_weekday(), 0);
        assert_eq!(YearMonth::new(2024, 10).unwrap().first_weekday(), 2);
        // June 1st, 2024 is a Saturday
        assert_eq!(YearMonth::new(2024, 6).unwrap().first_weekday(), 6);
    }

    #[test]
    fn navigation() {
        let dec = YearMonth::new(2023, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2024, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
        assert_eq!(YearMonth::new(2024, 1).unwrap().prev(), dec);
        assert_eq!(YearMonth::new(2024, 5).unwrap().next(), YearMonth::new(2024, 6).unwrap());

        let today = Local::now().date_naive();
        assert!(YearMonth::today().contains(today));
    }

    #[test]
    fn parse_and_display() {
        let ym = YearMonth::parse("2024-10").unwrap();
        assert_eq!(ym.to_string(), "October 2024");
        assert!(YearMonth::parse("2024-13").is_none());
        assert!(YearMonth::parse("2024").is_none());
        assert!(YearMonth::parse("abc-01").is_none());
        assert!(YearMonth::new(2024, 0).is_none());
    }
}
