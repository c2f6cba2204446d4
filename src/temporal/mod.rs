//! Calendar helpers: weekday names and month periods

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

/// Days of the week in reporting order
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday ("Monday")
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A calendar month period, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    /// Period containing the given date
    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the period
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_ordering_and_display() {
        let dec = YearMonth::of(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        let jan = YearMonth::of(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2023-01");
        assert_eq!(jan.first_day(), NaiveDate::from_ymd_opt(2023, 1, 1));
    }

    #[test]
    fn test_week_starts_on_monday() {
        let names: Vec<&str> = WEEK.iter().map(|d| weekday_name(*d)).collect();
        assert_eq!(names.first(), Some(&"Monday"));
        assert_eq!(names.last(), Some(&"Sunday"));
    }
}
