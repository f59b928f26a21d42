//! Days of the month grid
//!
//! A [`CalendarDay`] identifies one cell of the grid. Cells before the first and after the last day
//! of the month are padding cells (`day_of_month == 0`): they only exist to align weeks on Mondays.

pub mod grid;
pub mod day_view;

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Column headers of the grid, Monday first
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
    Weekday::Fri, Weekday::Sat, Weekday::Sun,
];

/// One cell of the month grid
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDay {
    year: i32,
    month: u32,
    /// `0` for padding cells
    day_of_month: u32,
    weekday: Weekday,
}

impl CalendarDay {
    /// Create a day. `day_of_month` may be `0` for a padding cell
    pub fn new(year: i32, month: u32, day_of_month: u32, weekday: Weekday) -> Self {
        Self { year, month, day_of_month, weekday }
    }

    /// Create a padding cell of the grid of (`year`, `month`)
    pub fn padding(year: i32, month: u32, weekday: Weekday) -> Self {
        Self::new(year, month, 0, weekday)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day(), date.weekday())
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn day_of_month(&self) -> u32 { self.day_of_month }
    pub fn weekday(&self) -> Weekday { self.weekday }

    /// `"Mon"`, `"Tue"`...
    pub fn weekday_label(&self) -> String {
        self.weekday.to_string()
    }

    /// Whether this cell only exists to align the grid. Such days must never reach the storage
    pub fn is_padding(&self) -> bool {
        self.day_of_month == 0
    }

    /// The actual date, `None` for padding cells (or nonsensical values)
    pub fn date(&self) -> Option<NaiveDate> {
        if self.is_padding() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day_of_month)
    }

    /// The text of the cell: the day number, or nothing for padding cells
    pub fn label(&self) -> String {
        if self.is_padding() {
            return String::new();
        }
        self.day_of_month.to_string()
    }

    /// A human-readable description, e.g. `"Wed. March 10, 2021"`
    pub fn describe(&self) -> String {
        let month = month_name(self.month).unwrap_or("?");
        format!("{}. {} {}, {}", self.weekday_label(), month, self.day_of_month, self.year)
    }

    /// Fails with a validation error on padding cells
    pub fn ensure_real(&self) -> Result<(), SchedulerError> {
        if self.is_padding() {
            return Err(SchedulerError::validation(format!(
                "padding cell of {}-{:02} is not a day", self.year, self.month)));
        }
        Ok(())
    }
}

impl Display for CalendarDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

const MONTHS: [Month; 12] = [
    Month::January, Month::February, Month::March, Month::April,
    Month::May, Month::June, Month::July, Month::August,
    Month::September, Month::October, Month::November, Month::December,
];

/// Full English name of a month (`1` is `"January"`)
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = (month as usize).checked_sub(1)?;
    MONTHS.get(index).map(|m| m.name())
}

/// Parse a month as written in the month picker (`"March"`, case-insensitive; abbreviations are accepted too)
pub fn parse_month(name: &str) -> Result<u32, SchedulerError> {
    name.trim()
        .parse::<Month>()
        .map(|m| m.number_from_month())
        .map_err(|_| SchedulerError::validation(format!("{:?} is not a month", name)))
}

/// Fails unless `month` is in `1..=12`
pub fn ensure_month(month: u32) -> Result<(), SchedulerError> {
    if (1..=12).contains(&month) == false {
        return Err(SchedulerError::validation(format!("month {} does not exist", month)));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(CalendarDay::padding(2021, 3, Weekday::Mon).label(), "");
        assert_eq!(CalendarDay::new(2021, 3, 15, Weekday::Mon).label(), "15");
        assert_eq!(CalendarDay::new(2021, 3, 15, Weekday::Mon).to_string(), "15");
    }

    #[test]
    fn describe() {
        let day = CalendarDay::new(2021, 3, 10, Weekday::Wed);
        assert_eq!(day.describe(), "Wed. March 10, 2021");

        let day = CalendarDay::from_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(day.describe(), "Thu. February 29, 2024");
    }

    #[test]
    fn padding_days() {
        let pad = CalendarDay::padding(2021, 3, Weekday::Sun);
        assert!(pad.is_padding());
        assert!(pad.date().is_none());
        assert!(pad.ensure_real().unwrap_err().is_validation());
        assert!(CalendarDay::new(2021, 3, 1, Weekday::Mon).ensure_real().is_ok());
    }

    #[test]
    fn months() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);

        assert_eq!(parse_month("March").unwrap(), 3);
        assert_eq!(parse_month("september").unwrap(), 9);
        assert!(parse_month("Smarch").is_err());

        assert!(ensure_month(0).is_err());
        assert!(ensure_month(12).is_ok());
    }
}
