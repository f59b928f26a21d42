//! Start and end times of an event, as picked on a 12-hour clock
//!
//! The pickers only ever offer hours `01`..`12`, minutes `00`..`55` by steps of five, and `AM`/`PM`.
//! These types refuse anything else, so that a hand-crafted value cannot reach the storage.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Number of rows of the time grid of a day view
pub const ROWS_PER_DAY: usize = 24;

/// Minutes can only be picked by steps of this size
pub const MINUTE_STEP: u8 = 5;


/// An hour on a 12-hour clock (`1..=12`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u8) -> Result<Self, SchedulerError> {
        if (1..=12).contains(&hour) == false {
            return Err(SchedulerError::validation(format!("hour {} is not on a 12-hour clock", hour)));
        }
        Ok(Self(hour))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The choices offered by the hour picker, zero-padded (`"01"`..`"12"`)
    pub fn options() -> Vec<String> {
        (1..=12).map(|h| Self(h).to_string()).collect()
    }
}

impl TryFrom<u8> for Hour {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> u8 {
        hour.0
    }
}

impl FromStr for Hour {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_two_digits(s, "hour")?)
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}


/// A minute that the minute picker can offer (`0..=55`, multiple of 5)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    pub fn new(minute: u8) -> Result<Self, SchedulerError> {
        if minute > 55 || minute % MINUTE_STEP != 0 {
            return Err(SchedulerError::validation(format!("minute {} is not one of 00, 05, ..., 55", minute)));
        }
        Ok(Self(minute))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The choices offered by the minute picker, zero-padded (`"00"`..`"55"`)
    pub fn options() -> Vec<String> {
        (0..60).step_by(MINUTE_STEP as usize).map(|m| Self(m).to_string()).collect()
    }
}

impl TryFrom<u8> for Minute {
    type Error = SchedulerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> u8 {
        minute.0
    }
}

impl FromStr for Minute {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_two_digits(s, "minute")?)
    }
}

impl Display for Minute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}


/// Whether a time is before or after noon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn options() -> Vec<String> {
        vec![Self::Am.to_string(), Self::Pm.to_string()]
    }
}

impl FromStr for Meridiem {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("AM") => Ok(Self::Am),
            s if s.eq_ignore_ascii_case("PM") => Ok(Self::Pm),
            "" => Err(SchedulerError::validation("AM/PM has not been picked")),
            other => Err(SchedulerError::validation(format!("{:?} is neither AM nor PM", other))),
        }
    }
}

impl Display for Meridiem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Am => write!(f, "AM"),
            Self::Pm => write!(f, "PM"),
        }
    }
}


/// A time of day, as picked with the three pickers (e.g. `07:05 PM`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: Hour,
    pub minute: Minute,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self, SchedulerError> {
        Ok(Self {
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
            meridiem,
        })
    }

    /// Build a time from the raw texts of the three pickers (or of the three storage columns)
    pub fn from_fields(hour: &str, minute: &str, meridiem: &str) -> Result<Self, SchedulerError> {
        Ok(Self {
            hour: hour.parse()?,
            minute: minute.parse()?,
            meridiem: meridiem.parse()?,
        })
    }

    /// The row of the 24-row time grid this time falls into.
    ///
    /// Row 0 is `12:00 AM` (midnight), row 12 is `12:00 PM` (noon), row 23 is `11:00 PM`.
    pub fn grid_row(&self) -> usize {
        let hour = (self.hour.value() % 12) as usize;
        match self.meridiem {
            Meridiem::Am => hour,
            Meridiem::Pm => hour + 12,
        }
    }

    /// Minutes elapsed since midnight
    pub fn minutes_since_midnight(&self) -> u32 {
        self.grid_row() as u32 * 60 + self.minute.value() as u32
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.hour, self.minute, self.meridiem)
    }
}

/// The label of a row of the time grid (`"12:00 AM"`, `"1:00 AM"`, ..., `"11:00 PM"`)
pub fn row_label(row: usize) -> String {
    let row = row % ROWS_PER_DAY;
    let hour = match row % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if row < 12 { Meridiem::Am } else { Meridiem::Pm };
    format!("{}:00 {}", hour, meridiem)
}

fn parse_two_digits(s: &str, what: &str) -> Result<u8, SchedulerError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SchedulerError::validation(format!("{} has not been picked", what)));
    }
    if s.len() > 2 || s.chars().all(|c| c.is_ascii_digit()) == false {
        return Err(SchedulerError::validation(format!("{:?} is not a valid {}", s, what)));
    }
    s.parse::<u8>()
        .map_err(|err| SchedulerError::validation(format!("{:?} is not a valid {}: {}", s, what, err)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_options() {
        let hours = Hour::options();
        assert_eq!(hours.len(), 12);
        assert_eq!(hours.first().map(String::as_str), Some("01"));
        assert_eq!(hours.last().map(String::as_str), Some("12"));

        let minutes = Minute::options();
        assert_eq!(minutes.len(), 12);
        assert_eq!(minutes[0], "00");
        assert_eq!(minutes[1], "05");
        assert_eq!(minutes[11], "55");

        assert_eq!(Meridiem::options(), vec!["AM".to_string(), "PM".to_string()]);
    }

    #[test]
    fn parse_fields() {
        let t = TimeOfDay::from_fields("07", "05", "PM").unwrap();
        assert_eq!(t.hour.value(), 7);
        assert_eq!(t.minute.value(), 5);
        assert_eq!(t.meridiem, Meridiem::Pm);
        assert_eq!(t.to_string(), "07:05 PM");

        assert!(TimeOfDay::from_fields("13", "00", "AM").unwrap_err().is_validation());
        assert!(TimeOfDay::from_fields("00", "00", "AM").is_err());
        assert!(TimeOfDay::from_fields("10", "07", "AM").is_err());
        assert!(TimeOfDay::from_fields("10", "60", "AM").is_err());
        assert!(TimeOfDay::from_fields("10", "00", "XM").is_err());
        assert!(TimeOfDay::from_fields("", "00", "AM").is_err());
        assert!(TimeOfDay::from_fields("+1", "00", "AM").is_err());
    }

    #[test]
    fn grid_rows() {
        let row = |h, m| TimeOfDay::new(h, 0, m).unwrap().grid_row();
        assert_eq!(row(12, Meridiem::Am), 0);
        assert_eq!(row(1, Meridiem::Am), 1);
        assert_eq!(row(11, Meridiem::Am), 11);
        assert_eq!(row(12, Meridiem::Pm), 12);
        assert_eq!(row(1, Meridiem::Pm), 13);
        assert_eq!(row(11, Meridiem::Pm), 23);

        for h in 1..=12 {
            for m in [Meridiem::Am, Meridiem::Pm].iter() {
                let t = TimeOfDay::new(h, 0, *m).unwrap();
                assert_eq!(row_label(t.grid_row()), format!("{}:00 {}", h, m));
            }
        }
    }

    #[test]
    fn row_labels() {
        assert_eq!(row_label(0), "12:00 AM");
        assert_eq!(row_label(1), "1:00 AM");
        assert_eq!(row_label(12), "12:00 PM");
        assert_eq!(row_label(23), "11:00 PM");
    }

    #[test]
    fn serde_refuses_out_of_range() {
        let t = TimeOfDay::new(9, 30, Meridiem::Am).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"hour":9,"minute":30,"meridiem":"AM"}"#);

        let bad = r#"{"hour":9,"minute":31,"meridiem":"AM"}"#;
        assert!(serde_json::from_str::<TimeOfDay>(bad).is_err());
    }
}
