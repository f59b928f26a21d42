//! Calendar events

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::calendar::CalendarDay;
use crate::error::SchedulerError;
use crate::time_slot::TimeOfDay;

/// Identifier assigned by the storage when an event is inserted
pub type EventId = i64;

/// An event, as stored
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    start: TimeOfDay,
    end: TimeOfDay,

    year: i32,
    month: u32,
    day: u32,

    /// Never set by this crate, but kept since the storage has this column
    date_passed: bool,
    /// When this event was added
    date_set: DateTime<Utc>,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(id: EventId, name: String, start: TimeOfDay, end: TimeOfDay,
               year: i32, month: u32, day: u32,
               date_passed: bool, date_set: DateTime<Utc>) -> Self
    {
        Self { id, name, start, end, year, month, day, date_passed, date_set }
    }

    pub fn id(&self) -> EventId { self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn start(&self) -> &TimeOfDay { &self.start }
    pub fn end(&self) -> &TimeOfDay { &self.end }
    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn day(&self) -> u32 { self.day }
    pub fn date_passed(&self) -> bool { self.date_passed }
    pub fn date_set(&self) -> DateTime<Utc> { self.date_set }

    /// Whether this event belongs to `day`. Events are tied to days by value, there is no foreign key
    pub fn is_on(&self, day: &CalendarDay) -> bool {
        day.is_padding() == false
            && self.year == day.year()
            && self.month == day.month()
            && self.day == day.day_of_month()
    }

    /// The text shown in the time grid, e.g. `"07:05 PM Dentist"`
    pub fn cell_label(&self) -> String {
        format!("{} {}", self.start, self.name)
    }
}


/// An event that has not been stored yet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNewEvent")]
pub struct NewEvent {
    name: String,
    start: TimeOfDay,
    end: TimeOfDay,
}

/// A [`NewEvent`] as deserialized, before its name is checked
#[derive(Deserialize)]
struct RawNewEvent {
    name: String,
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawNewEvent> for NewEvent {
    type Error = SchedulerError;

    fn try_from(raw: RawNewEvent) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.start, raw.end)
    }
}

impl NewEvent {
    /// Create a new event. Its name must contain something else than whitespace
    pub fn new<S: ToString>(name: S, start: TimeOfDay, end: TimeOfDay) -> Result<Self, SchedulerError> {
        let name = name.to_string();
        if name.trim().is_empty() {
            return Err(SchedulerError::validation("the event has no name"));
        }
        Ok(Self { name, start, end })
    }

    /// Create a new event from the raw picker texts, e.g. `("Dentist", ("07", "05", "PM"), ("08", "00", "PM"))`
    pub fn from_selection<S: ToString>(name: S, start: (&str, &str, &str), end: (&str, &str, &str)) -> Result<Self, SchedulerError> {
        let start = TimeOfDay::from_fields(start.0, start.1, start.2)
            .map_err(|err| SchedulerError::validation(format!("start time: {}", err)))?;
        let end = TimeOfDay::from_fields(end.0, end.1, end.2)
            .map_err(|err| SchedulerError::validation(format!("end time: {}", err)))?;
        Self::new(name, start, end)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn start(&self) -> &TimeOfDay { &self.start }
    pub fn end(&self) -> &TimeOfDay { &self.end }

    /// What this event looks like once stored on `day`
    pub fn into_event(self, id: EventId, day: &CalendarDay, date_set: DateTime<Utc>) -> Event {
        Event::new(id, self.name, self.start, self.end,
            day.year(), day.month(), day.day_of_month(),
            false, date_set)
    }
}

/// The text of a grid cell telling how many events a day has
pub fn count_label(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => "1 event".to_string(),
        n => format!("{} events", n),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use crate::time_slot::Meridiem;

    fn seven_pm() -> TimeOfDay {
        TimeOfDay::new(7, 5, Meridiem::Pm).unwrap()
    }

    #[test]
    fn names_are_required() {
        assert!(NewEvent::new("", seven_pm(), seven_pm()).unwrap_err().is_validation());
        assert!(NewEvent::new("   ", seven_pm(), seven_pm()).is_err());
        assert!(NewEvent::new("Dentist", seven_pm(), seven_pm()).is_ok());
    }

    #[test]
    fn from_selection() {
        let ev = NewEvent::from_selection("Dentist", ("07", "05", "PM"), ("08", "00", "PM")).unwrap();
        assert_eq!(ev.start(), &seven_pm());

        // The pickers start empty, until the user picks something
        let err = NewEvent::from_selection("Dentist", ("", "", ""), ("08", "00", "PM")).unwrap_err();
        assert!(err.to_string().contains("start time"));
    }

    #[test]
    fn stored_event() {
        let day = CalendarDay::new(2021, 3, 10, Weekday::Wed);
        let ev = NewEvent::new("Dentist", seven_pm(), seven_pm()).unwrap()
            .into_event(3, &day, Utc::now());
        assert!(ev.is_on(&day));
        assert!(ev.date_passed() == false);
        assert!(ev.is_on(&CalendarDay::new(2021, 3, 11, Weekday::Thu)) == false);
        assert_eq!(ev.cell_label(), "07:05 PM Dentist");
    }

    #[test]
    fn deserialized_names_are_checked() {
        let json = r#"{"name":"   ","start":{"hour":7,"minute":5,"meridiem":"PM"},"end":{"hour":8,"minute":0,"meridiem":"PM"}}"#;
        let err = serde_json::from_str::<NewEvent>(json).unwrap_err();
        assert!(err.to_string().contains("the event has no name"));

        let json = json.replace(r#""   ""#, r#""Dentist""#);
        let ev: NewEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev.name(), "Dentist");
        assert_eq!(ev.start(), &seven_pm());
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(0), "");
        assert_eq!(count_label(1), "1 event");
        assert_eq!(count_label(4), "4 events");
    }
}
