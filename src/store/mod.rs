//! Storage backends for events
//!
//! Both relational stores open a connection for every operation and close it before returning,
//! whether the operation succeeded or not. Every statement uses bound parameters.

pub mod mysql;
pub mod sqlite;
pub mod mock;

pub use mysql::MySqlStore;
pub use sqlite::SqliteStore;
pub use mock::MockStore;

use std::convert::TryFrom;

use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::calendar::CalendarDay;
use crate::error::SchedulerError;
use crate::event::Event;
use crate::time_slot::TimeOfDay;

pub(crate) const SELECT_EVENTS_FOR_DAY: &str = "\
    SELECT id, event_name, start_hour, start_min, start_ampm, end_hour, end_min, end_ampm, \
           month, day, year, date_passed, date_set \
    FROM events \
    WHERE year = ? AND month = ? AND day = ? \
    ORDER BY id DESC";

pub(crate) const INSERT_EVENT: &str = "\
    INSERT INTO events \
        (event_name, start_hour, start_min, start_ampm, end_hour, end_min, end_ampm, month, day, year, date_passed, date_set) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Bind the columns of [`INSERT_EVENT`], in order
macro_rules! bind_new_event {
    ($query:expr, $day:expr, $event:expr, $date_set:expr) => {
        $query
            .bind($event.name().to_string())
            .bind($event.start().hour.to_string())
            .bind($event.start().minute.to_string())
            .bind($event.start().meridiem.to_string())
            .bind($event.end().hour.to_string())
            .bind($event.end().minute.to_string())
            .bind($event.end().meridiem.to_string())
            .bind(i64::from($day.month()))
            .bind(i64::from($day.day_of_month()))
            .bind(i64::from($day.year()))
            .bind(false)
            .bind($date_set)
    };
}
pub(crate) use bind_new_event;

/// Bind the three parameters of [`SELECT_EVENTS_FOR_DAY`]
macro_rules! bind_day {
    ($query:expr, $day:expr) => {
        $query
            .bind(i64::from($day.year()))
            .bind(i64::from($day.month()))
            .bind(i64::from($day.day_of_month()))
    };
}
pub(crate) use bind_day;


/// A row of the `events` table
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EventRow {
    id: i64,
    event_name: String,
    start_hour: String,
    start_min: String,
    start_ampm: String,
    end_hour: String,
    end_min: String,
    end_ampm: String,
    month: i64,
    day: i64,
    year: i64,
    date_passed: bool,
    date_set: NaiveDateTime,
}

impl TryFrom<EventRow> for Event {
    type Error = SchedulerError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let start = TimeOfDay::from_fields(&row.start_hour, &row.start_min, &row.start_ampm)?;
        let end = TimeOfDay::from_fields(&row.end_hour, &row.end_min, &row.end_ampm)?;
        let year = i32::try_from(row.year)
            .map_err(|_| SchedulerError::validation(format!("year {} is out of range", row.year)))?;
        let month = u32::try_from(row.month)
            .map_err(|_| SchedulerError::validation(format!("month {} is out of range", row.month)))?;
        let day = u32::try_from(row.day)
            .map_err(|_| SchedulerError::validation(format!("day {} is out of range", row.day)))?;

        Ok(Event::new(row.id, row.event_name, start, end,
            year, month, day,
            row.date_passed, Utc.from_utc_datetime(&row.date_set)))
    }
}

/// Convert rows into events. Rows that do not hold a valid event (e.g. blank time fields) are skipped
pub(crate) fn rows_to_events(rows: Vec<EventRow>, day: &CalendarDay) -> Vec<Event> {
    let n_rows = rows.len();
    let events: Vec<Event> = rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match Event::try_from(row) {
                Ok(event) => Some(event),
                Err(err) => {
                    log::warn!("Skipping malformed event row {} of {}: {}", id, day.describe(), err);
                    None
                },
            }
        })
        .collect();
    log::debug!("{}: {} event(s) ({} row(s))", day.describe(), events.len(), n_rows);
    events
}

/// Log a storage failure of `operation`, and sort it into a connection or query error
pub(crate) fn storage_error(operation: &str, err: sqlx::Error) -> SchedulerError {
    let err = SchedulerError::from_sqlx(err);
    log::error!("Unable to {}: {}", operation, err);
    err
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    fn row(start_hour: &str) -> EventRow {
        EventRow {
            id: 12,
            event_name: "Standup".to_string(),
            start_hour: start_hour.to_string(),
            start_min: "15".to_string(),
            start_ampm: "AM".to_string(),
            end_hour: "09".to_string(),
            end_min: "30".to_string(),
            end_ampm: "AM".to_string(),
            month: 3,
            day: 10,
            year: 2021,
            date_passed: false,
            date_set: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn rows_become_events() {
        let day = CalendarDay::new(2021, 3, 10, Weekday::Wed);
        let event = Event::try_from(row("09")).unwrap();
        assert_eq!(event.id(), 12);
        assert_eq!(event.start().to_string(), "09:15 AM");
        assert!(event.is_on(&day));
        assert_eq!(event.date_set().to_rfc3339(), "2021-03-01T08:00:00+00:00");
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let day = CalendarDay::new(2021, 3, 10, Weekday::Wed);
        let events = rows_to_events(vec![row("09"), row(""), row("10")], &day);
        assert_eq!(events.len(), 2);
    }
}
