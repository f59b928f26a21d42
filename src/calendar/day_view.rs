//! The hourly schedule of a single day

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDay;
use crate::event::Event;
use crate::time_slot::{row_label, ROWS_PER_DAY};

/// One hour of a day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// e.g. `"1:00 PM"`
    pub label: String,
    /// Events starting during this hour, most recently inserted first
    pub events: Vec<Event>,
}

/// A day, split into 24 rows of one hour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    day: CalendarDay,
    rows: Vec<ScheduleRow>,
}

impl DaySchedule {
    /// Place `events` into their rows. Events that belong to another day are ignored
    pub fn build(day: CalendarDay, events: Vec<Event>) -> Self {
        let mut rows: Vec<ScheduleRow> = (0..ROWS_PER_DAY)
            .map(|row| ScheduleRow { label: row_label(row), events: Vec::new() })
            .collect();

        for event in events {
            if event.is_on(&day) == false {
                log::warn!("Event {} ({}) does not belong to {}, ignoring it", event.id(), event.name(), day.describe());
                continue;
            }
            let row = event.start().grid_row();
            rows[row].events.push(event);
        }

        Self { day, rows }
    }

    pub fn day(&self) -> &CalendarDay {
        &self.day
    }

    /// Title of the day view, e.g. `"Wed. March 10, 2021"`
    pub fn title(&self) -> String {
        self.day.describe()
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ScheduleRow> {
        self.rows.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.events.is_empty())
    }
}
