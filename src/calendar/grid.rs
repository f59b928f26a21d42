//! The month grid: weeks of seven days, Monday first, with how many events each day has

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{ensure_month, month_name, parse_month, CalendarDay, WEEKDAYS};
use crate::error::SchedulerError;
use crate::event::count_label;
use crate::traits::EventStore;

/// One cell of the grid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub day: CalendarDay,
    /// Always `0` for padding cells
    pub event_count: usize,
}

impl GridCell {
    /// `""`, `"1 event"`, `"3 events"`...
    pub fn count_label(&self) -> String {
        count_label(self.event_count)
    }

    /// The tooltip of this cell
    pub fn status_tip(&self) -> String {
        if self.day.is_padding() {
            return String::new();
        }
        self.day.describe()
    }
}

pub type Week = [GridCell; 7];

/// Everything needed to render a month.
///
/// A new state is built whenever the visible month changes, the previous one is simply dropped
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarState {
    year: i32,
    month: u32,
    weeks: Vec<Week>,
}

impl CalendarState {
    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }
    pub fn weeks(&self) -> &[Week] { &self.weeks }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("?")
    }

    /// The cell at (`row`, `column`), as clicked in the grid
    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        self.weeks.get(row).and_then(|week| week.get(column))
    }

    /// The days of the month, in order, without padding cells
    pub fn days(&self) -> impl Iterator<Item = &GridCell> {
        self.weeks.iter()
            .flat_map(|week| week.iter())
            .filter(|cell| cell.day.is_padding() == false)
    }

    pub fn total_events(&self) -> usize {
        self.days().map(|cell| cell.event_count).sum()
    }
}


/// Number of days of a month of the proleptic Gregorian calendar
pub fn days_in_month(year: i32, month: u32) -> Result<u32, SchedulerError> {
    ensure_month(month)?;
    first_of_month(year, month)?;
    // The next month may not be representable (e.g. December of the last supported year)
    let n_days = (28..=31).rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(28);
    Ok(n_days)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, SchedulerError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SchedulerError::validation(format!("{}-{:02} is out of the supported range", year, month)))
}

/// The weeks of a month, Monday first, padded with padding days at both ends. This does not touch any storage
pub fn month_layout(year: i32, month: u32) -> Result<Vec<[CalendarDay; 7]>, SchedulerError> {
    let n_days = days_in_month(year, month)?;
    let leading = first_of_month(year, month)?.weekday().num_days_from_monday();
    let n_weeks = (leading + n_days + 6) / 7;

    let weeks = (0..n_weeks)
        .map(|w| {
            let mut week = WEEKDAYS.map(|wd| CalendarDay::padding(year, month, wd));
            for (column, cell) in week.iter_mut().enumerate() {
                let index = w * 7 + column as u32;
                if index >= leading && index < leading + n_days {
                    *cell = CalendarDay::new(year, month, index - leading + 1, WEEKDAYS[column]);
                }
            }
            week
        })
        .collect();
    Ok(weeks)
}

/// Build the grid of a month, asking `store` how many events each day has.
///
/// A failing store does not prevent the grid from being built: the affected days show no events, and the error is logged
pub async fn build_grid<S>(store: &S, year: i32, month: u32) -> Result<CalendarState, SchedulerError>
where
    S: EventStore + ?Sized,
{
    let layout = month_layout(year, month)?;
    let mut weeks = Vec::with_capacity(layout.len());
    let mut n_failures = 0;

    for days in layout {
        let mut counts = [0usize; 7];
        for (column, day) in days.iter().enumerate() {
            if day.is_padding() {
                continue;
            }
            counts[column] = match store.count_events_for_day(day).await {
                Ok(n) => n,
                Err(err) => {
                    log::warn!("Unable to count the events of {}: {}", day.describe(), err);
                    n_failures += 1;
                    0
                },
            };
        }

        let mut counts = counts.iter();
        weeks.push(days.map(|day| GridCell {
            day,
            event_count: counts.next().copied().unwrap_or(0),
        }));
    }

    if n_failures > 0 {
        log::error!("{} {}: {} day(s) are shown without their events", month_name(month).unwrap_or("?"), year, n_failures);
    } else {
        log::debug!("Built the grid of {} {}", month_name(month).unwrap_or("?"), year);
    }

    Ok(CalendarState { year, month, weeks })
}

/// The state of another month of the same year, as picked in the month picker
pub async fn switch_month<S>(store: &S, current: &CalendarState, month_name: &str) -> Result<CalendarState, SchedulerError>
where
    S: EventStore + ?Sized,
{
    let month = parse_month(month_name)?;
    build_grid(store, current.year, month).await
}
