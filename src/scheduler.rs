//! What a user interface calls into: month grids, day views and event creation
//!
//! A [`Scheduler`] is cheap to clone, so that a UI can move storage calls onto background tasks
//! and keep its own thread responsive.

use std::sync::Arc;

use chrono::{Datelike, Local};

use crate::calendar::CalendarDay;
use crate::calendar::day_view::DaySchedule;
use crate::calendar::grid::{self, CalendarState};
use crate::error::SchedulerError;
use crate::event::{Event, EventId, NewEvent};
use crate::traits::EventStore;

/// The entry point of a scheduler UI, over any [`EventStore`]
#[derive(Debug)]
pub struct Scheduler<S: EventStore> {
    store: Arc<S>,
}

impl<S: EventStore> Clone for Scheduler<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: EventStore> Scheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store: Arc::new(store) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The grid of (`year`, `month`), with how many events each day has.
    ///
    /// This only fails on an invalid month. Storage failures show up as days without events
    pub async fn get_grid(&self, year: i32, month: u32) -> Result<CalendarState, SchedulerError> {
        grid::build_grid(self.store.as_ref(), year, month).await
    }

    /// The grid of the current month
    pub async fn current_month(&self) -> Result<CalendarState, SchedulerError> {
        let today = Local::now().date_naive();
        self.get_grid(today.year(), today.month()).await
    }

    /// The grid of another month of the year currently shown, picked by its name (e.g. `"March"`)
    pub async fn change_month(&self, current: &CalendarState, month_name: &str) -> Result<CalendarState, SchedulerError> {
        grid::switch_month(self.store.as_ref(), current, month_name).await
    }

    /// The events of `day`, the most recently added first.
    ///
    /// Storage errors are logged, and result in an empty list. Use [`Self::try_get_events`] to tell them apart
    pub async fn get_events(&self, day: &CalendarDay) -> Vec<Event> {
        if day.is_padding() {
            return Vec::new();
        }
        match self.try_get_events(day).await {
            Ok(events) => events,
            Err(err) => {
                log::warn!("Showing no events for {}: {}", day.describe(), err);
                Vec::new()
            },
        }
    }

    /// The events of `day`, the most recently added first
    pub async fn try_get_events(&self, day: &CalendarDay) -> Result<Vec<Event>, SchedulerError> {
        day.ensure_real()?;
        self.store.list_events_for_day(day).await
    }

    /// The hourly schedule of `day`
    pub async fn day_view(&self, day: &CalendarDay) -> DaySchedule {
        let events = self.get_events(day).await;
        DaySchedule::build(day.clone(), events)
    }

    /// Store a new event on `day`. The error is meant to be shown to the user
    pub async fn add_event(&self, day: &CalendarDay, event: NewEvent) -> Result<EventId, SchedulerError> {
        if let Err(err) = day.ensure_real() {
            log::warn!("Refusing to add {:?}: {}", event.name(), err);
            return Err(err);
        }
        if event.name().trim().is_empty() {
            log::warn!("Refusing to add a nameless event to {}", day.describe());
            return Err(SchedulerError::validation("the event has no name"));
        }
        self.store.insert_event(day, &event).await
    }
}
