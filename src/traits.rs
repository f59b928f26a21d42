use async_trait::async_trait;

use crate::calendar::CalendarDay;
use crate::error::SchedulerError;
use crate::event::{Event, EventId, NewEvent};

/// A place where events are persisted
///
/// Implementors must refuse padding days (see [`CalendarDay::is_padding`]) rather than querying for them.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns the events of `day`, the most recently inserted first.
    /// A day without events is an empty list, not an error
    async fn list_events_for_day(&self, day: &CalendarDay) -> Result<Vec<Event>, SchedulerError>;

    /// Persist a new event on `day`, and return the identifier the storage assigned to it.
    /// It is stamped with the current UTC time and is not marked as passed
    async fn insert_event(&self, day: &CalendarDay, event: &NewEvent) -> Result<EventId, SchedulerError>;

    /// Returns how many events `day` has
    async fn count_events_for_day(&self, day: &CalendarDay) -> Result<usize, SchedulerError> {
        Ok(self.list_events_for_day(day).await?.len())
    }
}
