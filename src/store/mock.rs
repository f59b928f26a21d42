//! An in-memory store, mostly useful for tests

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::calendar::CalendarDay;
use crate::error::SchedulerError;
use crate::event::{Event, EventId, NewEvent};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::EventStore;

/// An [`EventStore`] that keeps its events in memory, and that can be told to fail (see [`MockBehaviour`])
#[derive(Debug, Default)]
pub struct MockStore {
    events: Mutex<Vec<Event>>,
    behaviour: Mutex<MockBehaviour>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            behaviour: Mutex::new(behaviour),
        }
    }

    /// Change how this store behaves from now on
    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Every event, in insertion order, whatever their day
    pub fn all_events(&self) -> Vec<Event> {
        lock(&self.events).clone()
    }

    /// Store an event as-is, bypassing any mocked behaviour
    pub fn push_raw(&self, event: Event) {
        lock(&self.events).push(event);
    }
}

// A panicking test thread must not prevent other tests from reading the store
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[async_trait]
impl EventStore for MockStore {
    async fn list_events_for_day(&self, day: &CalendarDay) -> Result<Vec<Event>, SchedulerError> {
        day.ensure_real()?;
        lock(&self.behaviour).can_list_events()?;

        let mut events: Vec<Event> = lock(&self.events).iter()
            .filter(|e| e.is_on(day))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.id().cmp(&a.id()));
        Ok(events)
    }

    async fn insert_event(&self, day: &CalendarDay, event: &NewEvent) -> Result<EventId, SchedulerError> {
        day.ensure_real()?;
        lock(&self.behaviour).can_insert_event()?;

        let mut events = lock(&self.events);
        let id = events.iter().map(|e| e.id()).max().unwrap_or(0) + 1;
        events.push(event.clone().into_event(id, day, Utc::now()));
        Ok(id)
    }
}
