//! This crate provides the bookkeeping behind a desktop scheduler: month grids, hourly day views, and events stored in a database.
//!
//! The month grid is built by the [`calendar::grid`] module, and the hourly view of a day by [`calendar::day_view`].
//!
//! Events are persisted through an [`EventStore`](traits::EventStore). This crate provides a MySQL store, an SQLite store and an in-memory store in the [`store`] module.
//!
//! A user interface only needs a [`Scheduler`], which ties a store to the grid and the day views. \
//! Storage failures never prevent a grid or a day view from being shown: they are logged using the `log::*` macros, and the affected days simply show no events.

pub mod traits;
pub mod error;
pub use error::SchedulerError;

pub mod calendar;
pub use calendar::CalendarDay;
pub mod time_slot;
pub use time_slot::TimeOfDay;
pub mod event;
pub use event::{Event, NewEvent};
pub mod scheduler;
pub use scheduler::Scheduler;

pub mod store;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
