//! Events stored in a local SQLite file

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

use crate::calendar::CalendarDay;
use crate::error::SchedulerError;
use crate::event::{Event, EventId, NewEvent};
use crate::traits::EventStore;
use super::{bind_day, bind_new_event, rows_to_events, storage_error, EventRow};
use super::{INSERT_EVENT, SELECT_EVENTS_FOR_DAY};

/// DDL of the `events` table
pub const SCHEMA: &str = include_str!("../../schema/sqlite.sql");

/// An [`EventStore`] backed by an SQLite file, which is created if needed.
///
/// Like [`MySqlStore`](super::MySqlStore), a connection is opened for every operation
#[derive(Clone, Debug)]
pub struct SqliteStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteStore {
    /// Create a store. This does not open the file yet
    pub fn new(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self { path: path.to_path_buf(), options }
    }

    /// Open a store, and create its `events` table if needed
    pub async fn open(path: &Path) -> Result<Self, SchedulerError> {
        let store = Self::new(path);
        store.init_schema().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection, SchedulerError> {
        SqliteConnection::connect_with(&self.options).await
            .map_err(|err| {
                log::error!("Unable to open {:?}: {}", self.path, err);
                SchedulerError::Connection(err)
            })
    }

    async fn release(&self, conn: SqliteConnection) {
        if let Err(err) = conn.close().await {
            log::warn!("Unable to cleanly close {:?}: {}", self.path, err);
        }
    }

    /// Create the `events` table, unless it already exists
    pub async fn init_schema(&self) -> Result<(), SchedulerError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(SCHEMA).execute(&mut conn).await;
        self.release(conn).await;

        result.map_err(|err| storage_error("create the events table", err))?;
        log::debug!("Events table is ready in {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn list_events_for_day(&self, day: &CalendarDay) -> Result<Vec<Event>, SchedulerError> {
        day.ensure_real()?;

        let mut conn = self.connect().await?;
        let result = bind_day!(sqlx::query_as::<_, EventRow>(SELECT_EVENTS_FOR_DAY), day)
            .fetch_all(&mut conn)
            .await;
        self.release(conn).await;

        let rows = result.map_err(|err| storage_error(&format!("list the events of {}", day.describe()), err))?;
        Ok(rows_to_events(rows, day))
    }

    async fn insert_event(&self, day: &CalendarDay, event: &NewEvent) -> Result<EventId, SchedulerError> {
        day.ensure_real()?;

        let mut conn = self.connect().await?;
        let result = bind_new_event!(sqlx::query(INSERT_EVENT), day, event, Utc::now().naive_utc())
            .execute(&mut conn)
            .await;
        self.release(conn).await;

        let done = result.map_err(|err| storage_error(&format!("add {:?} to {}", event.name(), day.describe()), err))?;
        let id = done.last_insert_rowid();
        log::info!("Added event {} ({:?}) to {}", id, event.name(), day.describe());
        Ok(id)
    }
}
