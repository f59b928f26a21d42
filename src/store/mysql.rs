//! Events stored in a MySQL (or MariaDB) database

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};

use crate::calendar::CalendarDay;
use crate::config::Settings;
use crate::error::SchedulerError;
use crate::event::{Event, EventId, NewEvent};
use crate::traits::EventStore;
use super::{bind_day, bind_new_event, rows_to_events, storage_error, EventRow};
use super::{INSERT_EVENT, SELECT_EVENTS_FOR_DAY};

/// DDL of the `events` table
pub const SCHEMA: &str = include_str!("../../schema/mysql.sql");

/// An [`EventStore`] backed by a MySQL server.
///
/// No connection is kept open between two operations
#[derive(Clone, Debug)]
pub struct MySqlStore {
    options: MySqlConnectOptions,
    /// `user@host:port/database`, for log messages
    target: String,
}

impl MySqlStore {
    /// Create a store. This does not start a connection
    pub fn new(settings: &Settings) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database)
            .charset("utf8mb4");

        Self { options, target: settings.target() }
    }

    async fn connect(&self) -> Result<MySqlConnection, SchedulerError> {
        MySqlConnection::connect_with(&self.options).await
            .map_err(|err| {
                log::error!("Unable to connect to {}: {}", self.target, err);
                SchedulerError::Connection(err)
            })
    }

    async fn release(&self, conn: MySqlConnection) {
        if let Err(err) = conn.close().await {
            log::warn!("Unable to cleanly close the connection to {}: {}", self.target, err);
        }
    }

    /// Create the `events` table, unless it already exists
    pub async fn init_schema(&self) -> Result<(), SchedulerError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(SCHEMA).execute(&mut conn).await;
        self.release(conn).await;

        result.map_err(|err| storage_error("create the events table", err))?;
        log::info!("Events table is ready on {}", self.target);
        Ok(())
    }
}

#[async_trait]
impl EventStore for MySqlStore {
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
        let id = done.last_insert_id() as EventId;
        log::info!("Added event {} ({:?}) to {}", id, event.name(), day.describe());
        Ok(id)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_every_column() {
        for column in ["event_name", "start_hour", "start_min", "start_ampm", "end_hour", "end_min",
                       "end_ampm", "month", "day", "year", "date_passed", "date_set"].iter() {
            assert!(SCHEMA.contains(&format!("`{}`", column)), "missing {}", column);
            assert!(INSERT_EVENT.contains(column));
        }
        assert!(SCHEMA.contains("utf8mb4"));
    }

    #[test]
    fn statements_are_parameterized() {
        assert_eq!(SELECT_EVENTS_FOR_DAY.matches('?').count(), 3);
        assert_eq!(INSERT_EVENT.matches('?').count(), 12);
    }

    #[tokio::test]
    async fn unreachable_server() {
        let _ = env_logger::builder().is_test(true).try_init();

        let settings = Settings {
            host: "127.0.0.1".to_string(),
            // Nothing should listen on the discard port
            port: 9,
            user: "nobody".to_string(),
            password: "nothing".to_string(),
            database: "scheduler".to_string(),
        };
        let store = MySqlStore::new(&settings);
        let day = CalendarDay::new(2021, 3, 10, chrono::Weekday::Wed);

        let err = store.list_events_for_day(&day).await.unwrap_err();
        assert!(err.is_connection(), "{:?}", err);
    }
}
