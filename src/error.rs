//! Errors returned by this crate

use thiserror::Error;

/// Everything that can go wrong while building a month or touching the event storage
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The storage could not be reached (or the connection dropped mid-way)
    #[error("unable to reach the event storage: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement was rejected or failed to run
    #[error("event storage query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The caller supplied something out of range, or a padding day
    #[error("invalid input: {0}")]
    Validation(String),

    /// Connection settings are missing or malformed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SchedulerError {
    pub fn validation<S: ToString>(msg: S) -> Self {
        Self::Validation(msg.to_string())
    }

    pub fn config<S: ToString>(msg: S) -> Self {
        Self::Config(msg.to_string())
    }

    /// Sort a raw sqlx error into either a connection or a query failure
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connection(err),
            _ => Self::Query(err),
        }
    }

    /// Whether the storage itself was unavailable, as opposed to a bad statement or bad input
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlx_errors_are_sorted() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(SchedulerError::from_sqlx(sqlx::Error::Io(io)).is_connection());
        assert!(SchedulerError::from_sqlx(sqlx::Error::PoolTimedOut).is_connection());

        let err = SchedulerError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, SchedulerError::Query(_)));
        assert!(err.is_connection() == false);
    }

    #[test]
    fn messages() {
        let err = SchedulerError::validation("hour 13 is not on a 12-hour clock");
        assert_eq!(err.to_string(), "invalid input: hour 13 is not on a 12-hour clock");
        assert!(err.is_validation());
    }
}
