//! This module provides ways to tweak a mocked store, so that it can return errors on some tests

use crate::error::SchedulerError;

/// This stores some behaviour tweaks, that describe how a mocked store will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    /// Failures of `list_events_for_day` are reported as query errors
    pub list_events_behaviour: (u32, u32),
    /// Failures of `insert_event` are reported as connection errors
    pub insert_event_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            list_events_behaviour: (0, n_fails),
            insert_event_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_list_events(&mut self) -> Result<(), SchedulerError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.list_events_behaviour, "list_events")
            .map_err(|msg| SchedulerError::Query(sqlx::Error::Protocol(msg)))
    }

    pub fn can_insert_event(&mut self) -> Result<(), SchedulerError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.insert_event_behaviour, "insert_event")
            .map_err(|msg| {
                let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, msg);
                SchedulerError::Connection(sqlx::Error::Io(io))
            })
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), String> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_list_events().is_ok());
        assert!(ok.can_list_events().is_ok());
        assert!(ok.can_insert_event().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_list_events().is_err());
        assert!(now.can_insert_event().unwrap_err().is_connection());
        assert!(now.can_insert_event().is_err());
        assert!(now.can_list_events().is_err());
        assert!(now.can_list_events().is_ok());
        assert!(now.can_insert_event().is_ok());

        let mut custom = MockBehaviour{
            list_events_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.can_list_events().is_ok());
        assert!(custom.can_list_events().is_err());
        custom.suspend();
        assert!(custom.can_list_events().is_ok());
        custom.resume();
        assert!(custom.can_list_events().is_err());
        assert!(custom.can_list_events().is_ok());
        assert!(custom.can_insert_event().is_ok());
    }
}
