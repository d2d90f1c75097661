//! This module provides ways to tweak mocked backends, so that they can return errors on some tests
#![cfg(any(test, feature = "mock_backend"))]

use crate::BoxError;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the TaskSource trait
    pub fetch_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub update_task_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),

    // From the CalendarEntryStore trait
    pub find_entry_behaviour: (u32, u32),
    pub create_entry_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_tasks_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            update_task_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
            find_entry_behaviour: (0, n_fails),
            create_entry_behaviour: (0, n_fails),
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

    pub fn can_fetch_tasks(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_tasks_behaviour, "fetch_tasks")
    }
    pub fn can_create_task(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_update_task(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_task_behaviour, "update_task")
    }
    pub fn can_delete_task(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
    pub fn can_find_entry(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.find_entry_behaviour, "find_entry")
    }
    pub fn can_create_entry(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_entry_behaviour, "create_entry")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), BoxError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_fetch_tasks().is_ok());
            assert!(ok.can_create_entry().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_find_entry().is_err());
        assert!(now.can_find_entry().is_err());
        assert!(now.can_fetch_tasks().is_err());
        assert!(now.can_fetch_tasks().is_ok());
        assert!(now.can_fetch_tasks().is_ok());
        assert!(now.can_find_entry().is_ok());

        let mut custom = MockBehaviour{
            fetch_tasks_behaviour: (0,1),
            create_entry_behaviour: (1,3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_fetch_tasks().is_err());
        assert!(custom.can_fetch_tasks().is_ok());
        assert!(custom.can_fetch_tasks().is_ok());
        assert!(custom.can_create_entry().is_ok());
        assert!(custom.can_create_entry().is_err());
        assert!(custom.can_create_entry().is_err());
        assert!(custom.can_create_entry().is_err());
        assert!(custom.can_create_entry().is_ok());
        assert!(custom.can_create_entry().is_ok());

        let mut suspended = MockBehaviour::fail_now(1);
        suspended.suspend();
        assert!(suspended.can_delete_task().is_ok());
        suspended.resume();
        assert!(suspended.can_delete_task().is_err());
    }
}
