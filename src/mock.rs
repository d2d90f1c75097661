//! An in-memory backend, that can be used in tests instead of the task service
#![cfg(any(test, feature = "mock_backend"))]

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::BoxError;
use crate::traits::{CalendarEntryStore, TaskSource};
use crate::task::{Task, TaskDraft, TaskId};
use crate::calendar::entry::{CalendarEntry, UserId};
use crate::mock_behaviour::MockBehaviour;

#[derive(Default)]
struct MockState {
    tasks: Vec<(UserId, Task)>,
    /// At most one entry per (user, task) pair
    entries: Vec<CalendarEntry>,
    next_task_id: u64,
    create_entry_calls: usize,
    behaviour: MockBehaviour,
}

/// Tasks and calendar entries, stored in memory
///
/// Like a real database, this refuses to store two entries for the same (user, task) pair.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A test that panicked while holding the lock must not poison the other ones
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        self.state().behaviour = behaviour;
    }

    /// Store a task, as if it had been created by `user_id` earlier
    pub fn add_task(&self, user_id: UserId, task: Task) {
        let mut state = self.state();
        state.next_task_id = state.next_task_id.max(task.id().as_u64() + 1);
        state.tasks.push((user_id, task));
    }

    /// Store an entry, bypassing the call counters and the mock behaviour
    pub fn insert_entry(&self, entry: CalendarEntry) {
        let mut state = self.state();
        if state.entries.iter().any(|e| e.is_for(entry.user_id(), entry.task_id())) == false {
            state.entries.push(entry);
        }
    }

    pub fn tasks_of(&self, user_id: UserId) -> Vec<Task> {
        self.state().tasks.iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, task)| task.clone())
            .collect()
    }

    /// The stored entries, in creation order
    pub fn entries(&self) -> Vec<CalendarEntry> {
        self.state().entries.clone()
    }

    /// How many times `create_entry` has been called (successfully or not)
    pub fn create_entry_calls(&self) -> usize {
        self.state().create_entry_calls
    }
}

#[async_trait]
impl TaskSource for MockBackend {
    async fn fetch_tasks(&self, user_id: UserId) -> Result<Vec<Task>, BoxError> {
        self.state().behaviour.can_fetch_tasks()?;
        Ok(self.tasks_of(user_id))
    }

    async fn create_task(&self, user_id: UserId, draft: &TaskDraft) -> Result<Task, BoxError> {
        let mut state = self.state();
        state.behaviour.can_create_task()?;

        state.next_task_id += 1;
        let task_id = TaskId::from(state.next_task_id);
        let mut task = Task::new_with_parameters(task_id, String::new(), String::new(), None, Default::default(), Default::default());
        task.apply_draft(draft);
        state.tasks.push((user_id, task.clone()));
        Ok(task)
    }

    async fn update_task(&self, user_id: UserId, task_id: TaskId, draft: &TaskDraft) -> Result<Task, BoxError> {
        let mut state = self.state();
        state.behaviour.can_update_task()?;

        match state.tasks.iter_mut().find(|(owner, task)| *owner == user_id && task.id() == task_id) {
            None => Err(format!("No task {} for user {}", task_id, user_id).into()),
            Some((_, task)) => {
                task.apply_draft(draft);
                Ok(task.clone())
            },
        }
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), BoxError> {
        let mut state = self.state();
        state.behaviour.can_delete_task()?;

        let n_before = state.tasks.len();
        state.tasks.retain(|(_, task)| task.id() != task_id);
        if state.tasks.len() == n_before {
            return Err(format!("No task {}", task_id).into());
        }
        Ok(())
    }
}

#[async_trait]
impl CalendarEntryStore for MockBackend {
    async fn find_entry(&self, user_id: UserId, task_id: TaskId) -> Result<Option<CalendarEntry>, BoxError> {
        let mut state = self.state();
        state.behaviour.can_find_entry()?;
        Ok(state.entries.iter().find(|e| e.is_for(user_id, task_id)).cloned())
    }

    async fn create_entry(&self, entry: &CalendarEntry) -> Result<(), BoxError> {
        let mut state = self.state();
        state.create_entry_calls += 1;
        state.behaviour.can_create_entry()?;

        if state.entries.iter().any(|e| e.is_for(entry.user_id(), entry.task_id())) {
            return Err(format!("Task {} already has an entry for user {}", entry.task_id(), entry.user_id()).into());
        }
        state.entries.push(entry.clone());
        Ok(())
    }
}
