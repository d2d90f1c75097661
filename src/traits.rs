use async_trait::async_trait;

use crate::BoxError;
use crate::task::{Task, TaskDraft, TaskId};
use crate::calendar::entry::{CalendarEntry, UserId};

/// A source of tasks, usually the task service (see [`Client`](crate::client::Client))
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns the tasks of a user, in the order the source lists them
    async fn fetch_tasks(&self, user_id: UserId) -> Result<Vec<Task>, BoxError>;
    /// Create a task and assign it to a user. Returns the task as stored by the source
    async fn create_task(&self, user_id: UserId, draft: &TaskDraft) -> Result<Task, BoxError>;
    /// Replace the content of an existing task
    async fn update_task(&self, user_id: UserId, task_id: TaskId, draft: &TaskDraft) -> Result<Task, BoxError>;
    async fn delete_task(&self, task_id: TaskId) -> Result<(), BoxError>;
}


/// Whether a calendar entry had to be created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    AlreadyPresent,
    Created,
}

/// A place where calendar entries are stored
#[async_trait]
pub trait CalendarEntryStore: Send + Sync {
    /// Returns the entry of the (user, task) pair, or `None` in case it does not exist
    async fn find_entry(&self, user_id: UserId, task_id: TaskId) -> Result<Option<CalendarEntry>, BoxError>;
    async fn create_entry(&self, entry: &CalendarEntry) -> Result<(), BoxError>;

    /// Make sure the (user, task) pair has an entry.
    ///
    /// The default implementation checks then creates. Two concurrent calls may thus both create the entry.
    /// Stores that are able to perform an atomic upsert should override this.
    async fn ensure_entry(&self, user_id: UserId, task_id: TaskId) -> Result<EntryOutcome, BoxError> {
        if self.find_entry(user_id, task_id).await?.is_some() {
            return Ok(EntryOutcome::AlreadyPresent);
        }

        self.create_entry(&CalendarEntry::new(user_id, task_id)).await?;
        Ok(EntryOutcome::Created)
    }
}
