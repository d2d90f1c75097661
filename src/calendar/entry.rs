//! Calendar entries link a task to the calendar of a user

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// The identifier of a user of the task service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// The presence of a task on the calendar of a user.
///
/// There must be at most one entry per (user, task) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarEntry {
    user_id: UserId,
    task_id: TaskId,
    /// Some servers echo the due date of the task
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "dueDate")]
    due_date: Option<String>,
}

impl CalendarEntry {
    pub fn new(user_id: UserId, task_id: TaskId) -> Self {
        Self { user_id, task_id, due_date: None }
    }

    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn task_id(&self) -> TaskId { self.task_id }
    pub fn due_date(&self) -> Option<&str> { self.due_date.as_deref() }

    /// Whether this entry is the one of the (user, task) pair
    pub fn is_for(&self, user_id: UserId, task_id: TaskId) -> bool {
        self.user_id == user_id && self.task_id == task_id
    }
}
