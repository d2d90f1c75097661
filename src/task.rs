//! To-do tasks, as served by the task service

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// The server-assigned identifier of a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}
impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// How urgent a task is.
///
/// The service stores priorities as free text. Anything that is neither `High` nor `Medium` is considered `Low`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }
}
impl From<String> for Priority {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
impl From<Option<String>> for Priority {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}
impl From<Priority> for String {
    fn from(p: Priority) -> String {
        p.as_str().to_string()
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}


/// The completion status of a task
///
/// Unknown status strings are kept verbatim so that they survive an update, but they count neither as complete nor as incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Status {
    Complete,
    Incomplete,
    Other(String),
}

impl Status {
    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Complete)
    }
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Status::Incomplete)
    }
    pub fn as_str(&self) -> &str {
        match self {
            Status::Complete => "Complete",
            Status::Incomplete => "Incomplete",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Complete" => Status::Complete,
            "Incomplete" => Status::Incomplete,
            _ => Status::Other(s),
        }
    }
}
impl From<Option<String>> for Status {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}
impl From<Status> for String {
    fn from(s: Status) -> String {
        s.as_str().to_string()
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Incomplete
    }
}


/// A to-do task, as returned by the task service
///
/// Decoding is lenient: a record with a missing or oddly typed optional field is still decoded, so that it cannot hide the other tasks of a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "id")]
    task_id: TaskId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    /// The due date, as sent by the server.
    /// It is kept as raw text, because a malformed date must not prevent the rest of the task from being displayed
    #[serde(default, alias = "dueDate", alias = "duedate", deserialize_with = "lenient_due_date")]
    due_date: Option<String>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    created_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings are kept as they are. Anything else is dropped
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => {
            log::debug!("Ignoring unexpected value {}", other);
            Ok(None)
        },
    }
}

/// Like [`lenient_text`], but integers are understood as milliseconds since the epoch (UTC)
fn lenient_due_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        Value::Number(n) => {
            let date = n.as_i64()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map(|dt| dt.to_rfc3339());
            if date.is_none() {
                log::debug!("Ignoring out-of-range due date {}", n);
            }
            Ok(date)
        },
        other => {
            log::debug!("Ignoring unexpected due date {}", other);
            Ok(None)
        },
    }
}

impl Task {
    /// Create a new Task instance, that already exists on the server
    pub fn new_with_parameters(task_id: TaskId, title: String, description: String,
                               due_date: Option<String>, priority: Priority, status: Status) -> Self
    {
        Self {
            task_id, title, description, due_date, priority, status,
            created_at: None,
        }
    }

    pub fn id(&self) -> TaskId              { self.task_id    }
    pub fn title(&self) -> &str             { &self.title     }
    pub fn description(&self) -> &str       { &self.description }
    pub fn priority(&self) -> Priority      { self.priority   }
    pub fn status(&self) -> &Status         { &self.status    }
    pub fn completed(&self) -> bool         { self.status.is_complete() }
    pub fn raw_due_date(&self) -> Option<&str>  { self.due_date.as_deref() }
    pub fn created_at(&self) -> Option<&str>    { self.created_at.as_deref() }

    /// The calendar day this task is due, or `None` if the server sent no date or an unparsable one
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    /// Apply the content of a draft (e.g. after the server has accepted an update)
    pub fn apply_draft(&mut self, draft: &TaskDraft) {
        self.title = draft.title.clone();
        self.description = draft.description.clone();
        self.due_date = Some(draft.due_date.format("%Y-%m-%d").to_string());
        self.priority = draft.priority;
        self.status = draft.status.clone();
    }
}


/// The editable content of a task, used to create or update it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: Status,
}

impl TaskDraft {
    pub fn new<S: ToString, T: ToString>(title: S, description: T, due_date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            priority: Priority::default(),
            status: Status::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}


/// Extract the calendar day out of a due date sent by the server.
///
/// Supported forms are a plain `YYYY-MM-DD` date, an RFC 3339 timestamp, and a timestamp without offset.
/// Only the date as written is kept: neither the time of day nor the offset can move a task to another day.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ndt.date());
        }
    }

    log::debug!("Unable to parse due date {:?}", raw);
    None
}


/// Which tasks a list should show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Completed,
    Incomplete,
    WithPriority(Priority),
}

impl Default for TaskFilter {
    fn default() -> Self {
        TaskFilter::All
    }
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.status().is_complete(),
            TaskFilter::Incomplete => task.status().is_incomplete(),
            TaskFilter::WithPriority(p) => task.priority() == *p,
        }
    }

    /// Returns the tasks that match this filter, in their original order
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}
