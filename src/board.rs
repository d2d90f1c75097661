//! The task board owns what a page shows: the tasks of a user and the month being displayed.
//!
//! Every mutation goes to the backend first. The local list is only patched once the backend has accepted it,
//! so that a failure leaves the board consistent with what was last known of the backend.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::BoxError;
use crate::traits::{CalendarEntryStore, TaskSource};
use crate::task::{Task, TaskDraft, TaskFilter, TaskId};
use crate::calendar::YearMonth;
use crate::calendar::entry::UserId;
use crate::calendar::grid::{build_month_grid, MonthGrid};
use crate::chart::Surface;
use crate::dashboard::{Charts, Dashboard};
use crate::client::Client;
use crate::session::Session;
use crate::reconcile::{spawn_reconciliation, ReconcileReport};
use crate::reconcile::progress::FeedbackSender;

/// The tasks of a user, and a month cursor
pub struct TaskBoard<S>
where
    S: TaskSource + CalendarEntryStore + 'static,
{
    backend: Arc<S>,
    user_id: UserId,
    tasks: Vec<Task>,
    cursor: YearMonth,
    pending_reconciliation: Option<JoinHandle<ReconcileReport>>,
    feedback_sender: Option<FeedbackSender>,
}

impl TaskBoard<Client> {
    /// A board that talks to the task service described by `session`
    pub fn from_session(session: &Session) -> Result<Self, BoxError> {
        let client = Client::from_session(session)?;
        Ok(Self::new(Arc::new(client), session.user_id()))
    }
}

impl<S> TaskBoard<S>
where
    S: TaskSource + CalendarEntryStore + 'static,
{
    /// Create an empty board, showing the current month. Call [`Self::refresh`] to load the tasks
    pub fn new(backend: Arc<S>, user_id: UserId) -> Self {
        Self {
            backend,
            user_id,
            tasks: Vec::new(),
            cursor: YearMonth::today(),
            pending_reconciliation: None,
            feedback_sender: None,
        }
    }

    /// Reconciliations started by [`Self::refresh`] will report their progress to this channel
    pub fn set_feedback_channel(&mut self, sender: FeedbackSender) {
        self.feedback_sender = Some(sender);
    }

    pub fn backend(&self) -> &Arc<S> { &self.backend }
    pub fn user_id(&self) -> UserId { self.user_id }
    pub fn tasks(&self) -> &[Task] { &self.tasks }
    pub fn cursor(&self) -> YearMonth { self.cursor }

    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        filter.apply(&self.tasks)
    }

    /// Fetch the tasks again, and start making sure they all have a calendar entry.
    ///
    /// The reconciliation runs in the background and is not awaited. \
    /// In case of a fetch error, the previous task list is kept. \
    /// Returns whether the fetch succeeded.
    pub async fn refresh(&mut self) -> bool {
        let tasks = match self.backend.fetch_tasks(self.user_id).await {
            Err(err) => {
                log::error!("Unable to fetch the tasks of user {}: {}", self.user_id, err);
                return false;
            },
            Ok(tasks) => tasks,
        };
        log::debug!("Fetched {} tasks for user {}", tasks.len(), self.user_id);
        self.tasks = tasks;

        let task_ids: Vec<TaskId> = self.tasks.iter().map(|t| t.id()).collect();
        if task_ids.is_empty() == false {
            // A previous reconciliation that is still running is left alone
            self.pending_reconciliation = Some(spawn_reconciliation(
                Arc::clone(&self.backend), self.user_id, task_ids, self.feedback_sender.clone()));
        }
        true
    }

    /// Returns the handle of the last reconciliation started by [`Self::refresh`], if it has not been taken yet
    pub fn take_pending_reconciliation(&mut self) -> Option<JoinHandle<ReconcileReport>> {
        self.pending_reconciliation.take()
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }
    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }
    pub fn today(&mut self) {
        self.cursor = YearMonth::today();
    }
    pub fn set_month(&mut self, month: YearMonth) {
        self.cursor = month;
    }

    /// The grid of the displayed month
    pub fn month_grid(&self) -> MonthGrid<'_> {
        build_month_grid(self.cursor, &self.tasks)
    }

    pub fn render_dashboard<D: Surface>(&self, dashboard: &mut Dashboard<D>, charts: Charts) {
        dashboard.render(&self.tasks, charts);
    }

    /// Create a task. Returns whether it succeeded
    pub async fn create_task(&mut self, draft: &TaskDraft) -> bool {
        match self.backend.create_task(self.user_id, draft).await {
            Err(err) => {
                log::error!("Unable to create task {:?}: {}", draft.title, err);
                false
            },
            Ok(task) => {
                log::info!("Created task {}", task.id());
                self.tasks.push(task);
                true
            }
        }
    }

    /// Update a task. Returns whether it succeeded
    pub async fn update_task(&mut self, task_id: TaskId, draft: &TaskDraft) -> bool {
        if let Err(err) = self.backend.update_task(self.user_id, task_id, draft).await {
            log::error!("Unable to update task {}: {}", task_id, err);
            return false;
        }

        match self.tasks.iter_mut().find(|t| t.id() == task_id) {
            Some(task) => task.apply_draft(draft),
            None => log::warn!("Task {} has been updated, but was not in the local list", task_id),
        }
        true
    }

    /// Delete a task. Returns whether it succeeded
    pub async fn delete_task(&mut self, task_id: TaskId) -> bool {
        if let Err(err) = self.backend.delete_task(task_id).await {
            log::error!("Unable to delete task {}: {}", task_id, err);
            return false;
        }
        self.tasks.retain(|t| t.id() != task_id);
        true
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::mock::MockBackend;
    use crate::mock_behaviour::MockBehaviour;
    use crate::task::{Priority, Status};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn populated_backend(user: UserId) -> Arc<MockBackend> {
        let backend = Arc::new(MockBackend::new());
        backend.add_task(user, Task::new_with_parameters(TaskId::from(1), "Groceries".into(), "".into(),
            Some("2024-10-11".into()), Priority::High, Status::Complete));
        backend.add_task(user, Task::new_with_parameters(TaskId::from(2), "Gym".into(), "".into(),
            Some("2024-10-11T18:00:00Z".into()), Priority::Low, Status::Incomplete));
        backend.add_task(user, Task::new_with_parameters(TaskId::from(3), "Taxes".into(), "".into(),
            Some("someday".into()), Priority::Medium, Status::Incomplete));
        backend
    }

    #[tokio::test]
    async fn refresh_and_grid() {
        let _ = env_logger::builder().is_test(true).try_init();

        let user = UserId::from(1);
        let backend = populated_backend(user);
        let mut board = TaskBoard::new(Arc::clone(&backend), user);
        board.set_month(YearMonth::new(2024, 10).unwrap());

        assert!(board.refresh().await);
        assert_eq!(board.tasks().len(), 3);

        let grid = board.month_grid();
        let cell = grid.cell_for(date(2024, 10, 11)).unwrap();
        let titles: Vec<&str> = cell.tasks().iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["Groceries", "Gym"]);

        let report = board.take_pending_reconciliation().unwrap().await.unwrap();
        assert_eq!(report.created.len(), 3);
        assert_eq!(backend.entries().len(), 3);

        // A second refresh finds every entry
        assert!(board.refresh().await);
        let report = board.take_pending_reconciliation().unwrap().await.unwrap();
        assert!(report.created.is_empty());
        assert_eq!(backend.create_entry_calls(), 3);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_tasks() {
        let user = UserId::from(1);
        let backend = populated_backend(user);
        let mut board = TaskBoard::new(Arc::clone(&backend), user);
        assert!(board.refresh().await);

        backend.set_behaviour(MockBehaviour { fetch_tasks_behaviour: (0, 1), ..MockBehaviour::default() });
        assert!(board.refresh().await == false);
        assert_eq!(board.tasks().len(), 3);
    }

    #[tokio::test]
    async fn crud_patches_the_local_list() {
        let user = UserId::from(1);
        let backend = populated_backend(user);
        let mut board = TaskBoard::new(Arc::clone(&backend), user);
        assert!(board.refresh().await);

        let draft = TaskDraft::new("Dentist", "", date(2024, 10, 20)).with_priority(Priority::High);
        assert!(board.create_task(&draft).await);
        assert_eq!(board.tasks().len(), 4);
        let new_id = board.tasks()[3].id();

        let done = draft.clone().with_status(Status::Complete);
        assert!(board.update_task(new_id, &done).await);
        assert_eq!(board.filtered(TaskFilter::Completed).len(), 2);

        assert!(board.delete_task(TaskId::from(2)).await);
        assert_eq!(board.tasks().len(), 3);
        assert_eq!(backend.tasks_of(user).len(), 3);

        backend.set_behaviour(MockBehaviour::fail_now(1));
        assert!(board.delete_task(TaskId::from(1)).await == false);
        assert_eq!(board.tasks().len(), 3);
    }

    #[tokio::test]
    async fn month_navigation() {
        let mut board = TaskBoard::new(Arc::new(MockBackend::new()), UserId::from(1));
        board.set_month(YearMonth::new(2024, 12).unwrap());
        board.next_month();
        assert_eq!(board.cursor(), YearMonth::new(2025, 1).unwrap());
        board.prev_month();
        board.prev_month();
        assert_eq!(board.cursor(), YearMonth::new(2024, 11).unwrap());
        board.today();
        assert_eq!(board.cursor(), YearMonth::today());
    }
}
