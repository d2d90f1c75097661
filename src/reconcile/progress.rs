//! Utilities to track the progression of a reconciliation

use std::fmt::{Display, Error, Formatter};

use crate::task::TaskId;
use crate::calendar::entry::UserId;

/// An event that happens during a reconciliation
#[derive(Clone, Debug)]
pub enum ReconcileEvent {
    /// Reconciliation has not started
    NotStarted,
    /// Reconciliation has just started
    Started { n_tasks: usize },
    /// Some tasks have been handled
    InProgress { done: usize, n_tasks: usize },
    /// Reconciliation is finished
    Finished { success: bool },
}

impl Display for ReconcileEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            ReconcileEvent::NotStarted => write!(f, "Not started"),
            ReconcileEvent::Started{n_tasks} => write!(f, "Checking the calendar entries of {} tasks...", n_tasks),
            ReconcileEvent::InProgress{done, n_tasks} => write!(f, "{}/{} calendar entries checked...", done, n_tasks),
            ReconcileEvent::Finished{success} => match success {
                true => write!(f, "Calendar entries are up to date"),
                false => write!(f, "Calendar entries checked, with errors"),
            }
        }
    }
}

impl Default for ReconcileEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<ReconcileEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<ReconcileEvent>;

/// Create a feeback channel, that can be used to retrieve the current progress of a reconciliation
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(ReconcileEvent::default())
}



/// Counts what happened to the tasks of a reconciliation, logs it, and reports it to the feedback channel (if any)
#[derive(Default)]
pub struct ReconcileProgress {
    n_tasks: usize,
    n_created: usize,
    n_already_present: usize,
    n_failed: usize,
    /// Checks that neither succeeded nor failed (e.g. a panicking store)
    n_aborted: usize,
    feedback_channel: Option<FeedbackSender>,
}

impl ReconcileProgress {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_feedback_channel(channel: FeedbackSender) -> Self {
        Self { feedback_channel: Some(channel), ..Self::default() }
    }

    pub fn n_tasks(&self) -> usize { self.n_tasks }
    pub fn n_created(&self) -> usize { self.n_created }
    pub fn n_already_present(&self) -> usize { self.n_already_present }
    /// Tasks whose check did not succeed, for whatever reason
    pub fn n_errors(&self) -> usize { self.n_failed + self.n_aborted }
    /// Tasks that have been handled so far
    pub fn n_done(&self) -> usize {
        self.n_created + self.n_already_present + self.n_errors()
    }

    pub fn is_success(&self) -> bool {
        self.n_errors() == 0
    }

    /// `n_tasks` checks are about to start
    pub fn start(&mut self, user_id: UserId, n_tasks: usize) {
        self.n_tasks = n_tasks;
        log::info!("Checking calendar entries of {} tasks for user {}", n_tasks, user_id);
        self.feedback(ReconcileEvent::Started{ n_tasks });
    }

    pub fn created(&mut self, task_id: TaskId) {
        log::info!("Created calendar entry for task {}", task_id);
        self.n_created += 1;
        self.step();
    }

    pub fn already_present(&mut self, task_id: TaskId) {
        log::debug!("Task {} already has a calendar entry", task_id);
        self.n_already_present += 1;
        self.step();
    }

    /// The store returned an error. This is not retried
    pub fn failed(&mut self, task_id: TaskId, err: &dyn Display) {
        log::warn!("Unable to check or create the calendar entry of task {}: {}", task_id, err);
        self.n_failed += 1;
        self.step();
    }

    /// A check did not complete at all, and its task is unknown
    pub fn aborted(&mut self, err: &dyn Display) {
        log::error!("A calendar entry check did not complete: {}", err);
        self.n_aborted += 1;
        self.step();
    }

    /// Every check is over
    pub fn finish(&mut self) {
        log::info!("Calendar entries: {} created, {} already present, {} errors",
                   self.n_created, self.n_already_present, self.n_errors());
        let success = self.is_success();
        self.feedback(ReconcileEvent::Finished{ success });
    }

    fn step(&mut self) {
        let event = ReconcileEvent::InProgress{ done: self.n_done(), n_tasks: self.n_tasks };
        self.feedback(event);
    }

    fn feedback(&mut self, event: ReconcileEvent) {
        if let Some(sender) = &self.feedback_channel {
            // Nobody listening anymore is fine
            let _ = sender.send(event);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_and_events() {
        let (sender, receiver) = feedback_channel();
        let mut progress = ReconcileProgress::new_with_feedback_channel(sender);

        progress.start(UserId::from(1), 3);
        assert!(matches!(*receiver.borrow(), ReconcileEvent::Started{ n_tasks: 3 }));

        progress.created(TaskId::from(1));
        progress.already_present(TaskId::from(2));
        assert!(matches!(*receiver.borrow(), ReconcileEvent::InProgress{ done: 2, n_tasks: 3 }));
        assert!(progress.is_success());

        progress.failed(TaskId::from(3), &"connection reset");
        assert_eq!(progress.n_done(), 3);
        assert_eq!(progress.n_errors(), 1);
        assert_eq!(progress.n_created(), 1);
        assert_eq!(progress.n_already_present(), 1);

        progress.finish();
        assert!(matches!(*receiver.borrow(), ReconcileEvent::Finished{ success: false }));
        assert_eq!(receiver.borrow().to_string(), "Calendar entries checked, with errors");
    }

    #[test]
    fn no_listener() {
        let mut progress = ReconcileProgress::new();
        progress.start(UserId::from(1), 1);
        progress.aborted(&"task panicked");
        progress.finish();
        assert!(progress.is_success() == false);
    }
}
