//! This module makes sure every task of a user has a calendar entry
//!
//! For every fetched task, the entry store is asked whether the (user, task) pair has an entry, and one is created if it has not.
//! This is a best-effort side channel: the calendar grid never waits for it, failures are logged and dropped, and nothing is retried.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::{JoinHandle, JoinSet};

use crate::task::TaskId;
use crate::calendar::entry::UserId;
use crate::traits::{CalendarEntryStore, EntryOutcome};

pub mod progress;
use progress::{FeedbackSender, ReconcileProgress};


/// What happened to the tasks of a reconciliation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Tasks that had no entry, and have one now
    pub created: Vec<TaskId>,
    /// Tasks that already had an entry
    pub already_present: Vec<TaskId>,
    /// Tasks whose entry could not be checked or created
    pub failed: Vec<TaskId>,
}

impl ReconcileReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}


/// Check (and create if needed) the calendar entries of `task_ids`.
///
/// All checks run concurrently, in no particular order. Duplicated task IDs are only checked once.
/// Errors are logged (and counted by `progress`), they never abort the other checks.
pub async fn reconcile_entries<S>(store: Arc<S>, user_id: UserId, task_ids: Vec<TaskId>, progress: &mut ReconcileProgress) -> ReconcileReport
where
    S: CalendarEntryStore + ?Sized + 'static,
{
    let mut seen = HashSet::new();
    let task_ids: Vec<TaskId> = task_ids.into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    progress.start(user_id, task_ids.len());

    let mut checks = JoinSet::new();
    for task_id in task_ids {
        let store = Arc::clone(&store);
        checks.spawn(async move {
            let outcome = store.ensure_entry(user_id, task_id).await;
            (task_id, outcome)
        });
    }

    let mut report = ReconcileReport::default();
    while let Some(joined) = checks.join_next().await {
        match joined {
            Err(err) => progress.aborted(&err),
            Ok((task_id, Ok(EntryOutcome::Created))) => {
                progress.created(task_id);
                report.created.push(task_id);
            },
            Ok((task_id, Ok(EntryOutcome::AlreadyPresent))) => {
                progress.already_present(task_id);
                report.already_present.push(task_id);
            },
            Ok((task_id, Err(err))) => {
                progress.failed(task_id, &err);
                report.failed.push(task_id);
            },
        }
    }

    progress.finish();
    report
}

/// Start [`reconcile_entries`] in the background, and return immediately.
///
/// The caller may await the returned handle, or simply drop it. This must be called from within a tokio runtime.
pub fn spawn_reconciliation<S>(store: Arc<S>, user_id: UserId, task_ids: Vec<TaskId>, feedback_sender: Option<FeedbackSender>) -> JoinHandle<ReconcileReport>
where
    S: CalendarEntryStore + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut progress = match feedback_sender {
            Some(sender) => ReconcileProgress::new_with_feedback_channel(sender),
            None => ReconcileProgress::new(),
        };
        reconcile_entries(store, user_id, task_ids, &mut progress).await
    })
}
