//! Recurring background search per recipient.

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tracing::info;

use crate::port::{JobId, JobTask, RecipientDirectory, RecipientId, Scheduler};

use super::search::SearchService;

/// Default time between scheduled rounds.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(420);

/// Outcome of a start or stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Started,
    AlreadyRunning,
    Stopped,
    NotRunning,
}

/// Starts and stops each recipient's scheduled search job.
pub struct WatchService {
    scheduler: Arc<dyn Scheduler>,
    search: Arc<SearchService>,
    directory: Arc<dyn RecipientDirectory>,
    interval: Duration,
}

impl WatchService {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        search: Arc<SearchService>,
        directory: Arc<dyn RecipientDirectory>,
        interval: Duration,
    ) -> Self {
        Self {
            scheduler,
            search,
            directory,
            interval,
        }
    }

    #[must_use]
    pub fn job_id(recipient: RecipientId) -> JobId {
        JobId::new(format!("scheduled_search_{recipient}"))
    }

    /// Schedule the recurring round for `recipient`, at most once.
    pub fn start(&self, recipient: RecipientId) -> WatchState {
        let job = Self::job_id(recipient);
        if self.scheduler.exists(&job) {
            return WatchState::AlreadyRunning;
        }

        let search = Arc::clone(&self.search);
        let directory = Arc::clone(&self.directory);
        let task: JobTask = Arc::new(move || {
            let search = Arc::clone(&search);
            let directory = Arc::clone(&directory);
            async move { search.scheduled_round(directory.as_ref()).await }.boxed()
        });

        if self.scheduler.schedule_recurring(job.clone(), self.interval, task) {
            info!(%job, interval_secs = self.interval.as_secs(), "Scheduled search started");
            WatchState::Started
        } else {
            WatchState::AlreadyRunning
        }
    }

    /// Cancel future rounds for `recipient`. A running round completes.
    pub fn stop(&self, recipient: RecipientId) -> WatchState {
        let job = Self::job_id(recipient);
        if self.scheduler.cancel(&job) {
            info!(%job, "Scheduled search stopped");
            WatchState::Stopped
        } else {
            WatchState::NotRunning
        }
    }

    #[must_use]
    pub fn is_running(&self, recipient: RecipientId) -> bool {
        self.scheduler.exists(&Self::job_id(recipient))
    }
}
