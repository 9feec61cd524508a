//! Tokio-backed recurring job scheduler.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::port::{JobId, JobTask, Scheduler};

/// Runs each job on its own task with a fixed interval.
///
/// The first tick fires immediately. Ticks missed while a round is still
/// running are skipped rather than queued. Cancelling drops the job's stop
/// handle; the job's loop notices on its next wait and exits without
/// interrupting a running round.
#[derive(Default)]
pub struct TokioScheduler {
    jobs: Arc<DashMap<JobId, watch::Sender<()>>>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_recurring(&self, job: JobId, every: Duration, task: JobTask) -> bool {
        let stop_rx = match self.jobs.entry(job.clone()) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(slot) => {
                let (stop_tx, stop_rx) = watch::channel(());
                slot.insert(stop_tx);
                stop_rx
            }
        };

        tokio::spawn(run_job(job, every, task, stop_rx));
        true
    }

    fn cancel(&self, job: &JobId) -> bool {
        self.jobs.remove(job).is_some()
    }

    fn exists(&self, job: &JobId) -> bool {
        self.jobs.contains_key(job)
    }
}

async fn run_job(job: JobId, every: Duration, task: JobTask, mut stop: watch::Receiver<()>) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(%job, "Job started");

    loop {
        tokio::select! {
            biased;
            // Errors once the sender is dropped by `cancel`.
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => {
                debug!(%job, "Job tick");
                task().await;
            }
        }
    }

    info!(%job, "Job stopped");
}
