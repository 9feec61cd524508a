//! Scheduler whose jobs only run when a test ticks them.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use crate::port::{JobId, JobTask, Scheduler};

#[derive(Default)]
pub struct ManualScheduler {
    jobs: Mutex<HashMap<JobId, (Duration, JobTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Interval `job` was registered with.
    pub fn interval(&self, job: &JobId) -> Option<Duration> {
        self.jobs.lock().get(job).map(|(interval, _)| *interval)
    }

    /// Run one tick of `job`. Returns `false` when it is not scheduled.
    pub async fn tick(&self, job: &JobId) -> bool {
        let task = self.jobs.lock().get(job).map(|(_, task)| task.clone());
        match task {
            Some(task) => {
                task().await;
                true
            }
            None => false,
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_recurring(&self, job: JobId, interval: Duration, task: JobTask) -> bool {
        let mut jobs = self.jobs.lock();
        if jobs.contains_key(&job) {
            return false;
        }
        jobs.insert(job, (interval, task));
        true
    }

    fn cancel(&self, job: &JobId) -> bool {
        self.jobs.lock().remove(job).is_some()
    }

    fn exists(&self, job: &JobId) -> bool {
        self.jobs.lock().contains_key(job)
    }
}
