//! Recurring job scheduler port.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;

/// Body of a recurring job. Called once per tick.
pub type JobTask = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Identity of a recurring job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs jobs on a fixed interval.
///
/// Cancelling stops future ticks; a tick already running completes.
pub trait Scheduler: Send + Sync {
    /// Register `task` under `job`. Returns `false` without side effects when
    /// a job with that identity already exists.
    fn schedule_recurring(&self, job: JobId, interval: Duration, task: JobTask) -> bool;

    /// Remove `job`. Returns `false` when it did not exist.
    fn cancel(&self, job: &JobId) -> bool;

    fn exists(&self, job: &JobId) -> bool;
}
