//! `JobStore` — the fire-and-forget persistence hook (§6, §7).

use dt_schedule::Job;

use crate::OutputResult;

/// Sync hook into an external job/scenario store.
///
/// The core never owns a persistent store itself (out of scope, §1) — this
/// trait is the seam an embedder plugs a database or HTTP client into.
/// [`crate::SimOutputObserver`] calls [`sync_job`][Self::sync_job] on every
/// status transition and again every `periodic_every` ticks while a job
/// stays `running`, to keep `remaining_time` fresh. Per §7, sync failures
/// are logged and never propagated into the simulation loop.
pub trait JobStore {
    fn sync_job(&mut self, job: &Job) -> OutputResult<()>;
}

/// A [`JobStore`] that discards every sync. Used where no persistent store
/// is wired up (tests, standalone runs).
pub struct NoopJobStore;

impl JobStore for NoopJobStore {
    fn sync_job(&mut self, _job: &Job) -> OutputResult<()> {
        Ok(())
    }
}
