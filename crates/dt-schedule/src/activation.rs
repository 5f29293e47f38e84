//! `ActivationQueue` — sparse activation-time index for `scheduled` jobs.
//!
//! Mirrors the donor framework's wake-queue pattern: rather than scanning
//! every job every tick to ask "is it due yet?", each job registers its
//! `start_at` once and the queue is drained for ticks at or before `now`.
//! Job counts are small compared to agent counts, so the win here is mostly
//! architectural consistency rather than raw throughput — but the same
//! inverted-lookup idea still avoids an O(jobs) scan every tick once a
//! deployment accumulates a long job history.

use std::collections::BTreeMap;

use crate::JobId;

/// An `f64` wrapper with a total order, so it can key a `BTreeMap`. Job
/// `start_at` timestamps are never `NaN` in practice (they come from Unix
/// time arithmetic), so `total_cmp` is sufficient.
#[derive(Copy, Clone, PartialEq, Debug)]
struct TimeKey(f64);

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Maps activation timestamps to the jobs scheduled to activate then.
#[derive(Default)]
pub struct ActivationQueue {
    inner: BTreeMap<TimeKey, Vec<JobId>>,
}

impl ActivationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `job` to activate at `start_at` (immediately if `None`,
    /// keyed at negative infinity so it always drains first).
    pub fn push(&mut self, job: JobId, start_at: Option<f64>) {
        let key = TimeKey(start_at.unwrap_or(f64::NEG_INFINITY));
        self.inner.entry(key).or_default().push(job);
    }

    /// Remove and return every job whose activation time is `<= now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<JobId> {
        let mut due = Vec::new();
        loop {
            let Some((&key, _)) = self.inner.iter().next() else { break };
            if key.0 > now {
                break;
            }
            if let Some(jobs) = self.inner.remove(&key) {
                due.extend(jobs);
            }
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(|v| v.len()).sum()
    }
}
