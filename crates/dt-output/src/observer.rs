//! `SimOutputObserver` — bridges `dt_sim::SimObserver` to a [`JobStore`].

use std::collections::HashMap;

use dt_agent::{ControllerStore, FlockStore};
use dt_behavior::Plan;
use dt_core::{Tick, Vec2};
use dt_schedule::{Job, JobId, JobStatus};
use dt_sim::SimObserver;

use crate::snapshot::CohesionDebug;
use crate::store::JobStore;
use crate::Snapshot;

/// A [`SimObserver`] that builds a [`Snapshot`] every tick and syncs job
/// records to a [`JobStore`] on status transitions (§6, §7).
///
/// Sync failures are logged at `warn` level and never propagate into the
/// simulation loop, per the "persistence failure" entry in the error
/// taxonomy — the in-memory job list stays authoritative regardless.
pub struct SimOutputObserver<S: JobStore> {
    store: S,
    start_unix_secs: i64,
    /// Simulated seconds per outer tick (`microsteps_per_tick * dt`),
    /// mirroring `dt_core::SimClock::tick_duration_secs` so this observer's
    /// notion of wall time agrees with the driver's clock.
    tick_duration_secs: f64,
    obstacles: Vec<Vec<Vec2>>,
    /// Every `periodic_every` ticks, re-sync every `running` job even
    /// without a status transition, to keep `remaining_time` fresh.
    periodic_every: u64,
    last_status: HashMap<JobId, JobStatus>,
    paused: bool,
    latest: Option<Snapshot>,
}

impl<S: JobStore> SimOutputObserver<S> {
    pub fn new(
        store: S,
        start_unix_secs: i64,
        tick_duration_secs: f64,
        obstacles: Vec<Vec<Vec2>>,
        periodic_every: u64,
    ) -> Self {
        Self {
            store,
            start_unix_secs,
            tick_duration_secs,
            obstacles,
            periodic_every: periodic_every.max(1),
            last_status: HashMap::new(),
            paused: false,
            latest: None,
        }
    }

    /// Set the embedder-controlled pause bit stamped into future snapshots.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// The most recently published snapshot, if any.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn unix_time(&self, tick: Tick) -> i64 {
        self.start_unix_secs + (tick.0 as f64 * self.tick_duration_secs) as i64
    }

    fn sync(&mut self, job: &Job) {
        if let Err(e) = self.store.sync_job(job) {
            log::warn!("job store sync failed for job {}: {e}", job.id);
        }
    }
}

impl<S: JobStore> SimObserver for SimOutputObserver<S> {
    fn on_snapshot(
        &mut self,
        tick: Tick,
        flock: &FlockStore,
        controllers: &ControllerStore,
        jobs: &[Job],
        plan: &Plan,
    ) {
        for job in jobs {
            let prev = self.last_status.insert(job.id, job.status);
            let transitioned = prev != Some(job.status);
            let due_for_periodic = job.status == JobStatus::Running && tick.0 % self.periodic_every == 0;
            if transitioned || due_for_periodic {
                self.sync(job);
            }
        }

        let (target_sheep_indices, cohesion_debug) = match plan {
            Plan::DoNothing => (Vec::new(), None),
            Plan::DronePositions { target_sheep_indices, debug, .. } => {
                (target_sheep_indices.clone(), Some(CohesionDebug { gcm: debug.gcm, radius: debug.radius }))
            }
        };

        let snapshot = Snapshot {
            tick: tick.0,
            unix_time_secs: self.unix_time(tick),
            agent_positions: flock.positions.clone(),
            agent_velocities: flock.velocities.clone(),
            controller_positions: controllers.positions.clone(),
            controller_apply_repulsion: controllers.apply_repulsion.clone(),
            target_sheep_indices,
            cohesion_debug,
            obstacles: self.obstacles.clone(),
            jobs: jobs.to_vec(),
            paused: self.paused,
        };
        log::trace!("{snapshot}");
        self.latest = Some(snapshot);
    }
}
