//! The `Sim` struct and its job-lifecycle tick loop (§4.10).

use dt_behavior::{Plan, ShepherdPolicy};
use dt_core::{SimClock, SimConfig, Tick};
use dt_schedule::{ActivationQueue, Job, JobStatus};

use crate::world::World;
use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Drives the outer-tick loop. Each outer tick:
///
/// 1. **Promote**: drain the activation queue for jobs due at `now` and
///    promote them to `running`.
/// 2. **Goal status**: update every `running`/maintenance-window
///    `completed` job's status against the current flock positions.
/// 3. **Activate**: at most one job is `active` at a time — the first
///    `running` job (in order) gets `is_active`. Step 2, next tick,
///    retires it to `completed` once its goal is satisfied.
/// 4. **Microsteps**: call [`ShepherdPolicy::plan`] and [`World::step`] a
///    total of `config.microsteps_per_tick` times.
/// 5. **Snapshot**: report the resulting state via the observer.
///
/// Create via [`crate::SimBuilder`].
pub struct Sim {
    /// Global configuration (outer cadence, microsteps, seed, horizon, …).
    pub config: SimConfig,
    /// Simulation clock — tracks the current outer tick and maps to wall time.
    pub clock: SimClock,
    /// Flock/controller state and the per-microstep physics.
    pub world: World,
    /// The planning policy, invoked once per microstep.
    pub policy: ShepherdPolicy,
    /// Every job the sim knows about, scheduled or otherwise.
    pub jobs: Vec<Job>,
    /// Activation index for jobs still `scheduled`.
    pub activation: ActivationQueue,
    /// The last microstep's plan, retained only for the observer snapshot.
    pub last_plan: Plan,
}

impl Sim {
    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary. Use
    /// [`crate::NoopObserver`] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let now = self.clock.current_tick;
            if self.config.end_tick().is_some_and(|end| now >= end) {
                break;
            }
            self.run_one_tick(now, observer)?;
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.run_one_tick(now, observer)?;
            self.clock.advance();
        }
        Ok(())
    }

    fn run_one_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);
        self.process_tick(now)?;
        observer.on_tick_end(now);
        observer.on_snapshot(now, &self.world.flock, &self.world.controllers, &self.jobs, &self.last_plan);
        Ok(())
    }

    /// §4.10: the five-step job-lifecycle + microstep sequence for one
    /// outer tick.
    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        let unix_now = self.clock.current_unix_secs();

        // Step 1: promote due scheduled jobs.
        for id in self.activation.drain_due(unix_now) {
            if let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) {
                if job.try_promote(unix_now) {
                    log::debug!("tick {now}: job {} promoted to running", job.id);
                }
            }
        }

        // Step 2: goal-status update for every job with a target.
        let positions = &self.world.flock.positions;
        for job in &mut self.jobs {
            let was_running = job.status == JobStatus::Running;
            job.update_goal_status(positions, unix_now);
            if was_running && job.status == JobStatus::Completed {
                log::info!("tick {now}: job {} completed", job.id);
            }
        }

        // Step 3: at most one active job — the first `running` job, in
        // order. A job stays active through the tick its goal becomes
        // satisfied; `update_goal_status` (step 2, next tick) is what
        // retires it to `completed`.
        let active_idx = self.jobs.iter().position(|job| job.status == JobStatus::Running);
        for (i, job) in self.jobs.iter_mut().enumerate() {
            job.is_active = Some(i) == active_idx;
        }

        // Step 4: advance physics by `microsteps_per_tick` inner steps.
        for _ in 0..self.config.microsteps_per_tick {
            let plan = self.policy.plan(&self.world.flock, &self.world.controllers, &self.jobs, self.config.dt);
            self.world.step(&plan)?;
            self.last_plan = plan;
        }

        Ok(())
    }
}
