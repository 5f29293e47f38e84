//! Fluent builder for constructing a [`Sim`].

use dt_behavior::{Plan, ShepherdPolicy};
use dt_core::{SimConfig, Vec2, WorldConfig};
use dt_schedule::{ActivationQueue, Job};

use crate::world::World;
use crate::{Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — outer cadence, microstep count, seed, horizon
/// - [`WorldConfig`] — physics/geometry parameters
/// - `agent_positions` / `controller_positions` — initial placement
/// - [`ShepherdPolicy`] — the planning policy
///
/// # Optional inputs (have defaults)
///
/// | Method     | Default          |
/// |------------|------------------|
/// | `.jobs(v)` | No jobs queued   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, world_config, agents, drones, policy)
///     .jobs(vec![job])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    world_config: WorldConfig,
    agent_positions: Vec<Vec2>,
    controller_positions: Vec<Vec2>,
    policy: ShepherdPolicy,
    jobs: Vec<Job>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(
        config: SimConfig,
        world_config: WorldConfig,
        agent_positions: Vec<Vec2>,
        controller_positions: Vec<Vec2>,
        policy: ShepherdPolicy,
    ) -> Self {
        Self { config, world_config, agent_positions, controller_positions, policy, jobs: Vec::new() }
    }

    /// Supply the jobs to queue at construction time. Each job is registered
    /// into the activation queue keyed on its `start_at` (immediately, if
    /// `None`). If not called, the sim starts with no jobs.
    pub fn jobs(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Validate inputs, build the world, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let world =
            World::new(self.world_config, self.agent_positions, self.controller_positions, self.config.seed)?;

        let mut activation = ActivationQueue::new();
        for job in &self.jobs {
            activation.push(job.id, job.start_at);
        }

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            world,
            policy: self.policy,
            jobs: self.jobs,
            activation,
            last_plan: Plan::DoNothing,
        })
    }
}
