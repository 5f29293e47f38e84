//! `Snapshot` — the read-only external view of one tick's state (§6).

use dt_core::Vec2;
use dt_schedule::Job;

/// A plain-data view of the simulation at a single tick boundary.
///
/// Everything here is owned (not borrowed) so a snapshot can outlive the
/// tick it was taken from and cross an observer boundary freely. Built once
/// per tick by [`crate::SimOutputObserver::on_snapshot`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick: u64,
    pub unix_time_secs: i64,

    pub agent_positions: Vec<Vec2>,
    pub agent_velocities: Vec<Vec2>,

    pub controller_positions: Vec<Vec2>,
    pub controller_apply_repulsion: Vec<bool>,
    /// Per-controller assigned sheep index from the last plan, `None` when
    /// unassigned or the last plan was `DoNothing`.
    pub target_sheep_indices: Vec<Option<usize>>,

    /// Cohesion debug fields from the last plan (flock center of mass and
    /// cohesion radius), `None` while no job has ever produced a plan.
    pub cohesion_debug: Option<CohesionDebug>,

    /// Obstacle polygons, as vertex lists, for client-side rendering.
    pub obstacles: Vec<Vec<Vec2>>,

    pub jobs: Vec<Job>,

    /// Whether the embedder has paused the simulation loop. The core never
    /// sets this itself; embedders stamp it before publishing a snapshot.
    pub paused: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CohesionDebug {
    pub gcm: Vec2,
    pub radius: f32,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active_job = self.jobs.iter().find(|j| j.is_active).map(|j| j.id.to_string());
        write!(
            f,
            "tick {} — {} agents, {} jobs, active={}",
            self.tick,
            self.agent_positions.len(),
            self.jobs.len(),
            active_job.as_deref().unwrap_or("none"),
        )
    }
}
