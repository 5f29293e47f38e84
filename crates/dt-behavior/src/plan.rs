//! The planning policy's per-tick output (§3, §4.8).

use dt_core::Vec2;

/// Debug fields attached to a [`Plan::DronePositions`] for visualization
/// (§4.8 step 6, §6).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanDebug {
    /// Flock global center of mass at planning time.
    pub gcm: Vec2,
    /// Cohesion radius target (`fN`) used to derive this tick's weights.
    pub radius: f32,
}

/// The tagged union a [`crate::ShepherdPolicy`] hands to `World::step`.
///
/// `World::step` never produces one itself; it only consumes whatever the
/// policy emits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Plan {
    /// No active job has an unsatisfied target: controllers hold position
    /// and stop repelling the flock.
    DoNothing,

    /// Drive every controller to `positions[j]`, with `apply_repulsion[j]`
    /// controlling whether the flock feels it this tick.
    ///
    /// All three per-controller vectors and `debug` are produced together;
    /// `World::step` validates `positions.len() == apply_repulsion.len() ==`
    /// the controller count before applying them (§4.3).
    DronePositions {
        positions: Vec<Vec2>,
        apply_repulsion: Vec<bool>,
        /// The sheep index each drone is herding, if any (for visualization
        /// and the repulsion-gating rule in step 5).
        target_sheep_indices: Vec<Option<usize>>,
        debug: PlanDebug,
    },
}
