//! Structure-of-Arrays storage for flock (sheep) and controller (drone)
//! state (§3).
//!
//! Two separate structs, not one combined `World` struct, because `dt-spatial`
//! and `dt-behavior` each need to borrow one side read-only while `dt-sim`
//! mutates the other — splitting storage by role avoids a `RefCell` or a
//! single giant struct with partial-borrow gymnastics.

use dt_core::{AgentId, Vec2};

// ── FlockStore ────────────────────────────────────────────────────────────────

/// SoA storage for the flock (every simulated sheep).
///
/// Every `Vec` field has exactly `count` elements; `AgentId::index()` is the
/// index into all of them.
pub struct FlockStore {
    /// Number of agents. Equals the length of every SoA `Vec` below.
    pub count: usize,

    /// Current positions.
    pub positions: Vec<Vec2>,
    /// Current velocities.
    pub velocities: Vec<Vec2>,
    /// Hysteretic grazing/flocking blend factor, per agent, in `[0, 1]`.
    pub flock: Vec<f32>,

    /// Positions as of the last neighbor-cache refresh. Used by
    /// `dt-spatial::NeighborIndex` to decide which agents moved far enough
    /// to force a refresh (§4.2).
    pub prev_positions: Vec<Vec2>,
    /// Cached neighbor indices from the last refresh, one list per agent,
    /// at most `k_nn` entries, closest first.
    pub nb_idx: Vec<Vec<AgentId>>,
}

impl FlockStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Center of mass of the flock, `G = mean(P)` (§4.3 step 1).
    ///
    /// Returns `Vec2::ZERO` for an empty flock.
    pub fn center_of_mass(&self) -> Vec2 {
        if self.positions.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self.positions.iter().fold(Vec2::ZERO, |acc, &p| acc + p);
        sum * (1.0 / self.positions.len() as f32)
    }

    /// Package-private constructor used by [`crate::builder::FlockStoreBuilder`].
    pub(crate) fn new(count: usize) -> Self {
        Self {
            count,
            positions: vec![Vec2::ZERO; count],
            velocities: vec![Vec2::ZERO; count],
            flock: vec![0.0; count],
            prev_positions: vec![Vec2::ZERO; count],
            nb_idx: vec![Vec::new(); count],
        }
    }
}

// ── ControllerStore ───────────────────────────────────────────────────────────

/// SoA storage for the controllers (every simulated drone).
pub struct ControllerStore {
    /// Number of controllers.
    pub count: usize,

    /// Current positions.
    pub positions: Vec<Vec2>,
    /// Whether agents feel repulsion from this controller this tick (§4.3).
    pub apply_repulsion: Vec<bool>,
}

impl ControllerStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Package-private constructor used by
    /// [`crate::builder::ControllerStoreBuilder`].
    pub(crate) fn new(count: usize) -> Self {
        Self { count, positions: vec![Vec2::ZERO; count], apply_repulsion: vec![false; count] }
    }
}
