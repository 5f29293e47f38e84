//! World configuration: tunable parameters, obstacle polygons, and the
//! boundary-handling mode (§3, §4.5, §4.7).

use crate::geo::{Polygon, Vec2};

/// How `World::step` handles an agent or controller that has crossed the
/// world rectangle's boundary (§4.7).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundaryMode {
    /// No enforcement; positions may leave the rectangle freely.
    #[default]
    None,
    /// Toroidal wrap-around.
    Wrap,
    /// Mirror across the violated wall, damping the normal velocity
    /// component by `restitution`.
    Reflect,
}

/// An obstacle polygon with its precomputed edge geometry, plus the
/// keep-out band applied around it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub polygon: Polygon,
}

impl Obstacle {
    pub fn new(vertices: Vec<Vec2>) -> Option<Self> {
        Some(Self { polygon: Polygon::new(vertices)? })
    }
}

/// The world rectangle `[xmin, xmax] x [ymin, ymax]`, reused for both
/// boundary handling and the `world_keep_out` band.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldRect {
    pub xmin: f32,
    pub xmax: f32,
    pub ymin: f32,
    pub ymax: f32,
}

impl From<WorldRect> for crate::geo::Rect {
    fn from(r: WorldRect) -> crate::geo::Rect {
        crate::geo::Rect { xmin: r.xmin, xmax: r.xmax, ymin: r.ymin, ymax: r.ymax }
    }
}

/// Immutable-per-run simulation parameters (§3).
///
/// Constructed once, by [`crate::WorldConfig::validate`] or by a builder in
/// `dt-agent`/`dt-sim`, and shared read-only by every tick.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    // Geometry
    /// Agent-to-agent close-repulsion radius.
    pub ra: f32,
    /// Controller sensing radius (repulsion falloff distance).
    pub rs: f32,
    /// Attraction/alignment neighbor cutoff radius.
    pub r_attr: f32,
    /// Max neighbors considered for attraction/alignment.
    pub k_nn: usize,
    pub vmax: f32,
    pub umax: f32,
    pub dt: f32,

    // Weights
    pub wr: f32,
    pub wa: f32,
    pub ws: f32,
    pub wm: f32,
    pub w_align: f32,
    pub w_obs: f32,
    pub w_tan: f32,
    pub sigma: f32,
    pub graze_p: f32,

    // Flock hysteresis rates (§4.3 step 4).
    pub rate_up: f32,
    pub rate_down: f32,

    // Grazing decay (§4.3a).
    pub decay: f32,

    // Obstacles and keep-out.
    pub obstacles: Vec<Obstacle>,
    pub keep_out: f32,
    pub world_keep_out: f32,

    // Boundary.
    pub boundary_mode: BoundaryMode,
    pub rect: WorldRect,
    pub restitution: f32,
}

impl WorldConfig {
    /// Checks the cross-field invariants SPEC_FULL §3 lists as load-bearing
    /// for the rest of the engine (`k_nn <= N - 1`, positive radii, a
    /// non-degenerate rectangle). `n_agents` is supplied by the caller since
    /// `WorldConfig` does not itself own the flock.
    pub fn validate(&self, n_agents: usize) -> Result<(), crate::error::CoreError> {
        if self.ra <= 0.0 || self.rs <= 0.0 || self.r_attr <= 0.0 {
            return Err(crate::error::CoreError::Config(
                "ra, rs, and r_attr must be positive".into(),
            ));
        }
        if self.vmax <= 0.0 || self.umax <= 0.0 || self.dt <= 0.0 {
            return Err(crate::error::CoreError::Config(
                "vmax, umax, and dt must be positive".into(),
            ));
        }
        if n_agents > 0 && self.k_nn > n_agents - 1 {
            return Err(crate::error::CoreError::Config(format!(
                "k_nn ({}) exceeds n_agents - 1 ({})",
                self.k_nn,
                n_agents - 1
            )));
        }
        if self.rect.xmax <= self.rect.xmin || self.rect.ymax <= self.rect.ymin {
            return Err(crate::error::CoreError::Config(
                "world rectangle must have positive width and height".into(),
            ));
        }
        Ok(())
    }

    /// `cap = 0.25 * vmax * dt`, the per-tick keep-out correction cap used
    /// in §4.5.
    #[inline]
    pub fn keep_out_cap(&self) -> f32 {
        0.25 * self.vmax * self.dt
    }
}
