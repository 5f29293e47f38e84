//! `World` — flock/controller state plus per-tick physics (§3, §4.3–§4.7).
//!
//! `World` owns exactly the state a tick needs to mutate: the SoA stores, the
//! immutable `WorldConfig`, the single seeded RNG, and the neighbor cache.
//! Everything else (job lifecycle, policy invocation, snapshot publishing)
//! lives in [`crate::driver`].

use dt_agent::{ControllerStore, ControllerStoreBuilder, FlockStore, FlockStoreBuilder};
use dt_behavior::Plan;
use dt_core::geo::{smooth_push, tangent_direction};
use dt_core::{AgentId, CoreResult, SimRng, Vec2, WorldConfig};
use dt_spatial::NeighborIndex;

use crate::error::{SimError, SimResult};

/// Flock/controller state and the physics that advances it one tick at a
/// time (§4.3).
pub struct World {
    pub flock: FlockStore,
    pub controllers: ControllerStore,
    pub config: WorldConfig,
    rng: SimRng,
    neighbors: NeighborIndex,
}

impl World {
    /// Validate `config` against the requested agent count, build the SoA
    /// stores at the given initial positions, and sanitize any agent that
    /// starts inside an obstacle's keep-out band (§4.6).
    pub fn new(
        config: WorldConfig,
        agent_positions: Vec<Vec2>,
        controller_positions: Vec<Vec2>,
        seed: u64,
    ) -> CoreResult<Self> {
        config.validate(agent_positions.len())?;

        let mut flock = FlockStoreBuilder::new(agent_positions.len()).build();
        flock.positions = agent_positions;
        flock.prev_positions = flock.positions.clone();

        let mut controllers = ControllerStoreBuilder::new(controller_positions.len()).build();
        controllers.positions = controller_positions;

        dt_spatial::keepout::sanitize_initial_positions(&mut flock, &config);

        let neighbors = NeighborIndex::new(flock.count);
        Ok(Self { flock, controllers, config, rng: SimRng::new(seed), neighbors })
    }

    /// Advance the world by one `dt` (`config.dt`), applying `plan` to the
    /// controllers and then the grazing/flocking physics to every sheep
    /// (§4.3–§4.7).
    pub fn step(&mut self, plan: &Plan) -> SimResult<()> {
        self.apply_plan(plan)?;
        self.advance_flock();
        dt_spatial::keepout::enforce(&mut self.flock, &self.config);
        for i in 0..self.flock.count {
            dt_spatial::boundary::enforce_agent(
                &mut self.flock.positions[i],
                &mut self.flock.velocities[i],
                &self.config,
            );
        }
        self.recover_non_finite();
        Ok(())
    }

    /// §4.3 "Plan application": move every controller to the policy's
    /// requested position (clamped by the boundary rule) and latch its
    /// repulsion flag. `Plan::DoNothing` withholds repulsion from everyone.
    fn apply_plan(&mut self, plan: &Plan) -> SimResult<()> {
        match plan {
            Plan::DoNothing => {
                for flag in &mut self.controllers.apply_repulsion {
                    *flag = false;
                }
            }
            Plan::DronePositions { positions, apply_repulsion, .. } => {
                let m = self.controllers.count;
                if positions.len() != m || apply_repulsion.len() != m {
                    return Err(SimError::PlanLengthMismatch {
                        expected: m,
                        got_positions: positions.len(),
                        got_repulsion: apply_repulsion.len(),
                    });
                }
                for j in 0..m {
                    let mut p = positions[j];
                    dt_spatial::boundary::enforce_controller(&mut p, &self.config);
                    self.controllers.positions[j] = p;
                    self.controllers.apply_repulsion[j] = apply_repulsion[j];
                }
            }
        }
        Ok(())
    }

    /// Steps 1–7 of §4.3: pressure, flock-factor hysteresis, the grazing and
    /// flocking candidate velocities, and integration.
    fn advance_flock(&mut self) {
        let n = self.flock.count;
        if n == 0 {
            return;
        }

        self.neighbors.refresh(&mut self.flock, self.config.k_nn, self.config.ra);

        let repulsion = close_repulsion(&self.flock, self.config.ra);

        // Step 2/3: per-agent controller pressure, via the union-of-push
        // formula over every repulsion-active controller.
        let mut pressure = vec![0.0_f32; n];
        for (i, p) in pressure.iter_mut().enumerate() {
            let mut complement = 1.0_f32;
            for j in 0..self.controllers.count {
                if !self.controllers.apply_repulsion[j] {
                    continue;
                }
                let d = (self.flock.positions[i] - self.controllers.positions[j]).length();
                complement *= 1.0 - smooth_push(d, self.config.rs);
            }
            *p = 1.0 - complement;
        }

        // Step 4: flock-factor hysteresis, rate-limited per direction.
        for i in 0..n {
            let delta = pressure[i] - self.flock.flock[i];
            let rate = if delta > 0.0 { self.config.rate_up } else { self.config.rate_down };
            self.flock.flock[i] =
                (self.flock.flock[i] + rate * delta * self.config.dt).clamp(0.0, 1.0);
        }

        // Steps 5/6: candidate velocities and their hysteretic blend.
        let mut new_velocities = Vec::with_capacity(n);
        for i in 0..n {
            let v_far = self.grazing_velocity(i, repulsion[i]);
            let v_near = self.flocking_velocity(i, repulsion[i]);
            let blend = self.flock.flock[i];
            new_velocities.push(v_near * blend + v_far * (1.0 - blend));
        }

        // Step 7: integrate.
        for i in 0..n {
            self.flock.velocities[i] = new_velocities[i];
            self.flock.positions[i] += new_velocities[i] * self.config.dt;
        }
    }

    /// §4.3a: the grazing (far-from-a-drone) candidate velocity for sheep
    /// `i`. `repulsion_i` is the pre-computed close-repulsion term (§4.4).
    fn grazing_velocity(&mut self, i: usize, repulsion_i: Vec2) -> Vec2 {
        let v_i = self.flock.velocities[i];

        if !self.rng.gen_bool(self.config.graze_p as f64) {
            return v_i * self.config.decay;
        }

        let h = repulsion_i * self.config.wr + self.rng.gen_gaussian_vec2() * 0.2;
        let mut h = h.normalized_or_zero(crate::EPS);

        let (n_obs, s_obs) = self.nearest_obstacle_normal(self.flock.positions[i]);
        if h.dot(n_obs) < 0.0 {
            h += tangent_direction(n_obs) * self.config.w_tan;
        }
        h += n_obs * (0.5 * self.config.w_obs);
        if s_obs <= self.config.keep_out {
            h = h - n_obs * h.dot(n_obs);
        }

        let h_hat = h.normalized_or_zero(crate::EPS);
        let v_des = h_hat * self.config.vmax;
        (v_i * self.config.decay + v_des * (1.0 - self.config.decay)).clamp_length(self.config.vmax)
    }

    /// §4.3b: the flocking (herded) candidate velocity for sheep `i`.
    fn flocking_velocity(&mut self, i: usize, repulsion_i: Vec2) -> Vec2 {
        let p_i = self.flock.positions[i];
        let v_i = self.flock.velocities[i];

        let neighbors = self.neighbors.within(&self.flock, AgentId(i as u32), self.config.r_attr, self.config.k_nn);
        let (a_i, al_i) = if neighbors.is_empty() {
            (Vec2::ZERO, Vec2::ZERO)
        } else {
            let count = neighbors.len() as f32;
            let mean_pos = neighbors.iter().fold(Vec2::ZERO, |acc, &id| acc + self.flock.positions[id.index()])
                * (1.0 / count);
            let mean_vel = neighbors.iter().fold(Vec2::ZERO, |acc, &id| acc + self.flock.velocities[id.index()])
                * (1.0 / count);
            (mean_pos - p_i, mean_vel.normalized_or_zero(crate::EPS))
        };

        let mut s_i = Vec2::ZERO;
        for j in 0..self.controllers.count {
            if !self.controllers.apply_repulsion[j] {
                continue;
            }
            let diff = p_i - self.controllers.positions[j];
            let d = diff.length();
            if d > crate::EPS {
                s_i += diff * (smooth_push(d, self.config.rs) / d);
            }
        }

        let prev_i = v_i.normalized_or_zero(crate::EPS);

        let mut h = repulsion_i * self.config.wr
            + a_i * self.config.wa
            + s_i * self.config.ws
            + prev_i * self.config.wm
            + al_i * self.config.w_align;

        let (n_obs, _s_obs) = self.nearest_obstacle_normal(p_i);
        if h.dot(n_obs) < 0.0 {
            h += tangent_direction(n_obs) * self.config.w_tan;
        }
        h += n_obs * self.config.w_obs;

        let speed = v_i.length();
        let noise_scale = if speed > 0.3 * self.config.vmax { 0.5 } else { 1.0 };
        h += self.rng.gen_gaussian_vec2() * (self.config.sigma * self.config.dt.sqrt() * noise_scale);

        let h_hat = h.normalized_or_zero(crate::EPS);
        (h_hat * self.config.vmax).clamp_length(self.config.vmax)
    }

    /// Outward unit normal and signed distance of the nearest obstacle to
    /// `p`, or a neutral reading (zero normal, `+inf` distance) when there
    /// are no obstacles.
    fn nearest_obstacle_normal(&self, p: Vec2) -> (Vec2, f32) {
        match dt_spatial::keepout::nearest_obstacle(p, &self.config.obstacles) {
            Some(cp) => (cp.normal, cp.signed_distance),
            None => (Vec2::ZERO, f32::INFINITY),
        }
    }

    /// Guard against a non-finite position slipping through the physics
    /// (e.g. from a degenerate division); teleport the agent to the world
    /// rectangle's center with zero velocity rather than propagate NaN.
    fn recover_non_finite(&mut self) {
        let center = dt_core::geo::Rect::from(self.config.rect).center();
        for i in 0..self.flock.count {
            if !self.flock.positions[i].is_finite() {
                log::warn!("agent {i} produced a non-finite position; recovering to rect center");
                self.flock.positions[i] = center;
                self.flock.velocities[i] = Vec2::ZERO;
            }
        }
    }
}

/// §4.4: the close-repulsion term for every agent, deliberately uncached —
/// `O(N)` per agent, parallelized across agents with Rayon when the
/// `parallel` feature is enabled.
fn close_repulsion(flock: &FlockStore, ra: f32) -> Vec<Vec2> {
    let ra_sq = ra * ra;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..flock.count).into_par_iter().map(|i| repulsion_at(flock, i, ra_sq)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..flock.count).map(|i| repulsion_at(flock, i, ra_sq)).collect()
    }
}

fn repulsion_at(flock: &FlockStore, i: usize, ra_sq: f32) -> Vec2 {
    let p = flock.positions[i];
    let mut acc = Vec2::ZERO;
    for j in 0..flock.count {
        if i == j {
            continue;
        }
        let diff = p - flock.positions[j];
        let d_sq = diff.length_sq();
        if d_sq > 0.0 && d_sq < ra_sq {
            acc += diff * (1.0 / d_sq.sqrt());
        }
    }
    acc
}
