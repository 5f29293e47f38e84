//! `ShepherdPolicy` — the herding planning policy (§4.8).
//!
//! Pure over its inputs: the policy itself stores only tuning configuration,
//! never simulation state. Every call to [`ShepherdPolicy::plan`] reads the
//! flock/controller snapshot and job list fresh and returns a [`Plan`];
//! `World::step` is the only thing that mutates simulation state.

use dt_agent::{ControllerStore, FlockStore};
use dt_core::geo::lerp_clamped;
use dt_core::Vec2;
use dt_schedule::Job;

use crate::plan::{Plan, PlanDebug};

/// A small floor on vector lengths used when normalizing a direction vector,
/// to avoid division by (near) zero when a drone sits exactly on its
/// waypoint (§4.8 step 6).
const DIRECTION_EPS: f32 = 1e-6;

/// Tuning configuration for [`ShepherdPolicy::plan`] (§4.8).
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShepherdPolicy {
    /// Cohesion radius target (`fN`).
    pub fn_radius: f32,
    /// Max controller speed, used for the candidate-next-position step.
    pub umax: f32,
    /// Distance below which a drone holds position rather than approach a
    /// sheep further (safety stop).
    pub too_close: f32,
    /// Distance behind the targeted sheep, away from the flock center, that
    /// a drone stands off to.
    pub collect_standoff: f32,
    /// When `true` (default), drones only apply repulsion once close to
    /// their waypoint, letting them fly over the flock en route. When
    /// `false`, every drone always applies repulsion.
    pub conditionally_apply_repulsion: bool,
}

impl ShepherdPolicy {
    /// §4.8: pick the first active job with an unsatisfied target, score and
    /// assign drones to sheep, and emit the resulting [`Plan`].
    pub fn plan(
        &self,
        flock: &FlockStore,
        controllers: &ControllerStore,
        jobs: &[Job],
        dt: f32,
    ) -> Plan {
        let Some(target) = select_target(jobs, &flock.positions) else {
            return Plan::DoNothing;
        };

        let n = flock.count;
        let m = controllers.count;
        let gcm = flock.center_of_mass();

        // Step 2: candidate scoring.
        let d_g: Vec<f32> = flock.positions.iter().map(|&p| (p - gcm).length()).collect();
        let d_goal: Vec<f32> = flock.positions.iter().map(|&p| target.distance_to(p)).collect();

        let max_d_g = d_g.iter().cloned().fold(0.0_f32, f32::max).max(DIRECTION_EPS);
        let mean_d_g = if n > 0 { d_g.iter().sum::<f32>() / n as f32 } else { 0.0 }.max(DIRECTION_EPS);
        let max_d_goal = d_goal.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        let cohesiveness = self.fn_radius / max_d_g;
        let mean_cohesiveness = self.fn_radius / mean_d_g;
        let goal_distance_ratio = max_d_goal / self.fn_radius;

        let w_gcm = lerp_clamped(0.8, 0.6, 0.3, 1.5, mean_cohesiveness)
            * lerp_clamped(0.5, 1.0, 1.0, 3.0, goal_distance_ratio);
        let w_goal = lerp_clamped(0.2, 0.4, 0.3, 1.5, mean_cohesiveness);
        let w_close_base = lerp_clamped(1.0, 0.2, 0.3, 1.5, mean_cohesiveness)
            * lerp_clamped(0.2, 1.0, 2.0, 4.0, goal_distance_ratio);

        let intrinsic: Vec<f32> =
            (0..n).map(|i| w_gcm * d_g[i] + w_goal * d_goal[i]).collect();

        // `d_d[i][j]`: distance from sheep i to controller j.
        let d_d: Vec<Vec<f32>> = (0..n)
            .map(|i| {
                (0..m)
                    .map(|j| (flock.positions[i] - controllers.positions[j]).length())
                    .collect()
            })
            .collect();

        // Step 3: drone<->sheep assignment via a score matrix and greedy
        // masked matching.
        let w_close = if m > 0 { w_close_base / m as f32 } else { 0.0 };
        let mut score = vec![vec![0.0_f32; m]; n];
        for i in 0..n {
            for j in 0..m {
                let closest_elsewhere = (0..m)
                    .filter(|&k| k != j)
                    .map(|k| d_d[i][k])
                    .fold(f32::INFINITY, f32::min);
                let closer_bonus = if d_d[i][j] < closest_elsewhere { 30.0 } else { 0.0 };
                score[i][j] = intrinsic[i] - w_close * d_d[i][j] + closer_bonus;
            }
        }

        let mut row_masked = vec![false; n];
        let mut col_masked = vec![false; m];
        let mut target_sheep_indices: Vec<Option<usize>> = vec![None; m];
        let mut assigned_sheep: Vec<Option<usize>> = vec![None; m];

        for _ in 0..m.min(n) {
            let mut best: Option<(usize, usize, f32)> = None;
            for i in 0..n {
                if row_masked[i] {
                    continue;
                }
                for j in 0..m {
                    if col_masked[j] {
                        continue;
                    }
                    let s = score[i][j];
                    if !s.is_finite() {
                        continue;
                    }
                    if best.is_none_or(|(_, _, best_s)| s > best_s) {
                        best = Some((i, j, s));
                    }
                }
            }
            let Some((i, j, _)) = best else { break };
            row_masked[i] = true;
            col_masked[j] = true;
            target_sheep_indices[j] = Some(i);
            assigned_sheep[j] = Some(i);
        }

        // Step 4: standoff waypoints.
        let waypoints: Vec<Vec2> = (0..m)
            .map(|j| match assigned_sheep[j] {
                None => Vec2::new(f32::NAN, f32::NAN),
                Some(i) => {
                    let sheep_p = flock.positions[i];
                    let away = gcm - sheep_p;
                    let len = away.length();
                    let c_hat = if len < DIRECTION_EPS { Vec2::ZERO } else { away * (1.0 / len) };
                    sheep_p - c_hat * self.collect_standoff
                }
            })
            .collect();

        // Step 5: per-drone repulsion gating.
        let apply_repulsion: Vec<bool> = (0..m)
            .map(|j| {
                if !self.conditionally_apply_repulsion {
                    return true;
                }
                let w = waypoints[j];
                if !w.is_finite() {
                    return false;
                }
                let close_threshold = lerp_clamped(2.0, 5.0, 0.8, 1.2, cohesiveness);
                (w - controllers.positions[j]).length() < close_threshold
            })
            .collect();

        // Step 6: drone motion with safety stop.
        let positions: Vec<Vec2> = (0..m)
            .map(|j| {
                let d_j = controllers.positions[j];
                let w = waypoints[j];
                if !w.is_finite() {
                    return d_j;
                }

                let diff = w - d_j;
                let denom = diff.length().max(DIRECTION_EPS);
                let u_hat = diff * (1.0 / denom);
                let candidate = d_j + u_hat * (self.umax * dt);

                let nearest_sheep_dist =
                    flock.positions.iter().map(|&p| (p - d_j).length()).fold(f32::INFINITY, f32::min);
                let safety_stop = nearest_sheep_dist < self.too_close && apply_repulsion[j];
                if safety_stop {
                    d_j
                } else {
                    candidate
                }
            })
            .collect();

        Plan::DronePositions {
            positions,
            apply_repulsion,
            target_sheep_indices,
            debug: PlanDebug { gcm, radius: self.fn_radius },
        }
    }
}

/// Step 1: the first active job with a non-null, unsatisfied target.
fn select_target<'a>(jobs: &'a [Job], positions: &[Vec2]) -> Option<&'a dt_schedule::Target> {
    jobs.iter()
        .filter(|job| job.is_active)
        .filter_map(|job| job.target.as_ref())
        .find(|target| !target.is_satisfied(positions))
}
