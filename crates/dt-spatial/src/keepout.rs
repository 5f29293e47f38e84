//! Keep-out band enforcement against obstacle polygons and the world
//! rectangle (§4.5), plus the one-shot initial-position sanitation used at
//! construction (§4.6).

use dt_agent::FlockStore;
use dt_core::geo::{ClosestPoint, Vec2};
use dt_core::{Obstacle, WorldConfig};

/// Closest point over all obstacles, without cloning polygon geometry per
/// query (unlike `dt_core::geo::nearest_polygon`, which takes `&[Polygon]`).
///
/// Exposed at crate scope: `dt-sim`'s grazing/flocking obstacle-avoidance
/// terms (§4.3a, §4.3b) need the same nearest-obstacle query this module
/// uses for keep-out enforcement.
pub fn nearest_obstacle(p: Vec2, obstacles: &[Obstacle]) -> Option<ClosestPoint> {
    obstacles
        .iter()
        .map(|o| o.polygon.closest_point(p))
        .min_by(|a, b| a.signed_distance.abs().total_cmp(&b.signed_distance.abs()))
}

/// Run both keep-out passes (polygon, then world rectangle) against every
/// agent, resolving conflicts between the two when they disagree (§4.5
/// step 3).
pub fn enforce(flock: &mut FlockStore, config: &WorldConfig) {
    if config.obstacles.is_empty() {
        for i in 0..flock.count {
            if let Some(rect_corr) = rect_correction(flock.positions[i], config) {
                apply_correction(&mut flock.positions[i], &mut flock.velocities[i], rect_corr, config);
            }
        }
        return;
    }

    for i in 0..flock.count {
        let p = flock.positions[i];
        let poly_corr = poly_correction(p, &config.obstacles, config);
        let rect_corr = rect_correction(p, config);

        match (poly_corr, rect_corr) {
            (Some(mut pc), Some(mut rc)) => {
                if pc.1.dot(rc.1) < -0.5 {
                    if pc.0 >= rc.0 {
                        rc.0 *= 0.5;
                    } else {
                        pc.0 *= 0.5;
                    }
                }
                apply_correction(&mut flock.positions[i], &mut flock.velocities[i], pc, config);
                apply_correction(&mut flock.positions[i], &mut flock.velocities[i], rc, config);
            }
            (Some(pc), None) => {
                apply_correction(&mut flock.positions[i], &mut flock.velocities[i], pc, config);
            }
            (None, Some(rc)) => {
                apply_correction(&mut flock.positions[i], &mut flock.velocities[i], rc, config);
            }
            (None, None) => {}
        }
    }
}

/// `(magnitude, unit_normal)` of a correction, capped per §4.5 step 1.
type Correction = (f32, Vec2);

fn poly_correction(p: Vec2, obstacles: &[Obstacle], config: &WorldConfig) -> Option<Correction> {
    let cp = nearest_obstacle(p, obstacles)?;
    build_correction(cp, config.keep_out, config)
}

fn rect_correction(p: Vec2, config: &WorldConfig) -> Option<Correction> {
    let cp = crate::boundary::rect_of(config).signed_distance_inward(p);
    build_correction(cp, config.world_keep_out, config)
}

fn build_correction(cp: ClosestPoint, keep_out: f32, config: &WorldConfig) -> Option<Correction> {
    let penetration = keep_out - cp.signed_distance;
    if penetration <= 0.0 {
        return None;
    }
    let cap = config.keep_out_cap();
    let magnitude = penetration.min(2.0 * cap);
    Some((magnitude, cp.normal))
}

fn apply_correction(p: &mut Vec2, v: &mut Vec2, (magnitude, normal): Correction, config: &WorldConfig) {
    let correction_vec = normal * magnitude;
    *p += correction_vec;
    let correction_vel = correction_vec * (1.0 / config.dt);

    let heading_in = v.dot(normal) < 0.0;
    if heading_in {
        let normal_component = v.dot(normal);
        *v += normal * (-(1.0 + config.restitution) * normal_component);
        *v += correction_vel * 0.5;
    } else {
        *v += correction_vel * 0.3;
    }
}

/// Project any agent that starts inside (or too close to) an obstacle's
/// keep-out band outward to the band boundary plus a small epsilon.
/// One-shot, uncapped — this runs once at construction, not per tick (§4.6).
pub fn sanitize_initial_positions(flock: &mut FlockStore, config: &WorldConfig) {
    const EPS: f32 = 1e-3;
    if config.obstacles.is_empty() {
        return;
    }
    for i in 0..flock.count {
        let p = flock.positions[i];
        if let Some(cp) = nearest_obstacle(p, &config.obstacles) {
            if cp.signed_distance < -config.keep_out {
                flock.positions[i] = cp.point + cp.normal * (config.keep_out + EPS);
            }
        }
    }
}
