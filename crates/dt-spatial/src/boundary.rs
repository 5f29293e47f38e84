//! World-rectangle boundary handling: `none` / `wrap` / `reflect` (§4.7).

use dt_core::config::BoundaryMode;
use dt_core::geo::{Rect, Vec2};
use dt_core::WorldConfig;

/// The world rectangle as a [`Rect`], for reuse by both boundary and
/// keep-out logic.
pub(crate) fn rect_of(config: &WorldConfig) -> Rect {
    config.rect.into()
}

/// Apply the boundary rule to one agent's position and velocity in place.
pub fn enforce_agent(p: &mut Vec2, v: &mut Vec2, config: &WorldConfig) {
    match config.boundary_mode {
        BoundaryMode::None => {}
        BoundaryMode::Wrap => wrap(p, config),
        BoundaryMode::Reflect => reflect_agent(p, v, config),
    }
}

/// Apply the boundary rule to a controller position (no velocity state).
pub fn enforce_controller(p: &mut Vec2, config: &WorldConfig) {
    match config.boundary_mode {
        BoundaryMode::None => {}
        BoundaryMode::Wrap => wrap(p, config),
        BoundaryMode::Reflect => reflect_position_only(p, config),
    }
}

fn wrap(p: &mut Vec2, config: &WorldConfig) {
    let r = config.rect;
    p.x = wrap_axis(p.x, r.xmin, r.xmax);
    p.y = wrap_axis(p.y, r.ymin, r.ymax);
}

fn wrap_axis(v: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    let offset = (v - min).rem_euclid(span);
    min + offset
}

fn reflect_agent(p: &mut Vec2, v: &mut Vec2, config: &WorldConfig) {
    let r = config.rect;
    if p.x < r.xmin {
        p.x = r.xmin + (r.xmin - p.x);
        v.x = reflect_component(v.x, config.restitution, true);
    } else if p.x > r.xmax {
        p.x = r.xmax - (p.x - r.xmax);
        v.x = reflect_component(v.x, config.restitution, false);
    }
    if p.y < r.ymin {
        p.y = r.ymin + (r.ymin - p.y);
        v.y = reflect_component(v.y, config.restitution, true);
    } else if p.y > r.ymax {
        p.y = r.ymax - (p.y - r.ymax);
        v.y = reflect_component(v.y, config.restitution, false);
    }
}

fn reflect_position_only(p: &mut Vec2, config: &WorldConfig) {
    let r = config.rect;
    if p.x < r.xmin {
        p.x = r.xmin + (r.xmin - p.x);
    } else if p.x > r.xmax {
        p.x = r.xmax - (p.x - r.xmax);
    }
    if p.y < r.ymin {
        p.y = r.ymin + (r.ymin - p.y);
    } else if p.y > r.ymax {
        p.y = r.ymax - (p.y - r.ymax);
    }
}

/// Dampen the normal velocity component by `-restitution`; if that still
/// leaves the component pointing out of the rectangle, take its absolute
/// value so the agent actually heads back inward.
fn reflect_component(component: f32, restitution: f32, low_wall: bool) -> f32 {
    let reflected = -restitution * component;
    let still_heading_out = if low_wall { reflected < 0.0 } else { reflected > 0.0 };
    if still_heading_out {
        reflected.abs() * if low_wall { 1.0 } else { -1.0 }
    } else {
        reflected
    }
}
