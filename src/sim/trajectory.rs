//! Aim guide: where a release from the current pull would travel
//!
//! Runs the same gravity + drag integration as the flying projectile,
//! without block or wall contacts, and stops at the ground.

use glam::Vec2;

use crate::clamp_dt;
use crate::tuning::Tuning;

/// Predict up to `steps` positions of a projectile launched from `start`
pub fn predict(tuning: &Tuning, start: Vec2, vel: Vec2, steps: usize, dt: f32) -> Vec<Vec2> {
    let dt = clamp_dt(dt, tuning.max_step);
    let floor = tuning.ground_height + tuning.projectile_radius;

    let mut points = Vec::with_capacity(steps);
    let (mut pos, mut vel) = (start, vel);
    for _ in 0..steps {
        vel.y -= tuning.gravity * dt;
        vel *= tuning.air_drag;
        pos += vel * dt;
        if pos.y <= floor {
            points.push(Vec2::new(pos.x, floor));
            break;
        }
        points.push(pos);
    }
    points
}
