//! Collision detection and response
//!
//! Detection is circle-vs-axis-aligned-rectangle plus the ground band and
//! side walls. Response functions mutate a single entity and are kept free of
//! the tick loop so each rule can be exercised on its own.

use glam::Vec2;
use rand::Rng;

use super::state::{Block, Projectile, ProjectileState};
use crate::safe_normalize;
use crate::tuning::Tuning;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at the contact, pointing toward the circle center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a circle and an axis-aligned rectangle
///
/// The circle center is clamped to the rectangle to find the nearest point;
/// the shapes touch iff that point is within `radius` (squared comparison).
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_min: Vec2,
    rect_size: Vec2,
) -> CollisionResult {
    let rect_max = rect_min + rect_size;
    let nearest = center.clamp(rect_min, rect_max);
    let offset = center - nearest;
    let dist_sq = offset.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Center inside the rectangle: no meaningful direction, push up
    let normal = if dist_sq > 0.0 {
        safe_normalize(offset)
    } else {
        Vec2::Y
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: radius - dist,
    }
}

/// Check a circle against the ground band (`y < ground_height` is solid)
pub fn ground_collision(center: Vec2, radius: f32, ground_height: f32) -> CollisionResult {
    if center.y - radius <= ground_height {
        return CollisionResult {
            hit: true,
            normal: Vec2::Y,
            penetration: ground_height - (center.y - radius),
        };
    }
    CollisionResult::miss()
}

/// Bounce a flying projectile off the ground
///
/// Returns true if the ground was touched. Drops the projectile into
/// `Resting` when the post-bounce speed is under `rest_speed`.
pub fn resolve_ground(projectile: &mut Projectile, tuning: &Tuning) -> bool {
    let contact = ground_collision(projectile.pos, projectile.radius, tuning.ground_height);
    if !contact.hit {
        return false;
    }

    projectile.pos.y = tuning.ground_height + projectile.radius;
    if projectile.vel.y > 0.0 {
        // Already leaving the ground
        return false;
    }
    projectile.vel.y = -projectile.vel.y * tuning.ground_restitution;
    projectile.vel.x *= tuning.ground_friction;

    if projectile.speed() < tuning.rest_speed {
        projectile.vel = Vec2::ZERO;
        projectile.come_to_rest();
    }
    true
}

/// Keep a projectile inside the side walls. Returns true on contact.
pub fn resolve_walls(projectile: &mut Projectile, tuning: &Tuning) -> bool {
    let r = projectile.radius;
    if projectile.pos.x - r < 0.0 {
        projectile.pos.x = r;
        projectile.vel.x = projectile.vel.x.abs() * tuning.wall_damping;
        true
    } else if projectile.pos.x + r > tuning.world_width {
        projectile.pos.x = tuning.world_width - r;
        projectile.vel.x = -projectile.vel.x.abs() * tuning.wall_damping;
        true
    } else {
        false
    }
}

/// Transfer a projectile strike into a block
///
/// Sets `falling`, adds a horizontal share of the projectile velocity, an
/// upward kick of at least `hit_min_kick`, and a random signed spin.
/// Returns true if this was the block's first strike.
pub fn apply_block_hit(
    block: &mut Block,
    projectile_vel: Vec2,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> bool {
    let first = block.start_falling();

    block.vel.x += projectile_vel.x * tuning.hit_transfer_x;
    block.vel.y += (projectile_vel.y * tuning.hit_transfer_y + tuning.hit_kick_base)
        .max(tuning.hit_min_kick);

    let spin_kick = tuning.hit_spin_kick.abs();
    block.spin += rng.random_range(-spin_kick..=spin_kick);

    first
}

/// Land a falling block on the ground. Returns true on contact.
///
/// Settles the block (removes it) once its post-bounce speed drops under
/// `settle_speed`.
pub fn resolve_block_ground(block: &mut Block, tuning: &Tuning) -> bool {
    if block.pos.y > tuning.ground_height {
        return false;
    }

    block.pos.y = tuning.ground_height;
    if block.vel.y > 0.0 {
        return false;
    }
    block.vel.y = -block.vel.y * tuning.block_ground_restitution;
    block.vel.x *= tuning.block_ground_friction;
    block.spin *= tuning.block_spin_damping;

    if block.vel.length() < tuning.settle_speed {
        block.settle();
    }
    true
}

/// Keep a falling block inside the side walls
pub fn resolve_block_walls(block: &mut Block, tuning: &Tuning) -> bool {
    if block.pos.x < 0.0 {
        block.pos.x = 0.0;
        block.vel.x = block.vel.x.abs() * tuning.wall_damping;
        true
    } else if block.pos.x + block.size.x > tuning.world_width {
        block.pos.x = tuning.world_width - block.size.x;
        block.vel.x = -block.vel.x.abs() * tuning.wall_damping;
        true
    } else {
        false
    }
}

/// Whether a flying projectile has dropped out of the world
#[inline]
pub fn below_respawn_floor(projectile: &Projectile, tuning: &Tuning) -> bool {
    projectile.state == ProjectileState::Flying && projectile.pos.y < tuning.respawn_floor
}
