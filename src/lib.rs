//! Sling Stack - slingshot vs. block stack simulation core
//!
//! Core modules:
//! - `sim`: Simulation (launch state machine, physics, collisions)
//! - `viewport`: World <-> display surface coordinate mapping
//! - `clock`: Frame clock with clamped delta time
//! - `game`: Simulation context owner and input latch
//! - `tuning`: Data-driven simulation constants

pub mod clock;
pub mod error;
pub mod game;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use clock::FrameClock;
pub use error::TuningError;
pub use game::{Game, InputLatch};
pub use tuning::{BlockSpec, Tuning};
pub use viewport::Viewport;

use glam::Vec2;

/// Default simulation constants (overridable through `Tuning`)
pub mod consts {
    /// World extent in world units (aspect ~16:9)
    pub const WORLD_WIDTH: f32 = 140.0;
    pub const WORLD_HEIGHT: f32 = 78.0;
    /// Ground band thickness; `y < GROUND_HEIGHT` is solid
    pub const GROUND_HEIGHT: f32 = 6.0;
    /// Gravity magnitude (world units/s²)
    pub const GRAVITY: f32 = 90.0;

    /// Largest step the integrator will take (seconds)
    pub const MAX_STEP: f32 = 0.033;

    /// Sling anchor
    pub const ANCHOR_X: f32 = 18.0;
    pub const ANCHOR_Y: f32 = 20.0;
    pub const MAX_PULL: f32 = 20.0;
    pub const LAUNCH_POWER: f32 = 9.0;
    /// Extra press tolerance around the anchor / projectile
    pub const INTERACTION_MARGIN: f32 = 6.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 2.2;
    /// Per-step multiplicative air drag
    pub const AIR_DRAG: f32 = 0.999;
    pub const REST_SPEED: f32 = 1.2;
    pub const REST_WAIT: f32 = 1.0;
    pub const RESPAWN_FLOOR: f32 = -10.0;

    /// Surface response
    pub const GROUND_RESTITUTION: f32 = 0.42;
    pub const GROUND_FRICTION: f32 = 0.72;
    pub const WALL_DAMPING: f32 = 0.45;

    /// Projectile -> block impulse transfer
    pub const HIT_TRANSFER_X: f32 = 0.22;
    pub const HIT_TRANSFER_Y: f32 = 0.14;
    pub const HIT_KICK_BASE: f32 = 7.0;
    pub const HIT_MIN_KICK: f32 = 6.0;
    pub const HIT_SPIN_KICK: f32 = 3.0;
    /// Projectile velocity retained after striking a block
    pub const HIT_DAMPING: f32 = 0.7;

    /// Falling block dynamics
    pub const BLOCK_DRAG: f32 = 0.995;
    pub const BLOCK_GROUND_RESTITUTION: f32 = 0.25;
    pub const BLOCK_GROUND_FRICTION: f32 = 0.8;
    pub const BLOCK_SPIN_DAMPING: f32 = 0.7;
    pub const SETTLE_SPEED: f32 = 1.8;

    /// Default stack: columns of square blocks plus a lintel on top
    pub const BLOCK_SIZE: f32 = 6.0;
    pub const STACK_LEFT: f32 = 96.0;
    pub const STACK_COLUMNS: u32 = 3;
    pub const STACK_ROWS: u32 = 4;
    pub const STACK_GAP: f32 = 1.0;

    /// Default RNG seed for spin impulses
    pub const DEFAULT_SEED: u64 = 0x5EED_1234;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Below this length a vector is treated as having no direction
pub const EPSILON: f32 = 1e-6;

/// Normalize, treating a near-zero length as 1 so the result stays finite
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    let len = if len < EPSILON { 1.0 } else { len };
    v / len
}

/// Clamp a vector's length to `max`, preserving direction
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    if v.length() > max {
        safe_normalize(v) * max
    } else {
        v
    }
}

/// Clamp a raw frame delta into `[0, max_step]` (NaN counts as 0)
#[inline]
pub fn clamp_dt(dt: f32, max_step: f32) -> f32 {
    if dt.is_nan() { 0.0 } else { dt.clamp(0.0, max_step) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_normalize_zero() {
        let n = safe_normalize(Vec2::ZERO);
        assert!(n.is_finite());
        assert_eq!(n, Vec2::ZERO);
    }

    #[test]
    fn test_clamp_length() {
        let v = clamp_length(Vec2::new(30.0, 40.0), 10.0);
        assert!((v.length() - 10.0).abs() < 1e-5);
        assert!((v.x - 6.0).abs() < 1e-5);

        let short = Vec2::new(3.0, 4.0);
        assert_eq!(clamp_length(short, 10.0), short);
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(-1.0, 0.033), 0.0);
        assert_eq!(clamp_dt(5.0, 0.033), 0.033);
        assert_eq!(clamp_dt(f32::NAN, 0.033), 0.0);
        assert_eq!(clamp_dt(0.016, 0.033), 0.016);
    }
}
