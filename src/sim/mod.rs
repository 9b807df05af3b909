//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Explicit `(state, input, dt)` parameters, no globals
//! - Seeded RNG only
//! - Stable iteration order (blocks by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod launch;
pub mod layout;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trajectory;

pub use collision::{
    CollisionResult, apply_block_hit, circle_rect_collision, resolve_ground, resolve_walls,
};
pub use launch::is_interaction_eligible;
pub use snapshot::{BlockView, ProjectileView, Snapshot};
pub use state::{AimState, Block, DespawnReason, Projectile, ProjectileState, SimEvent, SimState};
pub use tick::{TickInput, tick};
