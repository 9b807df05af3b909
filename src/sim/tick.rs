//! Per-frame simulation step
//!
//! Advances the launch controller and physics by one clamped time step.

use glam::Vec2;

use super::collision::{
    apply_block_hit, below_respawn_floor, circle_rect_collision, resolve_block_ground,
    resolve_block_walls, resolve_ground, resolve_walls,
};
use super::launch;
use super::state::{DespawnReason, ProjectileState, SimEvent, SimState, push_event};
use crate::clamp_dt;

/// Input for a single tick, in world space
///
/// Several pointer events between frames coalesce: the latest drag point
/// wins. Within a tick they apply in order press -> drag -> release.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch went down here
    pub press: Option<Vec2>,
    /// Latest pointer position while held
    pub drag: Option<Vec2>,
    /// Pointer/touch released
    pub release: bool,
}

/// Advance the simulation by `dt` seconds (clamped to `[0, max_step]`)
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt, state.tuning.max_step);
    state.time_ticks += 1;

    // Launch controller: refill the slot, then apply input
    launch::refresh(state);
    if let Some(point) = input.press {
        launch::press(state, point);
    }
    if let Some(point) = input.drag {
        launch::drag(state, point);
    }
    launch::position_ready(state);
    if input.release {
        launch::release(state);
    }

    launch::update_resting(state, dt);

    step_projectile(state, dt);
    strike_blocks(state);
    step_blocks(state, dt);

    let lost = state
        .projectile
        .as_ref()
        .filter(|p| below_respawn_floor(p, &state.tuning))
        .map(|p| p.id);
    if let Some(id) = lost {
        launch::despawn(state, id, DespawnReason::OutOfWorld);
    }

    maybe_rebuild_stack(state);
}

/// Gravity, drag, integration and ground/wall response for a flying projectile
fn step_projectile(state: &mut SimState, dt: f32) {
    let tuning = &state.tuning;
    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };
    if projectile.state != ProjectileState::Flying {
        return;
    }

    projectile.vel.y -= tuning.gravity * dt;
    projectile.vel *= tuning.air_drag;
    projectile.pos += projectile.vel * dt;

    resolve_ground(projectile, tuning);
    resolve_walls(projectile, tuning);

    if projectile.state == ProjectileState::Resting {
        let id = projectile.id;
        log::debug!(
            "Projectile {} resting at ({:.1}, {:.1})",
            id,
            projectile.pos.x,
            projectile.pos.y
        );
        push_event(&mut state.events, SimEvent::ProjectileRested { id });
    }
}

/// Test the flying projectile against every live block
///
/// Every overlapping block receives an impulse computed from the
/// projectile's velocity at the start of the pass; each hit then damps the
/// projectile independently.
fn strike_blocks(state: &mut SimState) {
    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };
    if projectile.state != ProjectileState::Flying {
        return;
    }

    let incoming = projectile.vel;
    for block in state.blocks.iter_mut().filter(|b| b.alive) {
        let contact =
            circle_rect_collision(projectile.pos, projectile.radius, block.pos, block.size);
        if !contact.hit {
            continue;
        }

        if apply_block_hit(block, incoming, &state.tuning, &mut state.rng) {
            log::debug!("Block {} knocked loose", block.id);
        }
        projectile.vel *= state.tuning.hit_damping;
        push_event(&mut state.events, SimEvent::BlockStruck { block_id: block.id });
    }
}

/// Free dynamics for struck blocks; settled blocks leave the simulation
fn step_blocks(state: &mut SimState, dt: f32) {
    let tuning = &state.tuning;
    for block in state.blocks.iter_mut().filter(|b| b.alive && b.falling) {
        block.vel.y -= tuning.gravity * dt;
        block.vel *= tuning.block_drag;
        block.pos += block.vel * dt;
        block.angle += block.spin * dt;

        resolve_block_walls(block, tuning);
        resolve_block_ground(block, tuning);

        if !block.alive {
            log::debug!("Block {} settled", block.id);
            state.stats.blocks_cleared += 1;
            push_event(&mut state.events, SimEvent::BlockSettled { block_id: block.id });
        }
    }
}

/// Rebuild the stack once it is fully cleared and the sling is idle
fn maybe_rebuild_stack(state: &mut SimState) {
    if !state.tuning.auto_rebuild || state.blocks.is_empty() || state.alive_block_count() > 0 {
        return;
    }
    let idle = state.projectile_state() == Some(ProjectileState::Ready) && !state.aim.dragging;
    if !idle {
        return;
    }

    state.build_stack();
    state.stats.rounds_cleared += 1;
    log::info!("Stack cleared after {} shots, rebuilding", state.stats.shots_fired);
    push_event(&mut state.events, SimEvent::StackRebuilt);
}
