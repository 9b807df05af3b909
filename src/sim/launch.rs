//! Launch controller: projectile lifecycle state machine
//!
//! `Ready` (aiming) -> `Flying` -> `Resting` -> `Despawned` -> respawn.
//! `Flying -> Resting` and `Flying -> Despawned` are decided by the
//! integrator; everything else happens here.

use glam::Vec2;

use super::state::{DespawnReason, ProjectileState, SimEvent, SimState, push_event};
use crate::clamp_length;

/// Whether a press at `point` may start aiming
///
/// Requires a `Ready` projectile, and the press must land within reach of
/// the anchor (`max_pull + interaction_margin`) or of the projectile itself.
pub fn is_interaction_eligible(state: &SimState, point: Vec2) -> bool {
    let Some(projectile) = &state.projectile else {
        return false;
    };
    if projectile.state != ProjectileState::Ready {
        return false;
    }

    let t = &state.tuning;
    let near_anchor = point.distance(t.anchor) <= t.max_pull + t.interaction_margin;
    let near_projectile =
        point.distance(projectile.pos) <= projectile.radius + t.interaction_margin;
    near_anchor || near_projectile
}

/// Refill the projectile slot if it is empty or holds a despawned projectile
pub fn refresh(state: &mut SimState) {
    let needs_spawn = match state.projectile_state() {
        None => true,
        Some(ProjectileState::Despawned) => true,
        Some(_) => false,
    };
    if needs_spawn {
        state.spawn_projectile();
    }
}

/// Begin aiming. Returns true if the press was accepted.
pub fn press(state: &mut SimState, point: Vec2) -> bool {
    if !is_interaction_eligible(state, point) {
        return false;
    }
    state.aim.dragging = true;
    state.aim.drag_point = point;
    true
}

/// Move the drag point (ignored unless aiming)
pub fn drag(state: &mut SimState, point: Vec2) {
    if state.aim.dragging {
        state.aim.drag_point = point;
    }
}

/// Position a `Ready` projectile from the current drag point
///
/// While aiming the projectile sits at `anchor + clamp(drag - anchor, max_pull)`;
/// otherwise it rests at the anchor.
pub fn position_ready(state: &mut SimState) {
    let anchor = state.tuning.anchor;
    let max_pull = state.tuning.max_pull;
    let aim = state.aim;

    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };
    if projectile.state != ProjectileState::Ready {
        return;
    }

    projectile.pos = if aim.dragging {
        anchor + clamp_length(aim.drag_point - anchor, max_pull)
    } else {
        anchor
    };
    projectile.vel = Vec2::ZERO;
}

/// Current pull vector (anchor -> projectile) while aiming
///
/// Opposite to the launch direction; see `launch_velocity`.
pub fn pull_vector(state: &SimState) -> Option<Vec2> {
    if !state.aim.dragging {
        return None;
    }
    state
        .projectile
        .as_ref()
        .filter(|p| p.state == ProjectileState::Ready)
        .map(|p| p.pos - state.tuning.anchor)
}

/// Velocity a release from `held` would produce
///
/// The projectile is flung back through the anchor: `(anchor - held) * power`.
#[inline]
pub fn launch_velocity(anchor: Vec2, held: Vec2, power: f32) -> Vec2 {
    (anchor - held) * power
}

/// Release the sling. Returns true if a projectile was launched.
pub fn release(state: &mut SimState) -> bool {
    if !state.aim.dragging {
        return false;
    }
    state.aim.dragging = false;

    let t = &state.tuning;
    let anchor = t.anchor;
    let power = t.launch_power;
    let held = anchor + clamp_length(state.aim.drag_point - anchor, t.max_pull);

    let Some(projectile) = state.projectile.as_mut() else {
        return false;
    };
    if projectile.state != ProjectileState::Ready {
        return false;
    }

    projectile.pos = held;
    projectile.vel = launch_velocity(anchor, held, power);
    projectile.state = ProjectileState::Flying;

    let (id, velocity) = (projectile.id, projectile.vel);
    log::info!("Projectile {} launched with velocity ({:.1}, {:.1})", id, velocity.x, velocity.y);
    push_event(&mut state.events, SimEvent::Launched { id, velocity });
    state.stats.shots_fired += 1;
    true
}

/// Advance the rest timer; despawn once it exceeds `rest_wait`
pub fn update_resting(state: &mut SimState, dt: f32) {
    let rest_wait = state.tuning.rest_wait;
    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };
    if projectile.state != ProjectileState::Resting {
        return;
    }

    projectile.rest_timer += dt;
    if projectile.rest_timer > rest_wait {
        let id = projectile.id;
        despawn(state, id, DespawnReason::Rested);
    }
}

/// Mark the projectile as gone
pub fn despawn(state: &mut SimState, id: u32, reason: DespawnReason) {
    let Some(projectile) = state.projectile.as_mut() else {
        return;
    };
    if projectile.id != id {
        return;
    }

    projectile.state = ProjectileState::Despawned;
    projectile.vel = Vec2::ZERO;
    log::debug!("Projectile {} despawned ({:?})", id, reason);
    push_event(&mut state.events, SimEvent::ProjectileDespawned { id, reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn ready_state() -> SimState {
        let mut state = SimState::new(Tuning::default());
        state.drain_events();
        state
    }

    #[test]
    fn test_press_far_from_anchor_rejected() {
        let mut state = ready_state();
        assert!(!press(&mut state, Vec2::new(120.0, 60.0)));
        assert!(!state.aim.dragging);
    }

    #[test]
    fn test_drag_clamped_to_max_pull() {
        let mut state = ready_state();
        let anchor = state.tuning.anchor;
        assert!(press(&mut state, anchor));
        drag(&mut state, anchor + Vec2::new(-60.0, -80.0));
        position_ready(&mut state);

        let p = state.projectile.as_ref().unwrap();
        assert!(((p.pos - anchor).length() - state.tuning.max_pull).abs() < 1e-4);
        assert!((p.pos - (anchor + Vec2::new(-12.0, -16.0))).length() < 1e-4);
    }

    #[test]
    fn test_drag_ignored_without_press() {
        let mut state = ready_state();
        drag(&mut state, Vec2::new(10.0, 14.0));
        position_ready(&mut state);
        assert_eq!(state.projectile.as_ref().unwrap().pos, state.tuning.anchor);
    }

    #[test]
    fn test_release_launches_back_through_anchor() {
        let mut state = ready_state();
        assert!(press(&mut state, Vec2::new(18.0, 20.0)));
        drag(&mut state, Vec2::new(10.0, 14.0));
        assert!(release(&mut state));

        let p = state.projectile.as_ref().unwrap();
        assert_eq!(p.state, ProjectileState::Flying);
        assert_eq!(p.pos, Vec2::new(10.0, 14.0));
        assert_eq!(p.vel, Vec2::new(72.0, 54.0));
        assert_eq!(state.stats.shots_fired, 1);
        assert!(matches!(state.events.last(), Some(SimEvent::Launched { .. })));
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut state = ready_state();
        assert!(!release(&mut state));
        assert_eq!(state.projectile_state(), Some(ProjectileState::Ready));
    }

    #[test]
    fn test_zero_pull_release_is_finite() {
        let mut state = ready_state();
        let anchor = state.tuning.anchor;
        press(&mut state, anchor);
        assert!(release(&mut state));
        let p = state.projectile.as_ref().unwrap();
        assert!(p.vel.is_finite());
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_not_eligible_while_flying() {
        let mut state = ready_state();
        let anchor = state.tuning.anchor;
        press(&mut state, anchor);
        drag(&mut state, anchor - Vec2::new(5.0, 5.0));
        release(&mut state);
        assert!(!is_interaction_eligible(&state, anchor));
    }

    #[test]
    fn test_rest_timer_despawns_after_wait() {
        let mut state = ready_state();
        let p = state.projectile.as_mut().unwrap();
        p.come_to_rest();

        update_resting(&mut state, 0.6);
        assert_eq!(state.projectile_state(), Some(ProjectileState::Resting));
        update_resting(&mut state, 0.6);
        assert_eq!(state.projectile_state(), Some(ProjectileState::Despawned));
    }

    #[test]
    fn test_refresh_respawns_with_new_id() {
        let mut state = ready_state();
        let old_id = state.projectile.as_ref().unwrap().id;
        despawn(&mut state, old_id, DespawnReason::OutOfWorld);

        refresh(&mut state);
        let p = state.projectile.as_ref().unwrap();
        assert_eq!(p.state, ProjectileState::Ready);
        assert_ne!(p.id, old_id);
        assert_eq!(p.pos, state.tuning.anchor);

        // Empty slot is refilled too
        state.projectile = None;
        refresh(&mut state);
        assert!(state.projectile.is_some());
    }
}
