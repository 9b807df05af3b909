//! Read-only views handed to the renderer
//!
//! Snapshots are owned copies, so nothing a renderer does with them can
//! reach back into `SimState`.

use glam::Vec2;
use serde::Serialize;

use super::launch;
use super::state::{ProjectileState, SimState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub state: ProjectileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockView {
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pivot for drawing the tumble
    pub center: Vec2,
    pub angle: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub anchor: Vec2,
    /// `None` while the slot is empty or the projectile has despawned
    pub projectile: Option<ProjectileView>,
    /// Live blocks in id order
    pub blocks: Vec<BlockView>,
    pub aiming: bool,
    /// Anchor -> projectile while aiming (for drawing the band)
    ///
    /// Points away from the launch direction: a pull of (-8, -6) launches
    /// toward (+8, +6) scaled by `launch_power`.
    pub pull: Option<Vec2>,
}

impl Snapshot {
    pub fn capture(state: &SimState) -> Self {
        let projectile = state
            .projectile
            .as_ref()
            .filter(|p| p.state != ProjectileState::Despawned)
            .map(|p| ProjectileView {
                id: p.id,
                pos: p.pos,
                radius: p.radius,
                state: p.state,
            });

        let blocks = state
            .alive_blocks()
            .map(|b| BlockView {
                id: b.id,
                pos: b.pos,
                size: b.size,
                center: b.center(),
                angle: b.angle,
            })
            .collect();

        Self {
            anchor: state.tuning.anchor,
            projectile,
            blocks,
            aiming: state.aim.dragging,
            pull: launch::pull_vector(state),
        }
    }
}
