//! Data-driven simulation balance
//!
//! Every constant the simulation reads lives here so a JSON file can
//! override it. Missing fields fall back to `crate::consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Initial placement of one block (bottom-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BlockSpec {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// All tunable simulation values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    /// Maximum integrator step (seconds)
    pub max_step: f32,

    // === Sling ===
    pub anchor: Vec2,
    pub max_pull: f32,
    pub launch_power: f32,
    pub interaction_margin: f32,

    // === Projectile ===
    pub projectile_radius: f32,
    pub air_drag: f32,
    pub rest_speed: f32,
    /// Seconds a resting projectile lingers before despawning
    pub rest_wait: f32,
    pub respawn_floor: f32,

    // === Surfaces ===
    pub ground_restitution: f32,
    pub ground_friction: f32,
    pub wall_damping: f32,

    // === Block hits ===
    pub hit_transfer_x: f32,
    pub hit_transfer_y: f32,
    pub hit_kick_base: f32,
    pub hit_min_kick: f32,
    pub hit_spin_kick: f32,
    pub hit_damping: f32,

    // === Falling blocks ===
    pub block_drag: f32,
    pub block_ground_restitution: f32,
    pub block_ground_friction: f32,
    pub block_spin_damping: f32,
    pub settle_speed: f32,

    // === Session ===
    pub seed: u64,
    /// Rebuild the stack once every block has settled
    pub auto_rebuild: bool,
    pub block_layout: Vec<BlockSpec>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            max_step: MAX_STEP,

            anchor: Vec2::new(ANCHOR_X, ANCHOR_Y),
            max_pull: MAX_PULL,
            launch_power: LAUNCH_POWER,
            interaction_margin: INTERACTION_MARGIN,

            projectile_radius: PROJECTILE_RADIUS,
            air_drag: AIR_DRAG,
            rest_speed: REST_SPEED,
            rest_wait: REST_WAIT,
            respawn_floor: RESPAWN_FLOOR,

            ground_restitution: GROUND_RESTITUTION,
            ground_friction: GROUND_FRICTION,
            wall_damping: WALL_DAMPING,

            hit_transfer_x: HIT_TRANSFER_X,
            hit_transfer_y: HIT_TRANSFER_Y,
            hit_kick_base: HIT_KICK_BASE,
            hit_min_kick: HIT_MIN_KICK,
            hit_spin_kick: HIT_SPIN_KICK,
            hit_damping: HIT_DAMPING,

            block_drag: BLOCK_DRAG,
            block_ground_restitution: BLOCK_GROUND_RESTITUTION,
            block_ground_friction: BLOCK_GROUND_FRICTION,
            block_spin_damping: BLOCK_SPIN_DAMPING,
            settle_speed: SETTLE_SPEED,

            seed: DEFAULT_SEED,
            auto_rebuild: true,
            block_layout: crate::sim::layout::default_stack(GROUND_HEIGHT),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("{} ({}), using default tuning", e, path.display());
                Self::default()
            }
        }
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("max_step", self.max_step),
            ("gravity", self.gravity),
            ("max_pull", self.max_pull),
            ("projectile_radius", self.projectile_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::NonPositive { name });
            }
        }

        let non_negative = [
            ("launch_power", self.launch_power),
            ("interaction_margin", self.interaction_margin),
            ("rest_speed", self.rest_speed),
            ("rest_wait", self.rest_wait),
            ("settle_speed", self.settle_speed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TuningError::Negative { name, value });
            }
        }

        if self.ground_height < 0.0 || self.ground_height >= self.world_height {
            return Err(TuningError::InvalidWorld);
        }

        let anchor = self.anchor;
        let anchor_inside = (0.0..=self.world_width).contains(&anchor.x)
            && (self.ground_height..=self.world_height).contains(&anchor.y);
        if !anchor_inside {
            return Err(TuningError::AnchorOutsideWorld);
        }

        let coefficients = [
            ("air_drag", self.air_drag),
            ("ground_restitution", self.ground_restitution),
            ("ground_friction", self.ground_friction),
            ("wall_damping", self.wall_damping),
            ("hit_damping", self.hit_damping),
            ("block_drag", self.block_drag),
            ("block_ground_restitution", self.block_ground_restitution),
            ("block_ground_friction", self.block_ground_friction),
            ("block_spin_damping", self.block_spin_damping),
        ];
        for (name, value) in coefficients {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::InvalidCoefficient { name, value });
            }
        }

        for (index, spec) in self.block_layout.iter().enumerate() {
            let inside = spec.width > 0.0
                && spec.height > 0.0
                && spec.x >= 0.0
                && spec.x + spec.width <= self.world_width
                && spec.y >= self.ground_height
                && spec.y + spec.height <= self.world_height;
            if !inside {
                return Err(TuningError::InvalidBlock { index });
            }
        }

        Ok(())
    }
}
