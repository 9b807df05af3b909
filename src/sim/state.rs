//! Simulation state and core entity types
//!
//! `SimState` is the single context object the clock owns and hands to the
//! launch controller and integrator each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout;
use crate::consts::MAX_PENDING_EVENTS;
use crate::tuning::Tuning;

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    /// Sitting in the sling, follows the drag point while aiming
    Ready,
    /// Free flight under gravity
    Flying,
    /// Stopped on the ground, waiting out the rest timer
    Resting,
    /// Gone; the slot is refilled at the start of the next tick
    Despawned,
}

/// Why a projectile left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnReason {
    /// Rest timer expired
    Rested,
    /// Fell below the respawn floor
    OutOfWorld,
}

/// The player's projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: ProjectileState,
    /// Seconds spent in `Resting`
    pub rest_timer: f32,
}

impl Projectile {
    /// A fresh projectile sitting in the sling
    pub fn new(id: u32, anchor: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos: anchor,
            vel: Vec2::ZERO,
            radius,
            state: ProjectileState::Ready,
            rest_timer: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Enter `Resting` and zero the rest timer
    pub fn come_to_rest(&mut self) {
        self.state = ProjectileState::Resting;
        self.rest_timer = 0.0;
    }
}

/// A stack block (axis-aligned for collision, `angle` is visual tumble)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Bottom-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Tumble angle (radians)
    pub angle: f32,
    /// Angular velocity (radians/sec)
    pub spin: f32,
    /// Struck at least once, now under free dynamics
    pub falling: bool,
    /// Still part of the simulation
    pub alive: bool,
}

impl Block {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            vel: Vec2::ZERO,
            angle: 0.0,
            spin: 0.0,
            falling: false,
            alive: true,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Mark as struck. Returns true on the first strike only.
    pub fn start_falling(&mut self) -> bool {
        let first = !self.falling;
        self.falling = true;
        first
    }

    /// Remove from the simulation for good
    pub fn settle(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
        self.spin = 0.0;
    }
}

/// Pointer aiming state (only meaningful while the projectile is `Ready`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimState {
    /// A press was accepted and not yet released
    pub dragging: bool,
    /// Latest drag point in world space
    pub drag_point: Vec2,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Spawned { id: u32 },
    Launched { id: u32, velocity: Vec2 },
    BlockStruck { block_id: u32 },
    BlockSettled { block_id: u32 },
    ProjectileRested { id: u32 },
    ProjectileDespawned { id: u32, reason: DespawnReason },
    StackRebuilt,
}

/// Running counters for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    pub shots_fired: u32,
    pub blocks_cleared: u32,
    pub rounds_cleared: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub tuning: Tuning,
    /// The single projectile slot
    pub projectile: Option<Projectile>,
    /// Blocks in ascending id order (dead ones stay until the next rebuild)
    pub blocks: Vec<Block>,
    pub aim: AimState,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last `drain_events`
    pub events: Vec<SimEvent>,
    pub stats: SimStats,
    next_id: u32,
}

impl SimState {
    /// Create a new state with the initial stack and a projectile in the sling
    pub fn new(tuning: Tuning) -> Self {
        let rng = Pcg32::seed_from_u64(tuning.seed);
        let mut state = Self {
            tuning,
            projectile: None,
            blocks: Vec::new(),
            aim: AimState::default(),
            rng,
            time_ticks: 0,
            events: Vec::new(),
            stats: SimStats::default(),
            next_id: 1,
        };

        state.build_stack();
        state.spawn_projectile();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Put a fresh `Ready` projectile in the sling
    pub fn spawn_projectile(&mut self) {
        let id = self.next_entity_id();
        let projectile = Projectile::new(id, self.tuning.anchor, self.tuning.projectile_radius);
        log::info!("Projectile {} ready", id);
        self.projectile = Some(projectile);
        self.aim = AimState::default();
        push_event(&mut self.events, SimEvent::Spawned { id });
    }

    /// Replace all blocks with the configured layout
    pub fn build_stack(&mut self) {
        let first_id = self.next_id;
        self.next_id += self.tuning.block_layout.len() as u32;
        self.blocks = layout::build_blocks(&self.tuning.block_layout, first_id);
    }

    /// Blocks still in the simulation
    pub fn alive_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.alive)
    }

    pub fn alive_block_count(&self) -> usize {
        self.alive_blocks().count()
    }

    /// Current projectile state, if a projectile occupies the slot
    pub fn projectile_state(&self) -> Option<ProjectileState> {
        self.projectile.as_ref().map(|p| p.state)
    }

    /// Take all events queued since the last call
    ///
    /// Hosts that never drain only keep the newest `MAX_PENDING_EVENTS`.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Queue an event, dropping the oldest once the queue is full
pub fn push_event(events: &mut Vec<SimEvent>, event: SimEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        let excess = events.len() + 1 - MAX_PENDING_EVENTS;
        events.drain(..excess);
    }
    events.push(event);
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_ready_projectile_at_anchor() {
        let state = SimState::default();
        let p = state.projectile.as_ref().unwrap();
        assert_eq!(p.state, ProjectileState::Ready);
        assert_eq!(p.pos, state.tuning.anchor);
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(state.alive_block_count(), state.tuning.block_layout.len());
    }

    #[test]
    fn test_entity_ids_unique_and_ordered() {
        let state = SimState::default();
        let ids: Vec<u32> = state.blocks.iter().map(|b| b.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let pid = state.projectile.as_ref().unwrap().id;
        assert!(!ids.contains(&pid));
    }

    #[test]
    fn test_block_falls_once() {
        let mut block = Block::new(1, Vec2::new(10.0, 6.0), Vec2::splat(4.0));
        assert!(block.start_falling());
        assert!(!block.start_falling());
        assert!(block.falling);
    }

    #[test]
    fn test_spawn_emits_event() {
        let mut state = SimState::default();
        let events = state.drain_events();
        assert!(matches!(events.last(), Some(SimEvent::Spawned { .. })));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_event_queue_keeps_newest() {
        let mut events = Vec::new();
        for id in 0..300 {
            push_event(&mut events, SimEvent::Spawned { id });
        }
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.first(), Some(&SimEvent::Spawned { id: 44 }));
        assert_eq!(events.last(), Some(&SimEvent::Spawned { id: 299 }));
    }

    #[test]
    fn test_block_center() {
        let block = Block::new(1, Vec2::new(10.0, 6.0), Vec2::new(4.0, 8.0));
        assert_eq!(block.center(), Vec2::new(12.0, 10.0));
    }
}
