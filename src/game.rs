//! Simulation context owner
//!
//! `Game` ties the frame clock, the simulation state, the viewport and the
//! pending input together. Host adapters push pointer and resize events in
//! between frames and call `frame` once per display refresh.

use glam::Vec2;

use crate::clock::FrameClock;
use crate::sim::{Snapshot, SimEvent, SimState, TickInput, launch, tick, trajectory};
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Pointer events collected between two frames
///
/// No queue: repeated moves overwrite each other and the latest wins.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: TickInput,
}

impl InputLatch {
    pub fn on_press_near_anchor(&mut self, world: Vec2) {
        self.pending.press = Some(world);
        // A new press starts a new gesture
        self.pending.release = false;
        self.pending.drag = None;
    }

    pub fn on_drag_move(&mut self, world: Vec2) {
        self.pending.drag = Some(world);
    }

    pub fn on_release(&mut self) {
        self.pending.release = true;
    }

    /// Hand the collected input to a tick and clear the latch
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}

/// Game instance holding all simulation state
pub struct Game {
    state: SimState,
    clock: FrameClock,
    viewport: Viewport,
    input: InputLatch,
}

impl Game {
    pub fn new(tuning: Tuning) -> Self {
        let clock = FrameClock::new(tuning.max_step);
        let viewport = Viewport::new(tuning.world_width, tuning.world_height);
        log::info!(
            "Sling Stack initialized: world {}x{}, {} blocks, seed {}",
            tuning.world_width,
            tuning.world_height,
            tuning.block_layout.len(),
            tuning.seed
        );
        Self {
            state: SimState::new(tuning),
            clock,
            viewport,
            input: InputLatch::default(),
        }
    }

    /// Run one frame at timestamp `now` (seconds) and return what to draw
    pub fn frame(&mut self, now: f64) -> Snapshot {
        let dt = self.clock.advance(now);
        let input = self.input.take();
        tick(&mut self.state, &input, dt);
        Snapshot::capture(&self.state)
    }

    /// Current render snapshot without advancing time
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    // === Input adapter (world space) ===

    pub fn on_press_near_anchor(&mut self, world: Vec2) {
        self.input.on_press_near_anchor(world);
    }

    pub fn on_drag_move(&mut self, world: Vec2) {
        self.input.on_drag_move(world);
    }

    pub fn on_release(&mut self) {
        self.input.on_release();
    }

    // === Input adapter (client pixels) ===

    pub fn press_screen(&mut self, client_x: f32, client_y: f32) {
        let world = self.viewport.screen_to_world(client_x, client_y);
        self.input.on_press_near_anchor(world);
    }

    pub fn drag_screen(&mut self, client_x: f32, client_y: f32) {
        let world = self.viewport.screen_to_world(client_x, client_y);
        self.input.on_drag_move(world);
    }

    /// Whether a press at `world` would start aiming
    pub fn is_interaction_eligible(&self, world: Vec2) -> bool {
        launch::is_interaction_eligible(&self.state, world)
    }

    // === Resize adapter ===

    pub fn set_display_size(&mut self, width_px: f32, height_px: f32) {
        self.viewport.set_display_size(width_px, height_px);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Predicted flight path for the current pull, if aiming
    pub fn aim_preview(&self, steps: usize) -> Vec<Vec2> {
        let Some(pull) = launch::pull_vector(&self.state) else {
            return Vec::new();
        };
        let tuning = &self.state.tuning;
        let start = tuning.anchor + pull;
        let vel = launch::launch_velocity(tuning.anchor, start, tuning.launch_power);
        trajectory::predict(tuning, start, vel, steps, 1.0 / 60.0)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
