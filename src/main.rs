//! Sling Stack headless runner
//!
//! Plays a scripted session through the same frame loop a browser host
//! would drive, logging simulation events and printing the final snapshot.
//!
//! Usage: `sling-stack [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use sling_stack::sim::SimEvent;
    use sling_stack::{Game, Tuning};

    env_logger::init();
    log::info!("Sling Stack (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    const FRAME: f64 = 1.0 / 60.0;
    const FRAMES_PER_SHOT: u32 = 420;
    // Pull offsets (world units from the anchor) for each scripted shot
    let shots = [
        Vec2::new(-14.0, -9.0),
        Vec2::new(-16.0, -7.0),
        Vec2::new(-15.0, -11.0),
    ];

    let mut game = Game::new(tuning);
    game.set_display_size(1280.0, 713.0);

    let anchor = game.state().tuning.anchor;
    let mut now = 0.0;
    game.frame(now);

    for (n, pull) in shots.iter().enumerate() {
        // Press, drag over a few frames, release
        game.on_press_near_anchor(anchor);
        for step in 1..=10 {
            now += FRAME;
            game.on_drag_move(anchor + *pull * (step as f32 / 10.0));
            game.frame(now);
        }
        log::info!("Shot {}: aim guide has {} points", n + 1, game.aim_preview(120).len());
        game.on_release();

        for _ in 0..FRAMES_PER_SHOT {
            now += FRAME;
            game.frame(now);
            for event in game.drain_events() {
                match event {
                    SimEvent::BlockStruck { block_id } => log::info!("Block {} struck", block_id),
                    SimEvent::BlockSettled { block_id } => log::info!("Block {} settled", block_id),
                    SimEvent::StackRebuilt => log::info!("Stack rebuilt"),
                    other => log::debug!("{:?}", other),
                }
            }
        }
    }

    let stats = game.state().stats;
    log::info!(
        "Done: {} shots, {} blocks cleared, {} rounds, {} blocks standing",
        stats.shots_fired,
        stats.blocks_cleared,
        stats.rounds_cleared,
        game.state().alive_block_count()
    );

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game::frame` directly
}
