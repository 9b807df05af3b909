use glam::Vec2;
use proptest::prelude::*;
use sling_stack::sim::{ProjectileState, SimState, TickInput, circle_rect_collision, launch, tick};
use sling_stack::{Tuning, Viewport};

proptest! {
    #[test]
    fn viewport_round_trip(
        x in 0.0f32..140.0,
        y in 0.0f32..78.0,
        width in 100.0f32..4000.0,
        left in -500.0f32..500.0,
        top in -500.0f32..500.0,
    ) {
        let mut vp = Viewport::new(140.0, 78.0);
        vp.set_display_size(width, width * 78.0 / 140.0);
        vp.set_origin(left, top);

        let s = vp.world_to_screen(Vec2::new(x, y));
        let back = vp.screen_to_world(s.x, s.y);
        prop_assert!((back.x - x).abs() < 1e-2);
        prop_assert!((back.y - y).abs() < 1e-2);
    }

    #[test]
    fn oversized_dt_matches_max_step(
        dt in 0.034f32..1000.0,
        dx in -20.0f32..-1.0,
        dy in -15.0f32..-1.0,
    ) {
        let mut a = SimState::default();
        let mut b = SimState::default();
        let anchor = a.tuning.anchor;
        let max_step = b.tuning.max_step;
        let input = TickInput {
            press: Some(anchor),
            drag: Some(anchor + Vec2::new(dx, dy)),
            release: true,
        };

        tick(&mut a, &input, dt);
        tick(&mut b, &input, max_step);
        for _ in 0..30 {
            tick(&mut a, &TickInput::default(), dt);
            tick(&mut b, &TickInput::default(), max_step);
        }

        let (pa, pb) = (a.projectile.as_ref().unwrap(), b.projectile.as_ref().unwrap());
        prop_assert_eq!(pa.pos, pb.pos);
        prop_assert_eq!(pa.vel, pb.vel);
        prop_assert_eq!(pa.state, pb.state);
    }

    #[test]
    fn pull_clamped_to_max(angle in 0.0f32..std::f32::consts::TAU, extra in 0.01f32..200.0) {
        let mut state = SimState::new(Tuning::default());
        let anchor = state.tuning.anchor;
        let max_pull = state.tuning.max_pull;
        let dir = Vec2::new(angle.cos(), angle.sin());

        prop_assert!(launch::press(&mut state, anchor));
        launch::drag(&mut state, anchor + dir * (max_pull + extra));
        launch::position_ready(&mut state);

        let p = state.projectile.as_ref().unwrap();
        prop_assert_eq!(p.state, ProjectileState::Ready);
        let offset = p.pos - anchor;
        prop_assert!((offset.length() - max_pull).abs() < 1e-3);
        prop_assert!(offset.normalize().dot(dir) > 0.9999);
    }

    #[test]
    fn circle_covering_rect_always_hits(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        w in 0.1f32..30.0,
        h in 0.1f32..30.0,
        slack in 0.001f32..10.0,
    ) {
        let min = Vec2::new(x, y);
        let size = Vec2::new(w, h);
        let center = min + size * 0.5;
        let half_diag = size.length() * 0.5;
        prop_assert!(circle_rect_collision(center, half_diag + slack, min, size).hit);
    }

    #[test]
    fn distant_circle_never_hits(
        w in 0.1f32..30.0,
        h in 0.1f32..30.0,
        radius in 0.1f32..10.0,
        angle in 0.0f32..std::f32::consts::TAU,
        slack in 0.01f32..50.0,
    ) {
        let min = Vec2::new(50.0, 20.0);
        let size = Vec2::new(w, h);
        let rect_center = min + size * 0.5;
        let dist = radius + size.length() * 0.5 + slack;
        let center = rect_center + Vec2::new(angle.cos(), angle.sin()) * dist;
        prop_assert!(!circle_rect_collision(center, radius, min, size).hit);
    }
}
