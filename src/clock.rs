//! Frame clock
//!
//! Called once per display refresh with the refresh timestamp. Produces a
//! delta clamped to `[0, max_step]` so a slow frame or a resumed background
//! tab never feeds the integrator a huge step.

use crate::clamp_dt;

/// Frames used for the rolling FPS estimate
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    max_step: f32,
    last_frame_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            max_step,
            last_frame_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now` (seconds) and return the clamped delta
    ///
    /// The first frame yields 0.
    pub fn advance(&mut self, now: f64) -> f32 {
        let raw = match self.last_frame_time {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last_frame_time = Some(now);
        self.track_fps(now);
        clamp_dt(raw, self.max_step)
    }

    fn track_fps(&mut self, now: f64) {
        // Oldest entry in the ring is the one about to be overwritten
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen += 1;

        if self.frames_seen > FPS_WINDOW {
            let elapsed = now - oldest;
            if elapsed > 0.0 {
                self.fps = (FPS_WINDOW as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Rolling frames-per-second over the last `FPS_WINDOW` frames
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Forget the last timestamp (e.g. after the host paused the loop)
    pub fn reset(&mut self) {
        self.last_frame_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(0.033);
        assert_eq!(clock.advance(12.5), 0.0);
    }

    #[test]
    fn test_normal_frame() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(1.0);
        let dt = clock.advance(1.016);
        assert!((dt - 0.016).abs() < 1e-5);
    }

    #[test]
    fn test_long_pause_clamped() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(1.0);
        assert_eq!(clock.advance(30.0), 0.033);
    }

    #[test]
    fn test_time_going_backwards_clamped() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(5.0);
        assert_eq!(clock.advance(4.0), 0.0);
        // Last time is still updated
        let dt = clock.advance(4.01);
        assert!((dt - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(0.033);
        clock.advance(1.0);
        clock.reset();
        assert_eq!(clock.advance(1.02), 0.0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new(0.033);
        for i in 0..=120 {
            clock.advance(i as f64 / 60.0);
        }
        assert_eq!(clock.fps(), 60);
    }
}
