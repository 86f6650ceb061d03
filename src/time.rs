//! Frame timing.
//!
//! The physics world is always advanced by a constant step derived from the
//! frame-rate cap. The wall-clock delta between frames is still measured, but
//! only for bookkeeping: frame counting and an FPS estimate for the logs.
//!
//! # Example
//!
//! ```ignore
//! use spring_balls::time::FrameClock;
//!
//! let mut clock = FrameClock::new(60);
//!
//! // In the loop:
//! let timing = clock.tick();
//! world.step(timing.step);
//! ```

use std::time::{Duration, Instant};

/// Timing for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Wall-clock seconds since the previous tick.
    pub measured_delta: f32,
    /// Seconds the simulation advances this frame.
    pub step: f32,
    /// Frame number, starting at 1 for the first tick.
    pub frame: u64,
}

/// Fixed-step frame clock with FPS bookkeeping.
#[derive(Debug)]
pub struct FrameClock {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Fixed simulation step in seconds.
    step: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Clock for a loop capped at `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            step: 1.0 / fps.max(1) as f32,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(1000),
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) -> FrameTiming {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            tracing::debug!(fps = self.fps, frame = self.frame_count, "frame rate");
        }

        FrameTiming {
            measured_delta: self.delta_secs,
            step: self.step,
            frame: self.frame_count,
        }
    }

    /// Fixed simulation step in seconds.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Duration of one frame at the cap, for scheduling redraws.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f32(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.frame(), 0);
        assert!((clock.step() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_ignores_wall_clock() {
        let mut clock = FrameClock::new(60);
        thread::sleep(Duration::from_millis(50));
        let timing = clock.tick();

        assert!(timing.measured_delta >= 0.04);
        assert!((timing.step - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(timing.frame, 1);
    }

    #[test]
    fn test_frames_count_up() {
        let mut clock = FrameClock::new(30);
        clock.tick();
        clock.tick();
        let timing = clock.tick();
        assert_eq!(timing.frame, 3);
        assert_eq!(clock.frame(), 3);
    }

    #[test]
    fn test_zero_fps_does_not_divide_by_zero() {
        let clock = FrameClock::new(0);
        assert_eq!(clock.step(), 1.0);
    }
}
