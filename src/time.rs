//! Frame pacing for the render loop.
//!
//! The effects advance by a fixed step per frame, not per second, so the
//! only timing the crate needs is pacing (how long to sleep before the next
//! frame) and an FPS estimate for diagnostics.
//!
//! # Example
//!
//! ```ignore
//! use particlefx::time::FrameClock;
//!
//! let mut clock = FrameClock::with_target_fps(60.0);
//! loop {
//!     render_one_frame();
//!     if clock.tick() {
//!         log::debug!("{:.1} fps", clock.fps());
//!     }
//!     std::thread::sleep(clock.remaining_budget());
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame counter, FPS estimate and optional frame-rate cap.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// When the last frame completed.
    last_frame: Instant,
    /// Time between the last two ticks.
    delta: Duration,
    /// Total ticks since creation or reset.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update the FPS calculation.
    fps_update_interval: Duration,
    /// Minimum time per frame; `None` runs unpaced.
    target_interval: Option<Duration>,
}

impl FrameClock {
    /// Unpaced clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(1),
            target_interval: None,
        }
    }

    /// Clock capped at `fps` frames per second.
    pub fn with_target_fps(fps: f32) -> Self {
        let mut clock = Self::new();
        clock.set_target_fps(Some(fps));
        clock
    }

    /// Cap the frame rate. Non-positive or non-finite rates disable pacing.
    pub fn set_target_fps(&mut self, fps: Option<f32>) {
        self.target_interval = fps
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| Duration::from_secs_f32(1.0 / f));
    }

    /// Set how often the FPS estimate refreshes.
    pub fn set_fps_update_interval(&mut self, interval: Duration) {
        self.fps_update_interval = interval;
    }

    /// Record a completed frame.
    ///
    /// Returns `true` when the FPS estimate was refreshed by this tick.
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval && !fps_elapsed.is_zero() {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            true
        } else {
            false
        }
    }

    /// Time left before the next frame is due. Zero when unpaced or late.
    pub fn remaining_budget(&self) -> Duration {
        match self.target_interval {
            Some(interval) => interval.saturating_sub(self.last_frame.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Time between the last two ticks.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Target interval between frames, if paced.
    #[inline]
    pub fn target_interval(&self) -> Option<Duration> {
        self.target_interval
    }

    /// Reset counters, keeping the target rate.
    pub fn reset(&mut self) {
        let target = self.target_interval;
        let interval = self.fps_update_interval;
        *self = Self::new();
        self.target_interval = target;
        self.fps_update_interval = interval;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
