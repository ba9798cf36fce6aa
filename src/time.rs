//! Frame timing for the demo loop.
//!
//! The emitter consumes time in whole milliseconds: how long the last frame
//! took, and how far into the current wall-clock second the frame landed.
//! [`FrameClock`] derives both from one monotonic counter so the phase and
//! the per-frame delta can never drift apart.

use std::time::{Duration, Instant};

/// Timing values for one frame, in the millisecond units the emitter consumes.
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Whole milliseconds since the previous tick.
    pub elapsed_ms: u32,
    /// Millisecond phase within the current second, in `[0, 1000)`.
    pub ms_into_second: u32,
}

/// Millisecond-granularity frame clock.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_total_ms: u64,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update: Instant,
}

/// How often the FPS estimate refreshes.
const FPS_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_total_ms: 0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update: now,
        }
    }

    /// Advance the clock by one frame. Call once per frame, before the
    /// emitter update.
    pub fn tick(&mut self) -> FrameTime {
        let total_ms = self.start.elapsed().as_millis() as u64;
        let elapsed_ms = (total_ms - self.last_total_ms) as u32;
        self.last_total_ms = total_ms;
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update);
        if fps_elapsed >= FPS_UPDATE_INTERVAL {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update = now;
        }

        FrameTime {
            elapsed_ms,
            ms_into_second: (total_ms % 1000) as u32,
        }
    }

    /// Total frames ticked since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Seconds since the clock started, for animation curves.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Reset to a freshly created state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_clock_has_no_frames() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_tick_measures_elapsed() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(15));
        let frame = clock.tick();

        assert!(frame.elapsed_ms >= 10);
        assert!(frame.ms_into_second < 1000);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_phase_and_delta_stay_consistent() {
        let mut clock = FrameClock::new();
        let mut last_total: i64 = 0;
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(3));
            let frame = clock.tick();
            // The phase must advance by exactly the delta, modulo the second.
            let total = last_total + i64::from(frame.elapsed_ms);
            assert_eq!(i64::from(frame.ms_into_second), total % 1000);
            last_total = total;
        }
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.reset();
        assert_eq!(clock.frame(), 0);
    }
}
