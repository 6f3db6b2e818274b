//! Frame clock for the animation loop.
//!
//! [`FrameClock`] is the single source of elapsed and delta time for the
//! void. The windowed loop drives it from the wall clock with
//! [`FrameClock::tick`]; tests and headless callers step it by hand with
//! [`FrameClock::advance`] so transitions and birth are reproducible.
//!
//! # Example
//!
//! ```ignore
//! use voidfield::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Headless: exactly 16ms per frame
//! let (elapsed, delta) = clock.advance(0.016);
//!
//! // Windowed: real frame timing
//! let (elapsed, delta) = clock.tick();
//! ```

use std::time::Instant;

/// Elapsed/delta time tracking.
///
/// Elapsed time is accumulated from deltas so pausing and manual stepping
/// compose. The running total is kept in `f64`; an `f32` sum stops moving
/// once a frame delta drops below its precision.
#[derive(Debug)]
pub struct FrameClock {
    /// Wall-clock instant of the last `tick`.
    last_frame: Instant,
    /// Accumulated elapsed time in seconds.
    elapsed_secs: f64,
    /// Duration of the last frame in seconds.
    delta_secs: f32,
    /// Whether time is paused.
    paused: bool,
}

impl FrameClock {
    /// A clock starting at zero, now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            paused: false,
        }
    }

    /// Advance by the wall-clock time since the previous tick.
    ///
    /// Returns `(elapsed, delta)` in seconds.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(raw_delta)
    }

    /// Advance by `delta` seconds, ignoring the wall clock.
    ///
    /// Negative or non-finite deltas count as zero. Returns `(elapsed, delta)`.
    pub fn advance(&mut self, delta: f32) -> (f32, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed(), self.delta_secs);
        }

        self.delta_secs = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed_secs += f64::from(self.delta_secs);

        (self.elapsed(), self.delta_secs)
    }

    /// Total elapsed time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs as f32
    }

    /// Duration of the last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Duration of the last frame in milliseconds.
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_secs * 1000.0
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause time progression.
    ///
    /// While paused, `delta()` is 0 and `elapsed()` stops increasing.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after pausing. The paused interval is skipped, not replayed.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        tracing::debug!(paused = self.paused, "clock pause toggled");
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
