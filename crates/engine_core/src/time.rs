//! Time management for the simulation loop.
//!
//! The clock is advanced explicitly by the caller so that every system sees
//! the same `now` within a tick and runs are reproducible.

use std::time::Duration;

/// Fixed-step frame clock.
#[derive(Debug)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep (default 60 Hz).
    fixed_timestep: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new clock at t = 0 ticking at 60 Hz.
    pub fn new() -> Self {
        Self::with_fixed_rate(60.0)
    }

    /// Create a new clock at t = 0 ticking at `hz`.
    pub fn with_fixed_rate(hz: f64) -> Self {
        let mut time = Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::ZERO,
        };
        time.set_fixed_rate(hz);
        time
    }

    /// Advance the clock by one fixed timestep.
    pub fn advance(&mut self) {
        self.advance_by(self.fixed_timestep);
    }

    /// Advance the clock by an arbitrary duration.
    pub fn advance_by(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Set the fixed timestep rate in Hz. Rates that do not give a usable
    /// timestep (non-positive, non-finite, or too small to represent) fall back to 60 Hz.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        let step = if hz > 0.0 {
            Duration::try_from_secs_f64(1.0 / hz)
                .ok()
                .filter(|step| !step.is_zero())
        } else {
            None
        };
        self.fixed_timestep = step.unwrap_or_else(|| {
            log::warn!("Invalid tick rate {} Hz, using 60 Hz", hz);
            Duration::from_secs_f64(1.0 / 60.0)
        });
    }
}
