//! Time management utilities

use std::time::Instant;

/// Frame clock driving the scene tick
///
/// The clock only advances when told to, either with a measured wall-clock
/// delta ([`FrameClock::tick_measured`]) or a fixed delta
/// ([`FrameClock::advance`]). Animation reads time from here, never from the
/// system clock, so a run with fixed deltas is reproducible.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self {
            last_frame: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by a fixed delta in seconds
    ///
    /// Negative or non-finite deltas count as a zero-length frame.
    pub fn advance(&mut self, delta_seconds: f32) {
        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };
        self.delta_time = delta;
        self.total_time += f64::from(delta);
        self.frame_count += 1;
    }

    /// Advance by the wall-clock time since the previous measured tick
    ///
    /// The first call produces a zero delta. Returns the delta used.
    pub fn tick_measured(&mut self) -> f32 {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame = Some(now);
        self.advance(delta);
        delta
    }

    /// Time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total elapsed time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.total_time
    }

    /// Total elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.total_time * 1000.0
    }

    /// Number of frames advanced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f64 {
        if self.total_time > 0.0 {
            self.frame_count as f64 / self.total_time
        } else {
            0.0
        }
    }

    /// Return to time zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance_accumulates() {
        let mut clock = FrameClock::new();
        for _ in 0..60 {
            clock.advance(1.0 / 60.0);
        }
        assert_eq!(clock.frame_count(), 60);
        assert!((clock.elapsed_seconds() - 1.0).abs() < 1e-5);
        assert!((clock.elapsed_millis() - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn test_bad_delta_is_zero_length_frame() {
        let mut clock = FrameClock::new();
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_first_measured_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_measured(), 0.0);
        assert!(clock.tick_measured() >= 0.0);
    }
}
